//! Tweet operations.

use std::sync::Arc;

use crate::clients::ClientInner;
use crate::cursor::CursorIterator;
use crate::error::{Error, Result};
use crate::models::Tweet;
use crate::paging::FavoriteTweetsFetcher;
use crate::params::{
    DestroyRetweetParameters, DestroyTweetParameters, GetFavoriteTweetsParameters,
    GetRetweetsParameters, GetTweetParameters, PublishRetweetParameters, PublishTweetParameters,
};
use crate::validators;

/// Sub-client for tweet CRUD, retweets, and favorites.
///
/// Every operation validates its parameters before touching the network;
/// a validation failure is an [`Error::InvalidArgument`] with the path of
/// the offending field, and no request is sent.
#[derive(Clone)]
pub struct TweetsClient {
    inner: Arc<ClientInner>,
}

impl TweetsClient {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn attach(&self, dto: crate::dto::TweetDto) -> Tweet {
        Tweet::with_context(Arc::new(dto), Arc::clone(&self.inner) as _)
    }

    /// Fetch a single tweet.
    pub async fn get_tweet(&self, parameters: &GetTweetParameters) -> Result<Tweet> {
        validators::validate_get_tweet(Some(parameters))?;
        let tweet = parameters.tweet.as_ref().and_then(|t| t.id).unwrap_or(0);
        let dto = self
            .inner
            .http
            .get_tweet(tweet, parameters.include_entities)
            .await?;
        Ok(self.attach(dto))
    }

    /// Fetch several tweets by id in one call.
    pub async fn get_tweets(&self, tweet_ids: &[u64]) -> Result<Vec<Tweet>> {
        if tweet_ids.is_empty() {
            return Err(Error::invalid_argument(
                "tweet_ids",
                "at least one tweet id is required",
            ));
        }
        let dtos = self.inner.http.get_tweets(tweet_ids).await?;
        Ok(dtos.into_iter().map(|dto| self.attach(dto)).collect())
    }

    /// Publish a tweet, optionally as a reply or a quote.
    pub async fn publish_tweet(&self, parameters: &PublishTweetParameters) -> Result<Tweet> {
        validators::validate_publish_tweet(Some(parameters))?;
        let dto = self
            .inner
            .http
            .publish_tweet(
                &parameters.text,
                parameters.in_reply_to.and_then(|t| t.id),
                parameters.quoted.and_then(|t| t.id),
                parameters.possibly_sensitive,
            )
            .await?;
        Ok(self.attach(dto))
    }

    /// Destroy a tweet. Returns `true` once the upstream confirms deletion.
    pub async fn destroy_tweet(&self, parameters: &DestroyTweetParameters) -> Result<bool> {
        validators::validate_destroy_tweet(Some(parameters))?;
        let tweet = parameters.tweet.as_ref().and_then(|t| t.id).unwrap_or(0);
        self.inner.http.destroy_tweet(tweet).await?;
        Ok(true)
    }

    /// List the most recent retweets of a tweet.
    pub async fn get_retweets(&self, parameters: &GetRetweetsParameters) -> Result<Vec<Tweet>> {
        validators::validate_get_retweets(Some(parameters))?;
        let tweet = parameters.tweet.as_ref().and_then(|t| t.id).unwrap_or(0);
        let dtos = self.inner.http.get_retweets(tweet, parameters.count).await?;
        Ok(dtos.into_iter().map(|dto| self.attach(dto)).collect())
    }

    /// Retweet a tweet. Returns the retweet record.
    pub async fn publish_retweet(&self, parameters: &PublishRetweetParameters) -> Result<Tweet> {
        validators::validate_publish_retweet(Some(parameters))?;
        let tweet = parameters.tweet.as_ref().and_then(|t| t.id).unwrap_or(0);
        let dto = self.inner.http.publish_retweet(tweet).await?;
        Ok(self.attach(dto))
    }

    /// Undo a retweet. Returns `true` once the upstream confirms removal,
    /// mirroring [`Self::destroy_tweet`].
    pub async fn destroy_retweet(&self, parameters: &DestroyRetweetParameters) -> Result<bool> {
        validators::validate_destroy_retweet(Some(parameters))?;
        let tweet = parameters.tweet.as_ref().and_then(|t| t.id).unwrap_or(0);
        self.inner.http.destroy_retweet(tweet).await?;
        Ok(true)
    }

    /// Iterator over a user's favorite tweets, newest first.
    pub fn favorite_tweets(
        &self,
        parameters: &GetFavoriteTweetsParameters,
    ) -> Result<CursorIterator<FavoriteTweetsFetcher>> {
        validators::validate_get_favorite_tweets(Some(parameters))?;
        let user = parameters.user.clone().unwrap_or_default();
        Ok(CursorIterator::new(FavoriteTweetsFetcher {
            context: Arc::clone(&self.inner) as _,
            user,
            page_size: parameters.page_size,
        }))
    }
}
