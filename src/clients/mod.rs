//! Client entry point and per-domain sub-clients.
//!
//! [`Client`] owns the transport and hands out cheap cloneable sub-clients
//! ([`TweetsClient`], [`UsersClient`], [`WebhooksClient`]). It also backs the
//! [`ClientContext`] capability injected into model facades, so objects
//! returned by one sub-client can navigate to related resources on their own.

mod tweets;
mod users;
mod webhooks;

pub use tweets::TweetsClient;
pub use users::UsersClient;
pub use webhooks::WebhooksClient;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::TwitterConfig;
use crate::cursor::{Cursor, Page};
use crate::dto::{TweetDto, UserDto};
use crate::error::Result;
use crate::models::ClientContext;
use crate::paging::{max_id_cursor_after, max_id_param, numeric_cursor_param, page_from_ids_dto};
use crate::params::UserIdentifier;
use crate::transport::TwitterHttpClient;

/// Authenticated Twitter API client.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: TwitterHttpClient,
}

impl Client {
    /// Build a client from credentials. Fails when any credential is empty
    /// or the HTTP client cannot be constructed.
    pub fn new(config: TwitterConfig) -> Result<Self> {
        let http = TwitterHttpClient::new(&config)?;
        Ok(Self {
            inner: Arc::new(ClientInner { http }),
        })
    }

    /// Tweet operations.
    #[must_use]
    pub fn tweets(&self) -> TweetsClient {
        TweetsClient::new(Arc::clone(&self.inner))
    }

    /// User operations.
    #[must_use]
    pub fn users(&self) -> UsersClient {
        UsersClient::new(Arc::clone(&self.inner))
    }

    /// Webhook operations.
    #[must_use]
    pub fn webhooks(&self) -> WebhooksClient {
        WebhooksClient::new(Arc::clone(&self.inner))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

#[async_trait]
impl ClientContext for ClientInner {
    async fn friend_ids_page(
        &self,
        user: &UserIdentifier,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<Page<u64>> {
        let dto = self
            .http
            .friend_ids_page(user, &numeric_cursor_param(cursor), page_size)
            .await?;
        Ok(page_from_ids_dto(dto))
    }

    async fn follower_ids_page(
        &self,
        user: &UserIdentifier,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<Page<u64>> {
        let dto = self
            .http
            .follower_ids_page(user, &numeric_cursor_param(cursor), page_size)
            .await?;
        Ok(page_from_ids_dto(dto))
    }

    async fn lookup_users(&self, ids: &[u64]) -> Result<Vec<UserDto>> {
        self.http.lookup_users(ids).await
    }

    async fn favorite_tweets_page(
        &self,
        user: &UserIdentifier,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<Page<TweetDto>> {
        let max_id = max_id_param(cursor);
        let tweets = self
            .http
            .favorites_page(user, max_id.as_deref(), page_size)
            .await?;
        let next = max_id_cursor_after(&tweets);
        Ok(Page {
            items: tweets,
            next,
        })
    }

    async fn user_timeline_page(
        &self,
        user: &UserIdentifier,
        cursor: &Cursor,
        page_size: u32,
        include_retweets: bool,
    ) -> Result<Page<TweetDto>> {
        let max_id = max_id_param(cursor);
        let tweets = self
            .http
            .user_timeline_page(user, max_id.as_deref(), page_size, include_retweets)
            .await?;
        let next = max_id_cursor_after(&tweets);
        Ok(Page {
            items: tweets,
            next,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Client pointed at a local mock server.
    pub(crate) fn client_for(uri: &str) -> Client {
        Client::new(TwitterConfig {
            consumer_key: "test_consumer_key".into(),
            consumer_secret: "test_consumer_secret".into(),
            access_token: "test_access_token".into(),
            access_token_secret: "test_access_token_secret".into(),
            api_url: uri.to_string(),
            ..Default::default()
        })
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn construction_rejects_missing_credentials() {
        let err = Client::new(TwitterConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
