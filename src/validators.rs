//! Fail-fast request parameter validation.
//!
//! Every operation validates its parameters before any network interaction.
//! Validators are pure: a single deterministic pass over the input shape, no
//! state, no partial success. Absent parameters are modeled as `None` and
//! always rejected with [`Error::InvalidArgument`].

use crate::error::{Error, Result};
use crate::params::{
    DestroyRetweetParameters, DestroyTweetParameters, GetFavoriteTweetsParameters,
    GetFollowerIdsParameters, GetFriendIdsParameters, GetRetweetsParameters, GetTweetParameters,
    GetUserParameters, GetUserTimelineParameters, PublishRetweetParameters,
    PublishTweetParameters, RegisterWebhookParameters, RemoveWebhookParameters, TweetIdentifier,
    UserIdentifier,
};

/// Reject a tweet reference that cannot be used in a query.
pub(crate) fn check_tweet_usable(tweet: Option<&TweetIdentifier>, field: &str) -> Result<()> {
    match tweet {
        None => Err(Error::invalid_argument(field, "tweet identifier is absent")),
        Some(t) if !t.is_usable() => Err(Error::invalid_argument(
            field,
            "tweet identifier carries no id",
        )),
        Some(_) => Ok(()),
    }
}

/// Reject a user reference that identifies nobody.
pub(crate) fn check_user_identifiable(user: Option<&UserIdentifier>, field: &str) -> Result<()> {
    match user {
        None => Err(Error::invalid_argument(field, "user identifier is absent")),
        Some(u) if !u.is_identifiable() => Err(Error::invalid_argument(
            field,
            "user identifier carries neither id nor screen name",
        )),
        Some(_) => Ok(()),
    }
}

fn require<P>(parameters: Option<&P>) -> Result<&P> {
    parameters.ok_or_else(|| Error::invalid_argument("parameters", "parameters are absent"))
}

/// Validate parameters for fetching a tweet.
pub fn validate_get_tweet(parameters: Option<&GetTweetParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_tweet_usable(p.tweet.as_ref(), "parameters.tweet")
}

/// Validate parameters for publishing a tweet.
///
/// The reply and quote references are optional; when supplied they must
/// themselves be usable identifiers.
pub fn validate_publish_tweet(parameters: Option<&PublishTweetParameters>) -> Result<()> {
    let p = require(parameters)?;
    if p.in_reply_to.is_some() {
        check_tweet_usable(p.in_reply_to.as_ref(), "parameters.in_reply_to")?;
    }
    if p.quoted.is_some() {
        check_tweet_usable(p.quoted.as_ref(), "parameters.quoted")?;
    }
    Ok(())
}

/// Validate parameters for destroying a tweet.
pub fn validate_destroy_tweet(parameters: Option<&DestroyTweetParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_tweet_usable(p.tweet.as_ref(), "parameters.tweet")
}

/// Validate parameters for listing retweets.
pub fn validate_get_retweets(parameters: Option<&GetRetweetsParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_tweet_usable(p.tweet.as_ref(), "parameters.tweet")
}

/// Validate parameters for publishing a retweet.
pub fn validate_publish_retweet(parameters: Option<&PublishRetweetParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_tweet_usable(p.tweet.as_ref(), "parameters.tweet")
}

/// Validate parameters for destroying a retweet.
pub fn validate_destroy_retweet(parameters: Option<&DestroyRetweetParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_tweet_usable(p.tweet.as_ref(), "parameters.tweet")
}

/// Validate parameters for iterating favorite tweets.
pub fn validate_get_favorite_tweets(
    parameters: Option<&GetFavoriteTweetsParameters>,
) -> Result<()> {
    let p = require(parameters)?;
    check_user_identifiable(p.user.as_ref(), "parameters.user")
}

/// Validate parameters for fetching a user profile.
pub fn validate_get_user(parameters: Option<&GetUserParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_user_identifiable(p.user.as_ref(), "parameters.user")
}

/// Validate parameters for iterating friend ids.
pub fn validate_get_friend_ids(parameters: Option<&GetFriendIdsParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_user_identifiable(p.user.as_ref(), "parameters.user")
}

/// Validate parameters for iterating follower ids.
pub fn validate_get_follower_ids(parameters: Option<&GetFollowerIdsParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_user_identifiable(p.user.as_ref(), "parameters.user")
}

/// Validate parameters for iterating a user timeline.
pub fn validate_get_user_timeline(parameters: Option<&GetUserTimelineParameters>) -> Result<()> {
    let p = require(parameters)?;
    check_user_identifiable(p.user.as_ref(), "parameters.user")
}

/// Validate parameters for registering a webhook.
pub fn validate_register_webhook(parameters: Option<&RegisterWebhookParameters>) -> Result<()> {
    let p = require(parameters)?;
    if p.environment.is_empty() {
        return Err(Error::invalid_argument(
            "parameters.environment",
            "environment name is empty",
        ));
    }
    if p.url.is_empty() {
        return Err(Error::invalid_argument(
            "parameters.url",
            "callback url is empty",
        ));
    }
    Ok(())
}

/// Validate parameters for removing a webhook.
pub fn validate_remove_webhook(parameters: Option<&RemoveWebhookParameters>) -> Result<()> {
    let p = require(parameters)?;
    if p.environment.is_empty() {
        return Err(Error::invalid_argument(
            "parameters.environment",
            "environment name is empty",
        ));
    }
    if p.webhook_id.is_empty() {
        return Err(Error::invalid_argument(
            "parameters.webhook_id",
            "webhook id is empty",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: Error) -> String {
        match err {
            Error::InvalidArgument { field, .. } => field,
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn absent_parameters_fail_with_invalid_argument() {
        assert_eq!(field_of(validate_get_tweet(None).unwrap_err()), "parameters");
        assert_eq!(
            field_of(validate_publish_tweet(None).unwrap_err()),
            "parameters"
        );
        assert_eq!(
            field_of(validate_destroy_tweet(None).unwrap_err()),
            "parameters"
        );
        assert_eq!(
            field_of(validate_get_favorite_tweets(None).unwrap_err()),
            "parameters"
        );
    }

    #[test]
    fn get_tweet_reports_the_offending_field_path() {
        let params = GetTweetParameters::default();
        let err = validate_get_tweet(Some(&params)).unwrap_err();
        assert_eq!(field_of(err), "parameters.tweet");

        let params = GetTweetParameters {
            tweet: Some(TweetIdentifier::default()),
            ..Default::default()
        };
        let err = validate_get_tweet(Some(&params)).unwrap_err();
        assert_eq!(field_of(err), "parameters.tweet");
    }

    #[test]
    fn publish_tweet_accepts_absent_references() {
        let params = PublishTweetParameters::new("hello");
        assert!(validate_publish_tweet(Some(&params)).is_ok());
    }

    #[test]
    fn publish_tweet_rejects_reply_reference_without_id() {
        let params = PublishTweetParameters::new("hello").in_reply_to(TweetIdentifier::default());
        let err = validate_publish_tweet(Some(&params)).unwrap_err();
        assert_eq!(field_of(err), "parameters.in_reply_to");
    }

    #[test]
    fn publish_tweet_rejects_quote_reference_without_id() {
        let params = PublishTweetParameters::new("hello").quoting(TweetIdentifier::default());
        let err = validate_publish_tweet(Some(&params)).unwrap_err();
        assert_eq!(field_of(err), "parameters.quoted");
    }

    #[test]
    fn publish_tweet_accepts_usable_references() {
        let params = PublishTweetParameters::new("hello")
            .in_reply_to(TweetIdentifier::from_id(7))
            .quoting(TweetIdentifier::from_id(9));
        assert!(validate_publish_tweet(Some(&params)).is_ok());
    }

    #[test]
    fn favorites_without_identifiable_user_fail_on_parameters_user() {
        let params = GetFavoriteTweetsParameters {
            user: None,
            page_size: 200,
        };
        let err = validate_get_favorite_tweets(Some(&params)).unwrap_err();
        assert_eq!(field_of(err), "parameters.user");

        let params = GetFavoriteTweetsParameters {
            user: Some(UserIdentifier::default()),
            page_size: 200,
        };
        let err = validate_get_favorite_tweets(Some(&params)).unwrap_err();
        assert_eq!(field_of(err), "parameters.user");
    }

    #[test]
    fn user_identified_by_either_field_passes() {
        for user in [
            UserIdentifier::from_id(1),
            UserIdentifier::from_screen_name("jack"),
        ] {
            let params = GetFavoriteTweetsParameters::new(user);
            assert!(validate_get_favorite_tweets(Some(&params)).is_ok());
        }
    }

    #[test]
    fn webhook_validators_require_non_empty_fields() {
        let err =
            validate_register_webhook(Some(&RegisterWebhookParameters::new("", "https://cb")))
                .unwrap_err();
        assert_eq!(field_of(err), "parameters.environment");

        let err = validate_register_webhook(Some(&RegisterWebhookParameters::new("prod", "")))
            .unwrap_err();
        assert_eq!(field_of(err), "parameters.url");

        let err = validate_remove_webhook(Some(&RemoveWebhookParameters::new("prod", "")))
            .unwrap_err();
        assert_eq!(field_of(err), "parameters.webhook_id");
    }
}
