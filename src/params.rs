//! Resource identifiers and request parameters.
//!
//! Parameter structs are plain data: the SDK reads them, never mutates them.
//! Validation lives in [`crate::validators`].

/// Identifies a user by numeric id or by handle. Exactly one must be present
/// for the identifier to be usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdentifier {
    /// Numeric user ID
    pub id: Option<u64>,

    /// Handle, without the leading `@`
    pub screen_name: Option<String>,
}

impl UserIdentifier {
    /// Identifier from a numeric user ID.
    #[must_use]
    pub const fn from_id(id: u64) -> Self {
        Self {
            id: Some(id),
            screen_name: None,
        }
    }

    /// Identifier from a handle.
    #[must_use]
    pub fn from_screen_name(screen_name: impl Into<String>) -> Self {
        Self {
            id: None,
            screen_name: Some(screen_name.into()),
        }
    }

    /// Whether the identifier designates a user at all.
    #[must_use]
    pub fn is_identifiable(&self) -> bool {
        self.id.is_some_and(|id| id > 0)
            || self.screen_name.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl From<u64> for UserIdentifier {
    fn from(id: u64) -> Self {
        Self::from_id(id)
    }
}

impl From<&str> for UserIdentifier {
    fn from(screen_name: &str) -> Self {
        Self::from_screen_name(screen_name)
    }
}

/// Identifies a tweet by numeric id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TweetIdentifier {
    /// Numeric tweet ID
    pub id: Option<u64>,
}

impl TweetIdentifier {
    /// Identifier from a numeric tweet ID.
    #[must_use]
    pub const fn from_id(id: u64) -> Self {
        Self { id: Some(id) }
    }

    /// Whether the identifier designates a tweet at all.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.id.is_some_and(|id| id > 0)
    }
}

impl From<u64> for TweetIdentifier {
    fn from(id: u64) -> Self {
        Self::from_id(id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tweet operations
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters for fetching a single tweet.
#[derive(Debug, Clone, Default)]
pub struct GetTweetParameters {
    /// Tweet to fetch
    pub tweet: Option<TweetIdentifier>,

    /// Whether to expand entities
    pub include_entities: bool,
}

impl GetTweetParameters {
    /// Parameters for the given tweet id.
    #[must_use]
    pub const fn new(tweet_id: u64) -> Self {
        Self {
            tweet: Some(TweetIdentifier::from_id(tweet_id)),
            include_entities: true,
        }
    }
}

/// Parameters for publishing a tweet.
#[derive(Debug, Clone, Default)]
pub struct PublishTweetParameters {
    /// Tweet text
    pub text: String,

    /// Tweet being replied to; optional, but when present it must carry an id
    pub in_reply_to: Option<TweetIdentifier>,

    /// Tweet being quoted; optional, but when present it must carry an id
    pub quoted: Option<TweetIdentifier>,

    /// Mark the tweet as possibly sensitive
    pub possibly_sensitive: bool,
}

impl PublishTweetParameters {
    /// Parameters for a plain text tweet.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the tweet being replied to.
    #[must_use]
    pub const fn in_reply_to(mut self, tweet: TweetIdentifier) -> Self {
        self.in_reply_to = Some(tweet);
        self
    }

    /// Set the tweet being quoted.
    #[must_use]
    pub const fn quoting(mut self, tweet: TweetIdentifier) -> Self {
        self.quoted = Some(tweet);
        self
    }
}

/// Parameters for destroying a tweet.
#[derive(Debug, Clone, Default)]
pub struct DestroyTweetParameters {
    /// Tweet to destroy
    pub tweet: Option<TweetIdentifier>,
}

impl DestroyTweetParameters {
    /// Parameters for the given tweet id.
    #[must_use]
    pub const fn new(tweet_id: u64) -> Self {
        Self {
            tweet: Some(TweetIdentifier::from_id(tweet_id)),
        }
    }
}

/// Parameters for listing the retweets of a tweet.
#[derive(Debug, Clone)]
pub struct GetRetweetsParameters {
    /// Tweet whose retweets are listed
    pub tweet: Option<TweetIdentifier>,

    /// Maximum number of retweets to return (API cap: 100)
    pub count: u32,
}

impl GetRetweetsParameters {
    /// Parameters for the given tweet id.
    #[must_use]
    pub const fn new(tweet_id: u64) -> Self {
        Self {
            tweet: Some(TweetIdentifier::from_id(tweet_id)),
            count: 100,
        }
    }
}

/// Parameters for publishing a retweet.
#[derive(Debug, Clone, Default)]
pub struct PublishRetweetParameters {
    /// Tweet to retweet
    pub tweet: Option<TweetIdentifier>,
}

impl PublishRetweetParameters {
    /// Parameters for the given tweet id.
    #[must_use]
    pub const fn new(tweet_id: u64) -> Self {
        Self {
            tweet: Some(TweetIdentifier::from_id(tweet_id)),
        }
    }
}

/// Parameters for destroying a retweet.
#[derive(Debug, Clone, Default)]
pub struct DestroyRetweetParameters {
    /// Retweeted tweet
    pub tweet: Option<TweetIdentifier>,
}

impl DestroyRetweetParameters {
    /// Parameters for the given tweet id.
    #[must_use]
    pub const fn new(tweet_id: u64) -> Self {
        Self {
            tweet: Some(TweetIdentifier::from_id(tweet_id)),
        }
    }
}

/// Parameters for iterating a user's favorite tweets.
#[derive(Debug, Clone)]
pub struct GetFavoriteTweetsParameters {
    /// User whose favorites are listed
    pub user: Option<UserIdentifier>,

    /// Page size (API cap: 200)
    pub page_size: u32,
}

impl GetFavoriteTweetsParameters {
    /// Parameters for the given user.
    #[must_use]
    pub fn new(user: impl Into<UserIdentifier>) -> Self {
        Self {
            user: Some(user.into()),
            page_size: 200,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User operations
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters for fetching a user profile.
#[derive(Debug, Clone, Default)]
pub struct GetUserParameters {
    /// User to fetch
    pub user: Option<UserIdentifier>,
}

impl GetUserParameters {
    /// Parameters for the given user.
    #[must_use]
    pub fn new(user: impl Into<UserIdentifier>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }
}

/// Parameters for iterating a user's friend ids.
#[derive(Debug, Clone)]
pub struct GetFriendIdsParameters {
    /// User whose friends are listed
    pub user: Option<UserIdentifier>,

    /// Page size (API cap: 5000)
    pub page_size: u32,
}

impl GetFriendIdsParameters {
    /// Parameters for the given user.
    #[must_use]
    pub fn new(user: impl Into<UserIdentifier>) -> Self {
        Self {
            user: Some(user.into()),
            page_size: 5000,
        }
    }
}

/// Parameters for iterating a user's follower ids.
#[derive(Debug, Clone)]
pub struct GetFollowerIdsParameters {
    /// User whose followers are listed
    pub user: Option<UserIdentifier>,

    /// Page size (API cap: 5000)
    pub page_size: u32,
}

impl GetFollowerIdsParameters {
    /// Parameters for the given user.
    #[must_use]
    pub fn new(user: impl Into<UserIdentifier>) -> Self {
        Self {
            user: Some(user.into()),
            page_size: 5000,
        }
    }
}

/// Parameters for iterating a user's timeline.
#[derive(Debug, Clone)]
pub struct GetUserTimelineParameters {
    /// User whose timeline is listed
    pub user: Option<UserIdentifier>,

    /// Page size (API cap: 200)
    pub page_size: u32,

    /// Whether retweets are included
    pub include_retweets: bool,
}

impl GetUserTimelineParameters {
    /// Parameters for the given user.
    #[must_use]
    pub fn new(user: impl Into<UserIdentifier>) -> Self {
        Self {
            user: Some(user.into()),
            page_size: 40,
            include_retweets: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhook operations
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters for registering a webhook in an environment.
#[derive(Debug, Clone, Default)]
pub struct RegisterWebhookParameters {
    /// Environment name
    pub environment: String,

    /// Callback URL to register
    pub url: String,
}

impl RegisterWebhookParameters {
    /// Parameters for the given environment and callback URL.
    #[must_use]
    pub fn new(environment: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            url: url.into(),
        }
    }
}

/// Parameters for removing a webhook from an environment.
#[derive(Debug, Clone, Default)]
pub struct RemoveWebhookParameters {
    /// Environment name
    pub environment: String,

    /// ID of the webhook to remove
    pub webhook_id: String,
}

impl RemoveWebhookParameters {
    /// Parameters for the given environment and webhook id.
    #[must_use]
    pub fn new(environment: impl Into<String>, webhook_id: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            webhook_id: webhook_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifiers_are_not_identifiable() {
        assert!(!UserIdentifier::default().is_identifiable());
        assert!(!TweetIdentifier::default().is_usable());
        assert!(!UserIdentifier::from_screen_name("").is_identifiable());
        assert!(
            !UserIdentifier {
                id: Some(0),
                screen_name: None
            }
            .is_identifiable()
        );
    }

    #[test]
    fn either_field_identifies_a_user() {
        assert!(UserIdentifier::from_id(42).is_identifiable());
        assert!(UserIdentifier::from_screen_name("jack").is_identifiable());
    }
}
