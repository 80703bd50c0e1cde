//! Wire-format data records for the v1.1 REST API.
//!
//! DTOs mirror the JSON shape returned by the upstream API. They are owned by
//! the transport/deserialization layer and are only ever read by the model
//! facades, never mutated.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// Twitter user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    /// User ID
    pub id: u64,

    /// User ID as string
    #[serde(default)]
    pub id_str: String,

    /// Handle, without the leading `@`
    pub screen_name: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// User bio
    #[serde(default)]
    pub description: Option<String>,

    /// Free-form location
    #[serde(default)]
    pub location: Option<String>,

    /// Profile URL
    #[serde(default)]
    pub url: Option<String>,

    /// Whether the account is private
    #[serde(default)]
    pub protected: bool,

    /// Whether the account is verified
    #[serde(default)]
    pub verified: bool,

    /// Follower count
    #[serde(default)]
    pub followers_count: u64,

    /// Friend (following) count
    #[serde(default)]
    pub friends_count: u64,

    /// Tweet count
    #[serde(default)]
    pub statuses_count: u64,

    /// Favorite count (British spelling on the wire)
    #[serde(default)]
    pub favourites_count: u64,

    /// Listed count
    #[serde(default)]
    pub listed_count: u64,

    /// Account creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,

    /// Profile image URL (sized variant, e.g. `..._normal.png`)
    #[serde(default)]
    pub profile_image_url_https: Option<String>,

    /// Profile banner URL
    #[serde(default)]
    pub profile_banner_url: Option<String>,

    /// Whether the profile theme is unchanged from the default
    #[serde(default)]
    pub default_profile: bool,

    /// Whether the profile image is unchanged from the default
    #[serde(default)]
    pub default_profile_image: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tweet
// ─────────────────────────────────────────────────────────────────────────────

/// Twitter tweet (status) record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetDto {
    /// Tweet ID
    pub id: u64,

    /// Tweet ID as string
    #[serde(default)]
    pub id_str: String,

    /// Tweet text content
    pub text: String,

    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,

    /// Author record, when expanded
    #[serde(default)]
    pub user: Option<UserDto>,

    /// ID of the tweet this replies to
    #[serde(default)]
    pub in_reply_to_status_id: Option<u64>,

    /// Handle of the user this replies to
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,

    /// ID of the quoted tweet
    #[serde(default)]
    pub quoted_status_id: Option<u64>,

    /// Retweet count
    #[serde(default)]
    pub retweet_count: u64,

    /// Favorite count
    #[serde(default)]
    pub favorite_count: u64,

    /// Whether the authenticated user favorited this tweet
    #[serde(default)]
    pub favorited: bool,

    /// Whether the authenticated user retweeted this tweet
    #[serde(default)]
    pub retweeted: bool,

    /// Language (BCP47)
    #[serde(default)]
    pub lang: Option<String>,

    /// Whether the tweet may contain sensitive content
    #[serde(default)]
    pub possibly_sensitive: Option<bool>,

    /// Entities (hashtags, mentions, URLs)
    #[serde(default)]
    pub entities: Option<EntitiesDto>,

    /// The original tweet, when this record is a retweet
    #[serde(default)]
    pub retweeted_status: Option<Box<TweetDto>>,
}

/// Tweet entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitiesDto {
    /// Hashtags
    #[serde(default)]
    pub hashtags: Vec<HashtagDto>,

    /// Mentions
    #[serde(default)]
    pub user_mentions: Vec<MentionDto>,

    /// URLs
    #[serde(default)]
    pub urls: Vec<UrlDto>,
}

/// Hashtag entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagDto {
    /// Hashtag text, without `#`
    pub text: String,
}

/// Mention entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionDto {
    /// Mentioned handle
    pub screen_name: String,

    /// Mentioned user ID
    #[serde(default)]
    pub id: Option<u64>,
}

/// URL entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlDto {
    /// Shortened URL as it appears in the text
    pub url: String,

    /// Expanded URL
    #[serde(default)]
    pub expanded_url: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pagination envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// Envelope for cursored id endpoints (`friends/ids`, `followers/ids`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdsPageDto {
    /// IDs in this page
    #[serde(default)]
    pub ids: Vec<u64>,

    /// Next cursor, `0` when no more pages
    #[serde(default)]
    pub next_cursor: i64,

    /// Next cursor as string
    #[serde(default)]
    pub next_cursor_str: String,

    /// Previous cursor
    #[serde(default)]
    pub previous_cursor: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhooks
// ─────────────────────────────────────────────────────────────────────────────

/// Registered webhook record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookDto {
    /// Webhook ID
    pub id: String,

    /// Callback URL
    pub url: String,

    /// Whether the last CRC check succeeded
    #[serde(default)]
    pub valid: bool,

    /// Registration timestamp
    #[serde(default)]
    pub created_timestamp: Option<String>,
}

/// Webhook environment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvironmentDto {
    /// Environment name (as configured in the developer portal)
    pub environment_name: String,

    /// Webhooks registered in this environment
    #[serde(default)]
    pub webhooks: Vec<WebhookDto>,
}

/// Envelope for the webhook environments listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvironmentsDto {
    /// Environments available to the application
    #[serde(default)]
    pub environments: Vec<WebhookEnvironmentDto>,
}
