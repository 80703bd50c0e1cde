//! Aviary - Twitter REST API client SDK
//!
//! A client library for the Twitter REST API covering tweet CRUD, retweets,
//! favorites, user profiles, and Account Activity webhook registration.
//!
//! The SDK is built around three pieces:
//!
//! - **Parameter validators**: reject malformed request parameters before a
//!   call ever reaches the transport layer (fail fast, zero partial side
//!   effects).
//! - **Cursor iterators**: a uniform "fetch one page at a time" contract over
//!   every paginated endpoint, hiding per-endpoint quirks (numeric cursors,
//!   max-id cursors). A multi-level variant resolves id pages into full
//!   model objects through batched lookup calls.
//! - **Model facades**: [`models::User`] and [`models::Tweet`] wrap wire DTOs
//!   by shared reference and expose read-through properties, derived fields,
//!   and navigation through an injected [`models::ClientContext`] capability.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use aviary::{Client, TwitterConfig};
//!
//! let client = Client::new(TwitterConfig {
//!     consumer_key: "...".into(),
//!     consumer_secret: "...".into(),
//!     access_token: "...".into(),
//!     access_token_secret: "...".into(),
//!     ..Default::default()
//! })?;
//!
//! let me = client.users().authenticated_user().await?;
//! let friends = me.friends().expect("client context attached");
//! while !friends.completed().await {
//!     let page = friends.next_page().await?;
//!     for friend in &page.items {
//!         println!("@{}", friend.screen_name());
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod clients;
mod config;
mod cursor;
pub mod dto;
mod error;
mod models;
mod oauth;
mod paging;
mod params;
mod transport;
pub mod validators;
mod webhooks;

pub use clients::{Client, TweetsClient, UsersClient, WebhooksClient};
pub use config::TwitterConfig;
pub use cursor::{
    BatchResolver, Cursor, CursorIterator, MultiLevelCursorIterator, Page, PageFetcher,
    USER_LOOKUP_BATCH_SIZE,
};
pub use error::{Error, Result};
pub use paging::{
    FavoriteTweetsFetcher, FollowerIdsFetcher, FollowersIterator, FriendIdsFetcher,
    FriendsIterator, TimelineFetcher, UserBatchResolver,
};
pub use webhooks::WebhookEnvironment;

pub mod prelude {
    //! Convenience re-exports for common usage.
    pub use crate::clients::Client;
    pub use crate::config::TwitterConfig;
    pub use crate::cursor::{Cursor, Page};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Tweet, User};
    pub use crate::params::{
        DestroyTweetParameters, GetFavoriteTweetsParameters, GetTweetParameters,
        PublishTweetParameters, TweetIdentifier, UserIdentifier,
    };
}

pub use models::{ClientContext, Tweet, User};
pub use params::{
    DestroyRetweetParameters, DestroyTweetParameters, GetFavoriteTweetsParameters,
    GetFollowerIdsParameters, GetFriendIdsParameters, GetRetweetsParameters, GetTweetParameters,
    GetUserParameters, GetUserTimelineParameters, PublishRetweetParameters,
    PublishTweetParameters, RegisterWebhookParameters, RemoveWebhookParameters, TweetIdentifier,
    UserIdentifier,
};
