//! Model facades over wire DTOs.
//!
//! A facade wraps exactly one DTO by shared reference and exposes
//! read-through properties plus navigation to related resources. Navigation
//! goes through an injected [`ClientContext`] capability supplied at
//! construction; a facade without one is a read-only disconnected view and
//! its navigation methods return `None` rather than failing.

mod tweet;
mod user;

pub use tweet::Tweet;
pub use user::User;

use async_trait::async_trait;

use crate::cursor::{Cursor, Page};
use crate::dto::{TweetDto, UserDto};
use crate::error::Result;
use crate::params::UserIdentifier;

/// Capability a facade uses to reach the API on behalf of its owner.
///
/// Implemented by [`crate::Client`]; injected into facades at construction.
#[async_trait]
pub trait ClientContext: Send + Sync {
    /// One page of friend ids for `user`.
    async fn friend_ids_page(
        &self,
        user: &UserIdentifier,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<Page<u64>>;

    /// One page of follower ids for `user`.
    async fn follower_ids_page(
        &self,
        user: &UserIdentifier,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<Page<u64>>;

    /// Resolve up to [`crate::USER_LOOKUP_BATCH_SIZE`] user ids into records.
    async fn lookup_users(&self, ids: &[u64]) -> Result<Vec<UserDto>>;

    /// One page of `user`'s favorite tweets.
    async fn favorite_tweets_page(
        &self,
        user: &UserIdentifier,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<Page<TweetDto>>;

    /// One page of `user`'s timeline.
    async fn user_timeline_page(
        &self,
        user: &UserIdentifier,
        cursor: &Cursor,
        page_size: u32,
        include_retweets: bool,
    ) -> Result<Page<TweetDto>>;
}
