//! User facade.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::cursor::CursorIterator;
use crate::dto::UserDto;
use crate::error::{Error, Result};
use crate::models::ClientContext;
use crate::paging::{
    FavoriteTweetsFetcher, FollowersIterator, FriendIdsFetcher, FriendsIterator,
    FollowerIdsFetcher, TimelineFetcher, followers_iterator, friends_iterator,
};
use crate::params::UserIdentifier;

/// Size suffix in a profile image URL, e.g. the `_normal` in
/// `https://pbs.twimg.com/profile_images/42/photo_normal.jpg`.
static PROFILE_IMAGE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[0-9A-Za-z]+(\.[0-9A-Za-z_]+)$").expect("valid regex"));

/// A user profile wrapping a [`UserDto`] by shared reference.
///
/// Properties are read-through projections of the wrapped DTO; derived
/// fields are computed on each access, never cached. Server-owned fields
/// have no mutation path. With a [`ClientContext`] attached, navigation
/// methods return iterators over related resources; without one they return
/// `None`, supporting read-only disconnected DTOs.
#[derive(Clone)]
pub struct User {
    dto: Arc<UserDto>,
    context: Option<Arc<dyn ClientContext>>,
}

impl User {
    /// Disconnected facade over a DTO.
    #[must_use]
    pub fn new(dto: UserDto) -> Self {
        Self {
            dto: Arc::new(dto),
            context: None,
        }
    }

    /// Facade bound to a client context for navigation.
    #[must_use]
    pub fn with_context(dto: Arc<UserDto>, context: Arc<dyn ClientContext>) -> Self {
        Self {
            dto,
            context: Some(context),
        }
    }

    /// The wrapped DTO.
    #[must_use]
    pub fn dto(&self) -> &UserDto {
        &self.dto
    }

    /// Identifier carrying both the id and the handle.
    #[must_use]
    pub fn identifier(&self) -> UserIdentifier {
        UserIdentifier {
            id: Some(self.dto.id),
            screen_name: Some(self.dto.screen_name.clone()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read-through properties
    // ─────────────────────────────────────────────────────────────────────

    /// Numeric user ID.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.dto.id
    }

    /// Handle, without the leading `@`.
    #[must_use]
    pub fn screen_name(&self) -> &str {
        &self.dto.screen_name
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.dto.name.as_deref()
    }

    /// Bio.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.dto.description.as_deref()
    }

    /// Free-form location.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.dto.location.as_deref()
    }

    /// Whether the account is private.
    #[must_use]
    pub fn protected(&self) -> bool {
        self.dto.protected
    }

    /// Whether the account is verified.
    #[must_use]
    pub fn verified(&self) -> bool {
        self.dto.verified
    }

    /// Follower count.
    #[must_use]
    pub fn followers_count(&self) -> u64 {
        self.dto.followers_count
    }

    /// Friend (following) count.
    #[must_use]
    pub fn friends_count(&self) -> u64 {
        self.dto.friends_count
    }

    /// Tweet count.
    #[must_use]
    pub fn statuses_count(&self) -> u64 {
        self.dto.statuses_count
    }

    /// Account creation timestamp, as returned by the API.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.dto.created_at.as_deref()
    }

    /// Profile image URL in the size variant the API returned.
    #[must_use]
    pub fn profile_image_url(&self) -> Option<&str> {
        self.dto.profile_image_url_https.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Derived properties
    // ─────────────────────────────────────────────────────────────────────

    /// Profile image URL with the size suffix stripped (the original
    /// upload). Absent when the base URL is absent.
    #[must_use]
    pub fn profile_image_url_full_size(&self) -> Option<String> {
        self.profile_image_url()
            .map(|url| PROFILE_IMAGE_SIZE.replace(url, "$1").into_owned())
    }

    /// Profile image URL in the 400x400 size variant. Absent when the base
    /// URL is absent.
    #[must_use]
    pub fn profile_image_url_400x400(&self) -> Option<String> {
        self.profile_image_url()
            .map(|url| PROFILE_IMAGE_SIZE.replace(url, "_400x400$1").into_owned())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    /// Iterator over this user's friend ids. `None` without a client context.
    #[must_use]
    pub fn friend_ids(&self) -> Option<CursorIterator<FriendIdsFetcher>> {
        let context = self.context.clone()?;
        Some(CursorIterator::new(FriendIdsFetcher {
            context,
            user: self.identifier(),
            page_size: 5000,
        }))
    }

    /// Iterator over this user's friends as resolved profiles. `None`
    /// without a client context.
    #[must_use]
    pub fn friends(&self) -> Option<FriendsIterator> {
        let context = self.context.clone()?;
        Some(friends_iterator(context, self.identifier(), 5000))
    }

    /// Iterator over this user's follower ids. `None` without a client
    /// context.
    #[must_use]
    pub fn follower_ids(&self) -> Option<CursorIterator<FollowerIdsFetcher>> {
        let context = self.context.clone()?;
        Some(CursorIterator::new(FollowerIdsFetcher {
            context,
            user: self.identifier(),
            page_size: 5000,
        }))
    }

    /// Iterator over this user's followers as resolved profiles. `None`
    /// without a client context.
    #[must_use]
    pub fn followers(&self) -> Option<FollowersIterator> {
        let context = self.context.clone()?;
        Some(followers_iterator(context, self.identifier(), 5000))
    }

    /// Iterator over this user's favorite tweets. `None` without a client
    /// context.
    #[must_use]
    pub fn favorite_tweets(&self) -> Option<CursorIterator<FavoriteTweetsFetcher>> {
        let context = self.context.clone()?;
        Some(CursorIterator::new(FavoriteTweetsFetcher {
            context,
            user: self.identifier(),
            page_size: 200,
        }))
    }

    /// Iterator over this user's timeline. `None` without a client context.
    #[must_use]
    pub fn timeline(&self) -> Option<CursorIterator<TimelineFetcher>> {
        let context = self.context.clone()?;
        Some(CursorIterator::new(TimelineFetcher {
            context,
            user: self.identifier(),
            page_size: 40,
            include_retweets: true,
        }))
    }

    /// Contributors to this account. The upstream endpoint was retired.
    pub fn contributors(&self) -> Result<Vec<Self>> {
        Err(Error::UnsupportedOperation(
            "the contributors endpoint was retired upstream",
        ))
    }

    /// Accounts this user contributes to. The upstream endpoint was retired.
    pub fn contributees(&self) -> Result<Vec<Self>> {
        Err(Error::UnsupportedOperation(
            "the contributees endpoint was retired upstream",
        ))
    }
}

/// Loose identity: two users are equal when their ids match or their
/// handles match. Handle comparison exists because identifiers can be
/// temporarily unresolved.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
            || (!self.screen_name().is_empty() && self.screen_name() == other.screen_name())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.dto.id)
            .field("screen_name", &self.dto.screen_name)
            .field("connected", &self.context.is_some())
            .finish()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => f.write_str(&self.dto.screen_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: u64, screen_name: &str) -> UserDto {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "id_str": id.to_string(),
            "screen_name": screen_name,
        }))
        .unwrap()
    }

    fn dto_with_image(image: &str) -> UserDto {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "id_str": "1",
            "screen_name": "jack",
            "profile_image_url_https": image,
        }))
        .unwrap()
    }

    #[test]
    fn equality_matches_on_id_regardless_of_handle() {
        let a = User::new(dto(10, "old_handle"));
        let b = User::new(dto(10, "new_handle"));
        assert_eq!(a, b);
    }

    #[test]
    fn equality_matches_on_handle_regardless_of_id() {
        let a = User::new(dto(1, "jack"));
        let b = User::new(dto(2, "jack"));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_id_and_handle_are_not_equal() {
        let a = User::new(dto(1, "jack"));
        let b = User::new(dto(2, "jill"));
        assert_ne!(a, b);
    }

    #[test]
    fn derived_image_urls_substitute_the_size_suffix() {
        let user = User::new(dto_with_image(
            "https://pbs.twimg.com/profile_images/42/photo_normal.jpg",
        ));
        assert_eq!(
            user.profile_image_url_full_size().unwrap(),
            "https://pbs.twimg.com/profile_images/42/photo.jpg"
        );
        assert_eq!(
            user.profile_image_url_400x400().unwrap(),
            "https://pbs.twimg.com/profile_images/42/photo_400x400.jpg"
        );
    }

    #[test]
    fn derived_image_urls_are_absent_without_a_base() {
        let user = User::new(dto(1, "jack"));
        assert!(user.profile_image_url().is_none());
        assert!(user.profile_image_url_full_size().is_none());
        assert!(user.profile_image_url_400x400().is_none());
    }

    #[test]
    fn navigation_is_absent_without_a_context() {
        let user = User::new(dto(1, "jack"));
        assert!(user.friend_ids().is_none());
        assert!(user.friends().is_none());
        assert!(user.follower_ids().is_none());
        assert!(user.followers().is_none());
        assert!(user.favorite_tweets().is_none());
        assert!(user.timeline().is_none());
    }

    #[test]
    fn retired_endpoints_are_unsupported() {
        let user = User::new(dto(1, "jack"));
        assert!(matches!(
            user.contributors(),
            Err(Error::UnsupportedOperation(_))
        ));
        assert!(matches!(
            user.contributees(),
            Err(Error::UnsupportedOperation(_))
        ));
    }
}
