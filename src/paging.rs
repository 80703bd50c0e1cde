//! Endpoint-specific page fetchers and cursor mappings.
//!
//! The id endpoints cursor numerically (`-1` start, `0` end); favorites and
//! timelines cursor by max-id (next page starts below the smallest id seen).
//! Both map onto the uniform [`Cursor`] contract here so iterators never see
//! the difference.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cursor::{BatchResolver, Cursor, CursorIterator, Page, PageFetcher};
use crate::dto::{IdsPageDto, TweetDto};
use crate::error::Result;
use crate::models::{ClientContext, Tweet, User};
use crate::params::UserIdentifier;

/// Wire value of the numeric "beginning" cursor.
pub(crate) const NUMERIC_CURSOR_START: &str = "-1";

/// Wire value of the numeric "no-more-pages" cursor.
pub(crate) const NUMERIC_CURSOR_END: &str = "0";

/// Wire parameter for a numeric cursor token.
pub(crate) fn numeric_cursor_param(cursor: &Cursor) -> String {
    match cursor {
        Cursor::Start => NUMERIC_CURSOR_START.to_string(),
        Cursor::Next(token) => token.clone(),
        Cursor::End => NUMERIC_CURSOR_END.to_string(),
    }
}

/// Map an id-page envelope into a [`Page`] of ids.
pub(crate) fn page_from_ids_dto(dto: IdsPageDto) -> Page<u64> {
    let next = if dto.next_cursor_str.is_empty() || dto.next_cursor_str == NUMERIC_CURSOR_END {
        Cursor::End
    } else {
        Cursor::Next(dto.next_cursor_str)
    };
    Page {
        items: dto.ids,
        next,
    }
}

/// Wire `max_id` parameter for a max-id cursor token, absent on the first page.
pub(crate) fn max_id_param(cursor: &Cursor) -> Option<String> {
    match cursor {
        Cursor::Start => None,
        Cursor::Next(token) => Some(token.clone()),
        Cursor::End => Some(NUMERIC_CURSOR_END.to_string()),
    }
}

/// Derive the max-id cursor following a page of tweets: one below the
/// smallest id seen, or the end sentinel for an empty page.
pub(crate) fn max_id_cursor_after(tweets: &[TweetDto]) -> Cursor {
    tweets
        .iter()
        .map(|t| t.id)
        .min()
        .map_or(Cursor::End, |min_id| {
            Cursor::Next(min_id.saturating_sub(1).to_string())
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Fetchers
// ─────────────────────────────────────────────────────────────────────────────

/// Fetches friend-id pages through a [`ClientContext`].
pub struct FriendIdsFetcher {
    pub(crate) context: Arc<dyn ClientContext>,
    pub(crate) user: UserIdentifier,
    pub(crate) page_size: u32,
}

#[async_trait]
impl PageFetcher for FriendIdsFetcher {
    type Item = u64;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<u64>> {
        self.context
            .friend_ids_page(&self.user, cursor, self.page_size)
            .await
    }
}

/// Fetches follower-id pages through a [`ClientContext`].
pub struct FollowerIdsFetcher {
    pub(crate) context: Arc<dyn ClientContext>,
    pub(crate) user: UserIdentifier,
    pub(crate) page_size: u32,
}

#[async_trait]
impl PageFetcher for FollowerIdsFetcher {
    type Item = u64;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<u64>> {
        self.context
            .follower_ids_page(&self.user, cursor, self.page_size)
            .await
    }
}

/// Fetches favorite-tweet pages, yielding [`Tweet`] facades bound to the
/// same context.
pub struct FavoriteTweetsFetcher {
    pub(crate) context: Arc<dyn ClientContext>,
    pub(crate) user: UserIdentifier,
    pub(crate) page_size: u32,
}

#[async_trait]
impl PageFetcher for FavoriteTweetsFetcher {
    type Item = Tweet;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<Tweet>> {
        let page = self
            .context
            .favorite_tweets_page(&self.user, cursor, self.page_size)
            .await?;
        Ok(attach_tweets(page, &self.context))
    }
}

/// Fetches user-timeline pages, yielding [`Tweet`] facades bound to the
/// same context.
pub struct TimelineFetcher {
    pub(crate) context: Arc<dyn ClientContext>,
    pub(crate) user: UserIdentifier,
    pub(crate) page_size: u32,
    pub(crate) include_retweets: bool,
}

#[async_trait]
impl PageFetcher for TimelineFetcher {
    type Item = Tweet;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<Tweet>> {
        let page = self
            .context
            .user_timeline_page(&self.user, cursor, self.page_size, self.include_retweets)
            .await?;
        Ok(attach_tweets(page, &self.context))
    }
}

fn attach_tweets(page: Page<TweetDto>, context: &Arc<dyn ClientContext>) -> Page<Tweet> {
    Page {
        items: page
            .items
            .into_iter()
            .map(|dto| Tweet::with_context(Arc::new(dto), Arc::clone(context)))
            .collect(),
        next: page.next,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolver
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves user-id batches into [`User`] facades, preserving input order.
pub struct UserBatchResolver {
    pub(crate) context: Arc<dyn ClientContext>,
}

#[async_trait]
impl BatchResolver for UserBatchResolver {
    type Id = u64;
    type Output = User;

    async fn resolve(&self, ids: &[u64]) -> Result<Vec<User>> {
        let dtos = self.context.lookup_users(ids).await?;

        // The lookup endpoint does not guarantee response order; reorder to
        // the input id order, dropping ids the upstream did not resolve.
        let mut by_id: std::collections::HashMap<u64, _> =
            dtos.into_iter().map(|dto| (dto.id, dto)).collect();
        Ok(ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(|dto| User::with_context(Arc::new(dto), Arc::clone(&self.context)))
            .collect())
    }
}

/// Convenience aliases for the friends/followers iterator stacks.
pub type FriendsIterator = crate::cursor::MultiLevelCursorIterator<FriendIdsFetcher, UserBatchResolver>;
/// See [`FriendsIterator`].
pub type FollowersIterator =
    crate::cursor::MultiLevelCursorIterator<FollowerIdsFetcher, UserBatchResolver>;

pub(crate) fn friends_iterator(
    context: Arc<dyn ClientContext>,
    user: UserIdentifier,
    page_size: u32,
) -> FriendsIterator {
    let outer = CursorIterator::new(FriendIdsFetcher {
        context: Arc::clone(&context),
        user,
        page_size,
    });
    crate::cursor::MultiLevelCursorIterator::new(outer, UserBatchResolver { context })
}

pub(crate) fn followers_iterator(
    context: Arc<dyn ClientContext>,
    user: UserIdentifier,
    page_size: u32,
) -> FollowersIterator {
    let outer = CursorIterator::new(FollowerIdsFetcher {
        context: Arc::clone(&context),
        user,
        page_size,
    });
    crate::cursor::MultiLevelCursorIterator::new(outer, UserBatchResolver { context })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweet_dto(id: u64) -> TweetDto {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "id_str": id.to_string(),
            "text": format!("tweet {id}")
        }))
        .unwrap()
    }

    #[test]
    fn numeric_cursor_maps_sentinels() {
        assert_eq!(numeric_cursor_param(&Cursor::Start), "-1");
        assert_eq!(numeric_cursor_param(&Cursor::Next("1357".into())), "1357");

        let live = page_from_ids_dto(IdsPageDto {
            ids: vec![1, 2],
            next_cursor: 1357,
            next_cursor_str: "1357".into(),
            previous_cursor: 0,
        });
        assert_eq!(live.next, Cursor::Next("1357".into()));

        let done = page_from_ids_dto(IdsPageDto {
            ids: vec![3],
            next_cursor: 0,
            next_cursor_str: "0".into(),
            previous_cursor: 0,
        });
        assert_eq!(done.next, Cursor::End);
    }

    #[test]
    fn max_id_cursor_steps_below_smallest_seen_id() {
        assert_eq!(max_id_param(&Cursor::Start), None);
        assert_eq!(
            max_id_param(&Cursor::Next("99".into())),
            Some("99".to_string())
        );

        let tweets = vec![tweet_dto(500), tweet_dto(100), tweet_dto(300)];
        assert_eq!(max_id_cursor_after(&tweets), Cursor::Next("99".into()));
        assert_eq!(max_id_cursor_after(&[]), Cursor::End);
    }
}
