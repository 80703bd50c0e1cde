//! Tweet facade.

use std::fmt;
use std::sync::Arc;

use crate::dto::{EntitiesDto, TweetDto};
use crate::models::{ClientContext, User};
use crate::params::TweetIdentifier;

/// A tweet wrapping a [`TweetDto`] by shared reference.
///
/// Like [`User`], properties read through to the DTO and the facade never
/// mutates it. The author, when expanded in the DTO, is exposed as a
/// [`User`] facade bound to the same client context.
#[derive(Clone)]
pub struct Tweet {
    dto: Arc<TweetDto>,
    context: Option<Arc<dyn ClientContext>>,
}

impl Tweet {
    /// Disconnected facade over a DTO.
    #[must_use]
    pub fn new(dto: TweetDto) -> Self {
        Self {
            dto: Arc::new(dto),
            context: None,
        }
    }

    /// Facade bound to a client context.
    #[must_use]
    pub fn with_context(dto: Arc<TweetDto>, context: Arc<dyn ClientContext>) -> Self {
        Self {
            dto,
            context: Some(context),
        }
    }

    /// The wrapped DTO.
    #[must_use]
    pub fn dto(&self) -> &TweetDto {
        &self.dto
    }

    /// Identifier for this tweet.
    #[must_use]
    pub fn identifier(&self) -> TweetIdentifier {
        TweetIdentifier {
            id: Some(self.dto.id),
        }
    }

    /// Numeric tweet ID.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.dto.id
    }

    /// Tweet text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.dto.text
    }

    /// Creation timestamp, as returned by the API.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.dto.created_at.as_deref()
    }

    /// Language (BCP47).
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        self.dto.lang.as_deref()
    }

    /// Retweet count.
    #[must_use]
    pub fn retweet_count(&self) -> u64 {
        self.dto.retweet_count
    }

    /// Favorite count.
    #[must_use]
    pub fn favorite_count(&self) -> u64 {
        self.dto.favorite_count
    }

    /// Whether the authenticated user favorited this tweet.
    #[must_use]
    pub fn favorited(&self) -> bool {
        self.dto.favorited
    }

    /// Whether the authenticated user retweeted this tweet.
    #[must_use]
    pub fn retweeted(&self) -> bool {
        self.dto.retweeted
    }

    /// Whether the tweet may contain sensitive content.
    #[must_use]
    pub fn possibly_sensitive(&self) -> Option<bool> {
        self.dto.possibly_sensitive
    }

    /// ID of the tweet this replies to.
    #[must_use]
    pub fn in_reply_to_status_id(&self) -> Option<u64> {
        self.dto.in_reply_to_status_id
    }

    /// ID of the quoted tweet.
    #[must_use]
    pub fn quoted_status_id(&self) -> Option<u64> {
        self.dto.quoted_status_id
    }

    /// Entities (hashtags, mentions, URLs).
    #[must_use]
    pub fn entities(&self) -> Option<&EntitiesDto> {
        self.dto.entities.as_ref()
    }

    /// Whether this record is a retweet.
    #[must_use]
    pub fn is_retweet(&self) -> bool {
        self.dto.retweeted_status.is_some()
    }

    /// The original tweet, when this record is a retweet.
    #[must_use]
    pub fn retweeted_status(&self) -> Option<Self> {
        self.dto.retweeted_status.as_deref().map(|dto| Self {
            dto: Arc::new(dto.clone()),
            context: self.context.clone(),
        })
    }

    /// The author, when the DTO carries the expanded record. Bound to the
    /// same client context as this tweet.
    #[must_use]
    pub fn author(&self) -> Option<User> {
        let dto = self.dto.user.clone()?;
        let dto = Arc::new(dto);
        match &self.context {
            Some(context) => Some(User::with_context(dto, Arc::clone(context))),
            None => Some(User::new(Arc::unwrap_or_clone(dto))),
        }
    }
}

/// Tweets are identified by id alone; ids are never reused.
impl PartialEq for Tweet {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Tweet {}

impl fmt::Debug for Tweet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tweet")
            .field("id", &self.dto.id)
            .field("text", &self.dto.text)
            .field("connected", &self.context.is_some())
            .finish()
    }
}

impl fmt::Display for Tweet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dto.text)
    }
}
