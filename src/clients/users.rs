//! User operations.

use std::sync::Arc;

use crate::clients::ClientInner;
use crate::cursor::CursorIterator;
use crate::error::Result;
use crate::models::User;
use crate::paging::{
    FollowerIdsFetcher, FollowersIterator, FriendIdsFetcher, FriendsIterator, TimelineFetcher,
    followers_iterator, friends_iterator,
};
use crate::params::{
    GetFollowerIdsParameters, GetFriendIdsParameters, GetUserParameters,
    GetUserTimelineParameters,
};
use crate::validators;

/// Sub-client for user profiles and relationship pagination.
#[derive(Clone)]
pub struct UsersClient {
    inner: Arc<ClientInner>,
}

impl UsersClient {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn attach(&self, dto: crate::dto::UserDto) -> User {
        User::with_context(Arc::new(dto), Arc::clone(&self.inner) as _)
    }

    /// Fetch a user profile by id or handle.
    pub async fn get_user(&self, parameters: &GetUserParameters) -> Result<User> {
        validators::validate_get_user(Some(parameters))?;
        let user = parameters.user.clone().unwrap_or_default();
        let dto = self.inner.http.get_user(&user).await?;
        Ok(self.attach(dto))
    }

    /// Fetch the profile behind the client's credentials.
    pub async fn authenticated_user(&self) -> Result<User> {
        let dto = self.inner.http.verify_credentials().await?;
        Ok(self.attach(dto))
    }

    /// Iterator over a user's friend ids, in API order.
    pub fn friend_ids(
        &self,
        parameters: &GetFriendIdsParameters,
    ) -> Result<CursorIterator<FriendIdsFetcher>> {
        validators::validate_get_friend_ids(Some(parameters))?;
        Ok(CursorIterator::new(FriendIdsFetcher {
            context: Arc::clone(&self.inner) as _,
            user: parameters.user.clone().unwrap_or_default(),
            page_size: parameters.page_size,
        }))
    }

    /// Iterator over a user's follower ids, in API order.
    pub fn follower_ids(
        &self,
        parameters: &GetFollowerIdsParameters,
    ) -> Result<CursorIterator<FollowerIdsFetcher>> {
        validators::validate_get_follower_ids(Some(parameters))?;
        Ok(CursorIterator::new(FollowerIdsFetcher {
            context: Arc::clone(&self.inner) as _,
            user: parameters.user.clone().unwrap_or_default(),
            page_size: parameters.page_size,
        }))
    }

    /// Iterator over a user's friends resolved into full profiles. One id
    /// page is resolved per `next_page` call, in lookup batches of at most
    /// [`crate::USER_LOOKUP_BATCH_SIZE`] ids.
    pub fn friends(&self, parameters: &GetFriendIdsParameters) -> Result<FriendsIterator> {
        validators::validate_get_friend_ids(Some(parameters))?;
        Ok(friends_iterator(
            Arc::clone(&self.inner) as _,
            parameters.user.clone().unwrap_or_default(),
            parameters.page_size,
        ))
    }

    /// Iterator over a user's followers resolved into full profiles.
    pub fn followers(&self, parameters: &GetFollowerIdsParameters) -> Result<FollowersIterator> {
        validators::validate_get_follower_ids(Some(parameters))?;
        Ok(followers_iterator(
            Arc::clone(&self.inner) as _,
            parameters.user.clone().unwrap_or_default(),
            parameters.page_size,
        ))
    }

    /// Iterator over a user's timeline, newest first.
    pub fn user_timeline(
        &self,
        parameters: &GetUserTimelineParameters,
    ) -> Result<CursorIterator<TimelineFetcher>> {
        validators::validate_get_user_timeline(Some(parameters))?;
        Ok(CursorIterator::new(TimelineFetcher {
            context: Arc::clone(&self.inner) as _,
            user: parameters.user.clone().unwrap_or_default(),
            page_size: parameters.page_size,
            include_retweets: parameters.include_retweets,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_support::client_for;
    use crate::error::Error;
    use crate::params::UserIdentifier;

    #[test]
    fn iterators_require_an_identifiable_user() {
        let users = client_for("http://127.0.0.1:1").users();

        let params = GetFriendIdsParameters {
            user: Some(UserIdentifier::default()),
            page_size: 5000,
        };
        let err = users
            .friend_ids(&params)
            .err()
            .expect("unidentifiable user must be rejected");
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(users.friends(&params).is_err());
    }

    #[tokio::test]
    async fn get_user_rejects_absent_identifier_locally() {
        let users = client_for("http://127.0.0.1:1").users();
        let err = users
            .get_user(&GetUserParameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
