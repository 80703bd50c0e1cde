//! Twitter REST API transport.
//!
//! Builds signed requests, sends them, and maps non-success statuses onto
//! the SDK error taxonomy. The transport never retries; failures surface
//! verbatim to the caller.

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::TwitterConfig;
use crate::dto::{
    IdsPageDto, TweetDto, UserDto, WebhookDto, WebhookEnvironmentsDto,
};
use crate::error::{Error, Result};
use crate::oauth::OAuthSigner;
use crate::params::UserIdentifier;

/// Signed HTTP client for the v1.1 REST API.
#[derive(Debug)]
pub(crate) struct TwitterHttpClient {
    http: Client,
    base_url: String,
    signer: OAuthSigner,
}

type Params = Vec<(String, String)>;

impl TwitterHttpClient {
    pub(crate) fn new(config: &TwitterConfig) -> Result<Self> {
        config.check_credentials()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("aviary/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            signer: OAuthSigner::new(config),
        })
    }

    #[instrument(skip(self, params))]
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: Params,
    ) -> Result<T> {
        let response = self.send(method, endpoint, params).await?;
        Self::decode(response).await
    }

    /// Send a signed request and check the status, ignoring the body.
    #[instrument(skip(self, params))]
    async fn request_no_content(
        &self,
        method: Method,
        endpoint: &str,
        params: Params,
    ) -> Result<()> {
        let response = self.send(method, endpoint, params).await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn send(&self, method: Method, endpoint: &str, params: Params) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let auth_header = self
            .signer
            .authorization_header(method.as_str(), &url, &params)?;

        debug!(method = %method, endpoint, "sending Twitter API request");

        let request = self
            .http
            .request(method, &url)
            .query(&params)
            .header("Authorization", auth_header);

        Ok(request.send().await?)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = Self::check_status(response).await?;
        serde_json::from_slice(&bytes).map_err(Error::from)
    }

    /// Map a response status onto the error taxonomy, returning the body
    /// bytes on success.
    async fn check_status(response: Response) -> Result<Vec<u8>> {
        let status = response.status();
        let bytes = response.bytes().await?.to_vec();

        if status.is_success() {
            return Ok(bytes);
        }

        let message = extract_error_message(&bytes);
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Auth { message });
        }
        Err(Error::Upstream {
            status: status.as_u16(),
            message,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tweet endpoints
    // ─────────────────────────────────────────────────────────────────────

    pub(crate) async fn get_tweet(&self, tweet_id: u64, include_entities: bool) -> Result<TweetDto> {
        let params = vec![
            ("id".to_string(), tweet_id.to_string()),
            (
                "include_entities".to_string(),
                include_entities.to_string(),
            ),
        ];
        self.request(Method::GET, "/1.1/statuses/show.json", params)
            .await
    }

    pub(crate) async fn get_tweets(&self, tweet_ids: &[u64]) -> Result<Vec<TweetDto>> {
        let csv = tweet_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let params = vec![("id".to_string(), csv)];
        self.request(Method::GET, "/1.1/statuses/lookup.json", params)
            .await
    }

    pub(crate) async fn publish_tweet(
        &self,
        text: &str,
        in_reply_to_status_id: Option<u64>,
        quoted_status_id: Option<u64>,
        possibly_sensitive: bool,
    ) -> Result<TweetDto> {
        let mut params = vec![("status".to_string(), text.to_string())];
        if let Some(id) = in_reply_to_status_id {
            params.push(("in_reply_to_status_id".to_string(), id.to_string()));
            params.push(("auto_populate_reply_metadata".to_string(), "true".into()));
        }
        if let Some(id) = quoted_status_id {
            // Quoting works by attaching the quoted tweet's permalink.
            params.push((
                "attachment_url".to_string(),
                format!("https://twitter.com/i/web/status/{id}"),
            ));
        }
        if possibly_sensitive {
            params.push(("possibly_sensitive".to_string(), "true".into()));
        }
        self.request(Method::POST, "/1.1/statuses/update.json", params)
            .await
    }

    pub(crate) async fn destroy_tweet(&self, tweet_id: u64) -> Result<TweetDto> {
        self.request(
            Method::POST,
            &format!("/1.1/statuses/destroy/{tweet_id}.json"),
            Vec::new(),
        )
        .await
    }

    pub(crate) async fn get_retweets(&self, tweet_id: u64, count: u32) -> Result<Vec<TweetDto>> {
        let params = vec![("count".to_string(), count.to_string())];
        self.request(
            Method::GET,
            &format!("/1.1/statuses/retweets/{tweet_id}.json"),
            params,
        )
        .await
    }

    pub(crate) async fn publish_retweet(&self, tweet_id: u64) -> Result<TweetDto> {
        self.request(
            Method::POST,
            &format!("/1.1/statuses/retweet/{tweet_id}.json"),
            Vec::new(),
        )
        .await
    }

    pub(crate) async fn destroy_retweet(&self, tweet_id: u64) -> Result<TweetDto> {
        self.request(
            Method::POST,
            &format!("/1.1/statuses/unretweet/{tweet_id}.json"),
            Vec::new(),
        )
        .await
    }

    pub(crate) async fn favorites_page(
        &self,
        user: &UserIdentifier,
        max_id: Option<&str>,
        count: u32,
    ) -> Result<Vec<TweetDto>> {
        let mut params = vec![("count".to_string(), count.to_string())];
        push_user_params(&mut params, user);
        if let Some(max_id) = max_id {
            params.push(("max_id".to_string(), max_id.to_string()));
        }
        self.request(Method::GET, "/1.1/favorites/list.json", params)
            .await
    }

    pub(crate) async fn user_timeline_page(
        &self,
        user: &UserIdentifier,
        max_id: Option<&str>,
        count: u32,
        include_retweets: bool,
    ) -> Result<Vec<TweetDto>> {
        let mut params = vec![
            ("count".to_string(), count.to_string()),
            ("include_rts".to_string(), include_retweets.to_string()),
        ];
        push_user_params(&mut params, user);
        if let Some(max_id) = max_id {
            params.push(("max_id".to_string(), max_id.to_string()));
        }
        self.request(Method::GET, "/1.1/statuses/user_timeline.json", params)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // User endpoints
    // ─────────────────────────────────────────────────────────────────────

    pub(crate) async fn get_user(&self, user: &UserIdentifier) -> Result<UserDto> {
        let mut params = Vec::new();
        push_user_params(&mut params, user);
        self.request(Method::GET, "/1.1/users/show.json", params)
            .await
    }

    pub(crate) async fn verify_credentials(&self) -> Result<UserDto> {
        self.request(
            Method::GET,
            "/1.1/account/verify_credentials.json",
            Vec::new(),
        )
        .await
    }

    pub(crate) async fn lookup_users(&self, user_ids: &[u64]) -> Result<Vec<UserDto>> {
        let csv = user_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let params = vec![("user_id".to_string(), csv)];
        self.request(Method::POST, "/1.1/users/lookup.json", params)
            .await
    }

    pub(crate) async fn friend_ids_page(
        &self,
        user: &UserIdentifier,
        cursor: &str,
        count: u32,
    ) -> Result<IdsPageDto> {
        let mut params = vec![
            ("cursor".to_string(), cursor.to_string()),
            ("count".to_string(), count.to_string()),
        ];
        push_user_params(&mut params, user);
        self.request(Method::GET, "/1.1/friends/ids.json", params)
            .await
    }

    pub(crate) async fn follower_ids_page(
        &self,
        user: &UserIdentifier,
        cursor: &str,
        count: u32,
    ) -> Result<IdsPageDto> {
        let mut params = vec![
            ("cursor".to_string(), cursor.to_string()),
            ("count".to_string(), count.to_string()),
        ];
        push_user_params(&mut params, user);
        self.request(Method::GET, "/1.1/followers/ids.json", params)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Webhook endpoints
    // ─────────────────────────────────────────────────────────────────────

    pub(crate) async fn webhook_environments(&self) -> Result<WebhookEnvironmentsDto> {
        self.request(
            Method::GET,
            "/1.1/account_activity/all/webhooks.json",
            Vec::new(),
        )
        .await
    }

    pub(crate) async fn register_webhook(
        &self,
        environment: &str,
        url: &str,
    ) -> Result<WebhookDto> {
        let params = vec![("url".to_string(), url.to_string())];
        self.request(
            Method::POST,
            &format!("/1.1/account_activity/all/{environment}/webhooks.json"),
            params,
        )
        .await
    }

    pub(crate) async fn remove_webhook(&self, environment: &str, webhook_id: &str) -> Result<()> {
        self.request_no_content(
            Method::DELETE,
            &format!("/1.1/account_activity/all/{environment}/webhooks/{webhook_id}.json"),
            Vec::new(),
        )
        .await
    }
}

/// Add the `user_id`/`screen_name` query parameters for an identifier.
fn push_user_params(params: &mut Vec<(String, String)>, user: &UserIdentifier) {
    if let Some(id) = user.id {
        params.push(("user_id".to_string(), id.to_string()));
    } else if let Some(screen_name) = &user.screen_name {
        params.push(("screen_name".to_string(), screen_name.clone()));
    }
}

/// Pull the first error message out of a v1.1 error body:
/// `{"errors":[{"code":..,"message":".."}]}`.
fn extract_error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        errors: Vec<ErrorDetail>,
    }

    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        #[serde(default)]
        message: String,
    }

    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(first) = parsed.errors.into_iter().next() {
            if !first.message.is_empty() {
                return first.message;
            }
        }
    }

    let mut snippet = String::from_utf8_lossy(body).into_owned();
    if snippet.len() > 200 {
        // Byte 200 may fall inside a multibyte character.
        let mut cut = 200;
        while !snippet.is_char_boundary(cut) {
            cut -= 1;
        }
        snippet.truncate(cut);
        snippet.push_str("...");
    }
    if snippet.is_empty() {
        "unknown error".into()
    } else {
        snippet
    }
}
