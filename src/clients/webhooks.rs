//! Account Activity webhook operations.

use std::sync::Arc;

use crate::clients::ClientInner;
use crate::dto::WebhookDto;
use crate::error::Result;
use crate::params::{RegisterWebhookParameters, RemoveWebhookParameters};
use crate::validators;
use crate::webhooks::WebhookEnvironment;

/// Sub-client for webhook environment management.
#[derive(Clone)]
pub struct WebhooksClient {
    inner: Arc<ClientInner>,
}

impl WebhooksClient {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the account's webhook environments and their registrations.
    pub async fn environments(&self) -> Result<Vec<WebhookEnvironment>> {
        let dto = self.inner.http.webhook_environments().await?;
        Ok(dto
            .environments
            .into_iter()
            .map(WebhookEnvironment::from_dto)
            .collect())
    }

    /// Register a callback URL in an environment. Returns the new webhook
    /// record; apply it to a held [`WebhookEnvironment`] with
    /// [`WebhookEnvironment::add_webhook`].
    pub async fn register_webhook(
        &self,
        parameters: &RegisterWebhookParameters,
    ) -> Result<WebhookDto> {
        validators::validate_register_webhook(Some(parameters))?;
        self.inner
            .http
            .register_webhook(&parameters.environment, &parameters.url)
            .await
    }

    /// Remove a webhook from an environment.
    pub async fn remove_webhook(&self, parameters: &RemoveWebhookParameters) -> Result<()> {
        validators::validate_remove_webhook(Some(parameters))?;
        self.inner
            .http
            .remove_webhook(&parameters.environment, &parameters.webhook_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::clients::test_support::client_for;
    use crate::error::Error;

    #[tokio::test]
    async fn environments_carry_their_registrations() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1.1/account_activity/all/webhooks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "environments": [
                    {
                        "environment_name": "production",
                        "webhooks": [
                            {"id": "1234", "url": "https://example.com/hook", "valid": true}
                        ]
                    },
                    {"environment_name": "staging", "webhooks": []}
                ]
            })))
            .mount(&server)
            .await;

        let webhooks = client_for(&server.uri()).webhooks();
        let environments = webhooks.environments().await.unwrap();
        assert_eq!(environments.len(), 2);
        assert_eq!(environments[0].name(), "production");
        assert_eq!(environments[0].webhooks()[0].id, "1234");
        assert!(environments[1].webhooks().is_empty());
    }

    #[tokio::test]
    async fn registration_round_trips_through_the_environment() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1.1/account_activity/all/production/webhooks.json"))
            .and(query_param("url", "https://example.com/hook"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "5678",
                "url": "https://example.com/hook",
                "valid": true
            })))
            .mount(&server)
            .await;

        let webhooks = client_for(&server.uri()).webhooks();
        let params = RegisterWebhookParameters::new("production", "https://example.com/hook");
        let hook = webhooks.register_webhook(&params).await.unwrap();

        let mut env = WebhookEnvironment::new("production");
        env.add_webhook(hook);
        assert_eq!(env.webhooks().len(), 1);
        assert!(env.remove_webhook("5678"));
    }

    #[tokio::test]
    async fn empty_environment_name_is_rejected_locally() {
        let webhooks = client_for("http://127.0.0.1:1").webhooks();
        let params = RegisterWebhookParameters::new("", "https://example.com/hook");
        let err = webhooks.register_webhook(&params).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
