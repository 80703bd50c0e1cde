//! Account Activity webhook environments.

use crate::dto::{WebhookDto, WebhookEnvironmentDto};

/// A webhook environment with locally tracked registrations.
///
/// The environment mirrors what the API reported at fetch time; callers that
/// register or remove webhooks through [`crate::WebhooksClient`] get the
/// bookkeeping applied here so the in-memory view stays consistent without a
/// refetch.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEnvironment {
    name: String,
    webhooks: Vec<WebhookDto>,
}

impl WebhookEnvironment {
    /// Empty environment with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            webhooks: Vec::new(),
        }
    }

    /// Environment populated from an API envelope.
    #[must_use]
    pub fn from_dto(dto: WebhookEnvironmentDto) -> Self {
        Self {
            name: dto.environment_name,
            webhooks: dto.webhooks,
        }
    }

    /// Environment name, e.g. `"production"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered webhooks, in registration order.
    #[must_use]
    pub fn webhooks(&self) -> &[WebhookDto] {
        &self.webhooks
    }

    /// Track a registration. Re-adding an already-tracked webhook id is a
    /// no-op, so refreshes cannot duplicate entries.
    pub fn add_webhook(&mut self, webhook: WebhookDto) {
        if self.webhooks.iter().any(|w| w.id == webhook.id) {
            return;
        }
        self.webhooks.push(webhook);
    }

    /// Untrack a registration. Returns whether the id was tracked.
    pub fn remove_webhook(&mut self, webhook_id: &str) -> bool {
        let before = self.webhooks.len();
        self.webhooks.retain(|w| w.id != webhook_id);
        self.webhooks.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook(id: &str, url: &str) -> WebhookDto {
        WebhookDto {
            id: id.to_string(),
            url: url.to_string(),
            valid: true,
            created_timestamp: None,
        }
    }

    #[test]
    fn add_is_idempotent_by_id() {
        let mut env = WebhookEnvironment::new("production");
        env.add_webhook(hook("1", "https://example.com/hook"));
        env.add_webhook(hook("1", "https://example.com/hook"));
        env.add_webhook(hook("2", "https://example.com/other"));
        assert_eq!(env.webhooks().len(), 2);
    }

    #[test]
    fn remove_reports_whether_the_id_was_tracked() {
        let mut env = WebhookEnvironment::new("staging");
        env.add_webhook(hook("1", "https://example.com/hook"));
        assert!(env.remove_webhook("1"));
        assert!(!env.remove_webhook("1"));
        assert!(env.webhooks().is_empty());
    }

    #[test]
    fn from_dto_carries_existing_registrations() {
        let env = WebhookEnvironment::from_dto(WebhookEnvironmentDto {
            environment_name: "production".into(),
            webhooks: vec![hook("9", "https://example.com/existing")],
        });
        assert_eq!(env.name(), "production");
        assert_eq!(env.webhooks()[0].id, "9");
    }
}
