use crate::constants::webhook as webhook_constants;
use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::utils::text::{strip_html, truncate_chars};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadKind {
    Reply,
    Comment,
}

impl ThreadKind {
    fn label(self) -> &'static str {
        match self {
            ThreadKind::Reply => "reply",
            ThreadKind::Comment => "comment",
        }
    }
}

/// Best-effort outbound notifications for reply/comment mutations. Nothing in
/// here may fail the triggering tool call: every error ends at a warn log.
pub struct Notifier {
    logger: Logger,
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(logger: Logger, webhook_url: Option<String>) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(webhook_constants::TIMEOUT_POST_MS))
            .build()
            .map_err(|err| {
                ToolError::internal(format!("Failed to build webhook HTTP client: {}", err))
            })?;
        Ok(Self {
            logger: logger.child("webhook"),
            client,
            webhook_url,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Posts a formatted summary of a successful reply/comment. `ticket` is
    /// whatever summary data could be fetched; missing fields render as "-".
    pub async fn notify_thread_posted(
        &self,
        kind: ThreadKind,
        ticket: &Value,
        content: &str,
        is_public: bool,
    ) {
        let Some(url) = self.webhook_url.as_deref() else {
            return;
        };

        let payload = build_message(kind, ticket, content, is_public);
        match self.client.post(url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                self.logger.debug(
                    "Webhook delivered",
                    Some(&serde_json::json!({ "kind": kind.label() })),
                );
            }
            Ok(response) => {
                self.logger.warn(
                    "Webhook rejected",
                    Some(&serde_json::json!({
                        "kind": kind.label(),
                        "status": response.status().as_u16(),
                    })),
                );
            }
            Err(err) => {
                self.logger.warn(
                    "Webhook delivery failed",
                    Some(&serde_json::json!({
                        "kind": kind.label(),
                        "error": err.to_string(),
                    })),
                );
            }
        }
    }
}

fn field<'a>(ticket: &'a Value, key: &str) -> &'a str {
    ticket.get(key).and_then(|v| v.as_str()).unwrap_or("-")
}

fn build_message(kind: ThreadKind, ticket: &Value, content: &str, is_public: bool) -> Value {
    let number = field(ticket, "ticketNumber");
    let subject = field(ticket, "subject");
    let status = field(ticket, "status");
    let priority = field(ticket, "priority");
    let visibility = if is_public { "public" } else { "private" };
    let excerpt = truncate_chars(&strip_html(content), webhook_constants::EXCERPT_MAX_CHARS);

    let headline = format!(
        "New {} {} on ticket #{}: {}",
        visibility,
        kind.label(),
        number,
        subject
    );
    serde_json::json!({
        "text": headline,
        "blocks": [
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*{}*\nStatus: {} | Priority: {}", headline, status, priority),
                }
            },
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": excerpt }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::{build_message, ThreadKind};
    use serde_json::json;

    #[test]
    fn build_message_strips_markup_and_names_the_ticket() {
        let ticket = json!({
            "ticketNumber": "101",
            "subject": "Login broken",
            "status": "Open",
            "priority": "High",
        });
        let message = build_message(
            ThreadKind::Reply,
            &ticket,
            "<p>We are <b>on it</b></p>",
            true,
        );
        let text = message["text"].as_str().unwrap();
        assert!(text.contains("public reply"));
        assert!(text.contains("#101"));
        let excerpt = message["blocks"][1]["text"]["text"].as_str().unwrap();
        assert_eq!(excerpt, "We are on it");
    }

    #[test]
    fn build_message_truncates_long_content() {
        let ticket = json!({});
        let long = "x".repeat(2_000);
        let message = build_message(ThreadKind::Comment, &ticket, &long, false);
        let excerpt = message["blocks"][1]["text"]["text"].as_str().unwrap();
        assert_eq!(excerpt.chars().count(), 500);
        assert!(message["text"].as_str().unwrap().contains("private comment"));
    }
}
