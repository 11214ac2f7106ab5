use crate::errors::ToolError;
use crate::services::desk_api::{DeskApi, NewComment, NewThread, PageQuery};
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::services::webhook::{Notifier, ThreadKind};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const THREAD_TOOLS: &[&str] = &[
    "zoho_reply_ticket",
    "zoho_list_ticket_comments",
    "zoho_add_ticket_comment",
];

/// Reply and comment mutations. These are the only operations that feed the
/// notification side-channel, and they do so strictly after remote success.
pub struct ThreadManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
    notifier: Arc<Notifier>,
}

impl ThreadManager {
    pub fn new(
        logger: Logger,
        validation: Validation,
        desk: Arc<DeskApi>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            logger: logger.child("threads"),
            validation,
            desk,
            notifier,
        }
    }

    async fn reply(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let content = self.validation.ensure_string(args.get("content"), "content")?;
        let is_public = self
            .validation
            .ensure_optional_bool(args.get("is_public"), "is_public")?
            .unwrap_or(true);

        let reply = NewThread {
            content: content.clone(),
            is_public_reply: is_public,
            content_type: None,
        };
        let envelope = self.desk.add_ticket_reply(&ticket_id, &reply).await;
        if envelope.is_success() {
            self.notify(ThreadKind::Reply, &ticket_id, &content, is_public)
                .await;
        }
        Ok(envelope.into_result())
    }

    async fn list_comments(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let page = PageQuery {
            limit: self
                .validation
                .ensure_optional_u64(args.get("limit"), "limit")?,
            from: self.validation.ensure_optional_u64(args.get("from"), "from")?,
        };
        Ok(self
            .desk
            .get_ticket_comments(&ticket_id, &page)
            .await
            .into_result())
    }

    async fn add_comment(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let content = self.validation.ensure_string(args.get("content"), "content")?;
        let is_public = self
            .validation
            .ensure_optional_bool(args.get("is_public"), "is_public")?
            .unwrap_or(false);
        let content_type = self
            .validation
            .ensure_optional_string(args.get("content_type"), "content_type")?
            .unwrap_or_else(|| "html".to_string());

        let comment = NewComment {
            content: content.clone(),
            is_public,
            content_type: Some(content_type),
        };
        let envelope = self.desk.add_ticket_comment(&ticket_id, &comment).await;
        if envelope.is_success() {
            self.notify(ThreadKind::Comment, &ticket_id, &content, is_public)
                .await;
        }
        Ok(envelope.into_result())
    }

    /// Fire-and-forget: fetches a best-effort ticket summary and hands off to
    /// the notifier. Whatever goes wrong here stays here.
    async fn notify(&self, kind: ThreadKind, ticket_id: &str, content: &str, is_public: bool) {
        if !self.notifier.is_configured() {
            return;
        }
        let summary = {
            let envelope = self.desk.get_ticket(ticket_id).await;
            if envelope.is_success() {
                envelope.data
            } else {
                self.logger.debug(
                    "Ticket summary unavailable for notification",
                    Some(&serde_json::json!({ "ticket_id": ticket_id })),
                );
                Value::Object(Default::default())
            }
        };
        self.notifier
            .notify_thread_posted(kind, &summary, content, is_public)
            .await;
    }
}

#[async_trait]
impl ToolHandler for ThreadManager {
    fn tools(&self) -> &'static [&'static str] {
        THREAD_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_reply_ticket" => self.reply(&args).await,
            "zoho_list_ticket_comments" => self.list_comments(&args).await,
            "zoho_add_ticket_comment" => self.add_comment(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the thread manager",
                tool
            ))),
        }
    }
}
