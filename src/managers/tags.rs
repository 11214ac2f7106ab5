use crate::errors::ToolError;
use crate::services::desk_api::DeskApi;
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const TAG_TOOLS: &[&str] = &[
    "zoho_get_ticket_tags",
    "zoho_add_ticket_tags",
    "zoho_remove_ticket_tag",
];

pub struct TagManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
}

impl TagManager {
    pub fn new(logger: Logger, validation: Validation, desk: Arc<DeskApi>) -> Self {
        Self {
            logger: logger.child("tags"),
            validation,
            desk,
        }
    }

    async fn get(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        Ok(self.desk.get_ticket_tags(&ticket_id).await.into_result())
    }

    async fn add(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let tags = self.validation.ensure_string_array(args.get("tags"), "tags")?;
        self.logger.debug(
            "Tagging ticket",
            Some(&serde_json::json!({ "ticket_id": ticket_id, "count": tags.len() })),
        );
        Ok(self
            .desk
            .add_ticket_tags(&ticket_id, &tags)
            .await
            .into_result())
    }

    async fn remove(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let tag_id = self.validation.ensure_string(args.get("tag_id"), "tag_id")?;
        let envelope = self.desk.remove_ticket_tag(&ticket_id, &tag_id).await;
        if envelope.is_success() {
            return Ok(Value::String(format!(
                "Tag {} removed from ticket {}",
                tag_id, ticket_id
            )));
        }
        Ok(envelope.into_result())
    }
}

#[async_trait]
impl ToolHandler for TagManager {
    fn tools(&self) -> &'static [&'static str] {
        TAG_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_get_ticket_tags" => self.get(&args).await,
            "zoho_add_ticket_tags" => self.add(&args).await,
            "zoho_remove_ticket_tag" => self.remove(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the tag manager",
                tool
            ))),
        }
    }
}
