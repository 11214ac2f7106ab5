use crate::errors::ToolError;
use crate::services::desk_api::{DeskApi, NewTimeEntry, PageQuery, TimeEntryUpdate};
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const TIME_ENTRY_TOOLS: &[&str] = &[
    "zoho_list_time_entries",
    "zoho_add_time_entry",
    "zoho_update_time_entry",
    "zoho_delete_time_entry",
];

pub struct TimeEntryManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
}

impl TimeEntryManager {
    pub fn new(logger: Logger, validation: Validation, desk: Arc<DeskApi>) -> Self {
        Self {
            logger: logger.child("time_entries"),
            validation,
            desk,
        }
    }

    async fn list(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let page = PageQuery {
            limit: self
                .validation
                .ensure_optional_u64(args.get("limit"), "limit")?,
            from: self.validation.ensure_optional_u64(args.get("from"), "from")?,
        };
        Ok(self
            .desk
            .list_time_entries(&ticket_id, &page)
            .await
            .into_result())
    }

    async fn add(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let entry = NewTimeEntry {
            description: self
                .validation
                .ensure_optional_string(args.get("description"), "description")?,
            hours_spent: self
                .validation
                .ensure_optional_u64(args.get("hours_spent"), "hours_spent")?,
            minutes_spent: self
                .validation
                .ensure_optional_u64(args.get("minutes_spent"), "minutes_spent")?,
            bill_status: self
                .validation
                .ensure_optional_string(args.get("bill_status"), "bill_status")?,
            agent_id: self
                .validation
                .ensure_optional_string(args.get("agent_id"), "agent_id")?,
        };
        self.logger.debug(
            "Logging time entry",
            Some(&serde_json::json!({ "ticket_id": ticket_id })),
        );
        Ok(self
            .desk
            .add_time_entry(&ticket_id, &entry)
            .await
            .into_result())
    }

    async fn update(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let entry_id = self
            .validation
            .ensure_string(args.get("time_entry_id"), "time_entry_id")?;
        let update = TimeEntryUpdate {
            description: self
                .validation
                .ensure_optional_string(args.get("description"), "description")?,
            hours_spent: self
                .validation
                .ensure_optional_u64(args.get("hours_spent"), "hours_spent")?,
            minutes_spent: self
                .validation
                .ensure_optional_u64(args.get("minutes_spent"), "minutes_spent")?,
            bill_status: self
                .validation
                .ensure_optional_string(args.get("bill_status"), "bill_status")?,
        };
        Ok(self
            .desk
            .update_time_entry(&ticket_id, &entry_id, &update)
            .await
            .into_result())
    }

    async fn delete(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let entry_id = self
            .validation
            .ensure_string(args.get("time_entry_id"), "time_entry_id")?;
        let envelope = self.desk.delete_time_entry(&ticket_id, &entry_id).await;
        if envelope.is_success() {
            return Ok(Value::String(format!(
                "Time entry {} deleted from ticket {}",
                entry_id, ticket_id
            )));
        }
        Ok(envelope.into_result())
    }
}

#[async_trait]
impl ToolHandler for TimeEntryManager {
    fn tools(&self) -> &'static [&'static str] {
        TIME_ENTRY_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_list_time_entries" => self.list(&args).await,
            "zoho_add_time_entry" => self.add(&args).await,
            "zoho_update_time_entry" => self.update(&args).await,
            "zoho_delete_time_entry" => self.delete(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the time entry manager",
                tool
            ))),
        }
    }
}
