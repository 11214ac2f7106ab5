use crate::errors::ToolError;
use crate::services::desk_api::{
    DeskApi, NewTicket, PageQuery, TicketListQuery, TicketUpdate,
};
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const TICKET_TOOLS: &[&str] = &[
    "zoho_list_tickets",
    "zoho_get_ticket",
    "zoho_create_ticket",
    "zoho_update_ticket",
    "zoho_delete_ticket",
    "zoho_move_ticket",
    "zoho_search_tickets",
    "zoho_get_ticket_full_context",
];

pub struct TicketManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
}

impl TicketManager {
    pub fn new(logger: Logger, validation: Validation, desk: Arc<DeskApi>) -> Self {
        Self {
            logger: logger.child("tickets"),
            validation,
            desk,
        }
    }

    async fn list(&self, args: &Value) -> Result<Value, ToolError> {
        let query = TicketListQuery {
            status: self
                .validation
                .ensure_optional_string(args.get("status"), "status")?,
            limit: self
                .validation
                .ensure_optional_u64(args.get("limit"), "limit")?,
            sort_by: self
                .validation
                .ensure_optional_string(args.get("sort_by"), "sort_by")?,
            from: self.validation.ensure_optional_u64(args.get("from"), "from")?,
        };
        Ok(self.desk.list_tickets(&query).await.into_result())
    }

    async fn get(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let include_threads = self
            .validation
            .ensure_optional_bool(args.get("include_threads"), "include_threads")?
            .unwrap_or(true);

        let ticket = self.desk.get_ticket(&ticket_id).await;
        if !include_threads || !ticket.is_success() {
            return Ok(ticket.into_result());
        }
        let threads = self.desk.get_ticket_threads(&ticket_id).await;
        let mut merged = ticket.into_result();
        if let Value::Object(map) = &mut merged {
            map.insert("threads".to_string(), threads.into_result());
        }
        Ok(merged)
    }

    async fn create(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket = NewTicket {
            subject: self.validation.ensure_string(args.get("subject"), "subject")?,
            description: self
                .validation
                .ensure_string(args.get("description"), "description")?,
            contact_id: self
                .validation
                .ensure_optional_string(args.get("contact_id"), "contact_id")?,
            department_id: self
                .validation
                .ensure_optional_string(args.get("department_id"), "department_id")?,
            priority: self
                .validation
                .ensure_optional_string(args.get("priority"), "priority")?,
            status: self
                .validation
                .ensure_optional_string(args.get("status"), "status")?,
            assignee_id: self
                .validation
                .ensure_optional_string(args.get("assignee_id"), "assignee_id")?,
        };
        Ok(self.desk.create_ticket(&ticket).await.into_result())
    }

    async fn update(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let update = TicketUpdate {
            subject: self
                .validation
                .ensure_optional_string(args.get("subject"), "subject")?,
            description: self
                .validation
                .ensure_optional_string(args.get("description"), "description")?,
            status: self
                .validation
                .ensure_optional_string(args.get("status"), "status")?,
            priority: self
                .validation
                .ensure_optional_string(args.get("priority"), "priority")?,
            assignee_id: self
                .validation
                .ensure_optional_string(args.get("assignee_id"), "assignee_id")?,
            department_id: self
                .validation
                .ensure_optional_string(args.get("department_id"), "department_id")?,
        };
        Ok(self
            .desk
            .update_ticket(&ticket_id, &update)
            .await
            .into_result())
    }

    async fn delete(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let envelope = self.desk.delete_ticket(&ticket_id).await;
        if envelope.is_success() {
            return Ok(Value::String(format!(
                "Ticket {} deleted successfully",
                ticket_id
            )));
        }
        Ok(envelope.into_result())
    }

    async fn move_to_department(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let department_id = self
            .validation
            .ensure_string(args.get("department_id"), "department_id")?;
        Ok(self
            .desk
            .move_ticket(&ticket_id, &department_id)
            .await
            .into_result())
    }

    async fn search(&self, args: &Value) -> Result<Value, ToolError> {
        let query = self.validation.ensure_string(args.get("query"), "query")?;
        let limit = self
            .validation
            .ensure_optional_u64(args.get("limit"), "limit")?;
        Ok(self.desk.search_tickets(&query, limit).await.into_result())
    }

    /// Ticket plus threads plus comments in one shot. The three calls run
    /// concurrently; a failed sub-call shows up in its own field, but a failed
    /// primary call is the whole answer.
    async fn full_context(&self, args: &Value) -> Result<Value, ToolError> {
        let ticket_id = self.validation.ensure_string(args.get("ticket_id"), "ticket_id")?;
        let page_query = PageQuery::default();
        let (ticket, threads, comments) = tokio::join!(
            self.desk.get_ticket(&ticket_id),
            self.desk.get_ticket_threads(&ticket_id),
            self.desk.get_ticket_comments(&ticket_id, &page_query),
        );

        if !ticket.is_success() {
            self.logger.debug(
                "Full-context primary call failed",
                Some(&serde_json::json!({ "ticket_id": ticket_id, "status": ticket.status })),
            );
            return Ok(ticket.into_result());
        }

        let mut merged = ticket.into_result();
        if let Value::Object(map) = &mut merged {
            map.insert("threads".to_string(), threads.into_result());
            map.insert("comments".to_string(), comments.into_result());
        }
        Ok(merged)
    }
}

#[async_trait]
impl ToolHandler for TicketManager {
    fn tools(&self) -> &'static [&'static str] {
        TICKET_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_list_tickets" => self.list(&args).await,
            "zoho_get_ticket" => self.get(&args).await,
            "zoho_create_ticket" => self.create(&args).await,
            "zoho_update_ticket" => self.update(&args).await,
            "zoho_delete_ticket" => self.delete(&args).await,
            "zoho_move_ticket" => self.move_to_department(&args).await,
            "zoho_search_tickets" => self.search(&args).await,
            "zoho_get_ticket_full_context" => self.full_context(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the ticket manager",
                tool
            ))),
        }
    }
}
