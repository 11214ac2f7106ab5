use crate::errors::ToolError;
use crate::services::desk_api::{DeskApi, NewTask, TaskListQuery, TaskUpdate};
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const TASK_TOOLS: &[&str] = &[
    "zoho_list_tasks",
    "zoho_get_task",
    "zoho_create_task",
    "zoho_update_task",
    "zoho_delete_task",
];

pub struct TaskManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
}

impl TaskManager {
    pub fn new(logger: Logger, validation: Validation, desk: Arc<DeskApi>) -> Self {
        Self {
            logger: logger.child("tasks"),
            validation,
            desk,
        }
    }

    async fn list(&self, args: &Value) -> Result<Value, ToolError> {
        let query = TaskListQuery {
            department_id: self
                .validation
                .ensure_optional_string(args.get("department_id"), "department_id")?,
            limit: self
                .validation
                .ensure_optional_u64(args.get("limit"), "limit")?,
            from: self.validation.ensure_optional_u64(args.get("from"), "from")?,
        };
        Ok(self.desk.list_tasks(&query).await.into_result())
    }

    async fn get(&self, args: &Value) -> Result<Value, ToolError> {
        let task_id = self.validation.ensure_string(args.get("task_id"), "task_id")?;
        Ok(self.desk.get_task(&task_id).await.into_result())
    }

    async fn create(&self, args: &Value) -> Result<Value, ToolError> {
        let task = NewTask {
            subject: self.validation.ensure_string(args.get("subject"), "subject")?,
            department_id: self
                .validation
                .ensure_optional_string(args.get("department_id"), "department_id")?,
            ticket_id: self
                .validation
                .ensure_optional_string(args.get("ticket_id"), "ticket_id")?,
            description: self
                .validation
                .ensure_optional_string(args.get("description"), "description")?,
            due_date: self
                .validation
                .ensure_optional_string(args.get("due_date"), "due_date")?,
            priority: self
                .validation
                .ensure_optional_string(args.get("priority"), "priority")?,
            owner_id: self
                .validation
                .ensure_optional_string(args.get("owner_id"), "owner_id")?,
        };
        self.logger.debug(
            "Creating task",
            Some(&serde_json::json!({ "linked_ticket": task.ticket_id.is_some() })),
        );
        Ok(self.desk.create_task(&task).await.into_result())
    }

    async fn update(&self, args: &Value) -> Result<Value, ToolError> {
        let task_id = self.validation.ensure_string(args.get("task_id"), "task_id")?;
        let update = TaskUpdate {
            subject: self
                .validation
                .ensure_optional_string(args.get("subject"), "subject")?,
            description: self
                .validation
                .ensure_optional_string(args.get("description"), "description")?,
            due_date: self
                .validation
                .ensure_optional_string(args.get("due_date"), "due_date")?,
            priority: self
                .validation
                .ensure_optional_string(args.get("priority"), "priority")?,
            status: self
                .validation
                .ensure_optional_string(args.get("status"), "status")?,
            owner_id: self
                .validation
                .ensure_optional_string(args.get("owner_id"), "owner_id")?,
        };
        Ok(self.desk.update_task(&task_id, &update).await.into_result())
    }

    async fn delete(&self, args: &Value) -> Result<Value, ToolError> {
        let task_id = self.validation.ensure_string(args.get("task_id"), "task_id")?;
        let envelope = self.desk.delete_task(&task_id).await;
        if envelope.is_success() {
            return Ok(Value::String(format!(
                "Task {} deleted successfully",
                task_id
            )));
        }
        Ok(envelope.into_result())
    }
}

#[async_trait]
impl ToolHandler for TaskManager {
    fn tools(&self) -> &'static [&'static str] {
        TASK_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_list_tasks" => self.list(&args).await,
            "zoho_get_task" => self.get(&args).await,
            "zoho_create_task" => self.create(&args).await,
            "zoho_update_task" => self.update(&args).await,
            "zoho_delete_task" => self.delete(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the task manager",
                tool
            ))),
        }
    }
}
