use crate::errors::ToolError;
use crate::services::desk_api::DeskApi;
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const DIRECTORY_TOOLS: &[&str] = &[
    "zoho_list_departments",
    "zoho_get_department",
    "zoho_list_agents",
    "zoho_get_agent",
];

/// Read-only org structure: departments and the agents who staff them.
pub struct DirectoryManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
}

impl DirectoryManager {
    pub fn new(logger: Logger, validation: Validation, desk: Arc<DeskApi>) -> Self {
        Self {
            logger: logger.child("directory"),
            validation,
            desk,
        }
    }

    async fn list_departments(&self) -> Result<Value, ToolError> {
        self.logger.debug("Listing departments", None);
        Ok(self.desk.list_departments().await.into_result())
    }

    async fn get_department(&self, args: &Value) -> Result<Value, ToolError> {
        let department_id = self
            .validation
            .ensure_string(args.get("department_id"), "department_id")?;
        Ok(self
            .desk
            .get_department(&department_id)
            .await
            .into_result())
    }

    async fn list_agents(&self) -> Result<Value, ToolError> {
        Ok(self.desk.list_agents().await.into_result())
    }

    async fn get_agent(&self, args: &Value) -> Result<Value, ToolError> {
        let agent_id = self.validation.ensure_string(args.get("agent_id"), "agent_id")?;
        Ok(self.desk.get_agent(&agent_id).await.into_result())
    }
}

#[async_trait]
impl ToolHandler for DirectoryManager {
    fn tools(&self) -> &'static [&'static str] {
        DIRECTORY_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_list_departments" => self.list_departments().await,
            "zoho_get_department" => self.get_department(&args).await,
            "zoho_list_agents" => self.list_agents().await,
            "zoho_get_agent" => self.get_agent(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the directory manager",
                tool
            ))),
        }
    }
}
