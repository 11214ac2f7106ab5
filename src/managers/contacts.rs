use crate::errors::ToolError;
use crate::services::desk_api::{ContactUpdate, DeskApi, NewContact, PageQuery};
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const CONTACT_TOOLS: &[&str] = &[
    "zoho_list_contacts",
    "zoho_get_contact",
    "zoho_create_contact",
    "zoho_update_contact",
    "zoho_get_contact_tickets",
];

pub struct ContactManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
}

impl ContactManager {
    pub fn new(logger: Logger, validation: Validation, desk: Arc<DeskApi>) -> Self {
        Self {
            logger: logger.child("contacts"),
            validation,
            desk,
        }
    }

    async fn list(&self, args: &Value) -> Result<Value, ToolError> {
        let page = PageQuery {
            limit: self
                .validation
                .ensure_optional_u64(args.get("limit"), "limit")?,
            from: self.validation.ensure_optional_u64(args.get("from"), "from")?,
        };
        Ok(self.desk.list_contacts(&page).await.into_result())
    }

    async fn get(&self, args: &Value) -> Result<Value, ToolError> {
        let contact_id = self
            .validation
            .ensure_string(args.get("contact_id"), "contact_id")?;
        Ok(self.desk.get_contact(&contact_id).await.into_result())
    }

    async fn create(&self, args: &Value) -> Result<Value, ToolError> {
        let contact = NewContact {
            last_name: self
                .validation
                .ensure_string(args.get("last_name"), "last_name")?,
            first_name: self
                .validation
                .ensure_optional_string(args.get("first_name"), "first_name")?,
            email: self
                .validation
                .ensure_optional_string(args.get("email"), "email")?,
            phone: self
                .validation
                .ensure_optional_string(args.get("phone"), "phone")?,
            account_id: self
                .validation
                .ensure_optional_string(args.get("account_id"), "account_id")?,
        };
        self.logger.debug(
            "Creating contact",
            Some(&serde_json::json!({ "has_email": contact.email.is_some() })),
        );
        Ok(self.desk.create_contact(&contact).await.into_result())
    }

    async fn update(&self, args: &Value) -> Result<Value, ToolError> {
        let contact_id = self
            .validation
            .ensure_string(args.get("contact_id"), "contact_id")?;
        let update = ContactUpdate {
            last_name: self
                .validation
                .ensure_optional_string(args.get("last_name"), "last_name")?,
            first_name: self
                .validation
                .ensure_optional_string(args.get("first_name"), "first_name")?,
            email: self
                .validation
                .ensure_optional_string(args.get("email"), "email")?,
            phone: self
                .validation
                .ensure_optional_string(args.get("phone"), "phone")?,
            account_id: self
                .validation
                .ensure_optional_string(args.get("account_id"), "account_id")?,
        };
        Ok(self
            .desk
            .update_contact(&contact_id, &update)
            .await
            .into_result())
    }

    async fn tickets(&self, args: &Value) -> Result<Value, ToolError> {
        let contact_id = self
            .validation
            .ensure_string(args.get("contact_id"), "contact_id")?;
        Ok(self
            .desk
            .get_contact_tickets(&contact_id)
            .await
            .into_result())
    }
}

#[async_trait]
impl ToolHandler for ContactManager {
    fn tools(&self) -> &'static [&'static str] {
        CONTACT_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_list_contacts" => self.list(&args).await,
            "zoho_get_contact" => self.get(&args).await,
            "zoho_create_contact" => self.create(&args).await,
            "zoho_update_contact" => self.update(&args).await,
            "zoho_get_contact_tickets" => self.tickets(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the contact manager",
                tool
            ))),
        }
    }
}
