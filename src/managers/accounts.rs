use crate::errors::ToolError;
use crate::services::desk_api::{AccountUpdate, DeskApi, NewAccount, PageQuery};
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const ACCOUNT_TOOLS: &[&str] = &[
    "zoho_list_accounts",
    "zoho_get_account",
    "zoho_create_account",
    "zoho_update_account",
];

pub struct AccountManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
}

impl AccountManager {
    pub fn new(logger: Logger, validation: Validation, desk: Arc<DeskApi>) -> Self {
        Self {
            logger: logger.child("accounts"),
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
        Ok(self.desk.list_accounts(&page).await.into_result())
    }

    async fn get(&self, args: &Value) -> Result<Value, ToolError> {
        let account_id = self
            .validation
            .ensure_string(args.get("account_id"), "account_id")?;
        Ok(self.desk.get_account(&account_id).await.into_result())
    }

    async fn create(&self, args: &Value) -> Result<Value, ToolError> {
        let account = NewAccount {
            account_name: self
                .validation
                .ensure_string(args.get("account_name"), "account_name")?,
            email: self
                .validation
                .ensure_optional_string(args.get("email"), "email")?,
            phone: self
                .validation
                .ensure_optional_string(args.get("phone"), "phone")?,
            website: self
                .validation
                .ensure_optional_string(args.get("website"), "website")?,
        };
        self.logger.debug(
            "Creating account",
            Some(&serde_json::json!({ "account_name": account.account_name })),
        );
        Ok(self.desk.create_account(&account).await.into_result())
    }

    async fn update(&self, args: &Value) -> Result<Value, ToolError> {
        let account_id = self
            .validation
            .ensure_string(args.get("account_id"), "account_id")?;
        let update = AccountUpdate {
            account_name: self
                .validation
                .ensure_optional_string(args.get("account_name"), "account_name")?,
            email: self
                .validation
                .ensure_optional_string(args.get("email"), "email")?,
            phone: self
                .validation
                .ensure_optional_string(args.get("phone"), "phone")?,
            website: self
                .validation
                .ensure_optional_string(args.get("website"), "website")?,
        };
        Ok(self
            .desk
            .update_account(&account_id, &update)
            .await
            .into_result())
    }
}

#[async_trait]
impl ToolHandler for AccountManager {
    fn tools(&self) -> &'static [&'static str] {
        ACCOUNT_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_list_accounts" => self.list(&args).await,
            "zoho_get_account" => self.get(&args).await,
            "zoho_create_account" => self.create(&args).await,
            "zoho_update_account" => self.update(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the account manager",
                tool
            ))),
        }
    }
}
