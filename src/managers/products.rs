use crate::errors::ToolError;
use crate::services::desk_api::{DeskApi, PageQuery};
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const PRODUCT_TOOLS: &[&str] = &["zoho_list_products", "zoho_get_product"];

pub struct ProductManager {
    logger: Logger,
    validation: Validation,
    desk: Arc<DeskApi>,
}

impl ProductManager {
    pub fn new(logger: Logger, validation: Validation, desk: Arc<DeskApi>) -> Self {
        Self {
            logger: logger.child("products"),
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
        self.logger.debug("Listing products", None);
        Ok(self.desk.list_products(&page).await.into_result())
    }

    async fn get(&self, args: &Value) -> Result<Value, ToolError> {
        let product_id = self
            .validation
            .ensure_string(args.get("product_id"), "product_id")?;
        Ok(self.desk.get_product(&product_id).await.into_result())
    }
}

#[async_trait]
impl ToolHandler for ProductManager {
    fn tools(&self) -> &'static [&'static str] {
        PRODUCT_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "zoho_list_products" => self.list(&args).await,
            "zoho_get_product" => self.get(&args).await,
            _ => Err(ToolError::internal(format!(
                "{} is not served by the product manager",
                tool
            ))),
        }
    }
}
