use crate::errors::ToolError;
use crate::managers;
use crate::mcp::catalog::tool_catalog;
use crate::services::config::Config;
use crate::services::credentials::CredentialStore;
use crate::services::desk_api::DeskApi;
use crate::services::logger::Logger;
use crate::services::oauth::TokenRefresher;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use crate::services::validation::Validation;
use crate::services::webhook::Notifier;
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub tool_executor: Arc<ToolExecutor>,
}

impl App {
    /// Every catalog tool must have a handler and every handler tool must be
    /// in the catalog; anything else is a wiring bug caught at startup.
    fn validate_tool_wiring(
        handlers: &HashMap<String, Arc<dyn ToolHandler>>,
    ) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !handlers.contains_key(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        let mut unlisted: Vec<String> = handlers
            .keys()
            .filter(|name| tool_catalog().iter().all(|tool| &tool.name != *name))
            .cloned()
            .collect();
        if missing.is_empty() && unlisted.is_empty() {
            return Ok(());
        }
        missing.sort();
        unlisted.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint(
                "Every tool in tool_catalog.json must have a manager, and every manager tool \
                 must be in the catalog.",
            )
            .with_details(serde_json::json!({
                "missing_handlers": missing,
                "missing_catalog_entries": unlisted,
            })))
    }

    pub fn initialize() -> Result<Self, ToolError> {
        let logger = Logger::new("zohodesk");
        let validation = Validation::new();

        let config = Config::load()?;
        let credentials = Arc::new(CredentialStore::from_config(&config, &logger));
        let refresher = Arc::new(TokenRefresher::new(logger.clone())?);
        let desk = Arc::new(DeskApi::new(
            logger.clone(),
            credentials.clone(),
            refresher,
        )?);
        let notifier = Arc::new(Notifier::new(logger.clone(), config.webhook_url.clone())?);

        // The pipeline announces token rotations on a channel; logging them is
        // this consumer's job, not the pipeline's.
        let mut refreshes = desk.subscribe_refreshes();
        let refresh_logger = logger.child("credentials");
        tokio::spawn(async move {
            while refreshes.recv().await.is_ok() {
                refresh_logger.info("Access token refreshed", None);
            }
        });

        let ticket_manager = Arc::new(managers::tickets::TicketManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
        ));
        let thread_manager = Arc::new(managers::threads::ThreadManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
            notifier.clone(),
        ));
        let tag_manager = Arc::new(managers::tags::TagManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
        ));
        let contact_manager = Arc::new(managers::contacts::ContactManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
        ));
        let account_manager = Arc::new(managers::accounts::AccountManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
        ));
        let task_manager = Arc::new(managers::tasks::TaskManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
        ));
        let time_entry_manager = Arc::new(managers::time_entries::TimeEntryManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
        ));
        let product_manager = Arc::new(managers::products::ProductManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
        ));
        let directory_manager = Arc::new(managers::directory::DirectoryManager::new(
            logger.clone(),
            validation.clone(),
            desk.clone(),
        ));

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        register(&mut handlers, ticket_manager);
        register(&mut handlers, thread_manager);
        register(&mut handlers, tag_manager);
        register(&mut handlers, contact_manager);
        register(&mut handlers, account_manager);
        register(&mut handlers, task_manager);
        register(&mut handlers, time_entry_manager);
        register(&mut handlers, product_manager);
        register(&mut handlers, directory_manager);

        Self::validate_tool_wiring(&handlers)?;

        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), handlers));

        Ok(Self {
            logger,
            tool_executor,
        })
    }
}

fn register(handlers: &mut HashMap<String, Arc<dyn ToolHandler>>, handler: Arc<dyn ToolHandler>) {
    for tool in handler.tools() {
        handlers.insert((*tool).to_string(), handler.clone());
    }
}
