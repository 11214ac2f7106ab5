#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::Mutex;

use zohodesk_mcp::services::credentials::{CredentialStore, RefreshCredentials};
use zohodesk_mcp::services::desk_api::DeskApi;
use zohodesk_mcp::services::logger::Logger;
use zohodesk_mcp::services::oauth::TokenRefresher;

/// Serializes tests that mutate process environment variables.
pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub fn test_logger() -> Logger {
    Logger::new("test")
}

pub fn refresh_triple() -> RefreshCredentials {
    RefreshCredentials {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        refresh_token: "refresh-token".to_string(),
    }
}

pub fn store_without_refresh(token: &str) -> Arc<CredentialStore> {
    Arc::new(CredentialStore::new(token, "700000001", None))
}

pub fn store_with_refresh(token: &str) -> Arc<CredentialStore> {
    Arc::new(CredentialStore::new(
        token,
        "700000001",
        Some(refresh_triple()),
    ))
}

/// A desk pipeline pointed at mock servers instead of the real bases.
pub fn desk_api(desk_base: &str, token_base: &str, store: Arc<CredentialStore>) -> DeskApi {
    let logger = test_logger();
    let refresher = Arc::new(
        TokenRefresher::with_token_url(logger.clone(), token_base).expect("refresher must build"),
    );
    DeskApi::with_base_url(logger, store, refresher, desk_base).expect("desk api must build")
}
