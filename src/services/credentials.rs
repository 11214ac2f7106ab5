use crate::services::config::Config;
use crate::services::logger::Logger;
use std::sync::RwLock;

/// The full refresh triple. Constructed only when all three pieces are
/// present, so holding one is proof that auto-refresh is possible.
#[derive(Debug, Clone)]
pub struct RefreshCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Shared credential pair for every outbound call. The access token is the
/// only mutable piece; it is swapped atomically by the pipeline after a
/// successful refresh and never written back to disk or environment.
pub struct CredentialStore {
    access_token: RwLock<String>,
    org_id: String,
    refresh: Option<RefreshCredentials>,
}

impl CredentialStore {
    pub fn new(
        access_token: impl Into<String>,
        org_id: impl Into<String>,
        refresh: Option<RefreshCredentials>,
    ) -> Self {
        Self {
            access_token: RwLock::new(access_token.into()),
            org_id: org_id.into(),
            refresh,
        }
    }

    pub fn from_config(config: &Config, logger: &Logger) -> Self {
        let refresh = match (
            config.client_id.as_deref(),
            config.client_secret.as_deref(),
            config.refresh_token.as_deref(),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Some(RefreshCredentials {
                    client_id: client_id.to_string(),
                    client_secret: client_secret.to_string(),
                    refresh_token: refresh_token.to_string(),
                })
            }
            (None, None, None) => None,
            (client_id, client_secret, refresh_token) => {
                let missing: Vec<&str> = [
                    ("clientId", client_id.is_none()),
                    ("clientSecret", client_secret.is_none()),
                    ("refreshToken", refresh_token.is_none()),
                ]
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| *name)
                .collect();
                logger.warn(
                    "Token auto-refresh disabled: refresh credentials are incomplete",
                    Some(&serde_json::json!({ "missing": missing })),
                );
                None
            }
        };
        Self::new(config.access_token.clone(), config.org_id.clone(), refresh)
    }

    pub fn access_token(&self) -> String {
        self.access_token
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn refresh_credentials(&self) -> Option<&RefreshCredentials> {
        self.refresh.as_ref()
    }

    pub fn replace_access_token(&self, token: String) {
        let mut guard = self
            .access_token
            .write()
            .unwrap_or_else(|err| err.into_inner());
        *guard = token;
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialStore, RefreshCredentials};
    use crate::services::config::Config;
    use crate::services::logger::Logger;

    fn config(client_id: Option<&str>, secret: Option<&str>, refresh: Option<&str>) -> Config {
        Config {
            access_token: "tok".to_string(),
            org_id: "42".to_string(),
            client_id: client_id.map(String::from),
            client_secret: secret.map(String::from),
            refresh_token: refresh.map(String::from),
            webhook_url: None,
        }
    }

    #[test]
    fn replace_access_token_is_visible_to_later_reads() {
        let store = CredentialStore::new("old", "42", None);
        assert_eq!(store.access_token(), "old");
        store.replace_access_token("new".to_string());
        assert_eq!(store.access_token(), "new");
        assert_eq!(store.org_id(), "42");
    }

    #[test]
    fn full_refresh_triple_enables_auto_refresh() {
        let logger = Logger::new("test");
        let store =
            CredentialStore::from_config(&config(Some("id"), Some("sec"), Some("ref")), &logger);
        let refresh: &RefreshCredentials = store.refresh_credentials().expect("triple present");
        assert_eq!(refresh.client_id, "id");
        assert_eq!(refresh.refresh_token, "ref");
    }

    #[test]
    fn partial_refresh_triple_disables_auto_refresh() {
        let logger = Logger::new("test");
        let store = CredentialStore::from_config(&config(Some("id"), None, Some("ref")), &logger);
        assert!(store.refresh_credentials().is_none());
    }

    #[test]
    fn absent_refresh_triple_disables_auto_refresh() {
        let logger = Logger::new("test");
        let store = CredentialStore::from_config(&config(None, None, None), &logger);
        assert!(store.refresh_credentials().is_none());
    }
}
