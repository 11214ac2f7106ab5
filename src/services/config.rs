use crate::errors::ToolError;
use serde::Deserialize;
use std::path::PathBuf;

const ENV_ACCESS_TOKEN: &str = "ZOHO_ACCESS_TOKEN";
const ENV_ORG_ID: &str = "ZOHO_ORG_ID";
const ENV_CLIENT_ID: &str = "ZOHO_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "ZOHO_CLIENT_SECRET";
const ENV_REFRESH_TOKEN: &str = "ZOHO_REFRESH_TOKEN";
const ENV_WEBHOOK_URL: &str = "ZOHO_WEBHOOK_URL";
const ENV_CONFIG_FILE: &str = "ZOHO_CONFIG_FILE";
const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Startup credentials. Environment variables win over the config file; the
/// file uses the same camelCase keys as the hosted integrations expect.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub access_token: String,
    pub org_id: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ToolError> {
        if let Some(config) = Self::from_env() {
            return Ok(config);
        }
        let path = Self::config_file_path();
        Self::from_file(&path).map_err(|err| {
            ToolError::invalid_params(
                "Zoho Desk credentials not found. Set ZOHO_ACCESS_TOKEN and ZOHO_ORG_ID, \
                 or provide a config.json file.",
            )
            .with_details(serde_json::json!({
                "config_file": path.display().to_string(),
                "cause": err.message,
            }))
        })
    }

    fn from_env() -> Option<Self> {
        let access_token = read_env(ENV_ACCESS_TOKEN)?;
        let org_id = read_env(ENV_ORG_ID)?;
        Some(Self {
            access_token,
            org_id,
            client_id: read_env(ENV_CLIENT_ID),
            client_secret: read_env(ENV_CLIENT_SECRET),
            refresh_token: read_env(ENV_REFRESH_TOKEN),
            webhook_url: read_env(ENV_WEBHOOK_URL),
        })
    }

    pub fn config_file_path() -> PathBuf {
        read_env(ENV_CONFIG_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, ToolError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ToolError::invalid_params(format!("Cannot read {}: {}", path.display(), err))
        })?;
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Result<Self, ToolError> {
        let config: Config = serde_json::from_str(raw)
            .map_err(|err| ToolError::invalid_params(format!("Invalid config file: {}", err)))?;
        if config.access_token.trim().is_empty() || config.org_id.trim().is_empty() {
            return Err(ToolError::invalid_params(
                "Config file must contain accessToken and orgId",
            ));
        }
        Ok(config)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn parse_accepts_minimal_camel_case_file() {
        let config =
            Config::parse(r#"{"accessToken": "tok", "orgId": "123"}"#).expect("must parse");
        assert_eq!(config.access_token, "tok");
        assert_eq!(config.org_id, "123");
        assert!(config.refresh_token.is_none());
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn parse_reads_optional_refresh_and_webhook_fields() {
        let config = Config::parse(
            r#"{
                "accessToken": "tok",
                "orgId": "123",
                "clientId": "cid",
                "clientSecret": "secret",
                "refreshToken": "refresh",
                "webhookUrl": "https://hooks.example.com/x"
            }"#,
        )
        .expect("must parse");
        assert_eq!(config.client_id.as_deref(), Some("cid"));
        assert_eq!(config.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://hooks.example.com/x")
        );
    }

    #[test]
    fn parse_rejects_missing_required_pair() {
        assert!(Config::parse(r#"{"accessToken": "tok"}"#).is_err());
        assert!(Config::parse(r#"{"accessToken": "", "orgId": "123"}"#).is_err());
        assert!(Config::parse("not json").is_err());
    }
}
