use crate::constants::api as api_constants;
use crate::errors::ToolError;
use crate::services::credentials::RefreshCredentials;
use crate::services::logger::Logger;
use serde::Deserialize;
use std::time::Duration;

/// Token endpoint response. Zoho includes more fields (scope, api_domain,
/// token_type); only the access token matters to this process.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchanges a refresh token for a fresh access token. Performs exactly one
/// round trip per call; retry policy belongs to the caller. Never mutates the
/// credential store.
pub struct TokenRefresher {
    logger: Logger,
    client: reqwest::Client,
    token_url: String,
}

impl TokenRefresher {
    pub fn new(logger: Logger) -> Result<Self, ToolError> {
        Self::with_token_url(logger, api_constants::OAUTH_TOKEN_URL)
    }

    pub fn with_token_url(logger: Logger, token_url: impl Into<String>) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(api_constants::TIMEOUT_TOKEN_MS))
            .build()
            .map_err(|err| {
                ToolError::internal(format!("Failed to build OAuth HTTP client: {}", err))
            })?;
        Ok(Self {
            logger: logger.child("oauth"),
            client,
            token_url: token_url.into(),
        })
    }

    pub async fn refresh(&self, credentials: &RefreshCredentials) -> Result<String, ToolError> {
        let form = [
            ("refresh_token", credentials.refresh_token.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                ToolError::retryable(format!("Token refresh failed ({})", status.as_u16()))
                    .with_details(serde_json::json!({ "status": status.as_u16() })),
            );
        }

        let payload: TokenResponse = response
            .json()
            .await
            .map_err(|_| ToolError::internal("Token endpoint returned an unparseable body"))?;
        let token = payload
            .access_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ToolError::internal("Token endpoint response did not contain access_token")
            })?;

        self.logger.debug(
            "Exchanged refresh token",
            Some(&serde_json::json!({ "expires_in": payload.expires_in })),
        );
        Ok(token)
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ToolError {
    if err.is_timeout() {
        ToolError::timeout(err.to_string())
    } else {
        ToolError::retryable(err.to_string())
    }
}
