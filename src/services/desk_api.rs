use crate::constants::api as api_constants;
use crate::errors::ToolError;
use crate::services::credentials::CredentialStore;
use crate::services::logger::Logger;
use crate::services::oauth::TokenRefresher;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use url::Url;

/// One outbound call, immutable once constructed.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PATCH,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Uniform outcome of every remote call. Ordinary HTTP errors are data, not
/// faults; only calls that never produced a readable response set
/// `transport_failed`.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub data: Value,
    pub headers: HashMap<String, String>,
    pub transport_failed: bool,
    pub transport_error: Option<String>,
}

impl ResponseEnvelope {
    fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            data: Value::Object(Default::default()),
            headers: HashMap::new(),
            transport_failed: true,
            transport_error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.transport_failed && (200..300).contains(&self.status)
    }

    fn is_auth_failure(&self) -> bool {
        !self.transport_failed && matches!(self.status, 401 | 403)
    }

    /// The value a tool result is built from: remote data for anything the
    /// server answered, a small marker object when the wire failed.
    pub fn into_result(self) -> Value {
        if self.transport_failed {
            return serde_json::json!({
                "transportFailed": true,
                "message": self.transport_error,
            });
        }
        self.data
    }
}

fn json_body<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or_else(|_| Value::Object(Default::default()))
}

#[derive(Debug, Default)]
pub struct TicketListQuery {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub from: Option<u64>,
}

#[derive(Debug, Default)]
pub struct PageQuery {
    pub limit: Option<u64>,
    pub from: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewThread {
    pub content: String,
    pub is_public_reply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Default)]
pub struct TaskListQuery {
    pub department_id: Option<String>,
    pub limit: Option<u64>,
    pub from: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_spent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_spent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_spent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_spent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_status: Option<String>,
}

/// REST client for the desk API: the authenticated request pipeline plus a
/// thin, typed method per remote operation. Shared by every manager; the only
/// mutable state behind it is the credential store's access token.
pub struct DeskApi {
    logger: Logger,
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
    refresher: Arc<TokenRefresher>,
    refresh_gate: Mutex<()>,
    refresh_events: broadcast::Sender<String>,
}

impl DeskApi {
    pub fn new(
        logger: Logger,
        credentials: Arc<CredentialStore>,
        refresher: Arc<TokenRefresher>,
    ) -> Result<Self, ToolError> {
        Self::with_base_url(logger, credentials, refresher, api_constants::DESK_BASE_URL)
    }

    pub fn with_base_url(
        logger: Logger,
        credentials: Arc<CredentialStore>,
        refresher: Arc<TokenRefresher>,
        base_url: impl Into<String>,
    ) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(api_constants::TIMEOUT_REQUEST_MS))
            .build()
            .map_err(|err| {
                ToolError::internal(format!("Failed to build desk HTTP client: {}", err))
            })?;
        let (refresh_events, _) = broadcast::channel(8);
        Ok(Self {
            logger: logger.child("desk"),
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            refresher,
            refresh_gate: Mutex::new(()),
            refresh_events,
        })
    }

    /// Emits the new access token after every successful refresh. Consumers
    /// (logging, persistence) live outside the pipeline.
    pub fn subscribe_refreshes(&self) -> broadcast::Receiver<String> {
        self.refresh_events.subscribe()
    }

    /// Issues one authenticated call. On a 401/403 first answer, refreshes the
    /// access token once and re-issues the same descriptor exactly once; the
    /// second answer is final whatever it is. Transport failures return
    /// immediately; they say nothing about the token.
    pub async fn issue(&self, descriptor: &RequestDescriptor) -> ResponseEnvelope {
        let token = self.credentials.access_token();
        let first = self.send_once(descriptor, &token).await;
        if !first.is_auth_failure() {
            return first;
        }
        if !self.refresh_after_auth_failure(&token).await {
            return first;
        }
        let token = self.credentials.access_token();
        self.send_once(descriptor, &token).await
    }

    /// Returns true when a retry is worthwhile: either this caller refreshed
    /// the token, or a concurrent caller already did while we waited on the
    /// gate. The gate collapses simultaneous 401s into one token exchange.
    async fn refresh_after_auth_failure(&self, rejected_token: &str) -> bool {
        let Some(refresh) = self.credentials.refresh_credentials() else {
            return false;
        };
        let _gate = self.refresh_gate.lock().await;
        if self.credentials.access_token() != rejected_token {
            return true;
        }
        match self.refresher.refresh(refresh).await {
            Ok(token) => {
                self.credentials.replace_access_token(token.clone());
                let _ = self.refresh_events.send(token);
                true
            }
            Err(err) => {
                self.logger.warn(
                    "Token refresh failed; returning the original auth failure",
                    Some(&serde_json::json!({ "error": err.message })),
                );
                false
            }
        }
    }

    async fn send_once(&self, descriptor: &RequestDescriptor, token: &str) -> ResponseEnvelope {
        let url = match self.build_url(descriptor) {
            Ok(url) => url,
            Err(err) => return ResponseEnvelope::transport_failure(err.message),
        };

        let mut request = self
            .client
            .request(descriptor.method.clone(), url)
            .header(
                "Authorization",
                format!("{} {}", api_constants::AUTH_SCHEME, token),
            )
            .header(api_constants::ORG_HEADER, self.credentials.org_id());
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                self.logger.warn(
                    "Request never completed",
                    Some(&serde_json::json!({
                        "method": descriptor.method.as_str(),
                        "path": descriptor.path,
                        "error": err.to_string(),
                    })),
                );
                return ResponseEnvelope::transport_failure(err.to_string());
            }
        };

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return ResponseEnvelope::transport_failure(err.to_string()),
        };
        // Empty and non-JSON bodies are normal (e.g. 204 deletes); they parse to {}.
        let data = if bytes.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Default::default()))
        };

        self.logger.debug(
            "Desk call finished",
            Some(&serde_json::json!({
                "method": descriptor.method.as_str(),
                "path": descriptor.path,
                "status": status,
            })),
        );

        ResponseEnvelope {
            status,
            data,
            headers,
            transport_failed: false,
            transport_error: None,
        }
    }

    fn build_url(&self, descriptor: &RequestDescriptor) -> Result<Url, ToolError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, descriptor.path))
            .map_err(|err| ToolError::internal(format!("Invalid request URL: {}", err)))?;
        if !descriptor.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &descriptor.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /* Tickets */

    pub async fn list_tickets(&self, query: &TicketListQuery) -> ResponseEnvelope {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "status", query.status.as_deref());
        push_number(&mut pairs, "limit", query.limit);
        push_pair(&mut pairs, "sortBy", query.sort_by.as_deref());
        push_number(&mut pairs, "from", query.from);
        self.issue(&RequestDescriptor::get("/tickets").with_query(pairs))
            .await
    }

    pub async fn get_ticket(&self, ticket_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!("/tickets/{}", ticket_id)))
            .await
    }

    pub async fn create_ticket(&self, ticket: &NewTicket) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post("/tickets", json_body(ticket)))
            .await
    }

    pub async fn update_ticket(&self, ticket_id: &str, update: &TicketUpdate) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::patch(
            format!("/tickets/{}", ticket_id),
            json_body(update),
        ))
        .await
    }

    pub async fn delete_ticket(&self, ticket_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::delete(format!("/tickets/{}", ticket_id)))
            .await
    }

    pub async fn move_ticket(&self, ticket_id: &str, department_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post(
            format!("/tickets/{}/move", ticket_id),
            serde_json::json!({ "departmentId": department_id }),
        ))
        .await
    }

    pub async fn search_tickets(&self, query: &str, limit: Option<u64>) -> ResponseEnvelope {
        let mut pairs = vec![("searchStr".to_string(), query.to_string())];
        push_number(&mut pairs, "limit", limit);
        self.issue(&RequestDescriptor::get("/search").with_query(pairs))
            .await
    }

    /* Ticket threads and comments */

    pub async fn get_ticket_threads(&self, ticket_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!(
            "/tickets/{}/threads",
            ticket_id
        )))
        .await
    }

    pub async fn add_ticket_reply(&self, ticket_id: &str, reply: &NewThread) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post(
            format!("/tickets/{}/threads", ticket_id),
            json_body(reply),
        ))
        .await
    }

    pub async fn get_ticket_comments(&self, ticket_id: &str, page: &PageQuery) -> ResponseEnvelope {
        let mut pairs = Vec::new();
        push_number(&mut pairs, "limit", page.limit);
        push_number(&mut pairs, "from", page.from);
        self.issue(
            &RequestDescriptor::get(format!("/tickets/{}/comments", ticket_id)).with_query(pairs),
        )
        .await
    }

    pub async fn add_ticket_comment(
        &self,
        ticket_id: &str,
        comment: &NewComment,
    ) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post(
            format!("/tickets/{}/comments", ticket_id),
            json_body(comment),
        ))
        .await
    }

    /* Ticket tags */

    pub async fn get_ticket_tags(&self, ticket_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!(
            "/tickets/{}/tags",
            ticket_id
        )))
        .await
    }

    pub async fn add_ticket_tags(&self, ticket_id: &str, tags: &[String]) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post(
            format!("/tickets/{}/tags", ticket_id),
            serde_json::json!({ "tags": tags }),
        ))
        .await
    }

    pub async fn remove_ticket_tag(&self, ticket_id: &str, tag_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::delete(format!(
            "/tickets/{}/tags/{}",
            ticket_id, tag_id
        )))
        .await
    }

    /* Contacts */

    pub async fn list_contacts(&self, page: &PageQuery) -> ResponseEnvelope {
        let mut pairs = Vec::new();
        push_number(&mut pairs, "limit", page.limit);
        push_number(&mut pairs, "from", page.from);
        self.issue(&RequestDescriptor::get("/contacts").with_query(pairs))
            .await
    }

    pub async fn get_contact(&self, contact_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!("/contacts/{}", contact_id)))
            .await
    }

    pub async fn create_contact(&self, contact: &NewContact) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post("/contacts", json_body(contact)))
            .await
    }

    pub async fn update_contact(
        &self,
        contact_id: &str,
        update: &ContactUpdate,
    ) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::patch(
            format!("/contacts/{}", contact_id),
            json_body(update),
        ))
        .await
    }

    pub async fn get_contact_tickets(&self, contact_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!(
            "/contacts/{}/tickets",
            contact_id
        )))
        .await
    }

    /* Accounts */

    pub async fn list_accounts(&self, page: &PageQuery) -> ResponseEnvelope {
        let mut pairs = Vec::new();
        push_number(&mut pairs, "limit", page.limit);
        push_number(&mut pairs, "from", page.from);
        self.issue(&RequestDescriptor::get("/accounts").with_query(pairs))
            .await
    }

    pub async fn get_account(&self, account_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!("/accounts/{}", account_id)))
            .await
    }

    pub async fn create_account(&self, account: &NewAccount) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post("/accounts", json_body(account)))
            .await
    }

    pub async fn update_account(
        &self,
        account_id: &str,
        update: &AccountUpdate,
    ) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::patch(
            format!("/accounts/{}", account_id),
            json_body(update),
        ))
        .await
    }

    /* Tasks */

    pub async fn list_tasks(&self, query: &TaskListQuery) -> ResponseEnvelope {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "departmentId", query.department_id.as_deref());
        push_number(&mut pairs, "limit", query.limit);
        push_number(&mut pairs, "from", query.from);
        self.issue(&RequestDescriptor::get("/tasks").with_query(pairs))
            .await
    }

    pub async fn get_task(&self, task_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!("/tasks/{}", task_id)))
            .await
    }

    pub async fn create_task(&self, task: &NewTask) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post("/tasks", json_body(task)))
            .await
    }

    pub async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::patch(
            format!("/tasks/{}", task_id),
            json_body(update),
        ))
        .await
    }

    pub async fn delete_task(&self, task_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::delete(format!("/tasks/{}", task_id)))
            .await
    }

    /* Time entries */

    pub async fn list_time_entries(&self, ticket_id: &str, page: &PageQuery) -> ResponseEnvelope {
        let mut pairs = Vec::new();
        push_number(&mut pairs, "limit", page.limit);
        push_number(&mut pairs, "from", page.from);
        self.issue(
            &RequestDescriptor::get(format!("/tickets/{}/timeEntry", ticket_id)).with_query(pairs),
        )
        .await
    }

    pub async fn add_time_entry(&self, ticket_id: &str, entry: &NewTimeEntry) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::post(
            format!("/tickets/{}/timeEntry", ticket_id),
            json_body(entry),
        ))
        .await
    }

    pub async fn update_time_entry(
        &self,
        ticket_id: &str,
        entry_id: &str,
        update: &TimeEntryUpdate,
    ) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::patch(
            format!("/tickets/{}/timeEntry/{}", ticket_id, entry_id),
            json_body(update),
        ))
        .await
    }

    pub async fn delete_time_entry(&self, ticket_id: &str, entry_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::delete(format!(
            "/tickets/{}/timeEntry/{}",
            ticket_id, entry_id
        )))
        .await
    }

    /* Products */

    pub async fn list_products(&self, page: &PageQuery) -> ResponseEnvelope {
        let mut pairs = Vec::new();
        push_number(&mut pairs, "limit", page.limit);
        push_number(&mut pairs, "from", page.from);
        self.issue(&RequestDescriptor::get("/products").with_query(pairs))
            .await
    }

    pub async fn get_product(&self, product_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!("/products/{}", product_id)))
            .await
    }

    /* Departments and agents */

    pub async fn list_departments(&self) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get("/departments")).await
    }

    pub async fn get_department(&self, department_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!(
            "/departments/{}",
            department_id
        )))
        .await
    }

    pub async fn list_agents(&self) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get("/agents")).await
    }

    pub async fn get_agent(&self, agent_id: &str) -> ResponseEnvelope {
        self.issue(&RequestDescriptor::get(format!("/agents/{}", agent_id)))
            .await
    }
}

fn push_pair(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
}

fn push_number(pairs: &mut Vec<(String, String)>, key: &str, value: Option<u64>) {
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
}
