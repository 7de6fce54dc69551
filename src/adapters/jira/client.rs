//! Jira HTTP client.
//!
//! Wraps the Jira Cloud REST API v3 with the three calls the clone
//! workflow makes. Authenticates with basic auth (account email and API
//! token). Requests are sent once; there is no retry or rate limiting.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::errors::{TrackerError, TrackerResult};
use crate::domain::models::{CreateMeta, CreatedIssue, JiraConfig, NewIssue, TemplateIssue};
use crate::domain::ports::IssueTracker;

use super::models::{JiraCreateIssueRequest, JiraSearchResponse};

/// Path of the REST API below the site URL.
const API_PATH: &str = "/rest/api/3";

/// HTTP client for the Jira REST API v3.
///
/// All methods map HTTP and network errors to [`TrackerError`]; non-success
/// responses keep the provider's error body.
#[derive(Clone)]
pub struct JiraClient {
    /// The underlying HTTP client.
    http: Client,
    /// `<site>/rest/api/3`
    api_base: String,
    user_email: String,
    api_token: String,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("api_base", &self.api_base)
            .field("user_email", &self.user_email)
            .finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Create a client from validated configuration.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("epic-cloner/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_base: format!("{}{API_PATH}", config.base_url.trim_end_matches('/')),
            user_email: config.user_email.clone(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build an authorized request for `path` below the API base.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.api_base))
            .basic_auth(&self.user_email, Some(&self.api_token))
            .header(ACCEPT, "application/json")
    }

    /// Send `request` and decode a successful JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> TrackerResult<T> {
        let resp = request.send().await.map_err(|e| TrackerError::Transport {
            operation,
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(TrackerError::Api {
                operation,
                status: status.as_u16(),
                body: error_body(body_text),
            });
        }

        debug!(operation, status = status.as_u16(), "Jira call succeeded");
        resp.json::<T>().await.map_err(|e| TrackerError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

/// Keep a JSON error body as JSON, anything else as a string.
fn error_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn create_meta(&self, project_key: &str, issue_type: &str) -> TrackerResult<CreateMeta> {
        let request = self.request(Method::GET, "/issue/createmeta").query(&[
            ("projectKeys", project_key),
            ("issuetypeNames", issue_type),
            ("expand", "projects.issuetypes.fields"),
        ]);
        match self.send::<Value>("create_meta", request).await {
            Ok(body) => Ok(CreateMeta::from_value(body)),
            // A success response that is not JSON carries no metadata
            Err(TrackerError::Decode { message, .. }) => {
                warn!(project_key, %message, "unreadable creation metadata, treating as empty");
                Ok(CreateMeta::default())
            }
            Err(err) => Err(err),
        }
    }

    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue> {
        let request = self
            .request(Method::POST, "/issue")
            .json(&JiraCreateIssueRequest::from(issue));
        self.send("create_issue", request).await
    }

    async fn search(&self, jql: &str, fields: &[&str]) -> TrackerResult<Vec<TemplateIssue>> {
        let fields = fields.join(",");
        let request = self
            .request(Method::GET, "/search")
            .query(&[("jql", jql), ("fields", fields.as_str())]);
        let response: JiraSearchResponse = self.send("search", request).await?;
        Ok(response.issues.into_iter().map(TemplateIssue::from).collect())
    }
}
