//! Calls to the inspection-management service.
//!
//! Every call reports success or failure explicitly: a non-2xx status is an
//! error, and only a successful response with an empty body counts as an
//! empty collection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::ChecklistId,
    protocol::{AuthResponse, ChecklistItem, ChecklistSummary, DataEnvelope, ExecutionRequest},
};
use tracing::{debug, info, warn};
use url::Url;

use crate::{error::ClientError, session::Session};

pub const AUTHORIZATION_PATH: &str = "Authorization";
pub const CHECKLISTS_PATH: &str = "qualidade/checklist/buscar";
pub const CHECKLIST_ITEMS_PATH: &str = "qualidade/checklist/item/buscar";
pub const EXECUTE_PATH: &str = "qualidade/checklist/executar";

const USER_AGENT: &str = "ChecklistApp/1.0";

#[async_trait]
pub trait InspectionService: Send + Sync {
    async fn exchange_credentials(&self, username: &str, password: &str)
        -> Result<String, ClientError>;
    async fn list_checklists(&self, session: &Session)
        -> Result<Vec<ChecklistSummary>, ClientError>;
    async fn fetch_items(
        &self,
        session: &Session,
        checklist_id: &ChecklistId,
    ) -> Result<Vec<ChecklistItem>, ClientError>;
    async fn submit_execution(
        &self,
        session: &Session,
        request: &ExecutionRequest,
    ) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpInspectionService {
    http: Client,
    base_url: Url,
}

impl HttpInspectionService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| ClientError::Transport {
                path: base_url.to_string(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidServiceUrl {
                url: format!("{}{path}", self.base_url),
                reason: err.to_string(),
            })
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .header(reqwest::header::ACCEPT, "*/*")
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                path: path.to_string(),
                source,
            })?;
        check_status(path, response.status())?;
        Ok(response)
    }

    async fn fetch_envelope<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Vec<T>, ClientError> {
        let response = self.send(path, request).await?;
        let body = read_body(path, response).await?;
        if body.trim().is_empty() {
            debug!(path, "empty body treated as empty collection");
            return Ok(Vec::new());
        }
        let envelope: DataEnvelope<T> =
            serde_json::from_str(&body).map_err(|err| ClientError::MalformedResponse {
                path: path.to_string(),
                reason: err.to_string(),
            })?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl InspectionService for HttpInspectionService {
    async fn exchange_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let url = self.endpoint(AUTHORIZATION_PATH)?;
        let request = self
            .http
            .get(url)
            .basic_auth(username, Some(password))
            .header(reqwest::header::CACHE_CONTROL, "no-cache");
        let response = match self.send(AUTHORIZATION_PATH, request).await {
            Ok(response) => response,
            Err(ClientError::Unauthorized { .. }) => return Err(ClientError::InvalidCredentials),
            Err(err) => return Err(err),
        };
        let body = read_body(AUTHORIZATION_PATH, response).await?;
        let auth: AuthResponse = serde_json::from_str(&body).map_err(|err| {
            warn!(error = %err, "credential exchange returned an unreadable body");
            ClientError::InvalidCredentials
        })?;
        let token = auth.token().ok_or(ClientError::InvalidCredentials)?;
        info!(username, "credential exchange succeeded");
        Ok(token.to_string())
    }

    async fn list_checklists(
        &self,
        session: &Session,
    ) -> Result<Vec<ChecklistSummary>, ClientError> {
        let url = self.endpoint(CHECKLISTS_PATH)?;
        let request = self.http.get(url).bearer_auth(session.bearer_token());
        let checklists: Vec<ChecklistSummary> =
            self.fetch_envelope(CHECKLISTS_PATH, request).await?;
        debug!(count = checklists.len(), "fetched checklists");
        Ok(checklists)
    }

    async fn fetch_items(
        &self,
        session: &Session,
        checklist_id: &ChecklistId,
    ) -> Result<Vec<ChecklistItem>, ClientError> {
        let url = self.endpoint(CHECKLIST_ITEMS_PATH)?;
        let request = self
            .http
            .get(url)
            .query(&[("handle", checklist_id.as_str())])
            .bearer_auth(session.bearer_token());
        let items: Vec<ChecklistItem> = self.fetch_envelope(CHECKLIST_ITEMS_PATH, request).await?;
        debug!(checklist = %checklist_id, count = items.len(), "fetched checklist items");
        Ok(items)
    }

    async fn submit_execution(
        &self,
        session: &Session,
        request: &ExecutionRequest,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(EXECUTE_PATH)?;
        let builder = self
            .http
            .post(url)
            .bearer_auth(session.bearer_token())
            .json(request);
        self.send(EXECUTE_PATH, builder).await?;
        info!(
            checklist = %request.checklist,
            items = request.items.len(),
            "checklist execution submitted"
        );
        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidServiceUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    // Url::join replaces the last segment unless the path ends in a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn check_status(path: &str, status: StatusCode) -> Result<(), ClientError> {
    if status.is_success() {
        return Ok(());
    }
    warn!(path, status = status.as_u16(), "service returned an error status");
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(ClientError::Unauthorized {
            path: path.to_string(),
        });
    }
    Err(ClientError::Status {
        path: path.to_string(),
        status: status.as_u16(),
    })
}

async fn read_body(path: &str, response: Response) -> Result<String, ClientError> {
    response.text().await.map_err(|source| ClientError::Transport {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
