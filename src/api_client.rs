use crate::api_model::AddItem;
use crate::api_model::UpdateItem;
use crate::error::Result;
use crate::todo_item::SaveOutcome;
use crate::todo_item::TodoItem;
use log::debug;

/// HTTP client for the dispatcher endpoint. Payloads are sent as JSON.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    /// `endpoint` is the dispatcher URL without query, e.g. `http://127.0.0.1:3030/`.
    pub fn new(endpoint: impl Into<String>) -> ApiClient {
        ApiClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub async fn list(&self) -> Result<Vec<TodoItem>> {
        debug!("GET {}?a=list", self.endpoint);
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("a", "list")])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn add(&self, body: &AddItem) -> Result<SaveOutcome<TodoItem>> {
        debug!("POST {}?a=add", self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("a", "add")])
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn update(&self, body: &UpdateItem) -> Result<SaveOutcome<TodoItem>> {
        debug!("POST {}?a=update id {}", self.endpoint, body.id);
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("a", "update")])
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
