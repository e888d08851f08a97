

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use url::Url;

use super::backend::ResourceApi;
use super::error::ApiError;
use super::resource::{Filters, ResourceKind};
use crate::core::config::SmartUserConfig;
use crate::core::error::Result;


const AUTH_HEADER: &str = "X-Auth-Token";

const API_VERSION: &str = "v2";


#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
}


/// `ResourceApi` over the platform's REST interface.
pub struct KazooClient {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl KazooClient {
    pub fn from_config(config: &SmartUserConfig) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with '/'.
        let mut base = config.api_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        info!("KazooClient created for {}", base_url);

        Ok(Self {
            client,
            base_url,
            auth_token: config.auth_token.clone(),
        })
    }

    fn collection_url(&self, kind: ResourceKind, account_id: &str) -> std::result::Result<Url, ApiError> {
        let path = format!(
            "{}/accounts/{}/{}",
            API_VERSION,
            account_id,
            kind.collection()
        );
        Ok(self.base_url.join(&path)?)
    }

    fn document_url(
        &self,
        kind: ResourceKind,
        account_id: &str,
        id: &str,
    ) -> std::result::Result<Url, ApiError> {
        let path = format!(
            "{}/accounts/{}/{}/{}",
            API_VERSION,
            account_id,
            kind.collection(),
            id
        );
        Ok(self.base_url.join(&path)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(AUTH_HEADER, token),
            None => request,
        }
    }

    async fn unwrap_envelope(
        response: Response,
        kind: ResourceKind,
        id: &str,
    ) -> std::result::Result<Value, ApiError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("{} {} not found", kind, id);
            return Err(ApiError::not_found(kind, id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("{} request for {} failed with {}: {}", kind, id, status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = response.json::<Envelope>().await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ResourceApi for KazooClient {
    async fn get(&self, kind: ResourceKind, account_id: &str, id: &str) -> std::result::Result<Value, ApiError> {
        let url = self.document_url(kind, account_id, id)?;
        debug!("GET {}", url);

        let response = self.authorize(self.client.get(url)).send().await?;
        Self::unwrap_envelope(response, kind, id).await
    }

    async fn list(
        &self,
        kind: ResourceKind,
        account_id: &str,
        filters: &Filters,
    ) -> std::result::Result<Vec<Value>, ApiError> {
        let mut url = self.collection_url(kind, account_id)?;
        url.query_pairs_mut().extend_pairs(filters.query_pairs());
        debug!("GET {}", url);

        let response = self.authorize(self.client.get(url)).send().await?;
        let data = Self::unwrap_envelope(response, kind, kind.collection()).await?;

        match data {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ApiError::Status {
                status: StatusCode::OK.as_u16(),
                message: format!("expected a list of {}s, got {}", kind, other),
            }),
        }
    }

    async fn update(
        &self,
        kind: ResourceKind,
        account_id: &str,
        id: &str,
        body: Value,
    ) -> std::result::Result<Value, ApiError> {
        let url = self.document_url(kind, account_id, id)?;
        debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(url))
            .json(&json!({ "data": body }))
            .send()
            .await?;
        Self::unwrap_envelope(response, kind, id).await
    }

    async fn delete_user(
        &self,
        account_id: &str,
        user_id: &str,
        object_types: &[&str],
    ) -> std::result::Result<Value, ApiError> {
        let url = self.document_url(ResourceKind::User, account_id, user_id)?;
        debug!("DELETE {} (object_types={:?})", url, object_types);

        let response = self
            .authorize(self.client.delete(url))
            .json(&json!({ "data": { "object_types": object_types } }))
            .send()
            .await?;
        Self::unwrap_envelope(response, ResourceKind::User, user_id).await
    }
}
