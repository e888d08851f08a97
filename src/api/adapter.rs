use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::backend::ResourceApi;
use super::error::ApiError;
use super::models::{Callflow, Conference, Device, MOBILE_CALLFLOW_TYPE, User};
use super::resource::{Filters, ResourceKind};


/// Typed access to one account's devices, callflows, conferences and users.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct ResourceAdapter {
    api: Arc<dyn ResourceApi>,
    account_id: String,
}

impl ResourceAdapter {
    pub fn new(api: Arc<dyn ResourceApi>, account_id: impl Into<String>) -> Self {
        Self {
            api,
            account_id: account_id.into(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    // Devices

    pub async fn get_device(&self, device_id: &str) -> Result<Device, ApiError> {
        self.get(ResourceKind::Device, device_id).await
    }

    pub async fn list_devices(&self, owner_id: &str) -> Result<Vec<Device>, ApiError> {
        self.list(ResourceKind::Device, &Filters::new().owner(owner_id))
            .await
    }

    pub async fn find_mobile_devices(&self, mdn: &str) -> Result<Vec<Device>, ApiError> {
        self.list(ResourceKind::Device, &Filters::new().mobile_mdn(mdn))
            .await
    }

    pub async fn update_device(&self, device: &Device) -> Result<Device, ApiError> {
        self.update(ResourceKind::Device, &device.id, device).await
    }

    // Callflows

    pub async fn get_callflow(&self, callflow_id: &str) -> Result<Callflow, ApiError> {
        self.get(ResourceKind::Callflow, callflow_id).await
    }

    pub async fn list_mobile_callflows(&self, owner_id: &str) -> Result<Vec<Callflow>, ApiError> {
        let filters = Filters::new().kind(MOBILE_CALLFLOW_TYPE).owner(owner_id);
        self.list(ResourceKind::Callflow, &filters).await
    }

    pub async fn update_callflow(&self, callflow: &Callflow) -> Result<Callflow, ApiError> {
        self.update(ResourceKind::Callflow, &callflow.id, callflow)
            .await
    }

    // Conferences

    pub async fn get_conference(&self, conference_id: &str) -> Result<Conference, ApiError> {
        self.get(ResourceKind::Conference, conference_id).await
    }

    pub async fn list_conferences(&self, owner_id: &str) -> Result<Vec<Conference>, ApiError> {
        self.list(ResourceKind::Conference, &Filters::new().owner(owner_id))
            .await
    }

    pub async fn update_conference(&self, conference: &Conference) -> Result<Conference, ApiError> {
        self.update(ResourceKind::Conference, &conference.id, conference)
            .await
    }

    // Users

    pub async fn delete_user(&self, user_id: &str, object_types: &[&str]) -> Result<User, ApiError> {
        debug!(
            "Deleting user {} in account {} (object_types={:?})",
            user_id, self.account_id, object_types
        );
        let data = self
            .api
            .delete_user(&self.account_id, user_id, object_types)
            .await?;
        decode_or_stub(data, user_id)
    }

    async fn get<T: DeserializeOwned>(&self, kind: ResourceKind, id: &str) -> Result<T, ApiError> {
        debug!("Fetching {} {} in account {}", kind, id, self.account_id);
        let data = self.api.get(kind, &self.account_id, id).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        filters: &Filters,
    ) -> Result<Vec<T>, ApiError> {
        debug!(
            "Listing {}s in account {} ({:?})",
            kind,
            self.account_id,
            filters.fields()
        );
        let items = self.api.list(kind, &self.account_id, filters).await?;
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(ApiError::from))
            .collect()
    }

    async fn update<T>(&self, kind: ResourceKind, id: &str, document: &T) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
    {
        debug!("Updating {} {} in account {}", kind, id, self.account_id);
        let body = serde_json::to_value(document)?;
        let data = self.api.update(kind, &self.account_id, id, body).await?;
        Ok(serde_json::from_value(data)?)
    }
}


/// Some deployments answer a user delete with an empty envelope.
fn decode_or_stub(data: Value, user_id: &str) -> Result<User, ApiError> {
    if data.is_null() {
        return Ok(User::new(user_id));
    }
    Ok(serde_json::from_value(data)?)
}
