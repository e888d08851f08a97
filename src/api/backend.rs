

use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use super::resource::{Filters, ResourceKind};


/// Request-execution capability the orchestrator runs against.
///
/// Documents travel as raw JSON so that fields the orchestrator does not
/// interpret survive a read-modify-write cycle.
#[async_trait]
pub trait ResourceApi: Send + Sync {

    async fn get(&self, kind: ResourceKind, account_id: &str, id: &str) -> Result<Value, ApiError>;


    async fn list(
        &self,
        kind: ResourceKind,
        account_id: &str,
        filters: &Filters,
    ) -> Result<Vec<Value>, ApiError>;

    /// Replaces the stored document with `body`.
    async fn update(
        &self,
        kind: ResourceKind,
        account_id: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, ApiError>;

    /// Deletes the user and asks the server to purge the listed object types.
    async fn delete_user(
        &self,
        account_id: &str,
        user_id: &str,
        object_types: &[&str],
    ) -> Result<Value, ApiError>;
}

