use std::sync::Arc;

use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::execute::execute_plan;
use super::gather::gather_resources;
use super::models::{DeletionError, DeletionReport, DeletionRequest};
use super::plan::DeletionPlan;
use crate::api::{ResourceAdapter, ResourceApi};


/// Runs smart user deletions: gather what the user owns, plan the cleanup,
/// execute it, then delete the user with the manifest.
pub struct SmartUserDeletion {
    api: Arc<dyn ResourceApi>,
}

impl SmartUserDeletion {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        info!("Initializing SmartUserDeletion");
        Self { api }
    }

    /// Gathers and plans without changing anything.
    pub async fn preview(&self, request: &DeletionRequest) -> Result<DeletionPlan, DeletionError> {
        let adapter = ResourceAdapter::new(self.api.clone(), &request.account_id);
        let span = info_span!(
            "smart_user_preview",
            account_id = %request.account_id,
            user_id = %request.user.id,
        );

        async {
            let resources = gather_resources(&adapter, &request.user.id, request.options).await?;
            Ok::<_, DeletionError>(DeletionPlan::compute(&resources, request.options))
        }
        .instrument(span)
        .await
    }

    /// Deletes the user. Returns the report with the deleted user record, or
    /// the first error. Cleanup done before a failure stays done.
    pub async fn delete(&self, request: &DeletionRequest) -> Result<DeletionReport, DeletionError> {
        let adapter = ResourceAdapter::new(self.api.clone(), &request.account_id);
        let span = info_span!(
            "smart_user_deletion",
            run_id = %Uuid::new_v4(),
            account_id = %request.account_id,
            user_id = %request.user.id,
        );

        self.run(&adapter, request).instrument(span).await
    }

    async fn run(
        &self,
        adapter: &ResourceAdapter,
        request: &DeletionRequest,
    ) -> Result<DeletionReport, DeletionError> {
        let user_id = &request.user.id;
        info!(
            "Deleting smart user {} (remove_devices={}, remove_conferences={})",
            user_id, request.options.remove_devices, request.options.remove_conferences
        );

        let resources = gather_resources(adapter, user_id, request.options).await?;
        let plan = DeletionPlan::compute(&resources, request.options);
        info!(
            "Planned {} cleanup actions, manifest {:?}",
            plan.actions.len(),
            plan.manifest.tags()
        );

        let outcomes = execute_plan(adapter, &plan.actions).await?;

        let user = match adapter.delete_user(user_id, &plan.manifest.tags()).await {
            Ok(user) => user,
            Err(e) => {
                error!("Failed to delete user {}: {}", user_id, e);
                return Err(DeletionError::from_get(e));
            }
        };

        let report = DeletionReport::new(request, user, plan.manifest, outcomes);
        info!(
            "Deleted smart user {} after {} cleanup actions",
            user_id,
            report.actions_executed()
        );
        Ok(report)
    }
}
