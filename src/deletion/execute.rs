use tracing::{error, info};

use super::models::{ActionOutcome, DeletionError};
use super::plan::PlannedAction;
use super::reassign::reassign_mobile_callflow;
use super::tasks::{dispatch, join_fail_fast};
use super::unassign::{unassign_conference, unassign_device};
use crate::api::ResourceAdapter;


async fn run_action(adapter: ResourceAdapter, action: PlannedAction) -> Result<ActionOutcome, DeletionError> {
    match action {
        PlannedAction::UnassignDevice(device_id) => {
            unassign_device(&adapter, &device_id).await?;
            Ok(ActionOutcome::DeviceUnassigned(device_id))
        }
        PlannedAction::UnassignConference(conference_id) => {
            unassign_conference(&adapter, &conference_id).await?;
            Ok(ActionOutcome::ConferenceUnassigned(conference_id))
        }
        PlannedAction::ReassignMobileCallflow(callflow) => {
            let reassignment = reassign_mobile_callflow(&adapter, &callflow).await?;
            Ok(ActionOutcome::CallflowReassigned(reassignment))
        }
    }
}


/// Starts every action at once and waits for all of them. The first failure
/// is returned; finished actions are not rolled back.
pub async fn execute_plan(
    adapter: &ResourceAdapter,
    actions: &[PlannedAction],
) -> Result<Vec<ActionOutcome>, DeletionError> {
    if actions.is_empty() {
        return Ok(Vec::new());
    }

    info!("Executing {} cleanup actions", actions.len());

    let handles = actions
        .iter()
        .cloned()
        .map(|action| dispatch(run_action(adapter.clone(), action)))
        .collect();

    match join_fail_fast(handles).await {
        Ok(outcomes) => {
            info!("All {} cleanup actions completed", outcomes.len());
            Ok(outcomes)
        }
        Err(e) => {
            error!("Cleanup aborted: {}", e);
            Err(e)
        }
    }
}
