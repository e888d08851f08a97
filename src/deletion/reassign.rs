use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::models::{CallflowReassignment, DeletionError};
use super::tasks::{dispatch, join_task};
use crate::api::{Callflow, Device, ResourceAdapter, ResourceKind};


/// Characters stripped from a callflow number to get the MDN (`+1`).
const MDN_PREFIX_LEN: usize = 2;


/// Mobile directory number for a callflow number: the number without its
/// first two characters. Empty for numbers of two characters or fewer.
pub fn mdn_from_number(number: &str) -> String {
    number.chars().skip(MDN_PREFIX_LEN).collect()
}


/// Recursively merges `patch` into `target`. Objects merge key by key,
/// anything else in `patch` replaces the target value.
pub fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}


/// Detaches a mobile callflow from its owner and points it at the mobile
/// device whose MDN matches the callflow's primary number.
///
/// The full callflow and the matching devices are fetched concurrently.
/// When several devices share the MDN the first one listed wins. Without a
/// match only the owner is cleared and routing is left alone.
pub async fn reassign_mobile_callflow(
    adapter: &ResourceAdapter,
    callflow: &Callflow,
) -> Result<CallflowReassignment, DeletionError> {
    let mdn = callflow
        .primary_number()
        .map(mdn_from_number)
        .ok_or_else(|| DeletionError::Malformed {
            kind: ResourceKind::Callflow,
            id: callflow.id.clone(),
            reason: "no primary number".to_string(),
        })?;

    debug!("Reassigning mobile callflow {} (mdn={})", callflow.id, mdn);

    let full_callflow = {
        let adapter = adapter.clone();
        let callflow_id = callflow.id.clone();
        dispatch(async move {
            adapter
                .get_callflow(&callflow_id)
                .await
                .map_err(DeletionError::from_get)
        })
    };

    let mobile_device = {
        let adapter = adapter.clone();
        dispatch(async move {
            // Nothing to match on; treated like a lookup with no result.
            if mdn.is_empty() {
                debug!("Callflow number too short for an mdn, skipping device lookup");
                return Ok(None);
            }

            let devices = adapter.find_mobile_devices(&mdn).await?;
            if devices.len() > 1 {
                debug!(
                    "{} devices share mdn {}, using {}",
                    devices.len(),
                    mdn,
                    devices[0].id
                );
            }
            Ok::<_, DeletionError>(devices.into_iter().next())
        })
    };

    let (mut full_callflow, mobile_device): (Callflow, Option<Device>) =
        tokio::try_join!(join_task(full_callflow), join_task(mobile_device))?;

    full_callflow.owner_id = None;

    let device_id = match mobile_device {
        Some(device) => {
            merge_json(
                &mut full_callflow.flow,
                json!({
                    "module": "device",
                    "data": { "id": device.id }
                }),
            );
            Some(device.id)
        }
        None => {
            warn!(
                "No mobile device found for callflow {}, keeping its routing",
                full_callflow.id
            );
            None
        }
    };

    adapter
        .update_callflow(&full_callflow)
        .await
        .map_err(|e| DeletionError::update(ResourceKind::Callflow, &full_callflow.id, e))?;

    info!(
        "Reassigned mobile callflow {} to device {:?}",
        full_callflow.id, device_id
    );

    Ok(CallflowReassignment {
        callflow_id: full_callflow.id,
        device_id,
    })
}
