use tracing::{debug, info};

use super::models::DeletionError;
use crate::api::{Conference, Device, ResourceAdapter, ResourceKind};


/// Name prefix given to conferences whose owner is deleted.
pub const UNASSIGNED_PREFIX: &str = "Unassigned ";


/// Clears the device's owner. Safe to repeat.
pub async fn unassign_device(adapter: &ResourceAdapter, device_id: &str) -> Result<Device, DeletionError> {
    let mut device = adapter
        .get_device(device_id)
        .await
        .map_err(DeletionError::from_get)?;

    if device.owner_id.is_none() {
        debug!("Device {} already has no owner", device_id);
    }
    device.owner_id = None;

    let updated = adapter
        .update_device(&device)
        .await
        .map_err(|e| DeletionError::update(ResourceKind::Device, device_id, e))?;

    info!("Unassigned device {}", device_id);
    Ok(updated)
}


/// Clears the conference's owner and prefixes its name with "Unassigned ".
///
/// The prefix is added on every call, so running this twice on the same
/// conference yields "Unassigned Unassigned <name>".
pub async fn unassign_conference(
    adapter: &ResourceAdapter,
    conference_id: &str,
) -> Result<Conference, DeletionError> {
    let mut conference = adapter
        .get_conference(conference_id)
        .await
        .map_err(DeletionError::from_get)?;

    conference.name = format!("{}{}", UNASSIGNED_PREFIX, conference.name);
    conference.owner_id = None;

    let updated = adapter
        .update_conference(&conference)
        .await
        .map_err(|e| DeletionError::update(ResourceKind::Conference, conference_id, e))?;

    info!("Unassigned conference {} as \"{}\"", conference_id, updated.name);
    Ok(updated)
}
