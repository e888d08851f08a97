use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::models::{DeletionError, DeletionOptions};
use super::tasks::{dispatch, join_task};
use crate::api::{Callflow, Conference, Device, ResourceAdapter, ResourceKind};


/// Everything the user owns that needs attention before the user goes.
/// Categories the server will delete itself are left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatheredResources {
    pub devices: Vec<Device>,
    pub mobile_callflows: Vec<Callflow>,
    pub conferences: Vec<Conference>,
}


/// Fetches devices, mobile callflows and conferences owned by `user_id`
/// concurrently. Fails with the first fetch error.
pub async fn gather_resources(
    adapter: &ResourceAdapter,
    user_id: &str,
    options: DeletionOptions,
) -> Result<GatheredResources, DeletionError> {
    debug!(
        "Gathering resources for user {} (remove_devices={}, remove_conferences={})",
        user_id, options.remove_devices, options.remove_conferences
    );

    let devices = (!options.remove_devices).then(|| {
        let adapter = adapter.clone();
        let owner = user_id.to_string();
        dispatch(async move {
            adapter
                .list_devices(&owner)
                .await
                .map_err(|e| DeletionError::fetch(ResourceKind::Device, &owner, e))
        })
    });

    let mobile_callflows = {
        let adapter = adapter.clone();
        let owner = user_id.to_string();
        dispatch(async move {
            adapter
                .list_mobile_callflows(&owner)
                .await
                .map_err(|e| DeletionError::fetch(ResourceKind::Callflow, &owner, e))
        })
    };

    let conferences = (!options.remove_conferences).then(|| {
        let adapter = adapter.clone();
        let owner = user_id.to_string();
        dispatch(async move {
            adapter
                .list_conferences(&owner)
                .await
                .map_err(|e| DeletionError::fetch(ResourceKind::Conference, &owner, e))
        })
    });

    let joined = tokio::try_join!(
        async move {
            match devices {
                Some(handle) => join_task(handle).await,
                None => Ok(Vec::new()),
            }
        },
        join_task(mobile_callflows),
        async move {
            match conferences {
                Some(handle) => join_task(handle).await,
                None => Ok(Vec::new()),
            }
        },
    );

    let (devices, mobile_callflows, conferences) = match joined {
        Ok(fetched) => fetched,
        Err(e) => {
            error!("Failed to gather resources for user {}: {}", user_id, e);
            return Err(e);
        }
    };

    info!(
        "Gathered {} devices, {} mobile callflows, {} conferences for user {}",
        devices.len(),
        mobile_callflows.len(),
        conferences.len(),
        user_id
    );

    Ok(GatheredResources {
        devices,
        mobile_callflows,
        conferences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::InMemoryApi;
    use serde_json::json;
    use std::sync::Arc;

    fn seeded() -> Arc<InMemoryApi> {
        let api = Arc::new(InMemoryApi::new());
        api.insert(ResourceKind::Device, json!({"id": "dev-1", "owner_id": "user-1"}));
        api.insert(ResourceKind::Device, json!({"id": "dev-2", "owner_id": "someone-else"}));
        api.insert(
            ResourceKind::Callflow,
            json!({"id": "cf-1", "owner_id": "user-1", "type": "mobile", "numbers": ["+15551234567"]}),
        );
        api.insert(
            ResourceKind::Callflow,
            json!({"id": "cf-2", "owner_id": "user-1", "numbers": ["2001"]}),
        );
        api.insert(
            ResourceKind::Conference,
            json!({"id": "conf-1", "owner_id": "user-1", "name": "Standup"}),
        );
        api
    }

    #[tokio::test]
    async fn test_gathers_owned_resources() {
        let api = seeded();
        let adapter = ResourceAdapter::new(api, "acct-1");

        let gathered = gather_resources(&adapter, "user-1", DeletionOptions::default())
            .await
            .unwrap();

        assert_eq!(gathered.devices.len(), 1);
        assert_eq!(gathered.devices[0].id, "dev-1");
        assert_eq!(gathered.mobile_callflows.len(), 1);
        assert_eq!(gathered.mobile_callflows[0].id, "cf-1");
        assert_eq!(gathered.conferences.len(), 1);
    }

    #[tokio::test]
    async fn test_removed_categories_are_not_fetched() {
        let api = seeded();
        // Would fail if they were requested.
        api.fail_list(ResourceKind::Device);
        api.fail_list(ResourceKind::Conference);
        let adapter = ResourceAdapter::new(api, "acct-1");

        let options = DeletionOptions {
            remove_devices: true,
            remove_conferences: true,
        };
        let gathered = gather_resources(&adapter, "user-1", options).await.unwrap();

        assert!(gathered.devices.is_empty());
        assert!(gathered.conferences.is_empty());
        assert_eq!(gathered.mobile_callflows.len(), 1);
    }

    #[tokio::test]
    async fn test_any_fetch_failure_fails_the_phase() {
        let api = seeded();
        api.fail_list(ResourceKind::Conference);
        let adapter = ResourceAdapter::new(api, "acct-1");

        let err = gather_resources(&adapter, "user-1", DeletionOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeletionError::Fetch {
                kind: ResourceKind::Conference,
                ..
            }
        ));
    }
}
