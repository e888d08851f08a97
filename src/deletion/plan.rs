use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use super::gather::GatheredResources;
use super::models::DeletionOptions;
use crate::api::Callflow;


/// Object categories the final user delete asks the server to purge.
///
/// Declaration order is the order tags are sent in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ObjectType {
    Callflow,
    Device,
    Conference,
    Vmbox,
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeletionManifest(BTreeSet<ObjectType>);

impl DeletionManifest {
    pub fn from_options(options: DeletionOptions, has_mobile_callflows: bool) -> Self {
        let mut types = BTreeSet::new();
        // Mobile callflows are reassigned, so the server must not purge them.
        if !has_mobile_callflows {
            types.insert(ObjectType::Callflow);
        }
        if options.remove_devices {
            types.insert(ObjectType::Device);
        }
        if options.remove_conferences {
            types.insert(ObjectType::Conference);
        }
        types.insert(ObjectType::Vmbox);
        Self(types)
    }

    pub fn contains(&self, object_type: ObjectType) -> bool {
        self.0.contains(&object_type)
    }

    /// Wire tags in send order.
    pub fn tags(&self) -> Vec<&'static str> {
        self.0.iter().map(|t| <&'static str>::from(*t)).collect()
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum PlannedAction {
    UnassignDevice(String),
    UnassignConference(String),
    ReassignMobileCallflow(Callflow),
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionPlan {
    pub actions: Vec<PlannedAction>,
    pub manifest: DeletionManifest,
}

impl DeletionPlan {
    /// Builds the cleanup plan. Devices come first, then conferences, then
    /// mobile callflows.
    pub fn compute(resources: &GatheredResources, options: DeletionOptions) -> Self {
        let mut actions = Vec::with_capacity(
            resources.devices.len() + resources.conferences.len() + resources.mobile_callflows.len(),
        );

        if !options.remove_devices {
            actions.extend(
                resources
                    .devices
                    .iter()
                    .map(|device| PlannedAction::UnassignDevice(device.id.clone())),
            );
        }

        if !options.remove_conferences {
            actions.extend(
                resources
                    .conferences
                    .iter()
                    .map(|conference| PlannedAction::UnassignConference(conference.id.clone())),
            );
        }

        actions.extend(
            resources
                .mobile_callflows
                .iter()
                .cloned()
                .map(PlannedAction::ReassignMobileCallflow),
        );

        let manifest =
            DeletionManifest::from_options(options, !resources.mobile_callflows.is_empty());

        Self { actions, manifest }
    }
}
