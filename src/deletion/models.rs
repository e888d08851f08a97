use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::plan::DeletionManifest;
use crate::api::{ApiError, ResourceKind, User};


/// The two confirmation options of a smart user delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionOptions {
    /// Let the server delete the user's devices instead of unassigning them.
    pub remove_devices: bool,
    /// Let the server delete the user's conferences instead of unassigning them.
    pub remove_conferences: bool,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionRequest {
    pub account_id: String,
    pub user: User,
    pub options: DeletionOptions,
}

impl DeletionRequest {
    pub fn new(account_id: impl Into<String>, user: User, options: DeletionOptions) -> Self {
        Self {
            account_id: account_id.into(),
            user,
            options,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallflowReassignment {
    pub callflow_id: String,
    /// Device the callflow now routes to; `None` when no device matched the MDN.
    pub device_id: Option<String>,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    DeviceUnassigned(String),
    ConferenceUnassigned(String),
    CallflowReassigned(CallflowReassignment),
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionReport {
    pub account_id: String,
    pub user_id: String,
    /// Record returned by the final delete call.
    pub user: User,
    pub manifest: DeletionManifest,
    pub devices_unassigned: Vec<String>,
    pub conferences_unassigned: Vec<String>,
    pub callflows_reassigned: Vec<CallflowReassignment>,
    pub completed_at: DateTime<Utc>,
}

impl DeletionReport {
    pub(crate) fn new(
        request: &DeletionRequest,
        user: User,
        manifest: DeletionManifest,
        outcomes: Vec<ActionOutcome>,
    ) -> Self {
        let mut report = Self {
            account_id: request.account_id.clone(),
            user_id: request.user.id.clone(),
            user,
            manifest,
            devices_unassigned: Vec::new(),
            conferences_unassigned: Vec::new(),
            callflows_reassigned: Vec::new(),
            completed_at: Utc::now(),
        };

        for outcome in outcomes {
            match outcome {
                ActionOutcome::DeviceUnassigned(id) => report.devices_unassigned.push(id),
                ActionOutcome::ConferenceUnassigned(id) => report.conferences_unassigned.push(id),
                ActionOutcome::CallflowReassigned(reassignment) => {
                    report.callflows_reassigned.push(reassignment)
                }
            }
        }

        report
    }

    pub fn actions_executed(&self) -> usize {
        self.devices_unassigned.len() + self.conferences_unassigned.len() + self.callflows_reassigned.len()
    }
}


#[derive(Debug, Error)]
pub enum DeletionError {
    #[error("Failed to fetch {kind}s owned by {owner_id}: {source}")]
    Fetch {
        kind: ResourceKind,
        owner_id: String,
        #[source]
        source: ApiError,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: String },

    #[error("Transport error: {0}")]
    Transport(#[from] ApiError),

    #[error("Failed to update {kind} {id}: {source}")]
    Update {
        kind: ResourceKind,
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("Malformed {kind} {id}: {reason}")]
    Malformed {
        kind: ResourceKind,
        id: String,
        reason: String,
    },

    #[error("Deletion task failed: {0}")]
    Task(String),
}

impl DeletionError {
    pub(crate) fn fetch(kind: ResourceKind, owner_id: &str, source: ApiError) -> Self {
        Self::Fetch {
            kind,
            owner_id: owner_id.to_string(),
            source,
        }
    }

    /// Missing documents become `NotFound`; anything else is a transport failure.
    pub(crate) fn from_get(source: ApiError) -> Self {
        match source {
            ApiError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Transport(other),
        }
    }

    pub(crate) fn update(kind: ResourceKind, id: &str, source: ApiError) -> Self {
        Self::Update {
            kind,
            id: id.to_string(),
            source,
        }
    }
}
