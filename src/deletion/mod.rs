pub mod models;
pub mod manager;
pub mod gather;
pub mod plan;
pub mod execute;
pub mod unassign;
pub mod reassign;
mod tasks;


pub use models::{
    ActionOutcome, CallflowReassignment, DeletionError, DeletionOptions, DeletionReport,
    DeletionRequest,
};
pub use manager::SmartUserDeletion;
pub use gather::{GatheredResources, gather_resources};
pub use plan::{DeletionManifest, DeletionPlan, ObjectType, PlannedAction};
pub use execute::execute_plan;
pub use unassign::{unassign_conference, unassign_device};
pub use reassign::{mdn_from_number, merge_json, reassign_mobile_callflow};
