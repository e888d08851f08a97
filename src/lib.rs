

pub mod api;
pub mod core;
pub mod deletion;


pub use api::{ApiError, KazooClient, ResourceAdapter, ResourceApi};
pub use crate::core::config::SmartUserConfig;
pub use crate::core::error::{Result, SmartUserError};
pub use deletion::{
    DeletionError, DeletionOptions, DeletionPlan, DeletionReport, DeletionRequest,
    SmartUserDeletion,
};


pub const DEFAULT_API_URL: &str = "http://localhost:8000";


pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
