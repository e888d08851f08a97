pub mod adapter;
pub mod backend;
pub mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod memory;
pub mod models;
pub mod resource;


pub use adapter::ResourceAdapter;
pub use backend::ResourceApi;
pub use client::KazooClient;
pub use error::ApiError;
pub use models::{Callflow, Conference, Device, MobileDescriptor, User, MOBILE_CALLFLOW_TYPE};
pub use resource::{Filters, ResourceKind};
