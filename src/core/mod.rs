

pub mod config;
pub mod error;

pub use self::config::SmartUserConfig;
pub use self::error::{Result, SmartUserError};
