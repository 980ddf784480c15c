pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::AppConfig};
pub use crate::core::{
    clock::{FixedClock, SystemClock},
    digest::DigestPlanner,
    insights::InsightService,
    report::ReportEngine,
};
pub use utils::error::{InsightError, Result};
