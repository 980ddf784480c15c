pub mod clock;
pub mod deck;
pub mod digest;
pub mod insights;
pub mod report;
pub mod selector;

pub use crate::domain::model::{Blueprint, Card, Cycle, Insight};
pub use crate::domain::ports::{Clock, ConfigProvider, Storage};
pub use crate::utils::error::Result;
