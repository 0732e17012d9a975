pub mod config;
pub mod extraction;
pub mod triage;

pub use config::{Config, PipelineConfig};
pub use triage::*;
