pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, ConfigOverrides, PhonebookConfig};
pub use core::{
    etl::{EtlEngine, PipelineState, RunSummary},
    pipeline::PhonebookPipeline,
};
pub use domain::model::{Contact, PhonebookName};
pub use utils::error::{EtlError, Result};
