pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::PageStorage, DocsConfig};

pub use crate::core::{
    loader::{load, JsonFileSource},
    preprocessor::Preprocessor,
    transform::transform,
};
pub use domain::model::{DataDocument, Page};
pub use utils::error::{DocsError, Result};
