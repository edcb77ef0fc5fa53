pub mod loader;
pub mod markers;
pub mod preprocessor;
pub mod render;
pub mod template;
pub mod transform;

pub use crate::domain::model::{DataDocument, Marker, Page};
pub use crate::domain::ports::{ConfigProvider, DataSource};
pub use crate::utils::error::Result;
