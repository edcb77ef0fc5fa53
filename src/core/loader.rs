use crate::domain::model::DataDocument;
use crate::domain::ports::{ConfigProvider, DataSource};
use crate::utils::error::{DocsError, Result};
use std::path::{Path, PathBuf};

/// Reads and parses the data file at `path`.
///
/// The file is read on every call; nothing is cached between pages.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DataDocument> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DocsError::MissingDataFile {
            path: path.display().to_string(),
        });
    }

    tracing::debug!("Loading data file: {}", path.display());
    let content = std::fs::read(path)?;

    DataDocument::from_json_slice(&content).map_err(|source| DocsError::DataFormatError {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.data_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn load(&self) -> Result<DataDocument> {
        load(&self.path)
    }
}
