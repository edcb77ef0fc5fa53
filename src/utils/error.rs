use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Expected to find {path} in root directory")]
    MissingDataFile { path: String },

    #[error("Data file {path} is not valid JSON: {source}")]
    DataFormatError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown backend: {identifier}")]
    UnknownBackend { identifier: String },

    #[error("Data file has no `contracts` key")]
    UnknownContractsKey,

    #[error("Data file has no `specs` key")]
    UnknownSpecsKey,

    #[error("Invalid {kind} entry `{key}`: {message}")]
    InvalidEntry {
        kind: String,
        key: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to process page {page}: {source}")]
    PageError {
        page: String,
        #[source]
        source: Box<DocsError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    Authoring,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl DocsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DocsError::MissingDataFile { .. } | DocsError::DataFormatError { .. } => {
                ErrorCategory::Data
            }
            DocsError::UnknownBackend { .. }
            | DocsError::UnknownContractsKey
            | DocsError::UnknownSpecsKey
            | DocsError::InvalidEntry { .. } => ErrorCategory::Authoring,
            DocsError::IoError(_) => ErrorCategory::Io,
            DocsError::ConfigError { .. }
            | DocsError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DocsError::PageError { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Nothing can be rendered without the data file.
            DocsError::MissingDataFile { .. } | DocsError::DataFormatError { .. } => {
                ErrorSeverity::Critical
            }
            DocsError::IoError(_) => ErrorSeverity::Critical,
            DocsError::PageError { source, .. } => source.severity(),
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DocsError::MissingDataFile { path } => {
                format!("Data file not found: {}", path)
            }
            DocsError::DataFormatError { path, .. } => {
                format!("Data file {} could not be parsed as JSON", path)
            }
            DocsError::UnknownBackend { identifier } => {
                format!("Page references an unknown backend: {}", identifier)
            }
            DocsError::UnknownContractsKey => {
                "Page uses `!!! contracts` but the data file has no contracts".to_string()
            }
            DocsError::UnknownSpecsKey => {
                "Page uses `!!! specs` but the data file has no specs".to_string()
            }
            DocsError::PageError { page, source } => {
                format!("{}: {}", page, source.user_friendly_message())
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DocsError::MissingDataFile { .. } => {
                "Generate the data file first, or point BACKEND_DOCS_FILE / --data-file at it"
            }
            DocsError::DataFormatError { .. } => {
                "Regenerate the data file; it must be a single JSON document"
            }
            DocsError::UnknownBackend { .. } => {
                "Check the marker identifier against the `backends` section of the data file"
            }
            DocsError::UnknownContractsKey | DocsError::UnknownSpecsKey => {
                "Regenerate the data file or remove the marker from the page"
            }
            DocsError::InvalidEntry { .. } => {
                "Check that the entry has a name/title and that its fields have the expected types"
            }
            DocsError::IoError(_) => "Check file permissions and paths",
            DocsError::ConfigError { .. } | DocsError::InvalidConfigValueError { .. } => {
                "Review the command line and config file"
            }
            DocsError::PageError { source, .. } => source.recovery_suggestion(),
        }
    }

    /// Wraps the error with the name of the page that triggered it.
    pub fn in_page(self, page: impl Into<String>) -> Self {
        DocsError::PageError {
            page: page.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsError>;
