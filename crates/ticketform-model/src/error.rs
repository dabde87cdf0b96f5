use std::path::PathBuf;

use thiserror::Error;

/// Registry or configuration lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {field} is not part of the {variant} form")]
    FieldNotEnabled { field: String, variant: String },
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, FormError>;
