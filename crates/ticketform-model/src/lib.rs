//! Data model for the ticket submission form rules.

pub mod catalog;
pub mod config;
pub mod error;
pub mod field;
pub mod registry;
pub mod values;
pub mod variant;

pub use catalog::Pathway;
pub use config::{AcpPropertyCheck, ConfigFile, FormConfig};
pub use error::{ConfigurationError, FormError, Result};
pub use field::{FieldKey, FieldKind, FieldValue};
pub use registry::{FieldRegistry, FieldSelectors};
pub use values::FormValues;
pub use variant::{AffordableTypeDriver, Variant};
