use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Fitted state version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Structural problems detected while fitting or encoding against a declared schema.
///
/// Always fatal for the fit that raised it: no partially fitted state is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Field '{0}' is declared but missing from every record in the corpus")]
    MissingField(String),

    #[error("Field '{field}' expects numeric values, found {value}")]
    NonNumeric { field: String, value: String },

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Field names cannot be blank")]
    BlankFieldName,
}

impl SchemaError {
    /// Name of the offending field, when the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::MissingField(f) | SchemaError::DuplicateField(f) => Some(f),
            SchemaError::NonNumeric { field, .. } => Some(field),
            SchemaError::BlankFieldName => None,
        }
    }
}
