use jdmatch_structural::WeightsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Core(#[from] jdmatch_core::Error),

    #[error("Invalid structural weights: {0}")]
    Weights(#[from] WeightsError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No candidate corpus has been loaded")]
    NotLoaded,
}

impl From<jdmatch_core::SchemaError> for MatchError {
    fn from(err: jdmatch_core::SchemaError) -> Self {
        MatchError::Core(err.into())
    }
}
