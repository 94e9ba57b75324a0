use std::path::PathBuf;

/// Result type used throughout the crate
pub type Result<T, E = WordCountError> = std::result::Result<T, E>;

/// Every failure here is fatal to a run. Degradable conditions (a missing input
/// directory) are logged and never surface as an error.
#[derive(Debug, thiserror::Error)]
pub enum WordCountError {
    /// A corpus or output file could not be opened, read or written
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fixed-capacity word index has no free slot left
    #[error("word index is full ({capacity} slots); raise index_capacity or use the resizable policy")]
    CapacityExceeded { capacity: usize },

    /// The configuration file could not be read or parsed
    #[error("cannot load configuration '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigSource,
    },

    /// Configuration values that cannot drive a run
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot serialize run summary: {0}")]
    Summary(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl WordCountError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
