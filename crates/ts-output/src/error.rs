//! Error types for ts-output.

use thiserror::Error;

/// A failed write, tagged with the output file it was aimed at.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("{file}: {source}")]
    Io {
        file:   &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {source}")]
    Csv {
        file:   &'static str,
        #[source]
        source: csv::Error,
    },
}

impl OutputError {
    /// Name of the output file the failed write targeted.
    pub fn file(&self) -> &'static str {
        match self {
            Self::Io { file, .. } | Self::Csv { file, .. } => file,
        }
    }
}

pub type OutputResult<T> = Result<T, OutputError>;
