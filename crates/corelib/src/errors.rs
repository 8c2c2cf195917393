use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;
use crate::OUTPUT_SIZE;

/// Broad classification of a [`HashError`]. Both kinds are caller bugs and are
/// never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("{0} is null")]
    Null(&'static str),
    #[error("output buffer size must be 32, got {0}")]
    OutputLength(usize),
    #[error("{buffer} length must not be negative, got {len}")]
    NegativeLength { buffer: &'static str, len: i64 },
    #[error("cannot {op} a session that is {state}")]
    InvalidState {
        op: &'static str,
        state: SessionState,
    },
}

impl HashError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HashError::Null(_) | HashError::OutputLength(_) | HashError::NegativeLength { .. } => {
                ErrorKind::InvalidArgument
            }
            HashError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }
}

/// Rejects any destination whose length is not exactly [`OUTPUT_SIZE`].
pub(crate) fn check_output_len(len: usize) -> Result<(), HashError> {
    if len == OUTPUT_SIZE {
        Ok(())
    } else {
        Err(HashError::OutputLength(len))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,
}
