//! Error types for filekv
//!
//! Provides a unified error type for all operations, plus [`ErrorList`] for
//! calls that can fail in more than one independent way.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type alias using FileKvError
pub type Result<T> = std::result::Result<T, FileKvError>;

/// Unified error type for filekv operations
#[derive(Debug, Error)]
pub enum FileKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to remove {key:?}: {source}")]
    Remove {
        key: String,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Cleanup Errors
    // -------------------------------------------------------------------------
    #[error("failed to remove old entry: {0}")]
    LegacyCleanup(#[source] io::Error),

    #[error("failed to reclaim empty directories: {0}")]
    Reclaim(#[source] io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Aggregated Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Multiple(ErrorList),
}

impl From<serde_json::Error> for FileKvError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json wraps write failures of the underlying file as well
        if err.is_io() {
            return FileKvError::Io(err.into());
        }
        FileKvError::Serialization(err.to_string())
    }
}

impl FileKvError {
    /// Every individual error carried by this value, in the order they occurred
    pub fn errors(&self) -> Vec<&FileKvError> {
        match self {
            FileKvError::Multiple(list) => list.iter().collect(),
            other => vec![other],
        }
    }
}

/// Accumulates independent failures of one logical operation
///
/// Nothing is dropped: a later failure never masks an earlier one. Appending
/// a `FileKvError::Multiple` flattens it into this list.
#[derive(Debug, Default)]
pub struct ErrorList {
    errors: Vec<FileKvError>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error, flattening nested lists
    pub fn push(&mut self, err: FileKvError) {
        match err {
            FileKvError::Multiple(list) => self.errors.extend(list.errors),
            other => self.errors.push(other),
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileKvError> {
        self.errors.iter()
    }

    /// Collapse into a result
    ///
    /// - no errors: `Ok(())`
    /// - one error: that error, unwrapped
    /// - several: `FileKvError::Multiple`
    pub fn into_result(mut self) -> Result<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(FileKvError::Multiple(self)),
        }
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.len() == 1 {
            return write!(f, "1 error occurred:\n\t* {}", self.errors[0]);
        }

        write!(f, "{} errors occurred:", self.errors.len())?;
        for err in &self.errors {
            write!(f, "\n\t* {}", err)?;
        }
        Ok(())
    }
}
