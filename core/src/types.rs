//! src/types.rs
//!
//! Crate-wide error type.
//!
//! Design notes:
//! - One enum covers the whole session layer so callers can match on a single type.
//! - Engine failures always carry the engine diagnostic string in `reason`.
//! - Sink/source failures arrive as `Io` and keep their original `io::Error`.

use std::fmt::Display;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("{name} must be between {min} and {max} (got {value})")]
    OutOfRange {
        name: &'static str,
        min: i32,
        max: i32,
        value: i64,
    },

    #[error("Failed to set {name}: {reason}")]
    EngineRejected { name: &'static str, reason: String },

    #[error("{context}: {reason}")]
    EngineQueryFailure { context: String, reason: String },

    #[error("Compression failed: {reason}")]
    CompressionFailure { reason: String },

    #[error("Decompression failed: {reason}")]
    DecompressionFailure { reason: String },

    #[error("Malformed frame: {reason}")]
    MalformedFrame { reason: String },

    #[error("data is not a skippable frame")]
    NotSkippableFrame,

    #[error("No compressed frame found in {len} bytes (only skippable frames)")]
    NoPayloadFrame { len: usize },

    #[error("Invalid compressed data: not a valid zstd frame")]
    InvalidFrame,

    #[error("Failed to build dictionary: {reason}")]
    DictionaryBuildFailure { reason: String },

    #[error("{stage} failed: {reason}")]
    TrainingFailure { stage: &'static str, reason: String },

    #[error("Invalid dictionary: {reason}")]
    InvalidDictionary { reason: String },

    #[error("samples array cannot be empty")]
    EmptySampleSet,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

impl CodecError {
    pub(crate) fn compression(reason: impl Display) -> Self {
        CodecError::CompressionFailure { reason: reason.to_string() }
    }

    pub(crate) fn decompression(reason: impl Display) -> Self {
        CodecError::DecompressionFailure { reason: reason.to_string() }
    }

    pub(crate) fn malformed(reason: impl Display) -> Self {
        CodecError::MalformedFrame { reason: reason.to_string() }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        CodecError::InvalidArgument(msg.into())
    }

    /// True for the argument-validation family (bad names, bad values, bad sizes).
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            CodecError::UnknownParameter { .. }
                | CodecError::OutOfRange { .. }
                | CodecError::InvalidArgument(_)
                | CodecError::EmptySampleSet
        )
    }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(e) => e,
            other => io::Error::other(other),
        }
    }
}
