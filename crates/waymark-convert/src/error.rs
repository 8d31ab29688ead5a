//! Conversion error types.

use thiserror::Error;

use crate::format::TrackFormat;

/// Errors raised by a conversion strategy.
///
/// These are logged with full diagnostic detail; the user only ever sees a
/// short failure notice in the reply thread.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The source file's extension is not in the format table.
    #[error("unknown track format: {0:?}")]
    UnknownFormat(String),

    /// The configured external converter binary could not be found.
    #[error("converter binary '{binary}' not found")]
    ToolMissing {
        /// The configured binary name or path.
        binary: String,
    },

    /// The external converter exited with a non-zero status.
    #[error("converter exited with status {status}:\n{stdout}\n{stderr}")]
    ToolFailed {
        /// Process exit code (-1 when terminated by a signal).
        status: i32,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The built-in codec has no reader/writer for this format.
    #[error("{0} is not supported by the built-in codec")]
    UnsupportedByCodec(TrackFormat),

    /// The source file did not parse as the detected format.
    #[error("malformed {format} track: {reason}")]
    Parse {
        /// The format being parsed.
        format: TrackFormat,
        /// What went wrong.
        reason: String,
    },

    /// Reading the source or writing the destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for conversion operations.
pub type ConversionResult<T> = Result<T, ConversionError>;
