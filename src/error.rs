//! Error types for chunkcopy.
//!
//! This module provides the [`Error`] enum containing all errors that can
//! abort a chunked copy, the [`Result`] type alias, and the stable
//! [`ErrorCode`] used by machine-readable front ends.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Configuration | [`Error::InvalidConfiguration`] |
//! | Resources | [`Error::SourceOpen`], [`Error::DestinationOpen`], [`Error::SizeQuery`] |
//! | Partial | [`Error::PartialCopy`] (strict mode only) |
//! | IO | [`Error::Io`] |
//!
//! Failures of individual ranges are not errors: they are recorded in the
//! [`CopyReport`](crate::CopyReport) unless strict mode is enabled.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for chunkcopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```no_run
/// use std::io;
/// use chunkcopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Errors that abort a chunked copy operation.
///
/// Every variant is raised before any range is dispatched, except
/// [`Error::PartialCopy`] (strict mode) and [`Error::Io`] from the final
/// fsync.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The requested configuration cannot be executed
    ///
    /// Raised before any file is opened, so the destination is never
    /// created or truncated.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the problem
        reason: String,
    },

    /// Source file is missing, inaccessible, or not a regular file
    #[error("Failed to open source file {path}: {source}")]
    SourceOpen {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination could not be created or truncated
    #[error("Failed to open destination file {path}: {source}")]
    DestinationOpen {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source length could not be determined after it was opened
    #[error("Failed to query size of {path}: {source}")]
    SizeQuery {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// One or more ranges did not copy completely (strict mode)
    #[error("Failed to copy {failed} of {total} ranges")]
    PartialCopy {
        /// Number of ranges that did not copy completely
        failed: usize,
        /// Total number of ranges
        total: usize,
    },

    /// IO error while preparing or syncing the destination
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfiguration { .. } => ErrorCode::InvalidConfiguration,
            Self::SourceOpen { source, .. } => {
                io_error_code(source).unwrap_or(ErrorCode::SourceOpen)
            }
            Self::DestinationOpen { source, .. } => {
                io_error_code(source).unwrap_or(ErrorCode::DestinationOpen)
            }
            Self::SizeQuery { .. } => ErrorCode::SizeQuery,
            Self::PartialCopy { .. } => ErrorCode::PartialCopy,
            Self::Io(source) => io_error_code(source).unwrap_or(ErrorCode::IoError),
        }
    }
}

fn io_error_code(error: &io::Error) -> Option<ErrorCode> {
    if is_no_space_error(error) {
        Some(ErrorCode::NoSpace)
    } else if error.kind() == io::ErrorKind::PermissionDenied {
        Some(ErrorCode::PermissionDenied)
    } else {
        None
    }
}

/// Machine-readable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Invalid worker count or paths
    InvalidConfiguration,
    /// Source could not be opened
    SourceOpen,
    /// Destination could not be opened
    DestinationOpen,
    /// Source length could not be queried
    SizeQuery,
    /// Some ranges failed in strict mode
    PartialCopy,
    /// Storage is full
    NoSpace,
    /// Access was denied
    PermissionDenied,
    /// Any other IO failure
    IoError,
    /// Failure inside the front end itself
    Internal,
}

impl ErrorCode {
    /// Snake-case name used in structured output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidConfiguration => "invalid_configuration",
            Self::SourceOpen => "source_open",
            Self::DestinationOpen => "destination_open",
            Self::SizeQuery => "size_query",
            Self::PartialCopy => "partial_copy",
            Self::NoSpace => "no_space",
            Self::PermissionDenied => "permission_denied",
            Self::IoError => "io_error",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
