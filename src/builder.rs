//! Builder API for ergonomic chunked copies.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use chunkcopy::CopyBuilder;
//!
//! let report = CopyBuilder::new("src.bin", "dst.bin").run()?;
//! println!("Copied {} bytes", report.bytes_copied());
//! # Ok::<(), chunkcopy::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use chunkcopy::CopyBuilder;
//!
//! let report = CopyBuilder::new("src.bin", "dst.bin")
//!     .workers(8)            // Split into 8 ranges
//!     .no_fsync()            // Skip the final sync
//!     .strict()              // Fail if any range is incomplete
//!     .run()?;
//! # Ok::<(), chunkcopy::Error>(())
//! ```

use crate::copy::copy_file_internal;
use crate::error::{Error, Result};
use crate::options::CopyOptions;
use crate::plan::{CopyRange, plan_ranges, validate_workers};
use crate::progress::ProgressCallback;
use crate::report::CopyReport;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A builder for configuring and executing a chunked copy.
///
/// # Example
///
/// ```no_run
/// use chunkcopy::CopyBuilder;
///
/// let report = CopyBuilder::new("/data/image.iso", "/backup/image.iso")
///     .workers(16)
///     .on_warning(|msg| eprintln!("warning: {}", msg))
///     .run()?;
/// # Ok::<(), chunkcopy::Error>(())
/// ```
#[derive(Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
    progress: Option<ProgressCallback>,
}

impl fmt::Debug for CopyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyBuilder")
            .field("src", &self.src)
            .field("dst", &self.dst)
            .field("options", &self.options)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (4 workers, fsync, lenient about failed ranges).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
            progress: None,
        }
    }

    /// Set the number of workers, and therefore ranges.
    ///
    /// Set to 1 for a plain sequential copy. Zero makes [`run`](Self::run)
    /// fail with [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration).
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.options = self.options.with_workers(workers);
        self
    }

    /// Disable fsync after all ranges are written.
    ///
    /// This improves performance but reduces durability guarantees.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Return [`Error::PartialCopy`](crate::Error::PartialCopy) instead of a
    /// report when any range did not copy completely.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Set a warning handler, called once for every incomplete range.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chunkcopy::CopyBuilder;
    ///
    /// let report = CopyBuilder::new("src.bin", "dst.bin")
    ///     .on_warning(|msg| eprintln!("Warning: {}", msg))
    ///     .run()?;
    /// # Ok::<(), chunkcopy::Error>(())
    /// ```
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Enable verbose output: the plan and one line per copied range.
    #[must_use]
    pub fn verbose(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_verbose_handler(handler);
        self
    }

    /// Report progress after each range finishes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chunkcopy::CopyBuilder;
    /// use std::sync::Arc;
    ///
    /// let report = CopyBuilder::new("src.bin", "dst.bin")
    ///     .progress(Arc::new(|done, total| eprintln!("{done}/{total} bytes")))
    ///     .run()?;
    /// # Ok::<(), chunkcopy::Error>(())
    /// ```
    #[must_use]
    pub fn progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Compute the range plan for the current source without copying.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker count is zero, or if the source is
    /// missing or not a regular file. The checks run in the same order as
    /// [`run`](Self::run).
    pub fn plan(&self) -> Result<Vec<CopyRange>> {
        validate_workers(self.options.workers)?;

        let meta = self.src.metadata().map_err(|source| Error::SourceOpen {
            path: self.src.clone(),
            source,
        })?;
        if !meta.is_file() {
            return Err(Error::SourceOpen {
                path: self.src.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        plan_ranges(meta.len(), self.options.workers)
    }

    /// Execute the copy.
    ///
    /// # Errors
    ///
    /// See [`copy_file`](crate::copy_file).
    pub fn run(self) -> Result<CopyReport> {
        copy_file_internal(&self.src, &self.dst, &self.options, self.progress.as_ref())
    }
}
