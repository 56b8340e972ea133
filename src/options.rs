//! Configuration options for chunked copy operations.
//!
//! # Example
//!
//! ```
//! use chunkcopy::CopyOptions;
//!
//! let options = CopyOptions::default()
//!     .with_workers(8)
//!     .without_fsync()
//!     .strict();
//! ```

/// Options for a chunked copy.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `workers` | 4 | Ranges / worker threads |
/// | `fsync` | `true` | Sync destination after all ranges join |
/// | `strict` | `false` | Fail the copy if any range is incomplete |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Number of ranges the file is split into, one worker thread each
    ///
    /// Zero is rejected with [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// when the copy starts.
    pub workers: usize,

    /// Whether to sync the destination to disk after the copy (default: true)
    pub fsync: bool,

    /// Turn incomplete ranges into [`Error::PartialCopy`](crate::Error::PartialCopy)
    /// (default: false)
    ///
    /// When disabled, a failed range only shows up as `bytes_copied == 0`
    /// (or a short count) in the report.
    pub strict: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,

    /// Callback for per-range progress messages (optional)
    ///
    /// If not set and `tracing` feature is enabled, messages are logged at debug level.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub verbose_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            fsync: true,
            strict: false,
            warn_handler: None,
            verbose_handler: None,
        }
    }
}

impl CopyOptions {
    /// Set the number of workers (and ranges)
    ///
    /// Unlike most setters this does not clamp: zero is reported as an
    /// invalid configuration by the copy itself.
    #[must_use]
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Fail with [`Error::PartialCopy`](crate::Error::PartialCopy) when any range is incomplete
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Create options with a verbose handler
    #[must_use]
    pub fn with_verbose_handler(mut self, handler: fn(&str)) -> Self {
        self.verbose_handler = Some(handler);
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }

    pub(crate) fn verbose(&self, msg: &str) {
        if let Some(handler) = self.verbose_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("{}", msg);
        }
    }
}
