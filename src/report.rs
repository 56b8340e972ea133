//! Per-range outcomes and the aggregated copy report.

use std::time::Duration;

/// Detailed result of copying one range.
///
/// [`CopyOutcome::bytes_copied`] flattens this into a single number; the
/// status keeps the distinction between a clean copy, a short read and an
/// I/O failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RangeStatus {
    /// Every requested byte was read and written
    Copied,
    /// The range was empty, no I/O was issued
    Empty,
    /// End of file was reached before the range was filled
    ShortRead {
        /// Bytes the range asked for
        expected: u64,
    },
    /// Nothing could be read
    ReadFailed {
        /// Error description (or "unexpected end of file")
        message: String,
    },
    /// The write did not persist every byte that was read
    WriteFailed {
        /// Bytes the destination accepted before the failure
        written: u64,
        /// Error description
        message: String,
    },
}

impl RangeStatus {
    /// Snake-case name used in structured output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copied => "copied",
            Self::Empty => "empty",
            Self::ShortRead { .. } => "short_read",
            Self::ReadFailed { .. } => "read_failed",
            Self::WriteFailed { .. } => "write_failed",
        }
    }
}

/// Outcome of one worker's range copy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOutcome {
    /// Index of the range in the plan
    pub index: usize,
    /// Offset of the range in both files
    pub offset: u64,
    /// Number of bytes the range asked for
    pub length: u64,
    /// Bytes read from the source and handed to the destination
    ///
    /// Equals `length` on success and 0 when the read failed. A failed write
    /// does not lower this count; inspect [`CopyOutcome::status`] for that.
    pub bytes_copied: u64,
    /// Detailed status
    pub status: RangeStatus,
}

impl CopyOutcome {
    /// Whether the range was copied in full (empty ranges count as complete).
    pub fn is_complete(&self) -> bool {
        matches!(self.status, RangeStatus::Copied | RangeStatus::Empty)
    }
}

/// Report of a finished chunked copy.
///
/// # Example
///
/// ```no_run
/// use chunkcopy::{copy_file, CopyOptions};
/// use std::path::Path;
///
/// let report = copy_file(Path::new("big.iso"), Path::new("copy.iso"), &CopyOptions::default())?;
/// for outcome in &report.outcomes {
///     println!("Thread {}: {} bytes copied from offset {}",
///         outcome.index, outcome.bytes_copied, outcome.offset);
/// }
/// println!("Total Time Taken: {} seconds", report.elapsed_secs());
/// # Ok::<(), chunkcopy::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyReport {
    /// Size of the source file in bytes
    pub file_size: u64,
    /// One outcome per planned range, ordered by index
    pub outcomes: Vec<CopyOutcome>,
    /// Wall-clock time from dispatch to the last range joining
    pub elapsed: Duration,
}

impl CopyReport {
    /// Sum of `bytes_copied` over all ranges.
    pub fn bytes_copied(&self) -> u64 {
        self.outcomes.iter().map(|o| o.bytes_copied).sum()
    }

    /// Ranges that did not copy completely.
    pub fn failed_ranges(&self) -> impl Iterator<Item = &CopyOutcome> {
        self.outcomes.iter().filter(|o| !o.is_complete())
    }

    /// Whether every range copied in full.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(CopyOutcome::is_complete)
    }

    /// Elapsed time in fractional seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}
