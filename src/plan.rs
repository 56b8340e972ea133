//! Partitioning a file into contiguous byte ranges.
//!
//! [`plan_ranges`] splits `file_size` bytes into exactly `workers` ranges of
//! `ceil(file_size / workers)` bytes each. The tail is clamped to the end of
//! the file, so the last non-empty range may be shorter and any range that
//! starts at or past the end is empty.

use crate::error::{Error, Result};

/// A half-open span `[offset, offset + length)` of file bytes assigned to
/// one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyRange {
    /// Position of this range in the plan (0-based)
    pub index: usize,
    /// First byte of the range
    pub offset: u64,
    /// Number of bytes in the range (0 for degenerate ranges)
    pub length: u64,
}

impl CopyRange {
    /// One past the last byte of the range.
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }

    /// Whether the range covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Split `file_size` bytes into `workers` contiguous ranges.
///
/// The result always holds exactly `workers` ranges ordered by index. Their
/// lengths sum to `file_size`; none overlap.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if `workers` is zero.
///
/// # Example
///
/// ```
/// use chunkcopy::plan_ranges;
///
/// let ranges = plan_ranges(10, 3)?;
/// let lengths: Vec<u64> = ranges.iter().map(|r| r.length).collect();
/// assert_eq!(lengths, [4, 4, 2]);
/// # Ok::<(), chunkcopy::Error>(())
/// ```
pub fn plan_ranges(file_size: u64, workers: usize) -> Result<Vec<CopyRange>> {
    validate_workers(workers)?;
    let chunk_size = file_size.div_ceil(workers as u64);

    let ranges = (0..workers)
        .map(|index| {
            // Clamp so the tail never reads past EOF
            let offset = (index as u64).saturating_mul(chunk_size).min(file_size);
            let length = chunk_size.min(file_size - offset);
            CopyRange {
                index,
                offset,
                length,
            }
        })
        .collect();

    Ok(ranges)
}

/// Reject worker counts that cannot produce a plan.
pub(crate) fn validate_workers(workers: usize) -> Result<()> {
    if workers == 0 {
        return Err(Error::invalid_configuration(
            "worker count must be at least 1",
        ));
    }
    Ok(())
}
