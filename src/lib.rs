//! # chunkcopy
//!
//! Copy a single file by splitting it into contiguous byte ranges that are
//! copied in parallel.
//!
//! ## How It Works
//!
//! 1. The source is opened for reading and the destination is created (or
//!    truncated) once.
//! 2. [`plan_ranges`] splits the file into one range per worker:
//!    `ceil(size / workers)` bytes each, with the tail clamped to the end of
//!    the file.
//! 3. Every range is copied on its own thread with positioned reads and
//!    writes (`pread`/`pwrite` on Unix, `seek_read`/`seek_write` on
//!    Windows), so the workers never share a file cursor.
//! 4. After all ranges have joined, a [`CopyReport`] lists the bytes copied
//!    per range and the elapsed time.
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use chunkcopy::CopyBuilder;
//!
//! let report = CopyBuilder::new("disk.img", "backup.img")
//!     .workers(8)
//!     .run()?;
//!
//! for outcome in &report.outcomes {
//!     println!("Thread {}: {} bytes copied from offset {}",
//!         outcome.index, outcome.bytes_copied, outcome.offset);
//! }
//! println!("Total Time Taken: {} seconds", report.elapsed_secs());
//! # Ok::<(), chunkcopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use chunkcopy::{copy_file, CopyOptions};
//! use std::path::Path;
//!
//! let options = CopyOptions::default()
//!     .with_workers(16)
//!     .without_fsync();
//!
//! let report = copy_file(Path::new("src.bin"), Path::new("dst.bin"), &options)?;
//! println!("Copied {} of {} bytes", report.bytes_copied(), report.file_size);
//! # Ok::<(), chunkcopy::Error>(())
//! ```
//!
//! ## Failure Model
//!
//! Problems that prevent the copy from starting (zero workers, missing
//! source, unwritable destination, unknown size) are returned as an
//! [`Error`] before any data moves. A range that fails to read is **not**
//! an error: its outcome reports `bytes_copied == 0` and the destination
//! keeps zeros there. Inspect [`CopyReport::is_complete`] or enable
//! [`CopyOptions::strict`] to turn incomplete ranges into
//! [`Error::PartialCopy`].
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Progress bar support with indicatif |
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for options and reports |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod options;
mod plan;
mod progress;
mod report;
mod utils;

pub use builder::CopyBuilder;
pub use copy::{ReadAt, WriteAt, copy_file, copy_range};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::CopyOptions;
pub use plan::{CopyRange, plan_ranges};
pub use progress::ProgressCallback;
pub use report::{CopyOutcome, CopyReport, RangeStatus};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_progress_bar;
