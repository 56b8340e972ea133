//! Core copy operations.
//!
//! [`range`] copies one byte range with positioned I/O; [`file`] plans the
//! ranges for a whole file and runs them in parallel.

mod file;
pub(crate) mod range;
mod utils;

// Re-export public API
pub use file::copy_file;
pub(crate) use file::copy_file_internal;
pub use range::{ReadAt, WriteAt, copy_range};
