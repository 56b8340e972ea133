//! Progress reporting support

use std::sync::Arc;

/// Callback invoked after each range finishes with `(bytes_done, total_bytes)`
///
/// Ranges finish in any order, so calls may come from different worker
/// threads; `bytes_done` never decreases.
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Create a default byte-oriented progress bar for a chunked copy
#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
#[must_use]
pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
