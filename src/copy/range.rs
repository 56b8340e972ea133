//! Copying a single byte range with positioned I/O.
//!
//! Every read and write names its offset explicitly, so many workers can
//! share the same [`File`] handles without racing on a file cursor.

use crate::plan::CopyRange;
use crate::report::{CopyOutcome, RangeStatus};
use std::fs::File;
use std::io;

/// A source that supports reads at an explicit offset.
///
/// Implementations must not depend on (or move) a shared cursor observable
/// by other callers.
pub trait ReadAt: Sync {
    /// Read up to `buf.len()` bytes starting at `offset`.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

/// A destination that supports writes at an explicit offset.
pub trait WriteAt: Sync {
    /// Write up to `buf.len()` bytes starting at `offset`.
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize>;
}

#[cfg(unix)]
impl ReadAt for File {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }
}

#[cfg(unix)]
impl WriteAt for File {
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::write_at(self, buf, offset)
    }
}

// seek_read/seek_write pass the offset in an OVERLAPPED structure, so the
// handle's own position is irrelevant to concurrent callers.
#[cfg(windows)]
impl ReadAt for File {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

#[cfg(windows)]
impl WriteAt for File {
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_write(self, buf, offset)
    }
}

/// Copy one range from `source` to the same offset in `destination`.
///
/// Never fails: I/O problems are folded into the returned [`CopyOutcome`]
/// so that one bad range cannot affect the others.
pub fn copy_range<R, W>(source: &R, destination: &W, range: &CopyRange) -> CopyOutcome
where
    R: ReadAt + ?Sized,
    W: WriteAt + ?Sized,
{
    let outcome = |bytes_copied, status| CopyOutcome {
        index: range.index,
        offset: range.offset,
        length: range.length,
        bytes_copied,
        status,
    };

    if range.is_empty() {
        return outcome(0, RangeStatus::Empty);
    }

    let len = match usize::try_from(range.length) {
        Ok(len) => len,
        Err(_) => {
            return outcome(
                0,
                RangeStatus::ReadFailed {
                    message: format!("range of {} bytes does not fit in memory", range.length),
                },
            );
        }
    };
    let mut buffer = Vec::new();
    if let Err(e) = buffer.try_reserve_exact(len) {
        return outcome(
            0,
            RangeStatus::ReadFailed {
                message: format!("cannot allocate a {len}-byte buffer: {e}"),
            },
        );
    }
    buffer.resize(len, 0);

    let read = match read_full_at(source, &mut buffer, range.offset) {
        Ok(0) => {
            return outcome(
                0,
                RangeStatus::ReadFailed {
                    message: "unexpected end of file".to_owned(),
                },
            );
        }
        Ok(n) => n,
        Err(e) => {
            return outcome(
                0,
                RangeStatus::ReadFailed {
                    message: e.to_string(),
                },
            );
        }
    };

    let bytes_copied = read as u64;
    match write_full_at(destination, &buffer[..read], range.offset) {
        Ok(()) if read == len => outcome(bytes_copied, RangeStatus::Copied),
        Ok(()) => outcome(
            bytes_copied,
            RangeStatus::ShortRead {
                expected: range.length,
            },
        ),
        Err((written, e)) => outcome(
            bytes_copied,
            RangeStatus::WriteFailed {
                written: written as u64,
                message: e.to_string(),
            },
        ),
    }
}

/// Fill `buf` from `offset`, stopping early only at end of file.
///
/// An error after some bytes were read ends the range with what was read.
fn read_full_at<R: ReadAt + ?Sized>(source: &R, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read_at(&mut buf[filled..], offset + filled as u64) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) if filled == 0 => return Err(e),
            Err(_) => break,
        }
    }
    Ok(filled)
}

/// Write all of `buf` at `offset`, returning how far it got on failure.
fn write_full_at<W: WriteAt + ?Sized>(
    destination: &W,
    buf: &[u8],
    offset: u64,
) -> std::result::Result<(), (usize, io::Error)> {
    let mut written = 0;
    while written < buf.len() {
        match destination.write_at(&buf[written..], offset + written as u64) {
            Ok(0) => {
                return Err((
                    written,
                    io::Error::new(io::ErrorKind::WriteZero, "destination accepted no bytes"),
                ));
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err((written, e)),
        }
    }
    Ok(())
}
