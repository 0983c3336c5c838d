//! Platform backends. Everything above this module talks to the OS through [`Backend`] and
//! [`DirStream`] only, so a new platform is a new implementation of these two traits.

use std::ffi::{OsStr, OsString};
use std::io;

use crate::status::{FileType, Status};

#[cfg(any(not(unix), test))]
pub(crate) mod portable;
mod tests;
#[cfg(unix)]
pub(crate) mod unix;

#[cfg(unix)]
pub(crate) type Native = unix::Unix;
#[cfg(not(unix))]
pub(crate) type Native = portable::Portable;

pub(crate) trait Backend {
    type Stream: DirStream;

    /// Queries the status of `path`, following a final symlink if `follow` is set.
    fn query_status(path: &OsStr, follow: bool) -> io::Result<Status>;

    fn open_dir_stream(path: &OsStr) -> io::Result<Self::Stream>;

    /// The error this platform reports for a missing entry.
    fn not_found() -> io::Error;
}

/// An open directory handle. Dropping it releases the handle.
pub(crate) trait DirStream: Send + Sized {
    /// Reads the next entry, including `.` and `..` if the platform reports them. `Ok(None)` marks
    /// the end of the stream.
    fn read_next_entry(&mut self) -> io::Result<Option<RawEntry>>;

    /// Releases the handle, reporting any error instead of panicking.
    fn close(self) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawEntry {
    pub name: OsString,
    /// The type as reported by the directory listing, if the platform provides it for free.
    pub hint: Option<FileType>,
}

impl RawEntry {
    pub fn is_dot(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}
