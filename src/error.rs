use std::fmt::{self, Display, Formatter};
use std::io;

use derive_more::{Display, Error, From, IsVariant, TryInto};

use crate::path::Path;

/// The filesystem operation that was running when a [`FilesystemError`] occurred.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    #[display("status")]
    Status,
    #[display("symlink_status")]
    SymlinkStatus,
    #[display("file_size")]
    FileSize,
    #[display("last_write_time")]
    LastWriteTime,
    #[display("directory_iterator")]
    DirIterator,
    #[display("directory_iterator::advance")]
    DirAdvance,
    #[display("recursive_directory_iterator")]
    RecursiveDirIterator,
    #[display("refresh")]
    Refresh,
    #[display("is_empty")]
    IsEmpty,
    #[display("equivalent")]
    Equivalent,
    #[display("hard_link_count")]
    HardLinkCount,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    #[display("UTF-8")]
    Utf8,
    #[display("UTF-16")]
    Utf16,
}

/// Malformed text encountered under [`EncodingPolicy::Strict`](crate::encoding::EncodingPolicy).
/// The offset is counted in bytes for UTF-8 and code units for UTF-16.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("invalid {encoding} sequence at offset {offset}")]
pub struct EncodingError {
    pub encoding: Encoding,
    pub offset: usize,
}

/// An operation was asked of a value it isn't defined for, e.g. the size of a directory.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("invalid argument: {reason}")]
pub struct InvalidArgumentError {
    pub reason: &'static str,
}

/// An underlying OS call failed. The platform error code is kept in the [`io::Error`] source and
/// is available through [`FilesystemError::code`].
#[derive(Debug, Error)]
pub struct FilesystemError {
    op: Operation,
    path1: Path,
    path2: Option<Path>,
    source: io::Error,
}

impl FilesystemError {
    pub fn new(op: Operation, path: Path, source: io::Error) -> FilesystemError {
        FilesystemError {
            op,
            path1: path,
            path2: None,
            source,
        }
    }

    pub fn with_secondary(self, path: Path) -> FilesystemError {
        FilesystemError {
            path2: Some(path),
            ..self
        }
    }

    pub const fn operation(&self) -> Operation {
        self.op
    }

    pub const fn path1(&self) -> &Path {
        &self.path1
    }

    pub const fn path2(&self) -> Option<&Path> {
        self.path2.as_ref()
    }

    /// The raw platform error code, if the failure came from the OS rather than being synthesized.
    pub fn code(&self) -> Option<i32> {
        self.source.raw_os_error()
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    pub fn is_not_found(&self) -> bool {
        is_not_found(&self.source)
    }

    pub fn is_permission_denied(&self) -> bool {
        self.source.kind() == io::ErrorKind::PermissionDenied
    }

    pub fn into_io_error(self) -> io::Error {
        self.source
    }
}

impl Display for FilesystemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: '{}'", self.op, self.source, self.path1.display())?;
        if let Some(path2) = &self.path2 {
            write!(f, ", '{}'", path2.display())?;
        }
        Ok(())
    }
}

#[derive(Debug, Display, From, Error, IsVariant, TryInto)]
pub enum Error {
    Encoding(EncodingError),
    InvalidArgument(InvalidArgumentError),
    Filesystem(FilesystemError),
}

impl Error {
    pub const fn as_filesystem(&self) -> Option<&FilesystemError> {
        match self {
            Error::Filesystem(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Error> for io::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::Encoding(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            Error::InvalidArgument(e) => io::Error::new(io::ErrorKind::InvalidInput, e),
            Error::Filesystem(e) => io::Error::new(e.kind(), e),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Missing entries and non-directory path components both mean "nothing lives here".
pub(crate) fn is_not_found(error: &io::Error) -> bool {
    matches!(error.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}
