use std::cmp::Ordering;
use std::ffi::OsStr;

use crate::error::{Operation, Result};
use crate::path::Path;
use crate::status::{self, FileTime, FileType, Status};
use crate::sys::{Native, RawEntry};

/// An entry yielded by directory iteration.
///
/// The entry caches what it learns about itself: the file type reported by the directory listing
/// and, once queried, its statuses. Cached values are never updated in place, use
/// [`refresh`](DirEntry::refresh) to get an entry with fresh statuses.
#[derive(Debug, Clone)]
pub struct DirEntry {
    path: Path,
    hint: Option<FileType>,
    symlink_status: Option<Status>,
    status: Option<Status>,
}

impl DirEntry {
    /// An entry for `path`, with both statuses queried up front.
    pub fn new<P: Into<Path>>(path: P) -> Result<DirEntry> {
        let path = path.into();
        let symlink_status = status::query::<Native>(&path, false, Operation::Refresh)?;
        let status = if symlink_status.is_symlink() {
            status::query::<Native>(&path, true, Operation::Refresh)?
        } else {
            symlink_status
        };

        Ok(DirEntry {
            path,
            hint: Some(symlink_status.file_type()),
            symlink_status: Some(symlink_status),
            status: Some(status),
        })
    }

    pub(crate) fn from_raw(parent: &Path, raw: RawEntry) -> DirEntry {
        DirEntry {
            path: parent.join(raw.name),
            hint: raw.hint,
            symlink_status: None,
            status: None,
        }
    }

    pub const fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }

    pub fn file_name(&self) -> &OsStr {
        self.path.file_name()
    }

    /// The type reported by the directory listing, without following symlinks. `None` if the
    /// platform didn't report one.
    pub const fn file_type_hint(&self) -> Option<FileType> {
        self.hint
    }

    /// The status of the entry, following symlinks. Cached if already known, queried otherwise.
    pub fn status(&self) -> Result<Status> {
        match self.status {
            Some(status) => Ok(status),
            None => status::status(&self.path),
        }
    }

    pub fn symlink_status(&self) -> Result<Status> {
        match self.symlink_status {
            Some(status) => Ok(status),
            None => status::symlink_status(&self.path),
        }
    }

    /// A new entry for the same path, with both statuses queried again.
    pub fn refresh(&self) -> Result<DirEntry> {
        DirEntry::new(&self.path)
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.status()?.exists())
    }

    pub fn is_directory(&self) -> Result<bool> {
        match self.hint {
            Some(FileType::Symlink) | None => Ok(self.status()?.is_directory()),
            Some(file_type) => Ok(file_type.is_directory()),
        }
    }

    pub fn is_regular_file(&self) -> Result<bool> {
        match self.hint {
            Some(FileType::Symlink) | None => Ok(self.status()?.is_regular_file()),
            Some(file_type) => Ok(file_type.is_regular()),
        }
    }

    pub fn is_symlink(&self) -> Result<bool> {
        match self.hint {
            Some(file_type) => Ok(file_type.is_symlink()),
            None => Ok(self.symlink_status()?.is_symlink()),
        }
    }

    pub fn file_size(&self) -> Result<u64> {
        let status = status::require_existing::<Native>(
            self.status()?,
            &self.path,
            Operation::FileSize,
        )?;
        Ok(status.size()?)
    }

    pub fn last_write_time(&self) -> Result<FileTime> {
        match self.status.and_then(|status| status.modified()) {
            Some(time) => Ok(time),
            None => status::last_write_time(&self.path),
        }
    }
}

impl PartialEq for DirEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for DirEntry {}

impl PartialOrd for DirEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DirEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl AsRef<Path> for DirEntry {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl From<DirEntry> for Path {
    fn from(value: DirEntry) -> Self {
        value.path
    }
}

impl From<&DirEntry> for Path {
    fn from(value: &DirEntry) -> Self {
        value.path.clone()
    }
}
