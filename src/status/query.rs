use std::fs;

use crate::dir::{DirIterator, DirOptions};
use crate::error::{FilesystemError, InvalidArgumentError, Operation, Result, is_not_found};
use crate::path::Path;
use crate::status::{FileTime, Status};
use crate::sys::{Backend, Native};

/// Queries the status of `path`, following symlinks.
///
/// A missing entry, a broken symlink or a non-directory component somewhere in `path` all produce
/// [`Status::not_found`] rather than an error.
pub fn status<P: Into<Path>>(path: P) -> Result<Status> {
    query::<Native>(&path.into(), true, Operation::Status)
}

/// Like [`status`], but reports a symlink itself instead of its target.
pub fn symlink_status<P: Into<Path>>(path: P) -> Result<Status> {
    query::<Native>(&path.into(), false, Operation::SymlinkStatus)
}

/// Whether `status` was actually determined. Only a default-constructed [`Status`] isn't.
pub const fn status_known(status: Status) -> bool {
    status.is_known()
}

pub fn exists<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(status(path)?.exists())
}

/// The size of a regular file. Unlike [`status`], a missing entry is an error.
pub fn file_size<P: Into<Path>>(path: P) -> Result<u64> {
    let path: &Path = &path.into();
    Ok(existing(path, Operation::FileSize)?.size()?)
}

pub fn last_write_time<P: Into<Path>>(path: P) -> Result<FileTime> {
    let path: &Path = &path.into();
    existing(path, Operation::LastWriteTime)?
        .modified()
        .ok_or_else(|| {
            InvalidArgumentError {
                reason: "modification time isn't available",
            }
            .into()
        })
}

pub fn hard_link_count<P: Into<Path>>(path: P) -> Result<u64> {
    let path: &Path = &path.into();
    existing(path, Operation::HardLinkCount)?
        .hard_links()
        .ok_or_else(|| {
            InvalidArgumentError {
                reason: "hard link count isn't available",
            }
            .into()
        })
}

/// Whether `path` is an empty directory or an empty regular file. Other types of file have no
/// notion of emptiness and produce an [`InvalidArgumentError`].
pub fn is_empty<P: Into<Path>>(path: P) -> Result<bool> {
    let path: Path = path.into();
    let status = existing(&path, Operation::IsEmpty)?;
    if status.is_directory() {
        Ok(DirIterator::open(path, DirOptions::new(), Operation::IsEmpty)?.is_end())
    } else {
        Ok(status.size()? == 0)
    }
}

/// Whether two paths resolve to the same file. It's an error for neither to exist, but only one
/// existing just means they differ.
pub fn equivalent<P: Into<Path>, Q: Into<Path>>(path1: P, path2: Q) -> Result<bool> {
    let (path1, path2): (Path, Path) = (path1.into(), path2.into());
    let status1 = query::<Native>(&path1, true, Operation::Equivalent)?;
    let status2 = query::<Native>(&path2, true, Operation::Equivalent)?;

    match (status1.exists(), status2.exists()) {
        (false, false) => {
            return Err(FilesystemError::new(Operation::Equivalent, path1, Native::not_found())
                .with_secondary(path2)
                .into());
        },
        (true, true) => (),
        _ => return Ok(false),
    }

    match (status1.device(), status1.inode(), status2.device(), status2.inode()) {
        (Some(device1), Some(inode1), Some(device2), Some(inode2)) => {
            Ok(device1 == device2 && inode1 == inode2)
        },
        // No file ids on this platform, compare where the paths lead instead.
        _ => {
            let canonical = |path: &Path| {
                fs::canonicalize(path).map_err(|e| {
                    FilesystemError::new(Operation::Equivalent, path1.clone(), e)
                        .with_secondary(path2.clone())
                })
            };
            Ok(canonical(&path1)? == canonical(&path2)?)
        },
    }
}

pub fn is_directory<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(status(path)?.is_directory())
}

pub fn is_regular_file<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(status(path)?.is_regular_file())
}

pub fn is_symlink<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(symlink_status(path)?.is_symlink())
}

pub fn is_block_file<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(status(path)?.is_block_file())
}

pub fn is_character_file<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(status(path)?.is_character_file())
}

pub fn is_fifo<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(status(path)?.is_fifo())
}

pub fn is_socket<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(status(path)?.is_socket())
}

/// Whether `path` exists but is neither a regular file, a directory nor a symlink.
pub fn is_other<P: Into<Path>>(path: P) -> Result<bool> {
    Ok(status(path)?.is_other())
}

pub(crate) fn query<B: Backend>(path: &Path, follow: bool, op: Operation) -> Result<Status> {
    match B::query_status(path.as_os_str(), follow) {
        Ok(status) => Ok(status),
        Err(e) if is_not_found(&e) => Ok(Status::not_found()),
        Err(e) => Err(FilesystemError::new(op, path.clone(), e))?,
    }
}

/// Turns a not-found status back into the error the OS would have reported.
pub(crate) fn require_existing<B: Backend>(
    status: Status,
    path: &Path,
    op: Operation,
) -> Result<Status> {
    if status.exists() {
        Ok(status)
    } else {
        Err(FilesystemError::new(op, path.clone(), B::not_found()))?
    }
}

fn existing(path: &Path, op: Operation) -> Result<Status> {
    require_existing::<Native>(query::<Native>(path, true, op)?, path, op)
}

impl Path {
    pub fn status(&self) -> Result<Status> {
        status(self)
    }

    pub fn symlink_status(&self) -> Result<Status> {
        symlink_status(self)
    }

    pub fn exists(&self) -> Result<bool> {
        exists(self)
    }

    pub fn file_size(&self) -> Result<u64> {
        file_size(self)
    }

    pub fn last_write_time(&self) -> Result<FileTime> {
        last_write_time(self)
    }

    pub fn hard_link_count(&self) -> Result<u64> {
        hard_link_count(self)
    }

    /// See [`equivalent`].
    pub fn is_equivalent<P: Into<Path>>(&self, other: P) -> Result<bool> {
        equivalent(self, other)
    }

    pub fn is_directory(&self) -> Result<bool> {
        is_directory(self)
    }

    pub fn is_regular_file(&self) -> Result<bool> {
        is_regular_file(self)
    }

    pub fn is_symlink(&self) -> Result<bool> {
        is_symlink(self)
    }

    pub fn is_other(&self) -> Result<bool> {
        is_other(self)
    }
}
