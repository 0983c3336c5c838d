use crate::error::InvalidArgumentError;
use crate::status::{FileTime, FileType, Perms};

/// A point-in-time snapshot of a filesystem entry's metadata.
///
/// Produced by [`status`](crate::status::status) (symlinks followed) and
/// [`symlink_status`](crate::status::symlink_status) (final symlink not followed). A missing entry
/// is represented by a [`FileType::NotFound`] status rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    pub(crate) file_type: FileType,
    pub(crate) perms: Perms,
    pub(crate) size: Option<u64>,
    pub(crate) modified: Option<FileTime>,
    pub(crate) links: Option<u64>,
    pub(crate) device: Option<u64>,
    pub(crate) inode: Option<u64>,
}

impl Status {
    /// A status with only a type and permissions, e.g. for comparisons in consumer code.
    pub const fn new(file_type: FileType, perms: Perms) -> Status {
        Status {
            file_type,
            perms,
            size: None,
            modified: None,
            links: None,
            device: None,
            inode: None,
        }
    }

    pub const fn not_found() -> Status {
        Status::new(FileType::NotFound, Perms::UNKNOWN)
    }

    pub const fn file_type(&self) -> FileType {
        self.file_type
    }

    pub const fn permissions(&self) -> Perms {
        self.perms
    }

    /// The size in bytes. Only defined for regular files.
    pub const fn size(&self) -> Result<u64, InvalidArgumentError> {
        match (self.file_type, self.size) {
            (FileType::Regular, Some(size)) => Ok(size),
            (FileType::Regular, None) => Err(InvalidArgumentError {
                reason: "status doesn't carry a size",
            }),
            _ => Err(InvalidArgumentError {
                reason: "size is only defined for regular files",
            }),
        }
    }

    pub const fn modified(&self) -> Option<FileTime> {
        self.modified
    }

    pub const fn hard_links(&self) -> Option<u64> {
        self.links
    }

    /// The id of the device holding the entry, used to detect filesystem boundaries.
    pub const fn device(&self) -> Option<u64> {
        self.device
    }

    pub const fn inode(&self) -> Option<u64> {
        self.inode
    }

    /// Whether the status was actually determined, i.e. isn't [`FileType::None`].
    pub const fn is_known(&self) -> bool {
        !matches!(self.file_type, FileType::None)
    }

    pub const fn exists(&self) -> bool {
        self.is_known() && !matches!(self.file_type, FileType::NotFound)
    }

    pub const fn is_regular_file(&self) -> bool {
        matches!(self.file_type, FileType::Regular)
    }

    pub const fn is_directory(&self) -> bool {
        matches!(self.file_type, FileType::Directory)
    }

    pub const fn is_symlink(&self) -> bool {
        matches!(self.file_type, FileType::Symlink)
    }

    pub const fn is_block_file(&self) -> bool {
        matches!(self.file_type, FileType::BlockDevice)
    }

    pub const fn is_character_file(&self) -> bool {
        matches!(self.file_type, FileType::CharDevice)
    }

    pub const fn is_fifo(&self) -> bool {
        matches!(self.file_type, FileType::Fifo)
    }

    pub const fn is_socket(&self) -> bool {
        matches!(self.file_type, FileType::Socket)
    }

    /// Anything that exists but isn't a regular file, directory or symlink.
    pub const fn is_other(&self) -> bool {
        self.exists() && !self.is_regular_file() && !self.is_directory() && !self.is_symlink()
    }
}

/// A status that hasn't been determined, of type [`FileType::None`].
impl Default for Status {
    fn default() -> Self {
        Status::new(FileType::None, Perms::UNKNOWN)
    }
}

#[cfg(unix)]
impl Status {
    #[allow(clippy::unnecessary_cast)]
    pub(crate) fn from_stat(raw: &libc::stat) -> Status {
        let file_type = FileType::from_stat_mode(raw.st_mode);
        Status {
            file_type,
            perms: Perms::from_mode(raw.st_mode as u32),
            size: match file_type {
                FileType::Regular => Some(raw.st_size as u64),
                _ => None,
            },
            modified: Some(FileTime::from_unix_time(raw.st_mtime as i64, raw.st_mtime_nsec as u32)),
            links: Some(raw.st_nlink as u64),
            device: Some(raw.st_dev as u64),
            inode: Some(raw.st_ino as u64),
        }
    }
}
