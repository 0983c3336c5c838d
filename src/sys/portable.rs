use std::ffi::OsStr;
use std::fs::{self, Metadata, ReadDir};
use std::io;

use crate::status::{FileTime, FileType, Perms, Status};
use crate::sys::{Backend, DirStream, RawEntry};

/// A backend built on [`std::fs`], for platforms without a dedicated one.
#[derive(Debug)]
pub(crate) struct Portable;

impl Backend for Portable {
    type Stream = PortableDirStream;

    fn query_status(path: &OsStr, follow: bool) -> io::Result<Status> {
        let metadata = if follow {
            fs::metadata(path)?
        } else {
            fs::symlink_metadata(path)?
        };
        Ok(Status::from_metadata(&metadata))
    }

    fn open_dir_stream(path: &OsStr) -> io::Result<PortableDirStream> {
        Ok(PortableDirStream {
            inner: fs::read_dir(path)?,
        })
    }

    fn not_found() -> io::Error {
        io::ErrorKind::NotFound.into()
    }
}

#[derive(Debug)]
pub(crate) struct PortableDirStream {
    inner: ReadDir,
}

impl DirStream for PortableDirStream {
    fn read_next_entry(&mut self) -> io::Result<Option<RawEntry>> {
        match self.inner.next() {
            Some(entry) => {
                let entry = entry?;
                Ok(Some(RawEntry {
                    name: entry.file_name(),
                    hint: entry.file_type().ok().map(FileType::from_std),
                }))
            },
            None => Ok(None),
        }
    }

    fn close(self) -> io::Result<()> {
        Ok(())
    }
}

impl Status {
    pub(crate) fn from_metadata(metadata: &Metadata) -> Status {
        let file_type = FileType::from_std(metadata.file_type());

        #[cfg(unix)]
        let (perms, links, device, inode) = {
            use std::os::unix::fs::MetadataExt;

            (
                Perms::from_mode(metadata.mode()),
                Some(metadata.nlink()),
                Some(metadata.dev()),
                Some(metadata.ino()),
            )
        };

        // Only a read-only flag is available here.
        #[cfg(not(unix))]
        let (perms, links, device, inode) = {
            let perms = if metadata.permissions().readonly() {
                Perms::from_mode(0o555)
            } else {
                Perms::ALL
            };
            (perms, None, None, None)
        };

        Status {
            file_type,
            perms,
            size: file_type.is_regular().then(|| metadata.len()),
            modified: Some(FileTime::from_last_modification_time(metadata)),
            links,
            device,
            inode,
        }
    }
}
