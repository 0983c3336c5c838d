use std::ffi::{CStr, CString, OsStr};
use std::io;
use std::mem::{ManuallyDrop, MaybeUninit};
use std::os::unix::ffi::OsStrExt;
use std::ptr::NonNull;
use std::thread;

use libc::{DIR, EBADF, c_int};

use crate::panic::{BadDirStreamPanic, Panic, UnexpectedErrorPanic};
use crate::status::{FileType, Status};
use crate::sys::{Backend, DirStream, RawEntry};

/// `stat`/`lstat` and `opendir`/`readdir`/`closedir` through libc.
#[derive(Debug)]
pub(crate) struct Unix;

impl Backend for Unix {
    type Stream = UnixDirStream;

    fn query_status(path: &OsStr, follow: bool) -> io::Result<Status> {
        let pathname = c_path(path)?;
        let mut raw: MaybeUninit<libc::stat> = MaybeUninit::uninit();

        // SAFETY: pathname is nul-terminated and raw is large enough for a stat struct.
        let result = unsafe {
            if follow {
                libc::stat(pathname.as_ptr(), raw.as_mut_ptr())
            } else {
                libc::lstat(pathname.as_ptr(), raw.as_mut_ptr())
            }
        };
        if result == -1 {
            return Err(io::Error::last_os_error());
        }

        // SAFETY: stat either initializes raw or returns -1, which was handled above.
        Ok(Status::from_stat(&unsafe { raw.assume_init() }))
    }

    fn open_dir_stream(path: &OsStr) -> io::Result<UnixDirStream> {
        let pathname = c_path(path)?;

        // SAFETY: pathname is nul-terminated.
        match NonNull::new(unsafe { libc::opendir(pathname.as_ptr()) }) {
            Some(dir) => Ok(UnixDirStream {
                dir,
            }),
            None => Err(io::Error::last_os_error()),
        }
    }

    fn not_found() -> io::Error {
        io::Error::from_raw_os_error(libc::ENOENT)
    }
}

#[derive(Debug)]
pub(crate) struct UnixDirStream {
    dir: NonNull<DIR>,
}

// SAFETY: A DIR handle isn't tied to the thread that opened it, and every use requires &mut self.
unsafe impl Send for UnixDirStream {}

impl DirStream for UnixDirStream {
    fn read_next_entry(&mut self) -> io::Result<Option<RawEntry>> {
        // readdir signals both the end of the stream and errors by returning null, only errno can
        // tell them apart.
        clear_errno();

        // SAFETY: dir stays open for the lifetime of self.
        let entry = unsafe { libc::readdir(self.dir.as_ptr()) };
        if entry.is_null() {
            return match err_no() {
                0 => Ok(None),
                e => Err(io::Error::from_raw_os_error(e)),
            };
        }

        // SAFETY: A non-null entry is valid until the next call on this stream, and it's copied
        // before then.
        let entry = unsafe { &*entry };
        // SAFETY: d_name is nul-terminated.
        let name = unsafe { CStr::from_ptr(entry.d_name.as_ptr()) };

        Ok(Some(RawEntry {
            name: OsStr::from_bytes(name.to_bytes()).to_owned(),
            hint: dirent_hint(entry),
        }))
    }

    fn close(self) -> io::Result<()> {
        // The handle is invalid after closedir whatever the outcome, so Drop mustn't run.
        let this = ManuallyDrop::new(self);

        // SAFETY: dir is open and is never used again.
        if unsafe { libc::closedir(this.dir.as_ptr()) } == -1 {
            match err_no() {
                EBADF => BadDirStreamPanic.panic(),
                e => return Err(io::Error::from_raw_os_error(e)),
            }
        }
        Ok(())
    }
}

impl Drop for UnixDirStream {
    fn drop(&mut self) {
        // SAFETY: dir is open, and self is being dropped so it's never used again.
        if unsafe { libc::closedir(self.dir.as_ptr()) } == -1
            // Panic only if we aren't already, to prevent aborting an existing unwind.
            && !thread::panicking()
        {
            match err_no() {
                EBADF => BadDirStreamPanic.panic(),
                e => UnexpectedErrorPanic(e).panic(),
            }
        }
    }
}

fn c_path(path: &OsStr) -> io::Result<CString> {
    CString::new(path.as_bytes()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "path contains an interior nul byte")
    })
}

fn err_no() -> c_int {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

fn clear_errno() {
    #[cfg(any(target_os = "linux", target_os = "emscripten", target_os = "hurd"))]
    use libc::__errno_location as errno_location;
    #[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
    use libc::__errno as errno_location;
    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "tvos",
        target_os = "watchos",
        target_os = "visionos",
        target_os = "freebsd"
    ))]
    use libc::__error as errno_location;
    #[cfg(any(target_os = "solaris", target_os = "illumos"))]
    use libc::___errno as errno_location;
    #[cfg(target_os = "haiku")]
    use libc::_errnop as errno_location;
    #[cfg(target_os = "aix")]
    use libc::_Errno as errno_location;

    // SAFETY: errno is thread-local, so writing it can't race.
    unsafe { *errno_location() = 0 };
}

#[cfg(not(any(target_os = "solaris", target_os = "illumos", target_os = "haiku", target_os = "aix")))]
const fn dirent_hint(entry: &libc::dirent) -> Option<FileType> {
    FileType::from_dirent_type(entry.d_type)
}

#[cfg(any(target_os = "solaris", target_os = "illumos", target_os = "haiku", target_os = "aix"))]
const fn dirent_hint(_entry: &libc::dirent) -> Option<FileType> {
    None
}
