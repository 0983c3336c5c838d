use std::io;
use std::mem;
use std::ptr;

use tracing::{debug, trace};

use crate::dir::{DirEntry, DirOptions};
use crate::error::{FilesystemError, Operation, Result};
use crate::path::Path;
use crate::sys::{Backend, DirStream, Native};

type NativeStream = <Native as Backend>::Stream;

/// A lazy, single-level iterator over the entries of a directory.
///
/// The directory is opened and its first entry read on construction; each call to
/// [`next`](Iterator::next) yields the current entry and reads ahead one more. `.` and `..` are
/// never yielded. Entries come in whatever order the OS reports them.
///
/// An error while reading is yielded once, after which the iterator is at its end. The directory
/// handle is released as soon as the end is reached, or when the iterator is dropped.
#[derive(Debug)]
pub struct DirIterator {
    root: Path,
    options: DirOptions,
    state: State,
}

#[derive(Debug)]
enum State {
    Open {
        stream: NativeStream,
        current: DirEntry,
    },
    /// The last entry has been yielded, the error reading past it hasn't.
    Pending(FilesystemError),
    End,
}

impl DirIterator {
    pub fn new<P: Into<Path>>(path: P) -> Result<DirIterator> {
        DirIterator::with_options(path, &DirOptions::new())
    }

    pub fn with_options<P: Into<Path>>(path: P, options: &DirOptions) -> Result<DirIterator> {
        DirIterator::open(path.into(), *options, Operation::DirIterator)
    }

    /// Opens `path`, attributing failures to `op`.
    pub(crate) fn open(path: Path, options: DirOptions, op: Operation) -> Result<DirIterator> {
        let mut iter = DirIterator {
            root: path,
            options,
            state: State::End,
        };

        let stream = match Native::open_dir_stream(iter.root.as_os_str()) {
            Ok(stream) => stream,
            Err(e) if iter.skips(&e) => {
                debug!("Skipping {}: permission denied", iter.root.display());
                return Ok(iter);
            },
            Err(e) => Err(FilesystemError::new(op, iter.root.clone(), e))?,
        };
        trace!("Opened directory stream for {}", iter.root.display());

        match iter.advance(stream, op) {
            State::Pending(e) => Err(e)?,
            state => iter.state = state,
        }
        Ok(iter)
    }

    /// The directory being iterated. Empty for an iterator made with [`Default`].
    pub const fn path(&self) -> &Path {
        &self.root
    }

    pub const fn options(&self) -> &DirOptions {
        &self.options
    }

    /// Whether the iterator has nothing left to yield, neither entries nor errors.
    pub const fn is_end(&self) -> bool {
        matches!(self.state, State::End)
    }

    fn skips(&self, error: &io::Error) -> bool {
        self.options.skips_permission_denied() && error.kind() == io::ErrorKind::PermissionDenied
    }

    // Reads up to the next entry that isn't '.' or '..'.
    fn advance(&self, mut stream: NativeStream, op: Operation) -> State {
        loop {
            match stream.read_next_entry() {
                Ok(Some(raw)) if raw.is_dot() => (),
                Ok(Some(raw)) => {
                    return State::Open {
                        current: DirEntry::from_raw(&self.root, raw),
                        stream,
                    };
                },
                Ok(None) => return self.close(stream),
                Err(e) => {
                    drop(stream);
                    trace!("Dropped directory stream for {} after error", self.root.display());
                    if self.skips(&e) {
                        debug!("Ending {} early: permission denied", self.root.display());
                        return State::End;
                    }
                    return State::Pending(FilesystemError::new(op, self.root.clone(), e));
                },
            }
        }
    }

    fn close(&self, stream: NativeStream) -> State {
        trace!("Closing directory stream for {}", self.root.display());
        match stream.close() {
            Ok(()) => State::End,
            Err(e) => State::Pending(FilesystemError::new(Operation::DirAdvance, self.root.clone(), e)),
        }
    }
}

impl Iterator for DirIterator {
    type Item = Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        match mem::replace(&mut self.state, State::End) {
            State::Open {
                stream,
                current,
            } => {
                self.state = self.advance(stream, Operation::DirAdvance);
                Some(Ok(current))
            },
            State::Pending(e) => Some(Err(e.into())),
            State::End => None,
        }
    }
}

/// Two iterators are equal when both are at their end, or when they are the same iterator.
impl PartialEq for DirIterator {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || (self.is_end() && other.is_end())
    }
}

/// The end iterator.
impl Default for DirIterator {
    fn default() -> Self {
        DirIterator {
            root: Path::new(),
            options: DirOptions::new(),
            state: State::End,
        }
    }
}
