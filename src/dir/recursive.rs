use std::ptr;

use tracing::{debug, trace};

use crate::dir::{DirEntry, DirIterator, DirOptions};
use crate::error::{Error, Operation, Result};
use crate::path::Path;
use crate::status::{self, FileType, Status};
use crate::sys::Native;

/// A pre-order, depth-first walk of a directory tree.
///
/// Keeps an explicit stack of [`DirIterator`]s, one per directory currently being walked. After a
/// directory entry is yielded, the next call to [`next`](Iterator::next) descends into it, unless
/// [`disable_recursion_pending`](RecursiveDirIterator::disable_recursion_pending) was called in
/// between.
///
/// Symlinks to directories are yielded but only entered with
/// [`follow_symlinks`](DirOptions::follow_symlinks), in which case nothing stops a cycle from
/// being walked forever. Failing to open a nested directory yields an error and skips that branch.
#[derive(Debug)]
pub struct RecursiveDirIterator {
    options: DirOptions,
    stack: Vec<DirIterator>,
    pending: Option<DirEntry>,
    depth: usize,
    root_device: Option<u64>,
}

impl RecursiveDirIterator {
    pub fn new<P: Into<Path>>(path: P) -> Result<RecursiveDirIterator> {
        RecursiveDirIterator::with_options(path, &DirOptions::new())
    }

    pub fn with_options<P: Into<Path>>(
        path: P,
        options: &DirOptions,
    ) -> Result<RecursiveDirIterator> {
        let path = path.into();
        let root_device = if options.crosses_filesystem_boundaries() {
            None
        } else {
            status::query::<Native>(&path, true, Operation::RecursiveDirIterator)?.device()
        };
        let root = DirIterator::open(path, *options, Operation::RecursiveDirIterator)?;

        Ok(RecursiveDirIterator {
            options: *options,
            stack: if root.is_end() { Vec::new() } else { vec![root] },
            pending: None,
            depth: 0,
            root_device,
        })
    }

    pub const fn options(&self) -> &DirOptions {
        &self.options
    }

    /// How far below the root the last yielded entry is. Entries of the root are at depth 0.
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the walk is over: every directory has been closed and nothing is left to yield.
    pub fn is_end(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether the last yielded entry will still be considered for descent.
    pub const fn recursion_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Don't descend into the last yielded entry, even if it is a directory.
    pub fn disable_recursion_pending(&mut self) {
        self.pending = None;
    }

    /// Stops walking the current directory; iteration continues with the rest of its parent.
    /// Popping the root, or a directory whose ancestors are all exhausted, ends the walk.
    pub fn pop(&mut self) {
        self.pending = None;
        if let Some(dir) = self.stack.pop() {
            trace!("Popped {} at depth {}", dir.path().display(), self.stack.len());
        }
        while self.stack.last().is_some_and(DirIterator::is_end) {
            self.stack.pop();
        }
        self.depth = self.stack.len().saturating_sub(1);
    }

    fn should_descend(&self, entry: &DirEntry) -> Result<bool> {
        if self.options.max_depth.is_some_and(|max| self.depth >= max) {
            return Ok(false);
        }

        let file_type = match entry.file_type_hint() {
            Some(file_type) => file_type,
            None => match self.descent_status(entry, false)? {
                Some(status) => status.file_type(),
                None => return Ok(false),
            },
        };
        let follow = match file_type {
            FileType::Directory => false,
            FileType::Symlink if self.options.follows_symlinks() => true,
            _ => return Ok(false),
        };
        if !follow && self.root_device.is_none() {
            return Ok(true);
        }

        // One query serves both the symlink target's type and its device.
        let Some(status) = self.descent_status(entry, true)? else {
            return Ok(false);
        };
        if !status.is_directory() {
            return Ok(false);
        }
        if let Some(root_device) = self.root_device
            && status.device() != Some(root_device)
        {
            debug!("Not descending into {}: different filesystem", entry.path().display());
            return Ok(false);
        }
        Ok(true)
    }

    /// The status of an entry being considered for descent. `None` if access was denied and the
    /// options say to skip it.
    fn descent_status(&self, entry: &DirEntry, follow: bool) -> Result<Option<Status>> {
        match status::query::<Native>(entry.path(), follow, Operation::RecursiveDirIterator) {
            Ok(status) => Ok(Some(status)),
            Err(Error::Filesystem(e))
                if e.is_permission_denied() && self.options.skips_permission_denied() =>
            {
                debug!("Not descending into {}: permission denied", entry.path().display());
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }
}

impl Iterator for RecursiveDirIterator {
    type Item = Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.pending.take() {
            match self.should_descend(&entry) {
                Ok(true) => {
                    match DirIterator::open(
                        entry.into_path(),
                        self.options,
                        Operation::RecursiveDirIterator,
                    ) {
                        Ok(dir) => {
                            trace!("Pushed {} at depth {}", dir.path().display(), self.stack.len());
                            self.stack.push(dir);
                        },
                        Err(e) => return Some(Err(e)),
                    }
                },
                Ok(false) => (),
                Err(e) => return Some(Err(e)),
            }
        }

        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Ok(entry)) => {
                    self.depth = self.stack.len() - 1;
                    self.pending = Some(entry.clone());
                    return Some(Ok(entry));
                },
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    if let Some(dir) = self.stack.pop() {
                        trace!("Popped {} at depth {}", dir.path().display(), self.stack.len());
                    }
                },
            }
        }
    }
}

/// Two walks are equal when both are over, or when they are the same walk.
impl PartialEq for RecursiveDirIterator {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || (self.is_end() && other.is_end())
    }
}

/// The end iterator.
impl Default for RecursiveDirIterator {
    fn default() -> Self {
        RecursiveDirIterator {
            options: DirOptions::new(),
            stack: Vec::new(),
            pending: None,
            depth: 0,
            root_device: None,
        }
    }
}
