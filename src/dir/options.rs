use std::fmt::{self, Debug, Formatter};

use crate::dir::{DirIterator, RecursiveDirIterator};
use crate::error::Result;
use crate::path::Path;

const FOLLOW_SYMLINKS: u8 = 0b001;
const SKIP_PERMISSION_DENIED: u8 = 0b010;
const CROSS_FILESYSTEMS: u8 = 0b100;

/// A builder for directory iteration, with logical defaults: symlinks aren't followed, access
/// denied is an error, filesystem boundaries are crossed and recursion depth is unlimited.
///
/// ```no_run
/// # use pathfs::dir::DirOptions;
/// let entries = DirOptions::new()
///     .follow_symlinks(true)
///     .max_depth(Some(2))
///     .walk("/usr/share")?;
/// # Ok::<(), pathfs::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DirOptions {
    pub(crate) flags: u8,
    pub(crate) max_depth: Option<usize>,
}

macro_rules! set_flag {
    ($self:ident, $value:expr, $flag:expr) => {
        if $value {
            $self.flags |= $flag;
        } else {
            $self.flags &= !$flag;
        }
    };
}

macro_rules! get_flag {
    ($self:ident, $flag:expr) => {
        $self.flags & $flag != 0
    };
}

impl DirOptions {
    pub const fn new() -> DirOptions {
        DirOptions {
            flags: CROSS_FILESYSTEMS,
            max_depth: None,
        }
    }

    /// Descend into symlinked directories. There is no cycle detection.
    pub const fn follow_symlinks(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, FOLLOW_SYMLINKS);
        self
    }

    /// Treat directories that can't be opened for lack of permission as empty.
    pub const fn skip_permission_denied(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, SKIP_PERMISSION_DENIED);
        self
    }

    pub const fn cross_filesystem_boundaries(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, CROSS_FILESYSTEMS);
        self
    }

    /// Limits how deep recursion goes: entries of the root are at depth 0, and directories at
    /// `depth` aren't entered.
    pub const fn max_depth(&mut self, depth: Option<usize>) -> &mut Self {
        self.max_depth = depth;
        self
    }

    pub const fn follows_symlinks(&self) -> bool {
        get_flag!(self, FOLLOW_SYMLINKS)
    }

    pub const fn skips_permission_denied(&self) -> bool {
        get_flag!(self, SKIP_PERMISSION_DENIED)
    }

    pub const fn crosses_filesystem_boundaries(&self) -> bool {
        get_flag!(self, CROSS_FILESYSTEMS)
    }

    pub const fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    /// Opens a [`DirIterator`] over `path` with these options.
    pub fn open<P: Into<Path>>(&self, path: P) -> Result<DirIterator> {
        DirIterator::with_options(path, self)
    }

    /// Opens a [`RecursiveDirIterator`] over `path` with these options.
    pub fn walk<P: Into<Path>>(&self, path: P) -> Result<RecursiveDirIterator> {
        RecursiveDirIterator::with_options(path, self)
    }
}

impl Default for DirOptions {
    fn default() -> Self {
        DirOptions::new()
    }
}

impl Debug for DirOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirOptions")
            .field("follow_symlinks", &get_flag!(self, FOLLOW_SYMLINKS))
            .field("skip_permission_denied", &get_flag!(self, SKIP_PERMISSION_DENIED))
            .field("cross_filesystem_boundaries", &get_flag!(self, CROSS_FILESYSTEMS))
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
