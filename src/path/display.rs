use std::fmt::{self, Display, Formatter};

use super::{Path, is_separator, os_str};

/// Helper for printing a [`Path`], created by [`Path::display`]. Non-UTF-8 sequences are replaced
/// with U+FFFD.
pub struct DisplayPath<'a> {
    pub(crate) inner: &'a Path,
}

/// The path exactly as stored.
pub struct DisplayNative<'a> {
    pub(crate) inner: &'a Path,
}

/// The path with every separator rendered as `/`.
pub struct DisplayGeneric<'a> {
    pub(crate) inner: &'a Path,
}

impl<'a> DisplayPath<'a> {
    pub const fn native(&self) -> DisplayNative<'a> {
        DisplayNative {
            inner: self.inner,
        }
    }

    pub const fn generic(&self) -> DisplayGeneric<'a> {
        DisplayGeneric {
            inner: self.inner,
        }
    }
}

impl<'a> Display for DisplayPath<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.native())
    }
}

impl<'a> Display for DisplayNative<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.to_string_lossy())
    }
}

impl<'a> Display for DisplayGeneric<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bytes = self.inner.as_bytes();
        let mut head = 0;
        for (i, ch) in bytes.iter().enumerate() {
            if is_separator(*ch) {
                write!(f, "{}/", os_str(&bytes[head..i]).to_string_lossy())?;
                head = i + 1;
            }
        }
        write!(f, "{}", os_str(&bytes[head..]).to_string_lossy())
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
