use std::cmp::Ordering;
use std::ffi::OsStr;
use std::hash::{Hash, Hasher};

/// The separator used when this crate has to insert one.
pub const PREFERRED_SEPARATOR: char = if cfg!(windows) { '\\' } else { '/' };

pub(crate) const fn is_separator(ch: u8) -> bool {
    ch == b'/' || (cfg!(windows) && ch == b'\\')
}

/// Length of the root name: a drive prefix such as `C:` (Windows only), or a network root such as
/// `//host` or `\\server`, which is exactly two separators followed by a name.
pub(crate) fn root_name_len(bytes: &[u8]) -> usize {
    if cfg!(windows) && bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return 2;
    }
    if bytes.len() > 2 && is_separator(bytes[0]) && is_separator(bytes[1]) && !is_separator(bytes[2])
    {
        return bytes[2..]
            .iter()
            .position(|ch| is_separator(*ch))
            .map_or(bytes.len(), |pos| pos + 2);
    }
    0
}

/// Whether a root name is a network root, which always needs a separator before a relative path.
pub(crate) fn is_network_root(name: &[u8]) -> bool {
    name.len() > 2 && is_separator(name[0])
}

/// End of the run of separators forming the root directory, starting after the root name.
pub(crate) fn root_dir_end(bytes: &[u8]) -> usize {
    let mut end = root_name_len(bytes);
    while let Some(ch) = bytes.get(end) {
        if !is_separator(*ch) {
            break;
        }
        end += 1;
    }
    end
}

/// Reinterprets a subslice of a native string.
///
/// Every split point used by this module falls on an ASCII byte (a separator, `:` or `.`), which
/// keeps the result a valid encoded `OsStr`.
pub(crate) fn os_str(bytes: &[u8]) -> &OsStr {
    // SAFETY: The slice was taken from an `OsStr` and split only next to ASCII characters.
    unsafe { OsStr::from_encoded_bytes_unchecked(bytes) }
}

/// One element of a decomposed [`Path`](super::Path).
#[derive(Debug, Clone, Copy)]
pub enum Component<'a> {
    /// A drive prefix such as `C:`, or a network root such as `//host`.
    RootName(&'a OsStr),
    /// The root directory; any number of leading separators.
    RootDir,
    CurDir,
    ParentDir,
    Normal(&'a OsStr),
    /// The empty file name following a trailing separator, as in `foo/`.
    Trailing,
}

impl<'a> Component<'a> {
    fn from_segment(segment: &'a [u8]) -> Component<'a> {
        match segment {
            b"." => Component::CurDir,
            b".." => Component::ParentDir,
            _ => Component::Normal(os_str(segment)),
        }
    }

    pub fn as_os_str(&self) -> &'a OsStr {
        match self {
            Component::RootName(name) => *name,
            Component::RootDir => OsStr::new("/"),
            Component::CurDir => OsStr::new("."),
            Component::ParentDir => OsStr::new(".."),
            Component::Normal(name) => *name,
            Component::Trailing => OsStr::new(""),
        }
    }

    // Roots sort before any segment; segments compare by their text.
    fn key(&self) -> (u8, &'a [u8]) {
        match self {
            Component::RootName(name) => (0, name.as_encoded_bytes()),
            Component::RootDir => (1, b""),
            _ => (2, self.as_os_str().as_encoded_bytes()),
        }
    }
}

impl PartialEq for Component<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Component<'_> {}

impl PartialOrd for Component<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Component<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Iterator over the [`Component`]s of a path, from either end.
#[derive(Debug, Clone)]
pub struct Components<'a> {
    path: &'a [u8],
    name_len: usize,
    root_end: usize,
    /// Unconsumed bytes lie in `front..back`; trailing separators are outside of it.
    front: usize,
    back: usize,
    trailing: bool,
}

impl<'a> Components<'a> {
    pub(crate) fn new(path: &'a [u8]) -> Components<'a> {
        let name_len = root_name_len(path);
        let root_end = root_dir_end(path);
        let mut body_end = path.len();
        while body_end > root_end && is_separator(path[body_end - 1]) {
            body_end -= 1;
        }

        Components {
            path,
            name_len,
            root_end,
            front: 0,
            back: body_end,
            trailing: body_end < path.len() && body_end > root_end,
        }
    }
}

impl<'a> Iterator for Components<'a> {
    type Item = Component<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            if self.trailing {
                self.trailing = false;
                return Some(Component::Trailing);
            }
            return None;
        }

        if self.front < self.name_len {
            self.front = self.name_len;
            return Some(Component::RootName(os_str(&self.path[..self.name_len])));
        }
        if self.front < self.root_end {
            self.front = self.root_end;
            return Some(Component::RootDir);
        }

        let start = self.front;
        let mut end = start;
        while end < self.back && !is_separator(self.path[end]) {
            end += 1;
        }
        self.front = end;
        while self.front < self.back && is_separator(self.path[self.front]) {
            self.front += 1;
        }
        Some(Component::from_segment(&self.path[start..end]))
    }
}

impl<'a> DoubleEndedIterator for Components<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.trailing {
            self.trailing = false;
            return Some(Component::Trailing);
        }
        if self.front >= self.back {
            return None;
        }

        if self.back > self.root_end {
            let lower = self.front.max(self.root_end);
            let start = self.path[lower..self.back]
                .iter()
                .rposition(|ch| is_separator(*ch))
                .map_or(lower, |pos| lower + pos + 1);
            let segment = &self.path[start..self.back];
            self.back = start;
            while self.back > lower && is_separator(self.path[self.back - 1]) {
                self.back -= 1;
            }
            return Some(Component::from_segment(segment));
        }
        if self.back > self.name_len {
            self.back = self.name_len;
            return Some(Component::RootDir);
        }
        self.back = 0;
        Some(Component::RootName(os_str(&self.path[..self.name_len])))
    }
}
