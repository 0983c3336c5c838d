use std::ffi::{OsStr, OsString};

use crate::path::{
    Component, Path, PREFERRED_SEPARATOR, is_network_root, is_separator, os_str, root_dir_end,
    root_name_len,
};

// Decomposition follows std::filesystem: a trailing separator leaves an empty file name, and the
// parent of a relative single segment is the empty path.
impl Path {
    pub fn root_name(&self) -> &OsStr {
        os_str(&self.as_bytes()[..root_name_len(self.as_bytes())])
    }

    /// The root directory as a single separator, or empty.
    pub fn root_directory(&self) -> &OsStr {
        if self.has_root_directory() {
            OsStr::new("/")
        } else {
            OsStr::new("")
        }
    }

    pub fn root_path(&self) -> Path {
        let bytes = self.as_bytes();
        let name_len = root_name_len(bytes);
        if root_dir_end(bytes) > name_len {
            Path::from(os_str(&bytes[..=name_len]))
        } else {
            Path::from(os_str(&bytes[..name_len]))
        }
    }

    pub fn relative_path(&self) -> Path {
        Path::from(self.relative_bytes_os())
    }

    fn relative_bytes_os(&self) -> &OsStr {
        os_str(&self.as_bytes()[root_dir_end(self.as_bytes())..])
    }

    pub fn parent(&self) -> Path {
        let bytes = self.as_bytes();
        let root_end = root_dir_end(bytes);
        if root_end == bytes.len() {
            return self.clone();
        }

        let mut end = bytes.len() - self.file_name().len();
        while end > root_end && is_separator(bytes[end - 1]) {
            end -= 1;
        }
        Path::from(os_str(&bytes[..end]))
    }

    /// The last segment, or empty if the path ends in a separator or has no relative part.
    pub fn file_name(&self) -> &OsStr {
        let bytes = self.as_bytes();
        let root_end = root_dir_end(bytes);
        let start = bytes[root_end..]
            .iter()
            .rposition(|ch| is_separator(*ch))
            .map_or(root_end, |pos| root_end + pos + 1);
        os_str(&bytes[start..])
    }

    pub fn stem(&self) -> &OsStr {
        let name = self.file_name();
        match extension_start(name.as_encoded_bytes()) {
            Some(dot) => os_str(&name.as_encoded_bytes()[..dot]),
            None => name,
        }
    }

    /// The extension including its leading dot, or empty.
    pub fn extension(&self) -> &OsStr {
        let name = self.file_name();
        match extension_start(name.as_encoded_bytes()) {
            Some(dot) => os_str(&name.as_encoded_bytes()[dot..]),
            None => OsStr::new(""),
        }
    }

    pub fn has_root_name(&self) -> bool {
        root_name_len(self.as_bytes()) > 0
    }

    pub fn has_root_directory(&self) -> bool {
        root_dir_end(self.as_bytes()) > root_name_len(self.as_bytes())
    }

    pub fn has_root_path(&self) -> bool {
        root_dir_end(self.as_bytes()) > 0
    }

    pub fn has_relative_path(&self) -> bool {
        !self.relative_bytes_os().is_empty()
    }

    pub fn has_parent(&self) -> bool {
        !self.parent().is_empty()
    }

    pub fn has_file_name(&self) -> bool {
        !self.file_name().is_empty()
    }

    pub fn has_stem(&self) -> bool {
        !self.stem().is_empty()
    }

    pub fn has_extension(&self) -> bool {
        !self.extension().is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        if cfg!(windows) {
            self.has_root_name() && self.has_root_directory()
        } else {
            self.has_root_directory()
        }
    }

    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Appends `other` as a new segment.
    ///
    /// An absolute `other`, or one with a different root name, replaces this path entirely. A
    /// separator is inserted only when this path has a file name to separate from.
    pub fn join<P: Into<Path>>(&self, other: P) -> Path {
        let other = other.into();
        if other.is_absolute()
            || (other.has_root_name() && other.root_name() != self.root_name())
        {
            return other;
        }

        let mut joined = OsString::with_capacity(self.inner.len() + other.inner.len() + 1);
        if other.has_root_directory() {
            joined.push(self.root_name());
            joined.push(other.as_os_str());
            return Path::from(joined);
        }

        joined.push(self.as_os_str());
        let bare_root = !self.has_root_directory()
            && (self.is_absolute() || is_network_root(self.root_name().as_encoded_bytes()));
        if self.has_file_name() || bare_root {
            joined.push(PREFERRED_SEPARATOR.encode_utf8(&mut [0; 4]));
        }
        joined.push(os_str(&other.as_bytes()[root_name_len(other.as_bytes())..]));
        Path::from(joined)
    }

    /// Plain string concatenation, without inserting a separator.
    pub fn concat<S: AsRef<OsStr>>(&self, suffix: S) -> Path {
        let mut joined = self.as_os_str().to_owned();
        joined.push(suffix);
        Path::from(joined)
    }

    /// Replaces the extension, adding a leading dot to `extension` if it lacks one. An empty
    /// `extension` removes the current one.
    pub fn with_extension<S: AsRef<OsStr>>(&self, extension: S) -> Path {
        let extension = extension.as_ref();
        let bytes = self.as_bytes();
        let end = bytes.len() - self.extension().len();

        let mut replaced = os_str(&bytes[..end]).to_owned();
        if !extension.is_empty() {
            if !extension.as_encoded_bytes().starts_with(b".") {
                replaced.push(".");
            }
            replaced.push(extension);
        }
        Path::from(replaced)
    }

    /// Removes the file name, keeping the separator before it (`foo/bar` becomes `foo/`).
    pub fn without_file_name(&self) -> Path {
        let bytes = self.as_bytes();
        Path::from(os_str(&bytes[..bytes.len() - self.file_name().len()]))
    }

    pub fn with_file_name<P: Into<Path>>(&self, file_name: P) -> Path {
        self.without_file_name().join(file_name)
    }

    /// The path that leads from `base` to this one, purely by comparing components.
    ///
    /// Empty if there is no such path: the roots differ, or `base` climbs out of its common prefix
    /// with more `..` than it has names. Neither path is resolved against the filesystem.
    pub fn lexically_relative<P: Into<Path>>(&self, base: P) -> Path {
        let base = base.into();
        if self.root_name() != base.root_name()
            || self.is_absolute() != base.is_absolute()
            || (!self.has_root_directory() && base.has_root_directory())
        {
            return Path::new();
        }

        let mut rest = self.components().peekable();
        let mut base_rest = base.components().peekable();
        while let (Some(a), Some(b)) = (rest.peek(), base_rest.peek()) {
            if a != b {
                break;
            }
            rest.next();
            base_rest.next();
        }

        let mut climb: isize = 0;
        for component in base_rest {
            match component {
                Component::ParentDir => climb -= 1,
                Component::CurDir | Component::Trailing => (),
                _ => climb += 1,
            }
        }
        if climb < 0 {
            return Path::new();
        }
        if climb == 0 && rest.peek().is_none_or(|next| *next == Component::Trailing) {
            return Path::from(".");
        }

        let mut relative = Path::new();
        for _ in 0..climb {
            relative = relative.join("..");
        }
        for component in rest {
            relative = relative.join(component.as_os_str());
        }
        relative
    }

    /// Like [`lexically_relative`](Path::lexically_relative), but falls back to this path when
    /// there is no relative one.
    pub fn lexically_proximate<P: Into<Path>>(&self, base: P) -> Path {
        let relative = self.lexically_relative(base);
        if relative.is_empty() {
            self.clone()
        } else {
            relative
        }
    }

    /// Collapses `.` segments and redundant separators.
    ///
    /// `..` is left alone: resolving it needs knowledge of symlinks that a path doesn't have. A
    /// trailing separator (or trailing `/.`) is kept as a single separator, and a non-empty path
    /// that collapses to nothing becomes `.`.
    pub fn normalize(&self) -> Path {
        if self.is_empty() {
            return self.clone();
        }
        let bytes = self.as_bytes();
        let name_len = root_name_len(bytes);
        let root_end = root_dir_end(bytes);

        let mut valid = Vec::with_capacity(bytes.len() + 1);
        valid.extend_from_slice(&bytes[..name_len]);
        if root_end > name_len {
            valid.push(b'/');
        }
        let relative = collapse(&bytes[root_end..]);
        valid.extend_from_slice(&relative);
        if valid.is_empty() {
            valid.push(b'.');
        }

        // SAFETY: `valid` is made of the original bytes, split and rejoined only around ASCII
        // separators and dots.
        Path::from(unsafe { OsString::from_encoded_bytes_unchecked(valid) })
    }
}

fn extension_start(name: &[u8]) -> Option<usize> {
    match name {
        b"." | b".." => None,
        _ => name.iter().rposition(|ch| *ch == b'.').filter(|dot| *dot > 0),
    }
}

#[derive(Debug, Clone, Copy)]
enum Seq {
    Slash,
    SlashDot,
    Other,
}

// Copies bytes one by one rather than removing in place, which would be O(n^2). A virtual leading
// '/' lets "./" at the start collapse the same way as "/./" anywhere else.
fn collapse(relative: &[u8]) -> Vec<u8> {
    let mut last_seq = Seq::Slash;
    let mut valid = Vec::with_capacity(relative.len() + 1);
    valid.push(b'/');

    for ch in relative.iter().copied() {
        match (is_separator(ch), ch, last_seq) {
            (true, _, Seq::Slash) => (),
            (true, _, Seq::SlashDot) => {
                last_seq = Seq::Slash;
            },
            (true, _, Seq::Other) => {
                last_seq = Seq::Slash;
                valid.push(b'/');
            },
            (false, b'.', Seq::Slash) => {
                last_seq = Seq::SlashDot;
            },
            (false, _, Seq::Slash) => {
                last_seq = Seq::Other;
                valid.push(ch);
            },
            (false, _, Seq::SlashDot) => {
                last_seq = Seq::Other;
                valid.push(b'.');
                valid.push(ch);
            },
            (false, _, Seq::Other) => {
                valid.push(ch);
            },
        }
    }

    valid.split_off(1)
}
