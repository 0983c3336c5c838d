use std::borrow::Cow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::encoding::{self, EncodingPolicy};
use crate::error::EncodingError;
use crate::path::{Components, DisplayPath};

/// A structured, immutable filesystem path.
///
/// The native string is stored exactly as given and decomposed on demand into an optional root
/// name, an optional root directory and a sequence of segments (see [`Components`]). Equality,
/// ordering and hashing work on that decomposition, so `a//b` and `a/b` are the same path.
///
/// Cloning is cheap: the string is shared behind an [`Arc`]. New paths are produced by composition
/// ([`join`](Path::join), [`with_extension`](Path::with_extension), ...), never by mutation.
///
/// # Invariants
/// - A `Path` built from portable text holds only validated text.
/// - A `Path` built from a native string holds exactly that string.
#[derive(Clone)]
pub struct Path {
    pub(crate) inner: Arc<OsStr>,
}

impl Path {
    /// The empty path.
    pub fn new() -> Path {
        Path {
            inner: Arc::from(OsStr::new("")),
        }
    }

    /// Wraps a native string without any validation.
    pub fn from_native<S: Into<OsString>>(native: S) -> Path {
        Path {
            inner: Arc::from(native.into()),
        }
    }

    /// Builds a path from UTF-8 text, validated according to `policy`.
    pub fn from_text(text: &[u8], policy: EncodingPolicy) -> Result<Path, EncodingError> {
        let text = encoding::decode_utf8(text, policy)?;
        Ok(Path::from_native(encoding::text_to_native(&text)))
    }

    /// Builds a path from UTF-16 text, validated according to `policy`.
    pub fn from_utf16(units: &[u16], policy: EncodingPolicy) -> Result<Path, EncodingError> {
        let text = encoding::decode_utf16(units, policy)?;
        Ok(Path::from_native(encoding::text_to_native(&text)))
    }

    /// Wraps a native wide string without any validation.
    #[cfg(windows)]
    pub fn from_wide(wide: &[u16]) -> Path {
        use std::os::windows::ffi::OsStringExt;

        Path::from_native(OsString::from_wide(wide))
    }

    #[cfg(windows)]
    pub fn to_wide(&self) -> Vec<u16> {
        use std::os::windows::ffi::OsStrExt;

        self.inner.encode_wide().collect()
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.inner
    }

    pub fn into_os_string(self) -> OsString {
        self.inner.as_ref().to_owned()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.inner.as_encoded_bytes()
    }

    pub fn to_text(&self, policy: EncodingPolicy) -> Result<Cow<'_, str>, EncodingError> {
        encoding::native_to_text(&self.inner, policy)
    }

    pub fn to_utf16(&self, policy: EncodingPolicy) -> Result<Vec<u16>, EncodingError> {
        Ok(encoding::encode_utf16(&self.to_text(policy)?))
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        self.inner.to_string_lossy()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn components(&self) -> Components<'_> {
        Components::new(self.as_bytes())
    }

    pub fn iter(&self) -> Components<'_> {
        self.components()
    }

    pub const fn display(&self) -> DisplayPath<'_> {
        DisplayPath {
            inner: self,
        }
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::new()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.components().eq(other.components())
    }
}

impl Eq for Path {}

impl PartialEq<str> for Path {
    fn eq(&self, other: &str) -> bool {
        self.components().eq(Path::from(other).components())
    }
}

impl PartialEq<&str> for Path {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components().cmp(other.components())
    }
}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for component in self.components() {
            component.hash(state);
        }
    }
}

impl Debug for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Path({:?})", &*self.inner)
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path::from_native(value)
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Path::from_native(value)
    }
}

impl From<&OsStr> for Path {
    fn from(value: &OsStr) -> Self {
        Path {
            inner: Arc::from(value),
        }
    }
}

impl From<OsString> for Path {
    fn from(value: OsString) -> Self {
        Path::from_native(value)
    }
}

impl From<&std::path::Path> for Path {
    fn from(value: &std::path::Path) -> Self {
        Path::from(value.as_os_str())
    }
}

impl From<PathBuf> for Path {
    fn from(value: PathBuf) -> Self {
        Path::from_native(value.into_os_string())
    }
}

impl From<&Path> for Path {
    fn from(value: &Path) -> Self {
        value.clone()
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::from(s))
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<OsStr> for Path {
    fn as_ref(&self) -> &OsStr {
        &self.inner
    }
}

impl AsRef<std::path::Path> for Path {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&*self.inner)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = crate::path::Component<'a>;
    type IntoIter = Components<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.components()
    }
}
