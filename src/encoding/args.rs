use std::env;
use std::ffi::OsString;
use std::sync::OnceLock;

use tracing::debug;

use super::{EncodingPolicy, native_to_text};
use crate::path::Path;

static ARGUMENTS: OnceLock<Arguments> = OnceLock::new();

/// The program's command-line arguments, converted to text once.
///
/// Arguments injected by a parent process may arrive in an unexpected encoding on some platforms.
/// [`is_valid`](Arguments::is_valid) reports whether every argument was well-formed; the stored
/// values are always available, with malformed sequences replaced by U+FFFD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    valid: bool,
    args: Vec<String>,
}

impl Arguments {
    pub fn from_os<I: IntoIterator<Item = OsString>>(raw: I) -> Arguments {
        let mut valid = true;
        let args = raw
            .into_iter()
            .map(|arg| {
                if native_to_text(&arg, EncodingPolicy::Strict).is_err() {
                    valid = false;
                }
                // Lenient conversion can't fail.
                native_to_text(&arg, EncodingPolicy::Lenient)
                    .map(|text| text.into_owned())
                    .unwrap_or_default()
            })
            .collect();

        Arguments {
            valid,
            args,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(String::as_str)
    }

    /// The arguments after the program name, as paths.
    pub fn paths(&self) -> impl Iterator<Item = Path> + '_ {
        self.args.iter().skip(1).map(|arg| Path::from(arg.as_str()))
    }
}

/// The process-wide argument check. Initialized on first use and read-only thereafter.
pub fn arguments() -> &'static Arguments {
    ARGUMENTS.get_or_init(|| {
        let args = Arguments::from_os(env::args_os());
        if !args.is_valid() {
            debug!("Command-line arguments contain malformed text ({} total)", args.len());
        }
        args
    })
}
