//! The single choke point between a platform's native path representation and portable text.
//!
//! Native strings are opaque (`OsStr`): bytes on Unix, potentially ill-formed UTF-16 on Windows.
//! Portable text is UTF-8 or UTF-16 supplied by the caller, which is validated according to an
//! [`EncodingPolicy`] before it may become a [`Path`](crate::path::Path).
//!
//! The only process-wide state in the crate lives here: the validity flag for the program's
//! command-line arguments, computed once by [`arguments`].

mod args;
mod convert;

pub use args::*;
pub use convert::*;
