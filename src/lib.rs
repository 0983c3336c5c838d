//! A portable path, metadata and directory iteration library.
//!
//! # Purpose
//! This crate provides a structured [`Path`] type that decomposes into a root and segments, queries
//! for filesystem metadata ([`status`](status::status), [`symlink_status`](status::symlink_status))
//! and lazy directory iteration, both a single level at a time ([`DirIterator`]) and over a whole
//! tree ([`RecursiveDirIterator`]). Everything platform-specific lives behind a small backend
//! interface, so the rest of the crate reads the same everywhere.
//!
//! # Method
//! Paths are values: cloning is cheap and every operation that "modifies" a path returns a new
//! one. Comparison, ordering and hashing work on the decomposition rather than on the raw string,
//! so `a//b` and `a/b` are the same path. Text crosses into native strings only through the
//! [`encoding`] module, where malformed input is either rejected with its offset or replaced,
//! depending on an [`EncodingPolicy`](encoding::EncodingPolicy).
//!
//! # Error Handling
//! Errors are strongly typed: [`EncodingError`](error::EncodingError),
//! [`InvalidArgumentError`](error::InvalidArgumentError) and
//! [`FilesystemError`](error::FilesystemError), unified in [`Error`] with [`From`] conversions so
//! that `?` works everywhere. A [`FilesystemError`](error::FilesystemError) keeps the operation,
//! the path(s) involved and the underlying [`io::Error`](std::io::Error), platform code included.
//!
//! A missing file isn't an error for [`status`](status::status): it produces a status of type
//! [`NotFound`](status::FileType::NotFound). Operations that need the file to exist, such as
//! [`file_size`](status::file_size), do fail.
//!
//! The only error that is ever swallowed is access denied during directory iteration, and only when
//! [`skip_permission_denied`](DirOptions::skip_permission_denied) is set. Corruption of a handle
//! this crate owns is a bug rather than an error, so it panics.
//!
//! # Dependencies
//! The Unix backend relies on `libc` for its thin syscall wrappers (`stat`, `opendir`, ...). Other
//! platforms go through [`std::fs`]. Timestamps are `filetime`'s [`FileTime`](status::FileTime), so
//! they convert to and from whatever the platform reports without loss. Diagnostics are emitted through `tracing`, which costs nothing
//! without a subscriber installed.
//!
//! This crate also depends on some derive macros because they're helpful and remove the need for
//! some very repetitive programming.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod dir;
pub mod encoding;
pub mod error;
pub mod path;
pub mod status;

pub(crate) mod panic;
pub(crate) mod sys;

pub use dir::{DirEntry, DirIterator, DirOptions, RecursiveDirIterator};
pub use error::{Error, Result};
pub use path::Path;
pub use status::{FileType, Status};
