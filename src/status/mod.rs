//! Metadata queries. [`status`] follows symlinks, [`symlink_status`] doesn't; both report a missing
//! entry as a [`Status`] of type [`FileType::NotFound`] instead of failing.

mod file_type;
mod perms;
mod query;
mod status;

pub use file_type::*;
pub use filetime::FileTime;
pub use perms::*;
pub use query::*;
pub use status::*;
