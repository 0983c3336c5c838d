//! Directory iteration: [`DirIterator`] for a single level and [`RecursiveDirIterator`] for a
//! whole tree, both configured through [`DirOptions`] and yielding [`DirEntry`]s.

mod dir_entry;
mod options;
mod read_dir;
mod recursive;
mod tests;

pub use dir_entry::*;
pub use options::*;
pub use read_dir::*;
pub use recursive::*;
