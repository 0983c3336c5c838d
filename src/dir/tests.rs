#![cfg(test)]

use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use super::*;
use crate::error::Operation;
use crate::path::Path;

fn tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"a").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/b.txt"), b"bb").unwrap();
    dir
}

fn names(iter: DirIterator) -> BTreeSet<String> {
    iter.map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned()).collect()
}

/// Relative path of every entry mapped to its depth.
fn walk(root: &Path, iter: RecursiveDirIterator) -> BTreeMap<String, usize> {
    let mut iter = iter;
    let mut seen = BTreeMap::new();
    while let Some(entry) = iter.next() {
        let entry = entry.unwrap();
        let relative = entry.path().as_os_str().to_string_lossy()
            [root.as_os_str().len() + 1..]
            .to_owned();
        assert!(seen.insert(relative, iter.depth()).is_none(), "Entries shouldn't repeat.");
    }
    seen
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut iter = DirIterator::new(dir.path()).unwrap();
    assert!(iter.is_end(), "An empty directory should start at the end.");
    assert_eq!(iter, DirIterator::default());
    assert!(iter.next().is_none());
}

#[test]
fn test_entries_unique() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..20 {
        fs::write(dir.path().join(format!("file{i}")), b"").unwrap();
    }

    let first = names(DirIterator::new(dir.path()).unwrap());
    assert_eq!(first.len(), 20);
    assert!(!first.contains(".") && !first.contains(".."));
    assert_eq!(first, names(DirIterator::new(dir.path()).unwrap()), "Two iterations should agree.");
}

#[test]
fn test_entry_paths_and_types() {
    let dir = tree();
    let root = Path::from(dir.path());

    let mut entries: Vec<_> = DirIterator::new(&root).unwrap().map(Result::unwrap).collect();
    entries.sort();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].path(), &root.join("a.txt"));
    assert!(entries[0].is_regular_file().unwrap());
    assert_eq!(entries[0].file_size().unwrap(), 1);
    assert!(!entries[0].is_symlink().unwrap());

    assert_eq!(entries[1].file_name(), "sub");
    assert!(entries[1].is_directory().unwrap());
    assert!(entries[1].file_size().is_err());

    let refreshed = entries[1].refresh().unwrap();
    assert_eq!(refreshed, entries[1]);
    assert!(refreshed.status().unwrap().is_directory());
}

#[test]
fn test_open_errors() {
    let dir = tree();

    let missing = Path::from(dir.path()).join("missing");
    let err = DirIterator::new(&missing).unwrap_err();
    let err = err.as_filesystem().unwrap();
    assert_eq!(err.operation(), Operation::DirIterator);
    assert!(err.is_not_found());

    assert!(DirIterator::new(dir.path().join("a.txt")).is_err(), "A file can't be iterated.");

    let err = RecursiveDirIterator::new(&missing).unwrap_err();
    assert_eq!(err.as_filesystem().unwrap().operation(), Operation::RecursiveDirIterator);
}

#[test]
fn test_equality() {
    let dir = tree();
    let iter = DirIterator::new(dir.path()).unwrap();
    let other = DirIterator::new(dir.path()).unwrap();
    assert_eq!(iter, iter);
    assert_ne!(iter, other, "Distinct open iterators shouldn't compare equal.");
    assert_ne!(iter, DirIterator::default());
}

#[test]
fn test_options() {
    let options = DirOptions::new();
    assert!(!options.follows_symlinks());
    assert!(!options.skips_permission_denied());
    assert!(options.crosses_filesystem_boundaries());
    assert_eq!(options.depth_limit(), None);

    let mut options = DirOptions::new();
    options.follow_symlinks(true).cross_filesystem_boundaries(false).max_depth(Some(3));
    assert!(options.follows_symlinks());
    assert!(!options.crosses_filesystem_boundaries());
    assert_eq!(options.depth_limit(), Some(3));
    assert_eq!(
        format!("{options:?}"),
        "DirOptions { follow_symlinks: true, skip_permission_denied: false, \
         cross_filesystem_boundaries: false, max_depth: Some(3) }"
    );
}

#[test]
fn test_recursive() {
    let dir = tree();
    let root = Path::from(dir.path());

    let mut order = Vec::new();
    let mut iter = RecursiveDirIterator::new(&root).unwrap();
    while let Some(entry) = iter.next() {
        order.push(entry.unwrap().file_name().to_string_lossy().into_owned());
    }
    let sub = order.iter().position(|name| name == "sub").unwrap();
    let b = order.iter().position(|name| name == "b.txt").unwrap();
    assert!(sub < b, "A directory should come before its contents.");

    let seen = walk(&root, DirOptions::new().walk(&root).unwrap());
    assert_eq!(seen.len(), 3);
    assert_eq!(seen["a.txt"], 0);
    assert_eq!(seen["sub"], 0);
    assert_eq!(seen["sub/b.txt"], 1);
}

#[test]
fn test_max_depth() {
    let dir = tree();
    fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
    fs::write(dir.path().join("sub/deeper/c.txt"), b"").unwrap();
    let root = Path::from(dir.path());

    let seen = walk(&root, DirOptions::new().max_depth(Some(0)).walk(&root).unwrap());
    assert_eq!(seen.len(), 2, "Depth 0 shouldn't descend at all.");

    let seen = walk(&root, DirOptions::new().max_depth(Some(1)).walk(&root).unwrap());
    assert!(seen.contains_key("sub/deeper"));
    assert!(!seen.contains_key("sub/deeper/c.txt"));

    assert_eq!(walk(&root, RecursiveDirIterator::new(&root).unwrap()).len(), 5);
}

#[test]
fn test_disable_recursion_pending() {
    let dir = tree();
    let mut iter = RecursiveDirIterator::new(dir.path()).unwrap();

    let mut names = Vec::new();
    while let Some(entry) = iter.next() {
        let entry = entry.unwrap();
        assert!(iter.recursion_pending());
        if entry.file_name() == "sub" {
            iter.disable_recursion_pending();
            assert!(!iter.recursion_pending());
        }
        names.push(entry.file_name().to_owned());
    }
    assert_eq!(names.len(), 2, "The skipped directory's contents shouldn't be yielded.");
}

#[test]
fn test_pop() {
    let dir = tree();
    for name in ["x1", "x2", "x3"] {
        fs::write(dir.path().join("sub").join(name), b"").unwrap();
    }

    let mut iter = RecursiveDirIterator::new(dir.path()).unwrap();
    let mut nested = 0;
    while let Some(entry) = iter.next() {
        entry.unwrap();
        if iter.depth() == 1 {
            nested += 1;
            iter.pop();
        }
    }
    assert_eq!(nested, 1, "Popping should leave the rest of the directory unvisited.");

    let mut iter = RecursiveDirIterator::new(dir.path()).unwrap();
    iter.pop();
    assert!(iter.is_end());
    assert_eq!(iter, RecursiveDirIterator::default(), "Popping the root should end the walk.");
    assert!(iter.next().is_none());
}

#[test]
fn test_recursive_end() {
    let end = RecursiveDirIterator::default();
    assert!(end.is_end());
    assert_eq!(end.depth(), 0);
    assert!(!end.recursion_pending());

    let dir = tempfile::tempdir().unwrap();
    let mut iter = RecursiveDirIterator::new(dir.path()).unwrap();
    assert!(iter.is_end(), "An empty root should start at the end.");
    assert_eq!(iter, end);
    assert!(iter.next().is_none());

    let dir = tree();
    let mut iter = RecursiveDirIterator::new(dir.path()).unwrap();
    assert!(!iter.is_end());
    assert_ne!(iter, end);
    assert_eq!(iter, iter, "A walk should equal itself.");
    while iter.next().is_some() {}
    assert!(iter.is_end());
    assert_eq!(iter, end);
}

#[test]
fn test_same_filesystem() {
    let dir = tree();
    let root = Path::from(dir.path());
    let seen = walk(&root, DirOptions::new().cross_filesystem_boundaries(false).walk(&root).unwrap());
    assert_eq!(seen.len(), 3, "A tree on one device should be walked fully.");
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory() {
    use std::os::unix::fs::symlink;

    let dir = tree();
    let root = Path::from(dir.path());
    symlink(root.join("sub"), root.join("link")).unwrap();

    let seen = walk(&root, RecursiveDirIterator::new(&root).unwrap());
    assert!(seen.contains_key("link"), "Symlinks should be yielded.");
    assert!(!seen.contains_key("link/b.txt"), "Symlinks shouldn't be followed by default.");

    let seen = walk(&root, DirOptions::new().follow_symlinks(true).walk(&root).unwrap());
    assert_eq!(seen["link/b.txt"], 1);

    let entry = DirEntry::new(root.join("link")).unwrap();
    assert!(entry.is_symlink().unwrap());
    assert!(entry.is_directory().unwrap());
}

/// Permission bits don't apply to root, so tests relying on them can't run.
#[cfg(unix)]
fn running_as_root(test: &str) -> bool {
    // SAFETY: geteuid has no preconditions.
    let root = unsafe { libc::geteuid() } == 0;
    if root {
        eprintln!("{test}: skipped, permission bits are ignored for root");
    }
    root
}

#[cfg(unix)]
#[test]
fn test_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    if running_as_root("test_permission_denied") {
        return;
    }

    let dir = tree();
    let root = Path::from(dir.path());
    let locked = root.join("sub");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let err = DirIterator::new(&locked).unwrap_err();
    assert!(err.as_filesystem().unwrap().is_permission_denied());

    let mut options = DirOptions::new();
    options.skip_permission_denied(true);
    assert!(options.open(&locked).unwrap().is_end(), "Access denied should be skipped.");

    let results: Vec<_> = RecursiveDirIterator::new(&root).unwrap().collect();
    assert_eq!(results.len(), 3);
    assert_eq!(results.iter().filter(|result| result.is_err()).count(), 1);

    let results: Vec<_> = options.walk(&root).unwrap().collect();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(Result::is_ok));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_permission_denied_below_root() {
    use std::os::unix::fs::{PermissionsExt, symlink};

    if running_as_root("test_permission_denied_below_root") {
        return;
    }

    let dir = tree();
    let root = Path::from(dir.path());
    let locked = root.join("locked");
    fs::create_dir_all(locked.join("inner")).unwrap();
    symlink(root.join("sub"), locked.join("link")).unwrap();
    // Listable, but nothing inside can be reached.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o444)).unwrap();

    let mut options = DirOptions::new();
    options.skip_permission_denied(true).cross_filesystem_boundaries(false);
    let results: Vec<_> = options.walk(&root).unwrap().collect();
    assert!(results.iter().all(Result::is_ok), "Access denied should be skipped: {results:?}");
    assert_eq!(results.len(), 6);

    let mut options = DirOptions::new();
    options.skip_permission_denied(true).follow_symlinks(true);
    let results: Vec<_> = options.walk(&root).unwrap().collect();
    assert!(results.iter().all(Result::is_ok), "Access denied should be skipped: {results:?}");
    assert_eq!(results.len(), 6);

    let mut options = DirOptions::new();
    options.cross_filesystem_boundaries(false);
    let results: Vec<_> = options.walk(&root).unwrap().collect();
    let errors: Vec<_> = results.iter().filter_map(|result| result.as_ref().err()).collect();
    assert_eq!(results.len(), 7);
    assert_eq!(errors.len(), 1);
    let err = errors[0].as_filesystem().unwrap();
    assert!(err.is_permission_denied());
    assert_eq!(err.operation(), Operation::RecursiveDirIterator);
    assert_eq!(err.path1(), &locked.join("inner"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}
