#![cfg(test)]

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::fs;

use super::*;
use crate::sys::portable::Portable;

fn names<B: Backend>(path: &OsStr) -> BTreeSet<OsString> {
    let mut stream = B::open_dir_stream(path).unwrap();
    let mut names = BTreeSet::new();
    while let Some(entry) = stream.read_next_entry().unwrap() {
        if !entry.is_dot() {
            names.insert(entry.name);
        }
    }
    stream.close().unwrap();
    names
}

#[test]
fn test_backends_agree_on_listing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"abc").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let native = names::<Native>(dir.path().as_os_str());
    assert_eq!(native, names::<Portable>(dir.path().as_os_str()));
    assert_eq!(native.len(), 2, "Dot entries shouldn't be counted.");
}

#[test]
fn test_backends_agree_on_status() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, b"hello").unwrap();

    for path in [dir.path(), file.as_path()] {
        let native = Native::query_status(path.as_os_str(), true).unwrap();
        let portable = Portable::query_status(path.as_os_str(), true).unwrap();
        assert_eq!(native.file_type(), portable.file_type());
        assert_eq!(native.permissions(), portable.permissions());
        assert_eq!(native.size(), portable.size());
        assert_eq!(native.modified(), portable.modified());
    }
}

#[test]
fn test_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = Native::query_status(missing.as_os_str(), true).unwrap_err();
    assert_eq!(err.kind(), Native::not_found().kind());
    assert!(Native::open_dir_stream(missing.as_os_str()).is_err());
    assert!(Portable::open_dir_stream(missing.as_os_str()).is_err());
}

#[cfg(unix)]
#[test]
fn test_interior_nul_is_rejected() {
    let err = Native::query_status(OsStr::new("a\0b"), true).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn test_stream_dropped_without_close() {
    let dir = tempfile::tempdir().unwrap();
    let mut stream = Native::open_dir_stream(dir.path().as_os_str()).unwrap();
    let _ = stream.read_next_entry().unwrap();
    drop(stream);
}
