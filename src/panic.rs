#![cfg_attr(not(unix), allow(dead_code))]

use std::error::Error;

use derive_more::{Display, Error};

/// Conditions that can only arise from a bug in this crate, e.g. closing a directory stream that we
/// no longer own. These panic instead of surfacing as a [`Result`].
pub(crate) trait Panic: Error {
    fn panic(&self) -> ! {
        panic!("{}", self)
    }
}

#[derive(Debug, Display, Error)]
#[display("directory stream corruption")]
pub(crate) struct BadDirStreamPanic;
impl Panic for BadDirStreamPanic {}

#[derive(Debug, Display, Error)]
#[display("unexpected OS error with code: {_0}")]
pub(crate) struct UnexpectedErrorPanic(#[error(not(source))] pub i32);
impl Panic for UnexpectedErrorPanic {}
