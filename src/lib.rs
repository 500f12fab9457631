//! Pack a C library's headers and sources into one single-header file.
//!
//! The output has four sections: an intro comment, the public headers, the
//! private sources gated behind `<MACRO>_IMPLEMENTATION`, and an outro comment.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub mod files;
pub mod includes;
pub mod pack;

pub use files::parse_files;
pub use includes::{omit_includes, IncludeFilter};
pub use pack::{Amalgamation, Layout, SINGLE_FILE_GUARD};

#[derive(Error, Debug)]
pub enum Error {
    #[error("{} does not exist.", .0.display())]
    NotFound(PathBuf),
    #[error("{} is a directory. Expected a file name.", .0.display())]
    IsDirectory(PathBuf),
    #[error("{} is not a directory.", .0.display())]
    NotADirectory(PathBuf),
    #[error("invalid wildcard {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("malformed file list: {0}")]
    FileList(#[from] peg::error::ParseError<peg::str::LineCol>),
    #[error("Cannot list directory {}: {source}", .dir.display())]
    ListDir { dir: PathBuf, source: io::Error },
    #[error("Cannot read file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Cannot write output: {0}")]
    Write(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
