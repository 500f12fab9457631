use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use tracing::{debug, trace};

use crate::{Error, Result};

peg::parser! {
    grammar file_list() for str {
        pub rule segments() -> Vec<Segment<'input>>
            = segment() ** ",";

        rule segment() -> Segment<'input>
            = p:$(plain()* "*" [^ ',']*) { Segment::Wildcard(p) }
            / p:$(plain()*) { Segment::Literal(p) };

        rule plain()
            = [^ ',' | '*'];
    }
}

/// One comma-separated piece of a `<files>` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// Contains at least one `*`; expanded against a single directory listing.
    Wildcard(&'a str),
}

pub fn segments(arg: &str) -> Result<Vec<Segment<'_>>> {
    Ok(file_list::segments(arg)?)
}

/// Resolve a comma-separated list of paths and wildcards into existing files,
/// keeping the order the segments were written in.
pub fn parse_files(arg: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for segment in segments(arg)? {
        match segment {
            Segment::Literal(path) => files.push(resolve_literal(path)?),
            Segment::Wildcard(path) => files.extend(expand_wildcard(path)?),
        }
    }

    debug!(arg, count = files.len(), "resolved file list");
    Ok(files)
}

fn resolve_literal(path: &str) -> Result<PathBuf> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(Error::NotFound(p.to_owned()));
    }
    if p.is_dir() {
        return Err(Error::IsDirectory(p.to_owned()));
    }
    Ok(p.to_owned())
}

fn expand_wildcard(path: &str) -> Result<Vec<PathBuf>> {
    let (dir, pattern) = split_dir(path);
    let dir = match dir {
        "" => ".",
        " " => {
            debug!(path, "skipping wildcard with blank directory");
            return Ok(Vec::new());
        }
        d => d,
    };

    let dir = Path::new(dir);
    if !dir.exists() {
        return Err(Error::NotFound(dir.to_owned()));
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_owned()));
    }

    let matcher = GlobBuilder::new(&literal_braces(pattern))
        .backslash_escape(false)
        .build()
        .map_err(|source| Error::Pattern { pattern: pattern.to_owned(), source })?
        .compile_matcher();

    let list_err = |source| Error::ListDir { dir: dir.to_owned(), source };
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let name = entry.map_err(list_err)?.file_name();
        if !matcher.is_match(&name) {
            continue;
        }

        let file = dir.join(&name);
        if !file.is_file() {
            trace!(file = %file.display(), "wildcard matched a non-file, skipping");
            continue;
        }
        trace!(file = %file.display(), pattern, "wildcard match");
        found.push(file);
    }

    // read_dir order is filesystem dependent
    found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(found)
}

/// Braces are ordinary characters in shell wildcards, so wrap any outside a
/// `[...]` class in one of their own before globset sees them.
fn literal_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut in_class = false;
    for c in pattern.chars() {
        match c {
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Split at the last `/` the way a shell `dirname`/`basename` pair would.
fn split_dir(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(i) => {
            let head = &path[..=i];
            let dir = head.trim_end_matches('/');
            (if dir.is_empty() { head } else { dir }, &path[i + 1..])
        }
        None => ("", path),
    }
}
