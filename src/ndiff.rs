//! `ndiff`/`restore` convenience wrappers and the stock junk predicates.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::differ::Differ;
use crate::error::{DifflibError, Result};

static LINE_JUNK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#?\s*$").unwrap());

/// True for lines that are blank or contain only a comment marker
/// (`^\s*#?\s*$`), or that match the caller-supplied `pat` instead.
pub fn is_line_junk(line: &str, pat: Option<&Regex>) -> bool {
    match pat {
        Some(p) => p.is_match(line),
        None => LINE_JUNK_RE.is_match(line),
    }
}

/// True for whitespace characters (space, tab) by default, or for
/// membership in the caller-supplied `ws` set instead.
pub fn is_character_junk(ch: char, ws: Option<&[char]>) -> bool {
    match ws {
        Some(set) => set.contains(&ch),
        None => ch == ' ' || ch == '\t',
    }
}

/// Convenience wrapper over [`Differ`]. `charjunk` defaults to
/// [`is_character_junk`] when not given; `linejunk` defaults to none.
pub fn ndiff<'a>(
    a: &[String],
    b: &[String],
    linejunk: Option<Box<dyn Fn(&str) -> bool + 'a>>,
    charjunk: Option<Box<dyn Fn(char) -> bool + 'a>>,
) -> Vec<String> {
    let charjunk = charjunk.unwrap_or_else(|| Box::new(|c: char| is_character_junk(c, None)));
    let differ = Differ::new(linejunk, Some(charjunk));
    differ.compare(a, b)
}

/// Inverse of [`ndiff`]/[`Differ::compare`]: recovers one of the two
/// original sequences from a delta. `which == 1` recovers `a`, `which == 2`
/// recovers `b`.
pub fn restore(delta: &[String], which: i32) -> Result<Vec<String>> {
    let tag = match which {
        1 => "- ",
        2 => "+ ",
        other => return Err(DifflibError::InvalidRestoreSelector(other)),
    };
    Ok(delta
        .iter()
        .filter(|line| line.starts_with(tag) || line.starts_with("  "))
        .map(|line| line[2..].to_string())
        .collect())
}
