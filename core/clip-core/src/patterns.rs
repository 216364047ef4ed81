//! Compiled regex patterns for recognising already-tagged filenames.
//!
//! Compiled once on first use. Update these if the `[GG_TT] name.ext`
//! naming convention changes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading `[GG_TT]` tag of a renamed clip. Captures group order and take.
pub static RE_TAKE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(\d+)_(\d+)\]").unwrap());

/// Parses the `(group order, take)` digits of a tagged filename, as written.
pub fn parse_take_prefix(filename: &str) -> Option<(&str, &str)> {
    let caps = RE_TAKE_PREFIX.captures(filename)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}
