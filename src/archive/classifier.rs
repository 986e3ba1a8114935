//! Camera filename classification.
//!
//! Clip names embed two timestamps, e.g. `00_20240229080000_20240229081012.mp4`.
//! The first embedded date decides which day a clip belongs to.

use regex::Regex;
use std::sync::OnceLock;

fn day_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"00_(\d{8})\d{6}_").expect("valid day key pattern"))
}

fn clip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"00_(\d{8})\d{6}_(\d{8})\d{6}\.mp4").expect("valid clip pattern")
    })
}

/// Extract the day key (`YYYYMMDD` of the start timestamp) from a filename.
///
/// Returns `None` for names that are not dated clips.
pub fn parse_day_key(name: &str) -> Option<&str> {
    day_key_pattern()
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A clip name found inside a longer string, with both embedded dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipMatch<'a> {
    /// The matched clip filename itself.
    pub name: &'a str,
    pub start_day: &'a str,
    pub end_day: &'a str,
}

/// Find the first full two-timestamp clip name inside `text`.
///
/// In-flight copy tasks are named after the transfer rather than the file, so
/// the clip name has to be pulled out of the task description.
pub fn find_clip(text: &str) -> Option<ClipMatch<'_>> {
    let caps = clip_pattern().captures(text)?;
    Some(ClipMatch {
        name: caps.get(0)?.as_str(),
        start_day: caps.get(1)?.as_str(),
        end_day: caps.get(2)?.as_str(),
    })
}
