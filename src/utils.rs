use chrono::{DateTime, NaiveDateTime};
use std::fs;
use std::io;
use std::path::Path;

// Naive layouts accepted when the timestamp carries no offset
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

// Splits line-delimited text into trimmed, non-empty entries
pub fn parse_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// Reads a line-delimited list from disk
pub fn read_list(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    Ok(parse_list(&fs::read_to_string(path)?))
}

// Reads contract addresses, lowercased for lookup
pub fn read_contracts(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    Ok(read_list(path)?.into_iter().map(|c| c.to_lowercase()).collect())
}

// Drops any zone offset from a timestamp, keeping the wall-clock time as written
pub fn normalize_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
