//! Common utilities for deck generation.
//!
//! Shared helpers for date parsing, ordinal date formatting, and output
//! filename construction.

use chrono::{Datelike, NaiveDate};

/// Characters stripped from the company name before it is used in a
/// filename. Unsafe on at least one common platform.
const FILENAME_UNSAFE: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Parse the date portion of an ISO-8601 string (`2025-05-21`, with or
/// without a trailing time component).
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Format a date in ordinal display form (e.g., "21st May, 2025").
pub fn format_ordinal_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };

    format!("{}{} {}, {}", day, suffix, date.format("%B"), date.year())
}

/// Build the output deck filename: `<YYYYMMDD> ADA and <company> Meeting.pptx`
/// with filesystem-unsafe characters stripped from the company name.
pub fn build_output_name(company_name: &str, date: NaiveDate) -> String {
    let compact = date.format("%Y%m%d");
    let safe: String = company_name
        .trim()
        .chars()
        .filter(|c| !FILENAME_UNSAFE.contains(c))
        .collect();

    format!("{} ADA and {} Meeting.pptx", compact, safe)
}
