//! Display helpers shared by the screens.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human readable file size, base 1024, at most two decimals.
pub fn format_file_size(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return "Unknown size".to_string(),
    };
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {}", SIZE_UNITS[unit])
}

/// Formats backend timestamps as `Mar 1, 2024`. Input that does not parse is
/// returned unchanged.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "Unknown date".to_string();
    };
    parse_date(raw)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Rough file category used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Document,
    Other,
}

impl FileKind {
    pub fn classify(content_type: Option<&str>) -> Self {
        match content_type {
            Some(t) if t.starts_with("image/") => FileKind::Image,
            Some(t) if t.contains("pdf") || t.contains("document") => FileKind::Document,
            _ => FileKind::Other,
        }
    }

    pub fn is_previewable(&self) -> bool {
        matches!(self, FileKind::Image | FileKind::Document)
    }
}

/// Tailwind classes for a user status badge.
pub fn status_badge_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "active" => "bg-green-100 text-green-800",
        "inactive" => "bg-red-100 text-red-800",
        _ => "bg-gray-100 text-gray-800",
    }
}
