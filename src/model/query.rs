use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Normalized search parameters.
///
/// Built once from the raw HTTP query string; downstream code never sees
/// unclamped values. Empty-string parameters count as absent, matching the
/// upstream's treatment of blank filters.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchQuery {
    pub page: u32,
    pub per_page: u32,
    pub title: Option<String>,
    pub year: Option<String>,
    pub number: Option<String>,
    pub text: Option<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_PER_PAGE,
            title: None,
            year: None,
            number: None,
            text: None,
        }
    }
}

impl SearchQuery {
    pub fn from_raw(params: &HashMap<String, String>) -> Self {
        Self {
            page: parse_page(params.get("page").map(String::as_str)),
            per_page: parse_per_page(params.get("per_page").map(String::as_str)),
            title: non_empty(params.get("title")),
            year: non_empty(params.get("year")),
            number: non_empty(params.get("number")),
            text: non_empty(params.get("text")),
        }
    }

    /// Copy of the query with the year filter dropped. Used for the
    /// upstream call when the year is post-filtered client-side.
    pub fn without_year(&self) -> Self {
        Self { year: None, ..self.clone() }
    }
}

/// Negative or unparsable pages collapse to 0.
fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|page| *page >= 0)
        .map_or(0, |page| page as u32)
}

/// Unparsable or < 1 falls back to the default; anything above the cap is
/// clamped to exactly the cap before it reaches the wire.
fn parse_per_page(raw: Option<&str>) -> u32 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) if n > MAX_PER_PAGE as i64 => MAX_PER_PAGE,
        Some(n) if n >= 1 => n as u32,
        _ => DEFAULT_PER_PAGE,
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_owned)
}
