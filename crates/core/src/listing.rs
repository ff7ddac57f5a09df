//! List-endpoint helpers: pagination bounds, sort keys, search patterns.
//!
//! Sort keys are mapped to a fixed set of column names here so the
//! repository layer never interpolates user input into SQL.

use crate::error::CoreError;
use crate::lead::LeadStatus;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Default number of rows per list page.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Maximum number of rows per list page.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sortable lead columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadSort {
    #[default]
    CreatedAt,
    Value,
    FullName,
    Status,
}

impl LeadSort {
    /// Parse a `?sort=` value. `None` yields the default (newest first).
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            None | Some("") | Some("created_at") => Ok(LeadSort::CreatedAt),
            Some("value") => Ok(LeadSort::Value),
            Some("full_name") => Ok(LeadSort::FullName),
            Some("status") => Ok(LeadSort::Status),
            Some(other) => Err(CoreError::Validation(format!(
                "Unknown sort key '{other}'. Expected one of: created_at, value, full_name, status"
            ))),
        }
    }

    /// Expression used in `ORDER BY`.
    ///
    /// Status sorts by pipeline stage rather than by tag text.
    pub fn expression(self) -> String {
        match self {
            LeadSort::CreatedAt => "created_at".to_string(),
            LeadSort::Value => "value_cents".to_string(),
            LeadSort::FullName => "full_name".to_string(),
            LeadSort::Status => {
                let tags: Vec<String> = LeadStatus::ALL
                    .iter()
                    .map(|s| format!("'{}'", s.as_str()))
                    .collect();
                format!("array_position(ARRAY[{}]::text[], status)", tags.join(", "))
            }
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("desc") => Ok(SortOrder::Desc),
            Some("asc") => Ok(SortOrder::Asc),
            Some(other) => Err(CoreError::Validation(format!(
                "Unknown sort order '{other}'. Expected 'asc' or 'desc'"
            ))),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Build the `ORDER BY` clause body, with `id` as a deterministic tiebreaker.
pub fn order_by_clause(sort: LeadSort, order: SortOrder) -> String {
    format!("{} {}, id {}", sort.expression(), order.keyword(), order.keyword())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Turn free-text search input into an `ILIKE` pattern.
///
/// `%`, `_` and `\` are escaped so they match literally. Blank input
/// returns `None` (no filter).
pub fn build_ilike_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|s| !s.is_empty())?;
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
