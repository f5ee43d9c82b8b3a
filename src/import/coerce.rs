//! Lenient numeric coercion for spreadsheet cells

/// Parse a cell as a base-10 integer, treating anything unusable as absent
///
/// Thousands separators are stripped first, so `"1,234"` yields `1234`.
/// Empty cells, missing cells and non-numeric text all yield `None`.
pub fn parse_optional_int(raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
    digits.parse::<i64>().ok()
}
