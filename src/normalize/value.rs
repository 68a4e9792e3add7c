// src/normalize/value.rs

use crate::table::Cell;

/// Tokens the source agencies use for "data not available". Matched after
/// trimming and case-folding, so "NP", " na " and "" all count.
const MISSING_TOKENS: &[&str] = &["", "na", "n/a", "np"];

/// Parse a raw cell into a number where possible.
///
/// - non-text cells pass through unchanged
/// - missing-data tokens become `Null`
/// - otherwise thousands separators are stripped and the text is parsed;
///   on success the number is returned
/// - text that still fails to parse is returned unchanged, so bad source
///   values stay visible downstream instead of vanishing
///
/// Only thousands separators are stripped. Currency and percent wrappers
/// are left alone and will fall through as preserved text.
pub fn normalize(cell: &Cell) -> Cell {
    match cell {
        Cell::Text(raw) => {
            let folded = raw.trim().to_lowercase();
            if MISSING_TOKENS.contains(&folded.as_str()) {
                return Cell::Null;
            }
            let stripped = raw.replace(',', "");
            match stripped.trim().parse::<f64>() {
                Ok(n) => Cell::Number(n),
                Err(_) => cell.clone(),
            }
        }
        other => other.clone(),
    }
}
