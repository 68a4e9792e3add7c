// src/normalize/year.rs

use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

/// The mental-health export renders one header with a stray thousands
/// separator. It is the only malformed label we repair.
pub const MALFORMED_2019_LABEL: &str = "2,019";

/// True for a strict 4-digit column name.
pub fn is_year_column(name: &str) -> bool {
    YEAR_LABEL_RE.is_match(name)
}

/// Canonicalize the one known malformed label; all other names pass through.
pub fn repair_label(name: &str) -> &str {
    if name == MALFORMED_2019_LABEL {
        "2019"
    } else {
        name
    }
}

pub fn year_from_label(name: &str) -> Option<i32> {
    name.parse().ok()
}
