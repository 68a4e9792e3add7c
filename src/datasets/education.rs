// src/datasets/education.rs

use std::path::Path;

use crate::error::EtlError;
use crate::normalize::reshape::{melt, LongTable};
use crate::table::read::{read_delimited, SourceEncoding};

pub const SOURCE_FILE: &str = "education_data.csv";
pub const OUTPUT_FILE: &str = "education_data.parquet";

const VALUE_COLUMN: &str = "Count";

/// Attainment counts, flat apart from the wide year columns.
pub fn load(raw_dir: &Path) -> Result<LongTable, EtlError> {
    let table = read_delimited(&raw_dir.join(SOURCE_FILE), SourceEncoding::Utf8, 0)?;
    Ok(melt(&table, VALUE_COLUMN))
}
