// src/datasets/income.rs

use std::path::Path;

use crate::error::EtlError;
use crate::normalize::reshape::{melt, LongTable};
use crate::table::read::{read_delimited, SourceEncoding};

pub const SOURCE_FILE: &str = "income_data.csv";
pub const OUTPUT_FILE: &str = "income_data.parquet";

const VALUE_COLUMN: &str = "Count";

pub fn load(raw_dir: &Path) -> Result<LongTable, EtlError> {
    let table = read_delimited(&raw_dir.join(SOURCE_FILE), SourceEncoding::Utf8, 0)?;
    Ok(melt(&table, VALUE_COLUMN))
}
