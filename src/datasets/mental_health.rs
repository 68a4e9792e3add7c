// src/datasets/mental_health.rs

use std::path::Path;

use crate::error::EtlError;
use crate::normalize::reshape::{melt, LongTable};
use crate::table::read::{read_delimited, SourceEncoding};

pub const SOURCE_FILE: &str = "mental_health_data.csv";
pub const OUTPUT_FILE: &str = "mental_health_data.parquet";

const VALUE_COLUMN: &str = "Count";

/// Service-contact counts. This export is where the broken "2,019" header
/// comes from; the generic reshape repairs it.
pub fn load(raw_dir: &Path) -> Result<LongTable, EtlError> {
    let table = read_delimited(&raw_dir.join(SOURCE_FILE), SourceEncoding::Utf8, 0)?;
    Ok(melt(&table, VALUE_COLUMN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn repairs_the_malformed_2019_header() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join(SOURCE_FILE),
            "Service,\"2,019\",2020\nCommunity,400,410\n",
        )?;

        let long = load(dir.path())?;

        assert_eq!(long.id_columns, vec!["Service"]);
        assert_eq!(long.len(), 2);
        assert_eq!(long.records[0].year, 2019);
        assert_eq!(long.records[0].value, Cell::Number(400.0));
        assert_eq!(long.records[1].year, 2020);
        Ok(())
    }
}
