// src/datasets/crime.rs

use std::path::Path;

use crate::error::EtlError;
use crate::normalize::block::assign_region_blocks;
use crate::normalize::reshape::{melt_strict, LongTable};
use crate::table::read::{read_delimited, SourceEncoding};

pub const SOURCE_FILE: &str = "crime_data.csv";
pub const OUTPUT_FILE: &str = "crime_data.parquet";

const CATEGORY_COLUMN: &str = "Offence";
const VALUE_COLUMN: &str = "Rate";

/// Victimisation rates by offence type.
///
/// The export stacks one block of rows per state behind a one-line title
/// and ships in a legacy single-byte encoding. Rates are strictly
/// numeric-or-null in the output; anything unparseable is dropped to null
/// rather than preserved.
pub fn load(raw_dir: &Path) -> Result<LongTable, EtlError> {
    let table = read_delimited(
        &raw_dir.join(SOURCE_FILE),
        SourceEncoding::Windows1252,
        1,
    )?;
    let table = assign_region_blocks(&table, CATEGORY_COLUMN)?;
    let mut long = melt_strict(&table, VALUE_COLUMN);
    long.coerce_numeric();
    Ok(long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_blocked_source_into_stated_rates() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join(SOURCE_FILE),
            "Victimisation rates, selected offences\n\
             Offence,2019,2020\n\
             ,Victoria,\n\
             Homicide,5,6\n\
             Assault,\"1,234\",n/a\n",
        )?;

        let long = load(dir.path())?;

        assert_eq!(long.id_columns, vec!["State", "Offence"]);
        assert_eq!(long.value_column, "Rate");
        assert_eq!(long.len(), 4);

        let homicide_2019 = long
            .records
            .iter()
            .find(|r| r.ids[1] == Cell::Text("Homicide".to_string()) && r.year == 2019)
            .unwrap();
        assert_eq!(homicide_2019.ids[0], Cell::Text("Victoria".to_string()));
        assert_eq!(homicide_2019.value.as_number(), Some(5.0));

        let assault_2020 = long
            .records
            .iter()
            .find(|r| r.ids[1] == Cell::Text("Assault".to_string()) && r.year == 2020)
            .unwrap();
        assert_eq!(assault_2020.value, Cell::Null);
        Ok(())
    }

    #[test]
    fn rates_are_numeric_or_null() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join(SOURCE_FILE),
            "title\nOffence,2019\n,Victoria\nHomicide,garbled\n",
        )?;

        let long = load(dir.path())?;
        assert_eq!(long.len(), 1);
        assert_eq!(long.records[0].value, Cell::Null);
        Ok(())
    }

    #[test]
    fn missing_source_file_errors() {
        let dir = tempdir().unwrap();
        let err = load(dir.path()).expect_err("no input present");
        assert!(matches!(err, EtlError::Io { .. }));
    }
}
