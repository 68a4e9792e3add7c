// src/store/mod.rs

use std::{fs::File, path::Path, sync::Arc};

use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::warn;

use crate::error::EtlError;
use crate::normalize::reshape::{LongRecord, LongTable};
use crate::table::Cell;

pub const YEAR_COLUMN: &str = "Year";

/// Persisted layout: identifier columns (nullable Utf8), then `Year`
/// (non-null Int32), then the value column (nullable Float64).
fn build_schema(table: &LongTable) -> Schema {
    let mut fields: Vec<Field> = table
        .id_columns
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    fields.push(Field::new(YEAR_COLUMN, DataType::Int32, false));
    fields.push(Field::new(&table.value_column, DataType::Float64, true));
    Schema::new(fields)
}

fn id_as_string(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Text(s) => Some(s.clone()),
        Cell::Number(n) => Some(n.to_string()),
        Cell::Null => None,
    }
}

/// Write a `LongTable` to `path`, replacing whatever was there.
///
/// Values still held as text at this point coerce to null, so the persisted
/// value column is always numeric-or-null regardless of which reshape path
/// produced the table.
pub fn write_long_table(table: &LongTable, path: &Path) -> Result<(), EtlError> {
    let schema = Arc::new(build_schema(table));

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(table.id_columns.len() + 2);
    for i in 0..table.id_columns.len() {
        let arr: StringArray = table
            .records
            .iter()
            .map(|rec| rec.ids.get(i).and_then(id_as_string))
            .collect();
        columns.push(Arc::new(arr));
    }

    let years = Int32Array::from_iter_values(table.records.iter().map(|rec| rec.year));
    columns.push(Arc::new(years));

    let values: Float64Array = table
        .records
        .iter()
        .map(|rec| match &rec.value {
            Cell::Number(n) => Some(*n),
            Cell::Null => None,
            Cell::Text(raw) => {
                warn!(
                    value = %raw,
                    column = %table.value_column,
                    "non-numeric value coerced to null at write"
                );
                None
            }
        })
        .collect();
    columns.push(Arc::new(values));

    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = File::create(path).map_err(|source| EtlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Read a previously written `LongTable` back from `path`.
pub fn read_long_table(path: &Path) -> Result<LongTable, EtlError> {
    let file = File::open(path).map_err(|source| EtlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();

    let n_fields = schema.fields().len();
    if n_fields < 2 {
        return Err(ArrowError::SchemaError(format!(
            "expected at least Year and a value column, found {} fields",
            n_fields
        ))
        .into());
    }
    let id_columns: Vec<String> = schema
        .fields()
        .iter()
        .take(n_fields - 2)
        .map(|f| f.name().clone())
        .collect();
    let value_column = schema.field(n_fields - 1).name().clone();

    let mut records: Vec<LongRecord> = Vec::new();
    for batch in builder.build()? {
        let batch = batch?;
        let n = batch.num_columns();

        let year_arr = batch
            .column(n - 2)
            .as_any()
            .downcast_ref::<Int32Array>()
            .ok_or_else(|| ArrowError::SchemaError("Year column is not Int32".to_string()))?;
        let value_arr = batch
            .column(n - 1)
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| ArrowError::SchemaError("value column is not Float64".to_string()))?;
        let id_arrs: Vec<&StringArray> = (0..n - 2)
            .map(|i| {
                batch
                    .column(i)
                    .as_any()
                    .downcast_ref::<StringArray>()
                    .ok_or_else(|| {
                        ArrowError::SchemaError("identifier column is not Utf8".to_string())
                    })
            })
            .collect::<Result<_, _>>()?;

        for row in 0..batch.num_rows() {
            let ids = id_arrs
                .iter()
                .map(|arr| {
                    if arr.is_null(row) {
                        Cell::Null
                    } else {
                        Cell::Text(arr.value(row).to_string())
                    }
                })
                .collect();
            let value = if value_arr.is_null(row) {
                Cell::Null
            } else {
                Cell::Number(value_arr.value(row))
            };
            records.push(LongRecord {
                ids,
                year: year_arr.value(row),
                value,
            });
        }
    }

    Ok(LongTable {
        id_columns,
        value_column,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sample_table() -> LongTable {
        LongTable {
            id_columns: vec!["State".to_string(), "Offence".to_string()],
            value_column: "Rate".to_string(),
            records: vec![
                LongRecord {
                    ids: vec![text("Victoria"), text("Homicide")],
                    year: 2019,
                    value: Cell::Number(3.4),
                },
                LongRecord {
                    ids: vec![text("Victoria"), Cell::Null],
                    year: 2020,
                    value: Cell::Null,
                },
            ],
        }
    }

    #[test]
    fn round_trip_preserves_records() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("crime_data.parquet");

        let table = sample_table();
        write_long_table(&table, &path)?;
        let back = read_long_table(&path)?;

        assert_eq!(back.id_columns, table.id_columns);
        assert_eq!(back.value_column, table.value_column);
        assert_eq!(back.records, table.records);
        Ok(())
    }

    #[test]
    fn text_values_do_not_survive_persistence() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.parquet");

        let table = LongTable {
            id_columns: vec!["ID".to_string()],
            value_column: "Count".to_string(),
            records: vec![LongRecord {
                ids: vec![text("a")],
                year: 2019,
                value: text("garbled"),
            }],
        };
        write_long_table(&table, &path)?;
        let back = read_long_table(&path)?;

        assert_eq!(back.records.len(), 1);
        assert_eq!(back.records[0].value, Cell::Null);
        Ok(())
    }

    #[test]
    fn empty_table_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.parquet");

        let table = LongTable {
            id_columns: vec!["Name".to_string()],
            value_column: "Count".to_string(),
            records: Vec::new(),
        };
        write_long_table(&table, &path)?;
        let back = read_long_table(&path)?;

        assert!(back.records.is_empty());
        assert_eq!(back.id_columns, vec!["Name"]);
        assert_eq!(back.value_column, "Count");
        Ok(())
    }

    #[test]
    fn output_is_overwritten_on_rewrite() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.parquet");

        let mut table = sample_table();
        write_long_table(&table, &path)?;
        table.records.truncate(1);
        write_long_table(&table, &path)?;

        let back = read_long_table(&path)?;
        assert_eq!(back.records.len(), 1);
        Ok(())
    }
}
