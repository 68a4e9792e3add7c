// src/normalize/reshape.rs

use tracing::debug;

use crate::normalize::{value, year};
use crate::table::{Cell, RawTable};

/// Aggregate column some exports carry alongside the per-year columns.
/// Never reshaped and never kept as an identifier.
pub const YEAR_TOTAL_COLUMN: &str = "Year total";

/// One long-form output row: identifier cells, a 4-digit year and a single
/// value that has been through the value normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub ids: Vec<Cell>,
    pub year: i32,
    pub value: Cell,
}

/// An ordered run of `LongRecord`s sharing one schema. This is the unit the
/// store persists, one file per dataset.
#[derive(Debug, Clone)]
pub struct LongTable {
    pub id_columns: Vec<String>,
    pub value_column: String,
    pub records: Vec<LongRecord>,
}

impl LongTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Strict numeric coercion: any value still held as text becomes null.
    ///
    /// The generic reshape path preserves unparseable text; the crime path
    /// calls this afterwards so its rates are strictly numeric-or-null.
    pub fn coerce_numeric(&mut self) {
        for rec in &mut self.records {
            if matches!(rec.value, Cell::Text(_)) {
                rec.value = Cell::Null;
            }
        }
    }
}

/// Reshape a wide year-indexed table into long form, repairing the one
/// known malformed year label first.
pub fn melt(table: &RawTable, value_name: &str) -> LongTable {
    melt_inner(table, value_name, true)
}

/// Reshape recognising strict 4-digit year labels only. Used by the crime
/// path, where the malformed-label repair does not apply.
pub fn melt_strict(table: &RawTable, value_name: &str) -> LongTable {
    melt_inner(table, value_name, false)
}

fn melt_inner(table: &RawTable, value_name: &str, repair_labels: bool) -> LongTable {
    let mut year_cols: Vec<(usize, i32)> = Vec::new();
    let mut id_cols: Vec<usize> = Vec::new();
    let mut id_names: Vec<String> = Vec::new();

    for (idx, name) in table.headers.iter().enumerate() {
        let label = if repair_labels {
            year::repair_label(name)
        } else {
            name.as_str()
        };
        // An identifier column named like a year is claimed by the year set;
        // callers accept that.
        if year::is_year_column(label) {
            if let Some(yr) = year::year_from_label(label) {
                year_cols.push((idx, yr));
            }
            continue;
        }
        if label == YEAR_TOTAL_COLUMN {
            continue;
        }
        id_cols.push(idx);
        id_names.push(name.clone());
    }

    if year_cols.is_empty() {
        debug!(
            value_column = value_name,
            "no year columns recognised; output is empty"
        );
    }

    let mut records = Vec::with_capacity(table.rows.len() * year_cols.len());
    for row in &table.rows {
        for &(col, yr) in &year_cols {
            let ids: Vec<Cell> = id_cols
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or(Cell::Null))
                .collect();
            let raw = row.get(col).cloned().unwrap_or(Cell::Null);
            records.push(LongRecord {
                ids,
                year: yr,
                value: value::normalize(&raw),
            });
        }
    }

    LongTable {
        id_columns: id_names,
        value_column: value_name.to_string(),
        records,
    }
}
