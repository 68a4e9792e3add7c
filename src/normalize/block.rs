// src/normalize/block.rs

use tracing::{debug, warn};

use crate::error::EtlError;
use crate::table::{Cell, RawTable};

/// Column added to carry the region label recovered from marker rows.
pub const REGION_COLUMN: &str = "State";

/// Marker rows hold the region name in their second cell, sitting under the
/// first year column of the structural header.
const MARKER_LABEL_INDEX: usize = 1;

/// Fallback when no marker row names a region.
const DEFAULT_REGION: &str = "New South Wales";

/// Resolve a block-structured table into a flat one.
///
/// The source stacks one block of rows per region, each introduced by a
/// marker row that is empty in the category column and names the region in
/// its second cell. Rows with a non-null category cell are data; everything
/// else is a marker or noise and is dropped.
///
/// Only the FIRST detected region label is applied, to every data row.
/// A multi-region source needs a re-scan for markers with per-block label
/// propagation; until then the blocks after the first are mislabelled.
pub fn assign_region_blocks(table: &RawTable, category_column: &str) -> Result<RawTable, EtlError> {
    let category_idx = table
        .column_index(category_column)
        .ok_or_else(|| EtlError::MissingColumn(category_column.to_string()))?;

    let mut region: Option<String> = None;
    let mut data_rows: Vec<Vec<Cell>> = Vec::new();

    for row in &table.rows {
        match row.get(category_idx) {
            Some(Cell::Null) | None => {
                if region.is_none() {
                    if let Some(label) = row.get(MARKER_LABEL_INDEX).and_then(Cell::as_text) {
                        let label = label.trim();
                        if !label.is_empty() {
                            region = Some(label.to_string());
                        }
                    }
                }
            }
            Some(_) => data_rows.push(row.clone()),
        }
    }

    let region = region.unwrap_or_else(|| {
        warn!(fallback = DEFAULT_REGION, "no region marker row found");
        DEFAULT_REGION.to_string()
    });
    debug!(region = %region, rows = data_rows.len(), "assigned region to data rows");

    let mut headers = Vec::with_capacity(table.headers.len() + 1);
    headers.push(REGION_COLUMN.to_string());
    headers.extend(table.headers.iter().cloned());

    let rows = data_rows
        .into_iter()
        .map(|row| {
            let mut out = Vec::with_capacity(row.len() + 1);
            out.push(Cell::Text(region.clone()));
            out.extend(row);
            out
        })
        .collect();

    Ok(RawTable { headers, rows })
}
