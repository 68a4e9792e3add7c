// src/pipeline/mod.rs

use std::path::Path;

use tracing::{error, info};

use crate::datasets::{crime, education, income, mental_health};
use crate::error::EtlError;
use crate::normalize::reshape::LongTable;
use crate::store;

/// Fixed relative paths; the pipeline takes no parameters.
pub const RAW_DATA_DIR: &str = "data/raw";
pub const PROCESSED_DATA_DIR: &str = "data/processed";

pub struct Dataset {
    pub name: &'static str,
    pub output_file: &'static str,
    pub load: fn(&Path) -> Result<LongTable, EtlError>,
}

/// Processing order is fixed; every run attempts all four.
pub const DATASETS: [Dataset; 4] = [
    Dataset {
        name: "crime",
        output_file: crime::OUTPUT_FILE,
        load: crime::load,
    },
    Dataset {
        name: "education",
        output_file: education::OUTPUT_FILE,
        load: education::load,
    },
    Dataset {
        name: "income",
        output_file: income::OUTPUT_FILE,
        load: income::load,
    },
    Dataset {
        name: "mental_health",
        output_file: mental_health::OUTPUT_FILE,
        load: mental_health::load,
    },
];

#[derive(Debug)]
pub enum DatasetOutcome {
    Success { rows: usize },
    Failure(EtlError),
}

#[derive(Debug)]
pub struct DatasetReport {
    pub dataset: &'static str,
    pub outcome: DatasetOutcome,
}

impl DatasetReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, DatasetOutcome::Success { .. })
    }
}

/// Run every dataset in order, writing one Parquet file per success.
///
/// A dataset failing with one of the `EtlError` kinds is logged and skipped;
/// the remaining datasets still run. Nothing here short-circuits, so the
/// returned reports always cover all four attempts.
pub fn run(raw_dir: &Path, out_dir: &Path) -> Vec<DatasetReport> {
    DATASETS
        .iter()
        .map(|dataset| {
            info!(dataset = dataset.name, "processing");
            let outcome = match process_dataset(dataset, raw_dir, out_dir) {
                Ok(rows) => {
                    info!(dataset = dataset.name, rows, "wrote output");
                    DatasetOutcome::Success { rows }
                }
                Err(err) => {
                    error!(dataset = dataset.name, error = %err, "dataset skipped");
                    DatasetOutcome::Failure(err)
                }
            };
            DatasetReport {
                dataset: dataset.name,
                outcome,
            }
        })
        .collect()
}

fn process_dataset(dataset: &Dataset, raw_dir: &Path, out_dir: &Path) -> Result<usize, EtlError> {
    let table = (dataset.load)(raw_dir)?;
    store::write_long_table(&table, &out_dir.join(dataset.output_file))?;
    Ok(table.len())
}
