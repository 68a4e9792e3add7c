use absetl::pipeline::{self, PROCESSED_DATA_DIR, RAW_DATA_DIR};
use anyhow::Result;
use std::{fs, path::Path};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) prepare output dir ───────────────────────────────────────
    fs::create_dir_all(PROCESSED_DATA_DIR)?;

    // ─── 3) run the batch ────────────────────────────────────────────
    let reports = pipeline::run(Path::new(RAW_DATA_DIR), Path::new(PROCESSED_DATA_DIR));

    let succeeded = reports.iter().filter(|r| r.succeeded()).count();
    info!(
        succeeded,
        attempted = reports.len(),
        "ETL complete"
    );
    Ok(())
}
