//! Command implementations behind the `reportkit` binary.

use std::path::PathBuf;

use tracing::info;

use crate::conf::{load_report_config, validate_report_config};
use crate::error::ResultReport;
use crate::report::{derive_report_data, generate_report, render_preview};
use crate::spec::{EnumReportLayout, SpecReportConfig};

/// Load `config` if given, then apply CLI overrides on top.
pub fn resolve_config(
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    layout: Option<EnumReportLayout>,
) -> ResultReport<SpecReportConfig> {
    let mut cfg = match config {
        Some(path) => load_report_config(&path)?,
        None => SpecReportConfig::default(),
    };
    if let Some(path) = output {
        cfg.output = path;
    }
    if let Some(kind) = layout {
        cfg.layout = kind;
    }
    validate_report_config(&cfg)?;
    Ok(cfg)
}

/// Write the report workbook.
pub fn generate(
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    layout: Option<EnumReportLayout>,
) -> ResultReport<()> {
    let cfg = resolve_config(config, output, layout)?;
    let outcome = generate_report(&cfg)?;

    info!(
        path = %outcome.path.display(),
        n_sheets = outcome.sheets.len(),
        "report written"
    );
    println!("{}", outcome.path.display());
    Ok(())
}

/// Print both datasets without writing a workbook.
pub fn preview() -> ResultReport<()> {
    let data = derive_report_data()?;
    print!("{}", render_preview(&data)?);
    Ok(())
}
