//! File I/O shared by the subcommands.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, warn};

use fp_core::{PlannerConfig, grid_layout};
use fp_output::{CsvWriter, OutputWriter};
use fp_sim::{PlanError, Planner, ScheduleRequest, ScheduleResult};

/// Field size and spacing of the replacement layout used by
/// `--fallback-layout`.
const FALLBACK_FIELD: (f64, f64, f64) = (60.0, 40.0, 20.0);

/// Optional tabular outputs for one plan.
#[derive(Default)]
pub struct Tables {
    pub csv_dir: Option<PathBuf>,
    #[cfg(feature = "sqlite")]
    pub sqlite_dir: Option<PathBuf>,
}

/// Planner config from `path`, or the default when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config: PlannerConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

pub fn read_request(path: &Path) -> Result<ScheduleRequest> {
    let file = File::open(path).with_context(|| format!("opening request {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing request {}", path.display()))
}

pub fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path).with_context(|| format!("creating {}", path.display()))?);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Validate `request`; with `fallback_layout`, an invalid field layout is
/// replaced by a grid of the same size instead of failing.
pub fn checked_request(mut request: ScheduleRequest, fallback_layout: bool) -> Result<ScheduleRequest> {
    match request.validate() {
        Ok(()) => Ok(request),
        Err(PlanError::Core(e)) if fallback_layout => {
            let (w, h, gap) = FALLBACK_FIELD;
            warn!(error = %e, fields = request.fields.len(), "invalid layout; using generated grid");
            request.fields = grid_layout(request.fields.len().max(1), w, h, gap);
            request.validate()?;
            Ok(request)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read, validate, plan and write one request.
pub fn plan_file(
    planner:         &Planner,
    input:           &Path,
    output:          &Path,
    tables:          &Tables,
    fallback_layout: bool,
) -> Result<ScheduleResult> {
    let request = checked_request(read_request(input)?, fallback_layout)?;
    let result = planner.plan(&request);
    write_json(output, &result)?;
    write_tables(&result, tables)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        hours = result.total_time,
        efficiency = result.efficiency,
        "plan written"
    );
    Ok(result)
}

pub fn write_tables(result: &ScheduleResult, tables: &Tables) -> Result<()> {
    if let Some(dir) = &tables.csv_dir {
        let mut w = CsvWriter::new(dir).with_context(|| format!("opening CSV output in {}", dir.display()))?;
        w.write_result(result)?;
        w.finish()?;
    }
    #[cfg(feature = "sqlite")]
    if let Some(dir) = &tables.sqlite_dir {
        let mut w = fp_output::SqliteWriter::new(dir)
            .with_context(|| format!("opening SQLite output in {}", dir.display()))?;
        w.write_result(result)?;
        w.finish()?;
    }
    Ok(())
}

/// Write the failure document consumers expect in place of a result.
pub fn write_error_result(path: &Path, error: &anyhow::Error) -> Result<()> {
    let doc = json!({
        "machines": [],
        "totalTime": 0,
        "efficiency": 0,
        "error": format!("{error:#}"),
    });
    write_json(path, &doc)
}
