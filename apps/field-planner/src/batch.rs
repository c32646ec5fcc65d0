//! Parallel planning of a directory of requests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{error, info};

use fp_sim::Planner;

use crate::io::{self, Tables};

/// Every `*.json` file directly inside `dir`, sorted by name.
pub fn request_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Plan every request in `dir` on the Rayon pool.  Each result goes to
/// `<out_dir>/<stem>.json`; failed requests get an error result and are
/// counted.  Returns an error if any request failed.
pub fn run(planner: &Planner, dir: &Path, out_dir: &Path, csv: bool) -> Result<()> {
    let files = request_files(dir)?;
    fs::create_dir_all(out_dir)?;
    info!(requests = files.len(), threads = rayon::current_num_threads(), "batch start");

    let failures: usize = files
        .par_iter()
        .map(|input| {
            let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            let output = out_dir.join(format!("{stem}.json"));
            let tables = Tables { csv_dir: csv.then(|| out_dir.join(&stem)), ..Tables::default() };

            match io::plan_file(planner, input, &output, &tables, false) {
                Ok(_) => 0,
                Err(e) => {
                    error!(input = %input.display(), "{e:#}");
                    if let Err(write_err) = io::write_error_result(&output, &e) {
                        error!(output = %output.display(), "{write_err:#}");
                    }
                    1
                }
            }
        })
        .sum();

    info!(requests = files.len(), failures, "batch complete");
    if failures > 0 {
        bail!("{failures} of {} requests failed", files.len());
    }
    Ok(())
}
