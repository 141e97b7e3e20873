//! Survey file to relative elevation table.

use crate::{FormatArgs, InputArgs, PolicyArgs};
use anyhow::Context;
use log::info;
use lvl_data::build_relative_table;
use lvl_io::{load_observations, write_table_to_path};
use std::path::{Path, PathBuf};

/// Suffix appended to the input file stem when no output path is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_relative.csv";

/// `<dir>/<stem>_relative.csv` for an input at `<dir>/<stem>.<ext>`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "survey".to_string());
    input.with_file_name(format!("{stem}{DEFAULT_OUTPUT_SUFFIX}"))
}

/// Load, normalize and write in one pass.
pub fn run_convert(
    file: &Path,
    output: Option<&Path>,
    input: &InputArgs,
    policy: &PolicyArgs,
    format: &FormatArgs,
) -> anyhow::Result<()> {
    let options = input.load_options()?;
    let output_format = format.output_format()?;
    output_format
        .validate()
        .context("invalid output options")?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(file));

    info!("loading file {}", file.display());
    let observations = load_observations(file, &options)
        .with_context(|| format!("failed to load {}", file.display()))?;

    let table = build_relative_table(&observations, policy.aggregate_policy())
        .with_context(|| format!("failed to normalize {}", file.display()))?;

    write_table_to_path(&table, &output_format, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "Conversion complete: {} points, {} survey dates. Output: {}",
        table.point_count(),
        table.date_count(),
        output.display()
    );
    Ok(())
}
