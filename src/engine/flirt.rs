use super::{run_engine_command, FslEnv};
use crate::config::FlirtConfig;
use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Schedule file used to re-score an existing registration.
const MEASURE_COST_SCHEDULE: &str = "measurecost1.sch";

/// Registers an input volume to the reference, writing the affine matrix
/// and the resampled volume.
pub fn register(
    fsl: &FslEnv,
    config: &FlirtConfig,
    in_file: &Path,
    reference: &Path,
    out_matrix: &Path,
    out_volume: &Path,
) -> crate::Result<()> {
    let search = config.search_range_deg;
    let mut command = Command::new(fsl.bin("flirt"));
    command
        .arg("-in")
        .arg(in_file)
        .arg("-ref")
        .arg(reference)
        .arg("-out")
        .arg(out_volume)
        .arg("-omat")
        .arg(out_matrix)
        .arg("-bins")
        .arg(config.bins.to_string())
        .arg("-cost")
        .arg(&config.cost_function)
        .arg("-dof")
        .arg(config.dof.to_string())
        .arg("-searchrx")
        .arg((-search).to_string())
        .arg(search.to_string())
        .arg("-searchry")
        .arg((-search).to_string())
        .arg(search.to_string())
        .arg("-searchrz")
        .arg((-search).to_string())
        .arg(search.to_string())
        .arg("-interp")
        .arg(&config.interp)
        .arg("-usesqform");
    run_engine_command(command)?;
    Ok(())
}

/// Re-runs the engine with the cost-measurement schedule and returns the
/// scalar cost of an existing registration. The cost is the first
/// whitespace token the engine prints.
pub fn measure_cost(
    fsl: &FslEnv,
    config: &FlirtConfig,
    in_file: &Path,
    reference: &Path,
    init_matrix: &Path,
    out_matrix: &Path,
    out_volume: &Path,
) -> crate::Result<f64> {
    let mut command = Command::new(fsl.bin("flirt"));
    command
        .arg("-in")
        .arg(in_file)
        .arg("-ref")
        .arg(reference)
        .arg("-schedule")
        .arg(fsl.schedule(MEASURE_COST_SCHEDULE))
        .arg("-init")
        .arg(init_matrix)
        .arg("-omat")
        .arg(out_matrix)
        .arg("-out")
        .arg(out_volume)
        .arg("-cost")
        .arg(&config.cost_function);
    let output = run_engine_command(command)?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let token = stdout
        .split_whitespace()
        .next()
        .context("cost measurement produced no output")?;
    token
        .parse()
        .with_context(|| format!("parsing cost value {:?}", token))
}

/// Applies a previously computed transform to a volume.
pub fn apply_transform(
    fsl: &FslEnv,
    in_file: &Path,
    reference: &Path,
    init_matrix: &Path,
    out_volume: &Path,
) -> crate::Result<()> {
    let mut command = Command::new(fsl.bin("flirt"));
    command
        .arg("-in")
        .arg(in_file)
        .arg("-ref")
        .arg(reference)
        .arg("-applyxfm")
        .arg("-init")
        .arg(init_matrix)
        .arg("-out")
        .arg(out_volume);
    run_engine_command(command)?;
    Ok(())
}
