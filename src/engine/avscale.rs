use super::{run_engine_command, FslEnv};
use std::path::Path;
use std::process::Command;

/// Runs avscale on a registration matrix and returns its textual report,
/// the input of [`parse_report`](crate::parse::parse_report).
pub fn read_parameters(fsl: &FslEnv, matrix: &Path, reference: &Path) -> crate::Result<String> {
    let mut command = Command::new(fsl.bin("avscale"));
    command.arg("--allparams").arg(matrix).arg(reference);
    let output = run_engine_command(command)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
