use super::{run_engine_command, FslEnv};
use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Brain-extracts a volume ahead of registration.
pub fn extract_brain(fsl: &FslEnv, in_file: &Path, out_file: &Path) -> crate::Result<()> {
    let mut command = Command::new(fsl.bin("bet"));
    command.arg(in_file).arg(out_file);
    run_engine_command(command).with_context(|| {
        format!(
            "brain extraction failed for {}, check there are no spaces in the path",
            in_file.display()
        )
    })?;
    Ok(())
}
