use super::{run_engine_command, FslEnv};
use std::path::Path;
use std::process::Command;

/// Converts standard-space millimetre coordinates into voxel coordinates
/// of the target image. Returns the tool's raw textual output.
pub fn to_voxel_coords(
    fsl: &FslEnv,
    standard: &Path,
    image: &Path,
    coord_file: &Path,
) -> crate::Result<String> {
    let mut command = Command::new(fsl.bin("std2imgcoord"));
    command
        .arg("-std")
        .arg(standard)
        .arg("-img")
        .arg(image)
        .arg(coord_file)
        .arg("-vox");
    let output = run_engine_command(command)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
