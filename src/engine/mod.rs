pub mod avscale;
pub mod bet;
pub mod flirt;
pub mod std2imgcoord;

use anyhow::{bail, Context};
use std::path::PathBuf;
use std::process::{Command, Output};

/// Install locations tried when FSLDIR is not set, newest first.
const KNOWN_FSL_DIRS: [&str; 4] = [
    "/usr/local/fsl",
    "/usr/share/fsl/6.0",
    "/usr/share/fsl/5.0",
    "/usr/share/fsl",
];

/// A located FSL installation.
#[derive(Debug, Clone)]
pub struct FslEnv {
    base: PathBuf,
}

impl FslEnv {
    /// Finds the FSL installation, preferring the FSLDIR environment
    /// variable over the conventional install locations. A missing
    /// installation is fatal to the whole run.
    pub fn locate() -> crate::Result<Self> {
        if let Ok(dir) = std::env::var("FSLDIR") {
            let base = PathBuf::from(dir);
            if base.exists() {
                log::debug!("FSL Base Dir: {}", base.display());
                return Ok(Self { base });
            }
            log::warn!("FSLDIR is set to {} but that path does not exist", base.display());
        }
        for dir in KNOWN_FSL_DIRS {
            let base = PathBuf::from(dir);
            if base.exists() {
                log::debug!("FSL Base Dir: {}", base.display());
                return Ok(Self { base });
            }
        }
        bail!("no FSL installation found, set FSLDIR or install FSL");
    }

    pub fn from_base<P: Into<PathBuf>>(base: P) -> Self {
        Self { base: base.into() }
    }

    pub fn bin(&self, tool: &str) -> PathBuf {
        self.base.join("bin").join(tool)
    }

    pub fn schedule(&self, name: &str) -> PathBuf {
        self.base.join("etc").join("flirtsch").join(name)
    }
}

/// Runs one engine command to completion. A non-zero exit is an error
/// carrying the full command line, which the orchestrator treats as fatal
/// to the batch.
pub(crate) fn run_engine_command(mut command: Command) -> crate::Result<Output> {
    let rendered = format!("{:?}", command);
    log::debug!("running {}", rendered);
    let output = command
        .output()
        .with_context(|| format!("spawning {}", rendered))?;
    if !output.status.success() {
        bail!(
            "engine command failed ({}): {}\n{}",
            output.status,
            rendered,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}
