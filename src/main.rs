use clap::{Parser, Subcommand};
use nifti_alignment::batch::{apply_transforms, run_registration, ApplyOptions, RegisterOptions};
use nifti_alignment::config::{load_config_or_default, COST_FUNCTIONS};
use nifti_alignment::visualization::{print_pose_table, print_poses};
use nifti_alignment::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "niftialign")]
#[command(about = "Batch rigid-body alignment of NIfTI volume series using FSL FLIRT")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Register every volume in the data directories to a reference
    Register {
        /// Reference volume; default: the first .nii found
        #[arg(short, long)]
        filename: Option<PathBuf>,

        /// Data directories to scan for .nii volumes
        #[arg(short, long, num_args = 1..)]
        dirname: Vec<PathBuf>,

        /// Limit the number of images per directory
        #[arg(short, long)]
        num: Option<usize>,

        /// Output filename; default: results/out.csv
        #[arg(short, long)]
        output: Option<String>,

        /// Write the raw registration matrices to this 16-column CSV
        #[arg(long)]
        matrices: Option<PathBuf>,

        /// Report rotations in radians instead of degrees
        #[arg(short, long)]
        radians: bool,

        /// Write labeled CSV rows instead of the compact layout
        #[arg(short, long)]
        labeled: bool,

        /// Turn off brain extraction
        #[arg(short = 'b', long)]
        no_brain_extract: bool,

        /// Cost function passed to the engine
        #[arg(short, long)]
        cost: Option<String>,

        /// Configuration file (TOML or JSON)
        #[arg(long)]
        config: Option<String>,

        /// Also dump the pose collection as JSON
        #[arg(short, long)]
        json: Option<PathBuf>,
    },

    /// Apply a stored transform series to the volumes of each directory
    Apply {
        /// Data directories; default: the current directory
        #[arg(short, long, num_args = 1..)]
        dirname: Vec<PathBuf>,

        /// Input mat file pattern, e.g. MAT_####.txt
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Decompose a single engine matrix file into pose parameters
    Convert {
        /// Matrix file to decompose
        matrix: PathBuf,

        /// Report rotations in radians instead of degrees
        #[arg(short, long)]
        radians: bool,
    },

    /// Print the poses stored in a results CSV
    Show {
        /// Pose CSV in either layout
        csv: PathBuf,

        /// Interpret rotations as radians when printing
        #[arg(short, long)]
        radians: bool,

        /// Render as a table instead of one block per pose
        #[arg(short, long)]
        table: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    match cli.command {
        Commands::Register {
            filename,
            dirname,
            num,
            output,
            matrices,
            radians,
            labeled,
            no_brain_extract,
            cost,
            config,
            json,
        } => {
            handle_register(
                filename,
                dirname,
                num,
                output,
                matrices,
                radians,
                labeled,
                no_brain_extract,
                cost,
                config,
                json,
            )?;
        }
        Commands::Apply { dirname, input } => {
            handle_apply(dirname, input)?;
        }
        Commands::Convert { matrix, radians } => {
            handle_convert(matrix, radians)?;
        }
        Commands::Show {
            csv,
            radians,
            table,
        } => {
            handle_show(csv, radians, table)?;
        }
    }

    Ok(())
}

fn angle_unit(radians: bool) -> AngleUnit {
    if radians {
        AngleUnit::Radians
    } else {
        AngleUnit::Degrees
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_register(
    filename: Option<PathBuf>,
    dirname: Vec<PathBuf>,
    num: Option<usize>,
    output: Option<String>,
    matrices: Option<PathBuf>,
    radians: bool,
    labeled: bool,
    no_brain_extract: bool,
    cost: Option<String>,
    config_path: Option<String>,
    json: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = load_config_or_default(config_path.as_deref());
    if let Some(cost) = cost {
        if !COST_FUNCTIONS.contains(&cost.as_str()) {
            return Err(anyhow::anyhow!(
                "'{}' is not a valid cost function, please use one of {:?}",
                cost,
                COST_FUNCTIONS
            ));
        }
        config.flirt.cost_function = cost;
    }

    let unit = angle_unit(radians);
    let opts = RegisterOptions {
        reference: filename,
        directories: dirname,
        max_images: num,
        output,
        matrices_output: matrices,
        angle_unit: unit,
        layout: if labeled {
            RowLayout::Labeled
        } else {
            RowLayout::Compact
        },
        extraction: !no_brain_extract,
    };

    let outcome = run_registration(&opts, &config)?;
    print_pose_table(&outcome.poses, unit);

    if let Some(json_path) = json {
        let rendered = serde_json::to_string_pretty(&outcome.poses)?;
        std::fs::write(&json_path, rendered)?;
        println!("Poses saved to {}", json_path.display());
    }

    Ok(())
}

fn handle_apply(dirname: Vec<PathBuf>, input: Option<String>) -> anyhow::Result<()> {
    let opts = ApplyOptions {
        directories: dirname,
        input_pattern: input,
    };
    apply_transforms(&opts)
}

fn handle_convert(matrix: PathBuf, radians: bool) -> anyhow::Result<()> {
    let unit = angle_unit(radians);
    let parsed = read_matrix_file(&matrix)?.ok_or_else(|| {
        anyhow::anyhow!("{} does not contain usable transform data", matrix.display())
    })?;
    let pose = decompose(&parsed, unit)?;
    println!("{}", visualization::pose_summary(&pose, unit));
    Ok(())
}

fn handle_show(csv: PathBuf, radians: bool, table: bool) -> anyhow::Result<()> {
    let poses = read_poses(&csv)?;
    let unit = angle_unit(radians);
    if table {
        print_pose_table(&poses, unit);
    } else {
        print_poses(&poses, unit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    // No unit tests in main.rs - all tests are in tests/ directory
}
