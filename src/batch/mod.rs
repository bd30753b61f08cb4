use crate::config::Config;
use crate::engine::{self, FslEnv};
use crate::storage::{self, RowLayout};
use crate::transform::reconcile;
use crate::visualization::pose_summary;
use crate::{data, parse, AngleUnit, RegistrationPose};
use anyhow::{bail, Context};
use instant::Instant;
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for one registration batch.
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    /// Reference volume; when unset the first volume found is used.
    pub reference: Option<PathBuf>,
    /// Data directories to scan; empty means the current directory.
    pub directories: Vec<PathBuf>,
    pub max_images: Option<usize>,
    /// Output filename inside the first data directory; defaults to the
    /// results/out.csv and results/original_out.csv pair.
    pub output: Option<String>,
    /// Optional 16-column dump of the raw registration matrices.
    pub matrices_output: Option<PathBuf>,
    pub angle_unit: AngleUnit,
    pub layout: RowLayout,
    /// Brain-extract volumes before registering them.
    pub extraction: bool,
}

/// Everything one batch produced, in processing order.
pub struct BatchOutcome {
    pub poses: Vec<RegistrationPose>,
    pub raw_matrices: Vec<Array2<f64>>,
}

/// Registers every volume against the reference and persists the pose
/// collection. One volume is fully processed before the next starts; the
/// engine runs as a blocking subprocess and a failed invocation aborts
/// the batch.
pub fn run_registration(opts: &RegisterOptions, config: &Config) -> crate::Result<BatchOutcome> {
    println!("Starting registration batch");
    let start = Instant::now();

    let directories = resolve_directories(&opts.directories)?;

    let mut volumes: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
    let mut total = 0usize;
    for dir in &directories {
        let found = data::find_volumes(dir, opts.max_images)?;
        total += found.len();
        volumes.push((dir.clone(), found));
    }
    if total == 0 {
        bail!("no NIfTI files found, nothing to register");
    }

    let reference = match &opts.reference {
        Some(path) => {
            let path = fs::canonicalize(path)
                .with_context(|| format!("resolving reference {}", path.display()))?;
            if !path.is_file() {
                bail!("reference {} is not a file", path.display());
            }
            path
        }
        None => volumes
            .iter()
            .flat_map(|(_, files)| files.iter())
            .next()
            .cloned()
            .context("no volumes found to pick a reference from")?,
    };
    let reference_dir = reference
        .parent()
        .context("reference volume has no parent directory")?
        .to_path_buf();
    log::debug!("Registering against {}", reference.display());

    let fsl = FslEnv::locate()?;

    let ref_scratch = reference_dir.join("tmp");
    fs::create_dir_all(&ref_scratch)?;
    let ref_volume = ref_scratch.join("ref.nii");
    if opts.extraction {
        engine::bet::extract_brain(&fsl, &reference, &ref_volume)?;
    } else {
        fs::copy(&reference, &ref_volume)
            .with_context(|| format!("copying reference {}", reference.display()))?;
    }

    // First entry is the reference 'registered' to itself
    let mut outcome = BatchOutcome {
        poses: vec![RegistrationPose::identity()],
        raw_matrices: vec![Array2::eye(4)],
    };

    for (dir, files) in &volumes {
        let scratch = dir.join("tmp");
        fs::create_dir_all(&scratch)?;
        let start_idx = if *dir == reference_dir { 1 } else { 0 };

        println!("Running FLIRT on {}", dir.display());
        for (index, volume) in files.iter().enumerate().skip(start_idx) {
            let step = Instant::now();
            let (pose, raw) = register_one(&fsl, config, opts, &ref_volume, dir, volume, index)?;
            log::info!(
                "registered {} ({}/{}) in {} ms",
                volume.display(),
                index + 1,
                files.len(),
                step.elapsed().as_millis()
            );
            log::debug!("{}", pose_summary(&pose, opts.angle_unit));
            outcome.poses.push(pose);
            if let Some(matrix) = raw {
                outcome.raw_matrices.push(matrix);
            }
        }
    }

    persist(&outcome, &directories[0], opts)?;
    println!(
        "Registered {} volumes in {:.1} s",
        outcome.poses.len() - 1,
        start.elapsed().as_secs_f64()
    );
    Ok(outcome)
}

/// One volume through the whole chain: pre-process, register, re-score,
/// parse both engine outputs, reconcile.
fn register_one(
    fsl: &FslEnv,
    config: &Config,
    opts: &RegisterOptions,
    ref_volume: &Path,
    dir: &Path,
    volume: &Path,
    index: usize,
) -> crate::Result<(RegistrationPose, Option<Array2<f64>>)> {
    let scratch = dir.join("tmp");

    let work_volume = scratch.join("tmp.nii");
    if opts.extraction {
        engine::bet::extract_brain(fsl, volume, &work_volume)?;
    } else {
        fs::copy(volume, &work_volume)
            .with_context(|| format!("copying {}", volume.display()))?;
    }

    let matrix_file = scratch.join(format!("tmp{}.txt", index));
    let registered = scratch.join(format!("reg{}.nii.gz", index));
    engine::flirt::register(
        fsl,
        &config.flirt,
        &work_volume,
        ref_volume,
        &matrix_file,
        &registered,
    )?;

    // avscale gives real-world pose parameters for the raw matrix
    let report = engine::avscale::read_parameters(fsl, &matrix_file, &registered)?;

    let cost_matrix = scratch.join(format!("reg{}_flirt.mat", index));
    let cost = engine::flirt::measure_cost(
        fsl,
        &config.flirt,
        &registered,
        ref_volume,
        &matrix_file,
        &cost_matrix,
        &registered,
    )?;

    let mut pose = parse::parse_report(&report, cost);
    for rotation in &mut pose.rotation {
        *rotation = opts.angle_unit.from_radians(*rotation);
    }

    let raw = match parse::read_matrix_file(&matrix_file) {
        Ok(matrix) => {
            if matrix.is_none() {
                log::debug!("{} does not contain transform data", matrix_file.display());
            }
            matrix
        }
        Err(err) => {
            log::warn!("could not read {}: {}", matrix_file.display(), err);
            None
        }
    };

    let pose = reconcile(pose, raw.as_ref());
    Ok((pose, raw))
}

fn persist(outcome: &BatchOutcome, dir: &Path, opts: &RegisterOptions) -> crate::Result<()> {
    let (pose_path, original_path) = match &opts.output {
        Some(name) => (dir.join(name), dir.join(format!("original_{}", name))),
        None => {
            let results = dir.join("results");
            fs::create_dir_all(&results)
                .with_context(|| format!("creating {}", results.display()))?;
            (results.join("out.csv"), results.join("original_out.csv"))
        }
    };

    log::debug!("Saving to {}", pose_path.display());
    storage::write_poses(&pose_path, &outcome.poses, opts.layout)?;
    storage::write_poses_with_cost(&original_path, &outcome.poses)?;

    if let Some(path) = &opts.matrices_output {
        storage::write_matrices(path, &outcome.raw_matrices)?;
    }
    Ok(())
}

/// Options for applying previously computed transforms.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub directories: Vec<PathBuf>,
    /// Transform-file series pattern, e.g. `MAT_####.txt`; defaults to
    /// MAT_####.txt inside the first data directory.
    pub input_pattern: Option<String>,
}

/// Applies a stored transform series to the volumes of each directory,
/// writing resampled volumes under FLIRT_out/.
pub fn apply_transforms(opts: &ApplyOptions) -> crate::Result<()> {
    println!("Starting transform application");
    let directories = resolve_directories(&opts.directories)?;

    let (prefix, ext) = match &opts.input_pattern {
        Some(pattern) => data::parse_series_pattern(pattern),
        None => (
            directories[0].join("MAT_").display().to_string(),
            ".txt".to_string(),
        ),
    };

    let first = PathBuf::from(format!("{}0000{}", prefix, ext));
    log::debug!("Checking file {}", first.display());
    if !first.is_file() {
        bail!("transform series {} not found", first.display());
    }
    let series_dir = fs::canonicalize(&first)?
        .parent()
        .context("transform series has no parent directory")?
        .to_path_buf();

    let fsl = FslEnv::locate()?;

    for dir in &directories {
        let volumes = data::find_volumes(dir, None)?;
        if volumes.is_empty() {
            bail!("no NIfTI files found in {}", dir.display());
        }
        let inputs = data::input_series(&prefix, &ext, volumes.len());
        let start_idx = if *dir == series_dir { 1 } else { 0 };

        let scratch = dir.join("tmp");
        let out_dir = dir.join("FLIRT_out");
        fs::create_dir_all(&scratch)?;
        fs::create_dir_all(&out_dir)?;

        println!("Applying FLIRT Transform on {}", dir.display());
        for index in start_idx..volumes.len() {
            let block = build_coord_block(
                &fsl,
                dir,
                &inputs[index],
                &volumes[0],
                &volumes[index],
                index,
            )?;
            let out_volume = out_dir.join(format!("out_{}.nii.gz", index));
            engine::flirt::apply_transform(&fsl, &volumes[index], &volumes[0], &block, &out_volume)?;
            log::info!(
                "applied transform to {} ({}/{})",
                volumes[index].display(),
                index + 1,
                volumes.len()
            );
        }
    }
    Ok(())
}

/// Routes one transform file through the coordinate-transform tool and
/// writes the translation-augmented block FLIRT consumes.
fn build_coord_block(
    fsl: &FslEnv,
    dir: &Path,
    input: &Path,
    standard: &Path,
    image: &Path,
    index: usize,
) -> crate::Result<PathBuf> {
    let rows = storage::read_coord_rows(input)?;
    let translation = storage::translation_tokens(&rows)?;

    let scratch = dir.join("tmp");
    let coord_file = scratch.join(format!("coord_tmp{}.txt", index));
    storage::write_coord_input(&coord_file, &translation)?;

    let output = engine::std2imgcoord::to_voxel_coords(fsl, standard, image, &coord_file)?;
    let voxels = storage::parse_voxel_output(&output)?;

    let block = scratch.join(format!("trans_tmp{}.txt", index));
    storage::write_coord_block(&block, &rows, &voxels)?;
    Ok(block)
}

fn resolve_directories(directories: &[PathBuf]) -> crate::Result<Vec<PathBuf>> {
    if directories.is_empty() {
        return Ok(vec![std::env::current_dir()?]);
    }
    directories
        .iter()
        .map(|dir| {
            fs::canonicalize(dir).with_context(|| format!("resolving directory {}", dir.display()))
        })
        .collect()
}
