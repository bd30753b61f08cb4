//! Coordinate-block plumbing for the transform-application mode.
//!
//! The downstream coordinate-transform tool consumes and produces plain
//! space-delimited text; the row values are carried as the exact tokens
//! read from disk so rewriting them does not reformat the numbers.

use anyhow::{bail, Context};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Reads a space-delimited transform file into its token rows.
pub fn read_coord_rows<P: AsRef<Path>>(path: P) -> crate::Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading coordinate source {}", path.display()))?;
    Ok(text
        .lines()
        .map(|line| line.split(' ').map(str::to_string).collect())
        .collect())
}

/// The translation column: the fourth token of the first three rows.
pub fn translation_tokens(rows: &[Vec<String>]) -> crate::Result<[String; 3]> {
    let mut tokens: [String; 3] = Default::default();
    for (i, token) in tokens.iter_mut().enumerate() {
        *token = rows
            .get(i)
            .and_then(|row| row.get(3))
            .with_context(|| format!("coordinate source has no translation in row {}", i))?
            .clone();
    }
    Ok(tokens)
}

/// Writes the single-row millimetre coordinate file handed to the
/// coordinate-transform tool.
pub fn write_coord_input<P: AsRef<Path>>(path: P, translation: &[String; 3]) -> crate::Result<()> {
    let path = path.as_ref();
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "{} {} {}", translation[0], translation[1], translation[2])?;
    Ok(())
}

/// Parses the voxel coordinates the coordinate-transform tool prints:
/// the last output line, double-space delimited.
pub fn parse_voxel_output(text: &str) -> crate::Result<Vec<String>> {
    let last = text
        .lines()
        .last()
        .context("coordinate-transform tool produced no output")?;
    let tokens: Vec<String> = last
        .split("  ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.len() < 3 {
        bail!("expected three voxel coordinates, got {:?}", last);
    }
    Ok(tokens)
}

/// Writes the translation-augmented coordinate block: three rows of
/// `x y z t` taken from the source rows and the voxel coordinates, and a
/// final `0 0 0 1` row. Space delimiter, LF line endings - the layout the
/// downstream tool expects byte for byte.
pub fn write_coord_block<P: AsRef<Path>>(
    path: P,
    rows: &[Vec<String>],
    voxels: &[String],
) -> crate::Result<()> {
    let path = path.as_ref();
    if rows.len() < 3 || voxels.len() < 3 {
        bail!(
            "coordinate block needs three source rows and three voxel values, got {} and {}",
            rows.len(),
            voxels.len()
        );
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for (row, voxel) in rows.iter().zip(voxels.iter()).take(3) {
        if row.len() < 3 {
            bail!("coordinate source row {:?} is too short", row);
        }
        writer.write_record([&row[0], &row[1], &row[2], voxel])?;
    }
    writer.write_record(["0", "0", "0", "1"])?;
    writer.flush()?;
    Ok(())
}
