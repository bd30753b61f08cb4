use crate::RegistrationPose;
use anyhow::{bail, Context};
use std::path::Path;

/// Row layout for pose CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// Six comma-separated values in fixed field order, no header.
    Compact,
    /// Alternating label/value pairs: x,tx,y,ty,z,tz,Rx,rx,Ry,ry,Rz,rz.
    Labeled,
}

const LABELS: [&str; 6] = ["x", "y", "z", "Rx", "Ry", "Rz"];

fn pose_fields(pose: &RegistrationPose) -> [f64; 6] {
    [
        pose.translation[0],
        pose.translation[1],
        pose.translation[2],
        pose.rotation[0],
        pose.rotation[1],
        pose.rotation[2],
    ]
}

/// Writes one row per pose in the chosen layout. Cost is never written
/// here; use [`write_poses_with_cost`] for the seven-column layout.
pub fn write_poses<P: AsRef<Path>>(
    path: P,
    poses: &[RegistrationPose],
    layout: RowLayout,
) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.as_ref().display()))?;

    for pose in poses {
        let fields = pose_fields(pose);
        match layout {
            RowLayout::Compact => {
                writer.write_record(fields.iter().map(|value| value.to_string()))?;
            }
            RowLayout::Labeled => {
                let mut record = Vec::with_capacity(12);
                for (label, value) in LABELS.iter().zip(fields.iter()) {
                    record.push(label.to_string());
                    record.push(value.to_string());
                }
                writer.write_record(&record)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes seven-column compact rows: the six pose fields plus the cost,
/// 0 when no cost was measured.
pub fn write_poses_with_cost<P: AsRef<Path>>(
    path: P,
    poses: &[RegistrationPose],
) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.as_ref().display()))?;

    for pose in poses {
        let mut record: Vec<String> = pose_fields(pose)
            .iter()
            .map(|value| value.to_string())
            .collect();
        record.push(pose.cost.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a pose CSV written in either layout.
///
/// The layout is detected per row: a first token of `"x"` marks a labeled
/// row, anything else is read positionally. Rows that are short or do not
/// parse are skipped with a warning; a file yielding no rows at all is an
/// error, since the caller has nothing to work with.
pub fn read_poses<P: AsRef<Path>>(path: P) -> crate::Result<Vec<RegistrationPose>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut poses = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let parsed = if record.get(0) == Some("x") {
            parse_labeled_row(&record)
        } else {
            parse_compact_row(&record)
        };
        match parsed {
            Some(pose) => poses.push(pose),
            None => log::warn!(
                "row {} of {} is not a valid pose row, skipping",
                index + 1,
                path.display()
            ),
        }
    }

    if poses.is_empty() {
        bail!("no pose rows found in {}", path.display());
    }
    Ok(poses)
}

fn parse_compact_row(record: &csv::StringRecord) -> Option<RegistrationPose> {
    let mut values = [0.0f64; 6];
    for (i, value) in values.iter_mut().enumerate() {
        *value = record.get(i)?.trim().parse().ok()?;
    }
    Some(RegistrationPose::new(
        [values[0], values[1], values[2]],
        [values[3], values[4], values[5]],
    ))
}

fn parse_labeled_row(record: &csv::StringRecord) -> Option<RegistrationPose> {
    let mut values = [0.0f64; 6];
    for (i, value) in values.iter_mut().enumerate() {
        *value = record.get(2 * i + 1)?.trim().parse().ok()?;
    }
    Some(RegistrationPose::new(
        [values[0], values[1], values[2]],
        [values[3], values[4], values[5]],
    ))
}
