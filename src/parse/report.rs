use crate::RegistrationPose;

/// Marker line carrying the rotation angles, exactly as the engine
/// prints it.
pub const ROTATION_MARKER: &str = "Rotation Angles (x,y,z) [rads]";

/// Marker line carrying the translations.
pub const TRANSLATION_MARKER: &str = "Translations (x,y,z) [mm]";

/// Extracts pose parameters from the engine's avscale report.
///
/// Only the two marker lines are read; everything else in the report is
/// ignored. A marker line carries its three values as the trailing
/// numeric fields after the label. Missing or malformed marker lines
/// leave the corresponding fields at zero, so a partial report still
/// yields a usable record.
///
/// Rotations are returned in radians, as printed by the engine. A cost
/// of 0.0 is treated as "not measured" and leaves the cost field at its
/// zero default.
pub fn parse_report(report: &str, cost: f64) -> RegistrationPose {
    let mut pose = RegistrationPose::identity();

    for line in report.lines() {
        if line.contains(ROTATION_MARKER) {
            if let Some(values) = trailing_triple(line) {
                pose.rotation = values;
            }
        } else if line.contains(TRANSLATION_MARKER) {
            if let Some(values) = trailing_triple(line) {
                pose.translation = values;
            }
        }
    }

    if cost != 0.0 {
        pose.cost = cost;
    }
    pose
}

/// The last three float fields of a marker line.
fn trailing_triple(line: &str) -> Option<[f64; 3]> {
    let floats: Vec<f64> = line
        .split(' ')
        .filter_map(|token| token.trim().parse::<f64>().ok())
        .collect();
    let n = floats.len();
    if n < 3 {
        return None;
    }
    Some([floats[n - 3], floats[n - 2], floats[n - 1]])
}
