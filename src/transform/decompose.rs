use crate::{AngleUnit, RegistrationPose};
use ndarray::Array2;

/// Errors from homogeneous-transform decomposition.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("expected a 4x4 homogeneous transform, got {rows}x{cols}")]
    NotHomogeneous { rows: usize, cols: usize },
    #[error("gimbal lock: |R31| = 1, the x and z rotations cannot be separated")]
    GimbalLock,
}

/// |R31| values closer to 1 than this are treated as the singularity.
const GIMBAL_EPS: f64 = 1e-12;

/// Decomposes a 4x4 homogeneous transform into three translations in mm
/// and three rotations in the requested unit.
///
/// The x, y, z translations are the final column. For the rotation block
///
/// ```text
/// R11 R12 R13
/// R21 R22 R23
/// R31 R32 R33
/// ```
///
/// theta is either -asin(R31) or pi + asin(R31); only the principal
/// branch is computed here. The angles map to the axes as rx = psi,
/// ry = theta, rz = phi.
pub fn decompose(omat: &Array2<f64>, unit: AngleUnit) -> Result<RegistrationPose, TransformError> {
    let (rows, cols) = omat.dim();
    if rows != 4 || cols != 4 {
        return Err(TransformError::NotHomogeneous { rows, cols });
    }

    let translation = [omat[[0, 3]], omat[[1, 3]], omat[[2, 3]]];

    // At |R31| == 1 the divisions below are undefined
    if 1.0 - omat[[2, 0]].abs() < GIMBAL_EPS {
        return Err(TransformError::GimbalLock);
    }

    let theta = -omat[[2, 0]].asin();
    let cos_theta = theta.cos();
    let psi = (omat[[2, 1]] / cos_theta).atan2(omat[[2, 2]] / cos_theta);
    let phi = (omat[[1, 0]] / cos_theta).atan2(omat[[0, 0]] / cos_theta);

    let rotation = [
        unit.from_radians(psi),
        unit.from_radians(theta),
        unit.from_radians(phi),
    ];

    Ok(RegistrationPose {
        translation,
        rotation,
        cost: 0.0,
    })
}
