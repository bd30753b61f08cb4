use crate::{AngleUnit, RegistrationPose};
use ndarray::{array, Array2};

/// Rebuilds the homogeneous transform described by a pose.
///
/// The rotation block is Rz(phi) * Ry(theta) * Rx(psi), the convention
/// [`decompose`](crate::transform::decompose) inverts.
pub fn compose(pose: &RegistrationPose, unit: AngleUnit) -> Array2<f64> {
    let psi = unit.to_radians(pose.rotation[0]);
    let theta = unit.to_radians(pose.rotation[1]);
    let phi = unit.to_radians(pose.rotation[2]);

    let (sx, cx) = psi.sin_cos();
    let (sy, cy) = theta.sin_cos();
    let (sz, cz) = phi.sin_cos();
    let [tx, ty, tz] = pose.translation;

    array![
        [cz * cy, cz * sy * sx - sz * cx, cz * sy * cx + sz * sx, tx],
        [sz * cy, sz * sy * sx + cz * cx, sz * sy * cx - cz * sx, ty],
        [-sy, cy * sx, cy * cx, tz],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// The translation column of a transform matrix, if the matrix is large
/// enough to carry one.
pub fn translation_of(matrix: &Array2<f64>) -> Option<[f64; 3]> {
    let (rows, cols) = matrix.dim();
    if rows < 3 || cols < 4 {
        return None;
    }
    Some([matrix[[0, 3]], matrix[[1, 3]], matrix[[2, 3]]])
}
