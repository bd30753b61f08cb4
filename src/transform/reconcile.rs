use crate::transform::matrix::translation_of;
use crate::RegistrationPose;
use ndarray::Array2;

/// Merges the engine-report pose with the raw output matrix.
///
/// The report's rotation decomposition is kept as-is; its translation is
/// replaced by the matrix's translation column, which is read straight
/// from the engine output instead of re-derived. When the matrix is
/// missing or too small to index, the report translation stays and the
/// batch carries on.
pub fn reconcile(mut pose: RegistrationPose, matrix: Option<&Array2<f64>>) -> RegistrationPose {
    match matrix.and_then(translation_of) {
        Some(translation) => pose.translation = translation,
        None => {
            log::warn!("transform file has no usable translation column, keeping report values");
        }
    }
    pose
}
