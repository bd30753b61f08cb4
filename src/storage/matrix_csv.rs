use anyhow::{bail, Context};
use ndarray::Array2;
use std::path::Path;

/// Writes raw engine matrices as 16-column rows, the 4x4 flattened in
/// row-major order. No header and no labeled variant.
pub fn write_matrices<P: AsRef<Path>>(path: P, matrices: &[Array2<f64>]) -> crate::Result<()> {
    let path = path.as_ref();
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    for matrix in matrices {
        if matrix.dim() != (4, 4) {
            bail!(
                "cannot persist a {}x{} matrix as a 16-column row",
                matrix.dim().0,
                matrix.dim().1
            );
        }
        let record: Vec<String> = matrix.iter().map(|value| value.to_string()).collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
