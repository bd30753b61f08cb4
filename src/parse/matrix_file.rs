use anyhow::Context;
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Parses a FLIRT matrix dump: one matrix row per line, values separated
/// by a double space, with a trailing delimiter before the newline.
///
/// Returns `None` when any token fails to parse or the rows are ragged -
/// the text holds no usable transform data and callers must not index
/// into it.
pub fn parse_matrix(text: &str) -> Option<Array2<f64>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens: Vec<&str> = line.split("  ").collect();
        if tokens.last().map_or(false, |t| t.trim().is_empty()) {
            tokens.pop();
        }
        let mut row = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token.trim().parse::<f64>() {
                Ok(value) => row.push(value),
                Err(_) => return None,
            }
        }
        rows.push(row);
    }

    let width = rows.first().map(Vec::len)?;
    if width == 0 || rows.iter().any(|row| row.len() != width) {
        return None;
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), flat).ok()
}

/// Reads a FLIRT matrix file from disk.
///
/// I/O failures are errors; unparseable contents are `Ok(None)`, the
/// no-data outcome of [`parse_matrix`].
pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> crate::Result<Option<Array2<f64>>> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading transform file {}", path.as_ref().display()))?;
    Ok(parse_matrix(&text))
}
