use nifti_alignment::*;
use std::io::Write;

#[test]
fn test_parse_matrix_flirt_dump() {
    let text = "1  0  0  2.5  \n0  1  0  -3  \n0  0  1  0.75  \n0  0  0  1  \n";
    let matrix = parse_matrix(text).unwrap();

    assert_eq!(matrix.dim(), (4, 4));
    assert_eq!(matrix[[0, 3]], 2.5);
    assert_eq!(matrix[[1, 3]], -3.0);
    assert_eq!(matrix[[2, 3]], 0.75);
    assert_eq!(matrix[[3, 3]], 1.0);
}

#[test]
fn test_parse_matrix_without_trailing_delimiter() {
    let text = "1  0  0  0\n0  1  0  0\n0  0  1  0\n0  0  0  1\n";
    let matrix = parse_matrix(text).unwrap();
    assert_eq!(matrix.dim(), (4, 4));
    assert_eq!(matrix[[3, 3]], 1.0);
}

#[test]
fn test_parse_matrix_bad_token_on_last_line_returns_none() {
    let text = "1  0  0  2.5  \n0  1  0  -3.0  \n0  0  1  oops  \n";
    assert!(parse_matrix(text).is_none());
}

#[test]
fn test_parse_matrix_empty_text_returns_none() {
    assert!(parse_matrix("").is_none());
    assert!(parse_matrix("\n\n").is_none());
}

#[test]
fn test_parse_matrix_ragged_rows_return_none() {
    let text = "1  0  0  0  \n0  1  \n";
    assert!(parse_matrix(text).is_none());
}

#[test]
fn test_read_matrix_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "1  0  0  4  \n0  1  0  5  \n0  0  1  6  \n0  0  0  1  \n").unwrap();

    let matrix = read_matrix_file(file.path()).unwrap().unwrap();
    assert_eq!(translation_of(&matrix), Some([4.0, 5.0, 6.0]));
}

#[test]
fn test_read_matrix_file_missing_is_an_error() {
    assert!(read_matrix_file("/nonexistent/tmp0.txt").is_err());
}

#[test]
fn test_report_end_to_end_values() {
    let report = "Rotation Angles (x,y,z) [rads] 0 0 0 0.1 0.2 0.3\n\
                  Translations (x,y,z) [mm] 0 0 0 1.0 2.0 3.0";
    let pose = parse_report(report, 42.0);

    assert_eq!(pose.translation, [1.0, 2.0, 3.0]);
    assert_eq!(pose.rotation, [0.1, 0.2, 0.3]);
    assert_eq!(pose.cost, 42.0);
}

#[test]
fn test_report_engine_format() {
    // The shape avscale actually prints, trailing spaces included
    let report = "\n\
        Rotation & Translation Matrix:\n\
        1.000000 0.000000 0.000000 0.000000 \n\
        0.000000 1.000000 0.000000 0.000000 \n\
        0.000000 0.000000 1.000000 0.000000 \n\
        \n\
        Rotation Angles (x,y,z) [rads] = 0.012000 -0.034000 0.056000 \n\
        \n\
        Translations (x,y,z) [mm] = 1.250000 -0.500000 2.750000 \n\
        \n\
        Scales (x,y,z) = 1.000000 1.000000 1.000000 \n";
    let pose = parse_report(report, 0.5);

    assert!((pose.rotation[0] - 0.012).abs() < 1e-12);
    assert!((pose.rotation[1] + 0.034).abs() < 1e-12);
    assert!((pose.rotation[2] - 0.056).abs() < 1e-12);
    assert!((pose.translation[0] - 1.25).abs() < 1e-12);
    assert!((pose.translation[1] + 0.5).abs() < 1e-12);
    assert!((pose.translation[2] - 2.75).abs() < 1e-12);
    assert_eq!(pose.cost, 0.5);
}

#[test]
fn test_report_translation_marker_only() {
    let report = "Translations (x,y,z) [mm] = 4.0 5.0 6.0";
    let pose = parse_report(report, 0.0);

    assert_eq!(pose.rotation, [0.0; 3]);
    assert_eq!(pose.translation, [4.0, 5.0, 6.0]);
}

#[test]
fn test_report_zero_cost_stays_zero() {
    let pose = parse_report("Translations (x,y,z) [mm] = 1 1 1", 0.0);
    assert_eq!(pose.cost, 0.0);
}

#[test]
fn test_report_short_marker_line_leaves_zeros() {
    let report = "Rotation Angles (x,y,z) [rads] = 0.1 0.2\n\
                  Translations (x,y,z) [mm] = 7 8 9";
    let pose = parse_report(report, 0.0);

    assert_eq!(pose.rotation, [0.0; 3]);
    assert_eq!(pose.translation, [7.0, 8.0, 9.0]);
}

#[test]
fn test_report_with_no_markers_is_the_identity() {
    let pose = parse_report("flirt exited without writing parameters", 0.0);
    assert_eq!(pose, RegistrationPose::identity());
}
