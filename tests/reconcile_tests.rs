use ndarray::Array2;
use nifti_alignment::*;

#[test]
fn test_reconcile_overwrites_translation_only() {
    let pose = RegistrationPose {
        translation: [9.0, 9.0, 9.0],
        rotation: [0.1, 0.2, 0.3],
        cost: 1.0,
    };
    let matrix = compose(
        &RegistrationPose::new([1.0, 2.0, 3.0], [0.0; 3]),
        AngleUnit::Radians,
    );

    let merged = reconcile(pose, Some(&matrix));

    assert_eq!(merged.translation, [1.0, 2.0, 3.0]);
    assert_eq!(merged.rotation, [0.1, 0.2, 0.3]);
    assert_eq!(merged.cost, 1.0);
}

#[test]
fn test_reconcile_without_matrix_keeps_report_values() {
    let pose = RegistrationPose::new([7.0, 8.0, 9.0], [0.4, 0.5, 0.6]);
    let merged = reconcile(pose.clone(), None);
    assert_eq!(merged, pose);
}

#[test]
fn test_reconcile_short_matrix_keeps_report_values() {
    let pose = RegistrationPose::new([7.0, 8.0, 9.0], [0.4, 0.5, 0.6]);
    let stub = Array2::<f64>::zeros((2, 2));
    let merged = reconcile(pose.clone(), Some(&stub));
    assert_eq!(merged, pose);
}

#[test]
fn test_report_and_matrix_reconciliation_chain() {
    // The per-image flow without the engine: report rotation survives,
    // matrix translation wins, cost is carried through
    let report = "Rotation Angles (x,y,z) [rads] = 0.010000 0.020000 0.030000 \n\
                  Translations (x,y,z) [mm] = 90.000000 90.000000 90.000000 \n";
    let matrix_text = "1  0  0  1.5  \n0  1  0  -2.5  \n0  0  1  3.5  \n0  0  0  1  \n";

    let pose = parse_report(report, 0.125);
    let matrix = parse_matrix(matrix_text);
    let merged = reconcile(pose, matrix.as_ref());

    assert_eq!(merged.translation, [1.5, -2.5, 3.5]);
    assert_eq!(merged.rotation, [0.01, 0.02, 0.03]);
    assert_eq!(merged.cost, 0.125);
}
