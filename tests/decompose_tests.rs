use ndarray::{array, Array2};
use nifti_alignment::*;

fn pose(translation: [f64; 3], rotation: [f64; 3]) -> RegistrationPose {
    RegistrationPose::new(translation, rotation)
}

#[test]
fn test_translation_is_final_column() {
    let matrix = compose(&pose([10.0, -5.0, 2.5], [0.0; 3]), AngleUnit::Radians);
    let result = decompose(&matrix, AngleUnit::Radians).unwrap();

    assert_eq!(result.translation, [10.0, -5.0, 2.5]);
    for angle in result.rotation {
        assert!(angle.abs() < 1e-12);
    }
}

#[test]
fn test_round_trip_radians() {
    let original = pose([1.5, -2.0, 3.0], [0.3, -0.4, 0.5]);
    let matrix = compose(&original, AngleUnit::Radians);
    let result = decompose(&matrix, AngleUnit::Radians).unwrap();

    for i in 0..3 {
        assert!((result.translation[i] - original.translation[i]).abs() < 1e-9);
        assert!((result.rotation[i] - original.rotation[i]).abs() < 1e-9);
    }

    // Forward kinematics from the recovered parameters reproduces the matrix
    let rebuilt = compose(&result, AngleUnit::Radians);
    for (a, b) in matrix.iter().zip(rebuilt.iter()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn test_round_trip_degrees() {
    let original = pose([0.5, 1.0, -1.5], [12.0, -25.0, 40.0]);
    let matrix = compose(&original, AngleUnit::Degrees);
    let result = decompose(&matrix, AngleUnit::Degrees).unwrap();

    for i in 0..3 {
        assert!((result.translation[i] - original.translation[i]).abs() < 1e-9);
        assert!((result.rotation[i] - original.rotation[i]).abs() < 1e-9);
    }
}

#[test]
fn test_degree_mode_matches_radian_mode() {
    let matrix = compose(&pose([0.0; 3], [0.2, 0.1, -0.3]), AngleUnit::Radians);
    let rad = decompose(&matrix, AngleUnit::Radians).unwrap();
    let deg = decompose(&matrix, AngleUnit::Degrees).unwrap();

    assert_eq!(deg.translation, rad.translation);
    for i in 0..3 {
        assert!((deg.rotation[i].to_radians() - rad.rotation[i]).abs() < 1e-9);
    }
}

#[test]
fn test_axis_assignment() {
    // A rotation about a single axis must land in that axis's slot
    let about_x = decompose(
        &compose(&pose([0.0; 3], [0.25, 0.0, 0.0]), AngleUnit::Radians),
        AngleUnit::Radians,
    )
    .unwrap();
    assert!((about_x.rotation[0] - 0.25).abs() < 1e-9);
    assert!(about_x.rotation[1].abs() < 1e-9);
    assert!(about_x.rotation[2].abs() < 1e-9);

    let about_y = decompose(
        &compose(&pose([0.0; 3], [0.0, 0.25, 0.0]), AngleUnit::Radians),
        AngleUnit::Radians,
    )
    .unwrap();
    assert!((about_y.rotation[1] - 0.25).abs() < 1e-9);
    assert!(about_y.rotation[0].abs() < 1e-9);
    assert!(about_y.rotation[2].abs() < 1e-9);

    let about_z = decompose(
        &compose(&pose([0.0; 3], [0.0, 0.0, 0.25]), AngleUnit::Radians),
        AngleUnit::Radians,
    )
    .unwrap();
    assert!((about_z.rotation[2] - 0.25).abs() < 1e-9);
    assert!(about_z.rotation[0].abs() < 1e-9);
    assert!(about_z.rotation[1].abs() < 1e-9);
}

#[test]
fn test_gimbal_lock_is_an_error() {
    // Ry(90°): R31 = -1, the x and z angles cannot be separated
    let matrix = array![
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let err = decompose(&matrix, AngleUnit::Radians).unwrap_err();
    assert!(matches!(err, TransformError::GimbalLock));
}

#[test]
fn test_rejects_non_homogeneous_shape() {
    let matrix = Array2::<f64>::eye(3);
    let err = decompose(&matrix, AngleUnit::Radians).unwrap_err();
    assert!(matches!(
        err,
        TransformError::NotHomogeneous { rows: 3, cols: 3 }
    ));
}

#[test]
fn test_identity_pose_identity_matrix() {
    let matrix = compose(&RegistrationPose::identity(), AngleUnit::Degrees);
    for i in 0..4 {
        for j in 0..4 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((matrix[[i, j]] - expected).abs() < 1e-15);
        }
    }
}
