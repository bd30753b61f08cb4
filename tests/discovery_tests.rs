use nifti_alignment::data::{find_volumes, input_series, is_nii, parse_series_pattern};
use std::fs;
use std::path::Path;

#[test]
fn test_is_nii_accepts_plain_volumes() {
    assert!(is_nii(Path::new("scan_0001.nii")));
    assert!(is_nii(Path::new("/data/run1/anat.nii")));
}

#[test]
fn test_is_nii_excludes_scratch_and_foreign_files() {
    assert!(!is_nii(Path::new("ref.nii")));
    assert!(!is_nii(Path::new("tmp.nii")));
    assert!(!is_nii(Path::new("scan.nii.gz")));
    assert!(!is_nii(Path::new("notes.txt")));
}

#[test]
fn test_find_volumes_sorts_and_truncates() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.nii", "a.nii", "ref.nii", "notes.txt"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let all = find_volumes(dir.path(), None).unwrap();
    let names: Vec<_> = all
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, ["a.nii", "b.nii"]);

    let limited = find_volumes(dir.path(), Some(1)).unwrap();
    assert_eq!(limited.len(), 1);
    assert!(limited[0].ends_with("a.nii"));
}

#[test]
fn test_input_series_is_zero_padded() {
    let series = input_series("MAT_", ".txt", 3);
    let names: Vec<_> = series.iter().map(|p| p.display().to_string()).collect();
    assert_eq!(names, ["MAT_0000.txt", "MAT_0001.txt", "MAT_0002.txt"]);
}

#[test]
fn test_parse_series_pattern_strips_placeholders() {
    let (prefix, ext) = parse_series_pattern("MAT_####.txt");
    assert_eq!(prefix, "MAT_");
    assert_eq!(ext, ".txt");

    let (prefix, ext) = parse_series_pattern("run/coords_##.dat");
    assert_eq!(prefix, "run/coords_");
    assert_eq!(ext, ".dat");
}
