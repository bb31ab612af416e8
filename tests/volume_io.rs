//! Integration tests against real slice files in a scratch directory

use mbir_volume::{
    delete_file_set, enumerate_slice_files, read_recon, read_sinogram, write_recon,
    write_sinogram, VolumeError, VolumeFileSet,
};
use ndarray::{Array2, Array3, Array4, Axis};
use std::fs;
use tempfile::TempDir;

/// Distinct value at every coordinate
fn coded_volume(dims: (usize, usize, usize)) -> Array3<f32> {
    Array3::from_shape_fn(dims, |(a, b, c)| (a * 10_000 + b * 100 + c) as f32 + 0.25)
}

fn root_in(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn read_raw_floats(path: &str) -> Vec<f32> {
    fs::read(path)
        .unwrap()
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[test]
fn test_sinogram_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "sino_");
    let sino = coded_volume((7, 4, 9));

    write_sinogram(&sino, &root, ".2Dsinodata").unwrap();
    let restored = read_sinogram(&root, ".2Dsinodata", 7, 4, 9).unwrap();

    assert_eq!(restored.shape(), &[7, 4, 9]);
    assert_eq!(restored, sino);
}

#[test]
fn test_recon_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "recon_");
    let recon = coded_volume((3, 5, 6));

    write_recon(&recon, &root, ".2Drecon").unwrap();
    let restored = read_recon(&root, ".2Drecon", 6, 5, 3).unwrap();

    assert_eq!(restored.shape(), &[3, 5, 6]);
    assert_eq!(restored, recon);
}

#[test]
fn test_round_trip_of_non_contiguous_input() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "sino_");
    let base = coded_volume((5, 4, 3));
    let reversed = base.view().reversed_axes();

    write_sinogram(&reversed, &root, ".bin").unwrap();
    assert_eq!(read_sinogram(&root, ".bin", 3, 4, 5).unwrap(), reversed);
}

#[test]
fn test_sinogram_files_hold_one_slice_each() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "sino_");
    let sino = coded_volume((3, 4, 5));
    write_sinogram(&sino, &root, ".bin").unwrap();

    for (i, name) in enumerate_slice_files(4, &root, ".bin").iter().enumerate() {
        let expected: Vec<f32> = sino.index_axis(Axis(1), i).iter().copied().collect();
        assert_eq!(read_raw_floats(name), expected, "slice {i}");
        assert_eq!(fs::metadata(name).unwrap().len(), 3 * 5 * 4);
    }
}

#[test]
fn test_recon_files_hold_first_axis_slices() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "recon_");
    let recon = coded_volume((2, 3, 4));
    write_recon(&recon, &root, ".bin").unwrap();

    let names = enumerate_slice_files(2, &root, ".bin");
    let expected: Vec<f32> = recon.index_axis(Axis(0), 1).iter().copied().collect();
    assert_eq!(read_raw_floats(&names[1]), expected);
}

#[test]
fn test_file_naming() {
    assert_eq!(
        enumerate_slice_files(5, "vol_", ".bin"),
        vec![
            "vol_0000.bin",
            "vol_0001.bin",
            "vol_0002.bin",
            "vol_0003.bin",
            "vol_0004.bin"
        ]
    );
    assert_eq!(
        enumerate_slice_files(5, "vol_", ".bin"),
        enumerate_slice_files(5, "vol_", ".bin")
    );
}

#[test]
fn test_invalid_dimensionality() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "vol_");

    let flat = Array2::<f32>::ones((4, 4));
    assert!(matches!(
        write_sinogram(&flat, &root, ".bin"),
        Err(VolumeError::InvalidShape(_))
    ));

    let deep = Array4::<f32>::ones((2, 2, 2, 2));
    assert!(matches!(
        write_recon(&deep, &root, ".bin"),
        Err(VolumeError::InvalidShape(_))
    ));

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_slice_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "recon_");
    write_recon(&coded_volume((3, 2, 2)), &root, ".bin").unwrap();
    fs::remove_file(format!("{root}0001.bin")).unwrap();

    match read_recon(&root, ".bin", 2, 2, 3) {
        Err(VolumeError::FileNotFound(path)) => {
            assert!(path.to_str().unwrap().ends_with("recon_0001.bin"));
        }
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_unreadable_slice_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "recon_");
    write_recon(&coded_volume((2, 2, 2)), &root, ".bin").unwrap();
    fs::remove_file(format!("{root}0001.bin")).unwrap();
    fs::create_dir(format!("{root}0001.bin")).unwrap();

    match read_recon(&root, ".bin", 2, 2, 2) {
        Err(VolumeError::Io { path, .. }) => {
            assert!(path.to_str().unwrap().ends_with("recon_0001.bin"));
        }
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn test_write_into_missing_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "no_such_dir/recon_");

    match write_recon(&coded_volume((1, 2, 2)), &root, ".bin") {
        Err(VolumeError::Io { path, .. }) => {
            assert!(path.to_str().unwrap().ends_with("recon_0000.bin"));
        }
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn test_short_slice_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "recon_");
    write_recon(&coded_volume((2, 2, 2)), &root, ".bin").unwrap();
    fs::write(format!("{root}0001.bin"), [0u8; 6]).unwrap();

    match read_recon(&root, ".bin", 2, 2, 2) {
        Err(VolumeError::ShapeMismatch {
            expected, found, ..
        }) => {
            assert_eq!(expected, 4);
            assert_eq!(found, 1);
        }
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "recon_");
    let recon = coded_volume((1, 2, 2));
    write_recon(&recon, &root, ".bin").unwrap();

    let path = format!("{root}0000.bin");
    let mut bytes = fs::read(&path).unwrap();
    bytes.extend_from_slice(&9.0f32.to_ne_bytes());
    fs::write(&path, bytes).unwrap();

    assert_eq!(read_recon(&root, ".bin", 2, 2, 1).unwrap(), recon);
}

#[test]
fn test_delete_file_set() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "vol_");
    write_recon(&coded_volume((3, 2, 2)), &root, ".bin").unwrap();

    delete_file_set(&root, ".bin", 3).unwrap();
    for name in enumerate_slice_files(3, &root, ".bin") {
        assert!(!std::path::Path::new(&name).exists());
    }

    assert!(matches!(
        delete_file_set(&root, ".bin", 3),
        Err(VolumeError::FileNotFound(_))
    ));
}

#[test]
fn test_overwrite_truncates_existing_slices() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "recon_");
    write_recon(&coded_volume((2, 4, 4)), &root, ".bin").unwrap();

    let smaller = coded_volume((2, 2, 2));
    write_recon(&smaller, &root, ".bin").unwrap();
    assert_eq!(fs::metadata(format!("{root}0000.bin")).unwrap().len(), 16);
    assert_eq!(read_recon(&root, ".bin", 2, 2, 2).unwrap(), smaller);
}

#[test]
fn test_custom_index_width() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_in(&temp_dir, "sino_");
    let files = VolumeFileSet::new(root.as_str(), ".bin").with_index_width(6);
    let sino = coded_volume((2, 3, 2));

    files.write_sinogram(&sino).unwrap();
    assert!(files.is_complete(3));
    assert!(temp_dir.path().join("sino_000002.bin").exists());
    assert_eq!(files.read_sinogram(2, 3, 2).unwrap(), sino);

    files.delete(3).unwrap();
    assert!(!files.is_complete(3));
}
