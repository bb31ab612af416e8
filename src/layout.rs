//! File-set layout - how a volume maps onto numbered per-slice files

use crate::types::VolumeKind;
use crate::utils::slice_file_name;
use ndarray::{Array3, ArrayView3};
use std::path::PathBuf;

/// Zero-padding width of slice indices in file names
pub const DEFAULT_INDEX_WIDTH: usize = 4;

/// Ordered names of the slice files making up one volume.
///
/// Built for a single read, write or delete call and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    root: String,
    suffix: String,
    num_files: usize,
    index_width: usize,
}

impl FileSet {
    /// Create a file set of `num_files` slices with the default index width
    pub fn new(root: impl Into<String>, suffix: impl Into<String>, num_files: usize) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
            num_files,
            index_width: DEFAULT_INDEX_WIDTH,
        }
    }

    /// Set the zero-padding width of the slice index
    pub fn with_index_width(mut self, index_width: usize) -> Self {
        self.index_width = index_width;
        self
    }

    pub fn len(&self) -> usize {
        self.num_files
    }

    pub fn is_empty(&self) -> bool {
        self.num_files == 0
    }

    pub fn index_width(&self) -> usize {
        self.index_width
    }

    /// File name of slice `index`
    pub fn name(&self, index: usize) -> String {
        slice_file_name(&self.root, index, self.index_width, &self.suffix)
    }

    /// All file names, slice 0 first
    pub fn names(&self) -> Vec<String> {
        (0..self.num_files).map(|i| self.name(i)).collect()
    }

    /// All file names as paths, slice 0 first
    pub fn paths(&self) -> Vec<PathBuf> {
        (0..self.num_files).map(|i| PathBuf::from(self.name(i))).collect()
    }

    /// True when some index needs more digits than the padding width
    pub fn exceeds_index_width(&self) -> bool {
        10usize
            .checked_pow(self.index_width as u32)
            .is_some_and(|limit| self.num_files > limit)
    }
}

/// Names of `num_slices` slice files using the default 4-digit padding
pub fn enumerate_slice_files(num_slices: usize, root: &str, suffix: &str) -> Vec<String> {
    FileSet::new(root, suffix, num_slices).names()
}

/// View an in-memory volume in slice-major disk order
pub fn to_disk_order(kind: VolumeKind, volume: ArrayView3<'_, f32>) -> ArrayView3<'_, f32> {
    volume.permuted_axes(kind.disk_axes())
}

/// Turn a slice-major staging array into the in-memory convention of `kind`.
///
/// The result is always in standard (C-contiguous) layout.
pub fn from_disk_order(kind: VolumeKind, staged: Array3<f32>) -> Array3<f32> {
    let permuted = staged.permuted_axes(kind.disk_axes());
    if permuted.is_standard_layout() {
        permuted
    } else {
        permuted.as_standard_layout().into_owned()
    }
}
