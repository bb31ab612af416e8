//! Volume file-set access - main API for reading/writing per-slice volumes

use crate::error::{Result, VolumeError};
use crate::io::{FileSystemStorage, SliceStorage};
use crate::layout::{from_disk_order, to_disk_order, FileSet, DEFAULT_INDEX_WIDTH};
use crate::types::{VolumeKind, VolumeShape};
use crate::utils::{bytes_to_samples, samples_to_bytes};
use log::{debug, info, warn};
use ndarray::{Array3, ArrayBase, ArrayView3, Data, Dimension, Ix3};
use std::mem;

/// A volume stored as `{root}{index}{suffix}` slice files
#[derive(Debug, Clone)]
pub struct VolumeFileSet<S = FileSystemStorage> {
    root: String,
    suffix: String,
    index_width: usize,
    storage: S,
}

impl VolumeFileSet {
    /// Volume backed by the local file system
    pub fn new(root: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::with_storage(root, suffix, FileSystemStorage)
    }
}

impl<S: SliceStorage> VolumeFileSet<S> {
    /// Volume backed by a custom storage
    pub fn with_storage(root: impl Into<String>, suffix: impl Into<String>, storage: S) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
            index_width: DEFAULT_INDEX_WIDTH,
            storage,
        }
    }

    /// Set the zero-padding width of slice indices
    pub fn with_index_width(mut self, index_width: usize) -> Self {
        self.index_width = index_width;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// File names for `num_slices` slices
    pub fn file_set(&self, num_slices: usize) -> FileSet {
        let files = FileSet::new(self.root.as_str(), self.suffix.as_str(), num_slices)
            .with_index_width(self.index_width);
        if files.exceeds_index_width() {
            warn!(
                "{} slices do not fit a {}-digit index; names past the limit will not sort with the rest",
                num_slices, self.index_width
            );
        }
        files
    }

    /// Read a sinogram of shape `[num_views, num_slices, num_channels]`
    pub fn read_sinogram(
        &self,
        num_views: usize,
        num_slices: usize,
        num_channels: usize,
    ) -> Result<Array3<f32>> {
        self.read_volume(VolumeShape::sinogram(num_views, num_slices, num_channels))
    }

    /// Write a sinogram of shape `[num_views, num_slices, num_channels]`
    pub fn write_sinogram<A, D>(&self, volume: &ArrayBase<A, D>) -> Result<()>
    where
        A: Data<Elem = f32>,
        D: Dimension,
    {
        self.write_volume(VolumeKind::Sinogram, as_volume(volume)?)
    }

    /// Read a reconstruction of shape `[num_slices, num_rows, num_cols]`
    pub fn read_recon(
        &self,
        num_cols: usize,
        num_rows: usize,
        num_slices: usize,
    ) -> Result<Array3<f32>> {
        self.read_volume(VolumeShape::recon(num_cols, num_rows, num_slices))
    }

    /// Write a reconstruction of shape `[num_slices, num_rows, num_cols]`
    pub fn write_recon<A, D>(&self, volume: &ArrayBase<A, D>) -> Result<()>
    where
        A: Data<Elem = f32>,
        D: Dimension,
    {
        self.write_volume(VolumeKind::Reconstruction, as_volume(volume)?)
    }

    /// Read every slice file and assemble the volume in the in-memory order of `shape.kind`.
    ///
    /// Nothing is returned unless all slices were read in full.
    pub fn read_volume(&self, shape: VolumeShape) -> Result<Array3<f32>> {
        let files = self.file_set(shape.num_slices());
        let expected = shape.samples_per_slice();
        let max_bytes = expected * mem::size_of::<f32>();

        let mut staged = Vec::with_capacity(expected * files.len());
        for path in files.paths() {
            let bytes = self.storage.read(&path, max_bytes)?;
            if bytes.len() < max_bytes {
                return Err(VolumeError::ShapeMismatch {
                    path,
                    expected,
                    found: bytes.len() / mem::size_of::<f32>(),
                });
            }
            staged.extend(bytes_to_samples(&bytes)?);
            debug!("Read slice {}", path.display());
        }

        let staged = Array3::from_shape_vec(shape.disk_dims(), staged)
            .map_err(|e| VolumeError::InvalidShape(e.to_string()))?;
        info!("Read {}", shape.summary());

        Ok(from_disk_order(shape.kind, staged))
    }

    /// Write each slice of `volume` to its own file, slice-major, row-major within a slice.
    ///
    /// Files written before a failure are left in place.
    pub fn write_volume(&self, kind: VolumeKind, volume: ArrayView3<'_, f32>) -> Result<()> {
        let dims = volume.shape();
        let shape = VolumeShape::new(kind, [dims[0], dims[1], dims[2]]);
        let disk = to_disk_order(kind, volume);
        let files = self.file_set(shape.num_slices());

        for (slice, path) in disk.outer_iter().zip(files.paths()) {
            self.storage
                .write(&path, &samples_to_bytes(slice.iter().copied()))?;
            debug!("Wrote slice {}", path.display());
        }

        info!("Wrote {}", shape.summary());
        Ok(())
    }

    /// Remove `num_files` slice files, stopping at the first missing one
    pub fn delete(&self, num_files: usize) -> Result<()> {
        for path in self.file_set(num_files).paths() {
            self.storage.delete(&path)?;
            debug!("Deleted slice {}", path.display());
        }
        Ok(())
    }

    /// True when all `num_slices` slice files exist
    pub fn is_complete(&self, num_slices: usize) -> bool {
        self.file_set(num_slices)
            .paths()
            .iter()
            .all(|path| self.storage.exists(path))
    }
}

/// Check that a caller-supplied array is three dimensional
fn as_volume<A, D>(volume: &ArrayBase<A, D>) -> Result<ArrayView3<'_, f32>>
where
    A: Data<Elem = f32>,
    D: Dimension,
{
    volume
        .view()
        .into_dyn()
        .into_dimensionality::<Ix3>()
        .map_err(|_| {
            VolumeError::InvalidShape(format!(
                "volume must have 3 dimensions, got shape {:?}",
                volume.shape()
            ))
        })
}

/// Read a sinogram `[num_views, num_slices, num_channels]` from the file system
pub fn read_sinogram(
    root: &str,
    suffix: &str,
    num_views: usize,
    num_slices: usize,
    num_channels: usize,
) -> Result<Array3<f32>> {
    VolumeFileSet::new(root, suffix).read_sinogram(num_views, num_slices, num_channels)
}

/// Write a sinogram `[num_views, num_slices, num_channels]` to the file system
pub fn write_sinogram<A, D>(volume: &ArrayBase<A, D>, root: &str, suffix: &str) -> Result<()>
where
    A: Data<Elem = f32>,
    D: Dimension,
{
    VolumeFileSet::new(root, suffix).write_sinogram(volume)
}

/// Read a reconstruction `[num_slices, num_rows, num_cols]` from the file system
pub fn read_recon(
    root: &str,
    suffix: &str,
    num_cols: usize,
    num_rows: usize,
    num_slices: usize,
) -> Result<Array3<f32>> {
    VolumeFileSet::new(root, suffix).read_recon(num_cols, num_rows, num_slices)
}

/// Write a reconstruction `[num_slices, num_rows, num_cols]` to the file system
pub fn write_recon<A, D>(volume: &ArrayBase<A, D>, root: &str, suffix: &str) -> Result<()>
where
    A: Data<Elem = f32>,
    D: Dimension,
{
    VolumeFileSet::new(root, suffix).write_recon(volume)
}

/// Delete `num_files` slice files from the file system
pub fn delete_file_set(root: &str, suffix: &str, num_files: usize) -> Result<()> {
    VolumeFileSet::new(root, suffix).delete(num_files)
}
