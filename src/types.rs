//! Core data types for tomographic volumes

use crate::utils::format_bytes;
use std::fmt;
use std::mem;

/// Which axis convention a volume follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeKind {
    /// Projection data, in-memory axes (view, slice, channel)
    Sinogram,
    /// Reconstructed image, in-memory axes (slice, row, column)
    Reconstruction,
}

impl VolumeKind {
    /// Axis permutation taking the in-memory order to the slice-major disk order.
    ///
    /// Both permutations are their own inverse, so the same array maps disk
    /// order back to memory order.
    pub fn disk_axes(&self) -> [usize; 3] {
        match self {
            VolumeKind::Sinogram => [1, 0, 2],
            VolumeKind::Reconstruction => [0, 1, 2],
        }
    }

    /// In-memory axis index that holds the slices
    pub fn slice_axis(&self) -> usize {
        self.disk_axes()[0]
    }

    /// Axis names in memory order
    pub fn axis_names(&self) -> [&'static str; 3] {
        match self {
            VolumeKind::Sinogram => ["view", "slice", "channel"],
            VolumeKind::Reconstruction => ["slice", "row", "column"],
        }
    }
}

impl fmt::Display for VolumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeKind::Sinogram => write!(f, "sinogram"),
            VolumeKind::Reconstruction => write!(f, "reconstruction"),
        }
    }
}

/// Shape of a volume in its in-memory axis order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeShape {
    pub kind: VolumeKind,
    pub dims: [usize; 3],
}

impl VolumeShape {
    /// Create a shape from in-memory dimensions
    pub fn new(kind: VolumeKind, dims: [usize; 3]) -> Self {
        Self { kind, dims }
    }

    /// Sinogram of `num_views x num_slices x num_channels`
    pub fn sinogram(num_views: usize, num_slices: usize, num_channels: usize) -> Self {
        Self::new(VolumeKind::Sinogram, [num_views, num_slices, num_channels])
    }

    /// Reconstruction of `num_slices x num_rows x num_cols`.
    ///
    /// Arguments follow the column, row, slice order used by the read call.
    pub fn recon(num_cols: usize, num_rows: usize, num_slices: usize) -> Self {
        Self::new(VolumeKind::Reconstruction, [num_slices, num_rows, num_cols])
    }

    /// Dimensions in slice-major disk order
    pub fn disk_dims(&self) -> [usize; 3] {
        let axes = self.kind.disk_axes();
        [self.dims[axes[0]], self.dims[axes[1]], self.dims[axes[2]]]
    }

    /// Number of slice files
    pub fn num_slices(&self) -> usize {
        self.dims[self.kind.slice_axis()]
    }

    /// Rows and columns of one stored slice matrix
    pub fn slice_dims(&self) -> (usize, usize) {
        let disk = self.disk_dims();
        (disk[1], disk[2])
    }

    /// Number of samples in one slice file
    pub fn samples_per_slice(&self) -> usize {
        let (rows, cols) = self.slice_dims();
        rows * cols
    }

    /// Size in bytes of one slice file
    pub fn slice_size_bytes(&self) -> usize {
        self.samples_per_slice() * mem::size_of::<f32>()
    }

    /// Size in bytes of the whole volume
    pub fn total_size_bytes(&self) -> usize {
        self.slice_size_bytes() * self.num_slices()
    }

    /// Get a summary string of the shape
    pub fn summary(&self) -> String {
        let size_str = self
            .dims
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" x ");

        format!(
            "{} {} ({}), {} slices, {}",
            self.kind,
            size_str,
            self.kind.axis_names().join(", "),
            self.num_slices(),
            format_bytes(self.total_size_bytes())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinogram_disk_order() {
        let shape = VolumeShape::sinogram(180, 8, 256);
        assert_eq!(shape.dims, [180, 8, 256]);
        assert_eq!(shape.disk_dims(), [8, 180, 256]);
        assert_eq!(shape.num_slices(), 8);
        assert_eq!(shape.slice_dims(), (180, 256));
        assert_eq!(shape.slice_size_bytes(), 180 * 256 * 4);
    }

    #[test]
    fn test_recon_disk_order() {
        let shape = VolumeShape::recon(64, 32, 5);
        assert_eq!(shape.dims, [5, 32, 64]);
        assert_eq!(shape.disk_dims(), [5, 32, 64]);
        assert_eq!(shape.num_slices(), 5);
        assert_eq!(shape.samples_per_slice(), 32 * 64);
    }

    #[test]
    fn test_disk_axes_are_involutions() {
        for kind in [VolumeKind::Sinogram, VolumeKind::Reconstruction] {
            let axes = kind.disk_axes();
            for (i, &a) in axes.iter().enumerate() {
                assert_eq!(axes[a], i);
            }
        }
    }

    #[test]
    fn test_summary() {
        let shape = VolumeShape::sinogram(4, 2, 128);
        assert_eq!(
            shape.summary(),
            "sinogram 4 x 2 x 128 (view, slice, channel), 2 slices, 4.00 KB"
        );
    }
}
