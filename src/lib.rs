//! MBIR volume I/O
//!
//! Reads and writes tomographic volumes as sets of flat binary slice files.
//!
//! # Layout
//!
//! - One file per slice, named `{root}{index:04}{suffix}`, indices `0..num_slices`
//! - Raw native-endian `f32`, row-major, no header; the shape comes from the caller
//! - Sinograms are `[views, slices, channels]` in memory and are stored along
//!   their second axis; reconstructions are `[slices, rows, cols]` and are
//!   stored along their first axis
//!
//! Parameter files (YAML or JSON), the reconstruction parameter checks and
//! view-angle lists live in [`config`], [`validate`] and [`angles`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mbir_volume::VolumeFileSet;
//! use ndarray::Array3;
//!
//! # fn example() -> mbir_volume::Result<()> {
//! let sino = Array3::<f32>::zeros((180, 8, 256));
//! let files = VolumeFileSet::new("/data/scan/sino_", ".2Dsinodata");
//! files.write_sinogram(&sino)?;
//! let restored = files.read_sinogram(180, 8, 256)?;
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod angles;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod types;
pub mod utils;
pub mod validate;

// Re-exports
pub use access::{
    delete_file_set, read_recon, read_sinogram, write_recon, write_sinogram, VolumeFileSet,
};
pub use config::{ConfigMap, ConfigStore, ConfigValue, JsonStore, Scalar, YamlStore};
pub use error::{Result, VolumeError};
pub use io::{FileSystemStorage, MemoryStorage, SliceStorage};
pub use layout::{enumerate_slice_files, FileSet, DEFAULT_INDEX_WIDTH};
pub use types::{VolumeKind, VolumeShape};
pub use validate::{validate, ParamWarning, ValidatedParams, WeightType};

/// Version of this crate
pub const MBIR_VOLUME_VERSION: &str = env!("CARGO_PKG_VERSION");
