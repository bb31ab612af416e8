//! Utility functions

use crate::error::{Result, VolumeError};
use std::mem;

const SAMPLE_SIZE: usize = mem::size_of::<f32>();

/// Decode native-endian `f32` samples from raw bytes
pub fn bytes_to_samples(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % SAMPLE_SIZE != 0 {
        return Err(VolumeError::Serialization(
            "Byte length not aligned with f32 sample size".to_string(),
        ));
    }

    Ok(bytes
        .chunks_exact(SAMPLE_SIZE)
        .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Encode samples as native-endian raw bytes, in iteration order
pub fn samples_to_bytes<I>(samples: I) -> Vec<u8>
where
    I: IntoIterator<Item = f32>,
{
    let samples = samples.into_iter();
    let mut bytes = Vec::with_capacity(samples.size_hint().0 * SAMPLE_SIZE);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_ne_bytes());
    }
    bytes
}

/// Format byte size in human-readable form
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Render one slice file name: root, zero-padded index, suffix.
///
/// Indices wider than `width` digits are written in full, never truncated.
pub fn slice_file_name(root: &str, index: usize, width: usize, suffix: &str) -> String {
    format!("{root}{index:0width$}{suffix}")
}
