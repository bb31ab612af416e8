//! View-angle lists stored as plain text, one angle per line

use crate::error::{Result, VolumeError};
use std::fs;
use std::path::Path;

/// Read a list of view angles, skipping blank lines
pub fn read_angle_list(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| VolumeError::io(path, e))?;
    parse_angle_list(&text)
}

/// Parse angles from text; line numbers in errors start at 1
pub fn parse_angle_list(text: &str) -> Result<Vec<f64>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim().parse::<f64>().map_err(|_| VolumeError::InvalidAngle {
                line: i + 1,
                value: line.to_string(),
            })
        })
        .collect()
}
