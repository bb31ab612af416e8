//! Parameter files - a recursive value tree stored as YAML or JSON

use crate::error::{Result, VolumeError};
use ndarray::{ArrayViewD, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Top-level parameter mapping
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Leaf value of a parameter file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

/// Any value that can appear in a parameter file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    Sequence(Vec<ConfigValue>),
    Mapping(ConfigMap),
}

impl ConfigValue {
    /// Convert an array into nested sequences of floats; a 0-d array becomes a scalar
    pub fn from_array(array: ArrayViewD<'_, f32>) -> Self {
        if array.ndim() == 0 {
            let value = array.iter().next().copied().unwrap_or_default();
            return ConfigValue::from(f64::from(value));
        }
        ConfigValue::Sequence(
            array
                .axis_iter(Axis(0))
                .map(ConfigValue::from_array)
                .collect(),
        )
    }

    /// Float value; integers and other scalars do not count
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Scalar(Scalar::Float(x)) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Scalar(Scalar::Null))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Scalar(Scalar::Float(value))
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Scalar(Scalar::Int(value))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Scalar(Scalar::Bool(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Scalar(Scalar::String(value))
    }
}

impl From<Vec<f64>> for ConfigValue {
    fn from(values: Vec<f64>) -> Self {
        ConfigValue::Sequence(values.into_iter().map(ConfigValue::from).collect())
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Mapping(map)
    }
}

/// Load and save parameter mappings
pub trait ConfigStore {
    /// Read a mapping from a file
    fn load(&self, path: &Path) -> Result<ConfigMap>;

    /// Replace a file with the given mapping
    fn save(&self, path: &Path, params: &ConfigMap) -> Result<()>;
}

/// YAML parameter files
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlStore;

impl ConfigStore for YamlStore {
    fn load(&self, path: &Path) -> Result<ConfigMap> {
        let text = fs::read_to_string(path).map_err(|e| VolumeError::io(path, e))?;
        Ok(serde_yaml::from_str(&text)?)
    }

    fn save(&self, path: &Path, params: &ConfigMap) -> Result<()> {
        let text = serde_yaml::to_string(params)?;
        fs::write(path, text).map_err(|e| VolumeError::write(path, e))
    }
}

/// JSON parameter files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl ConfigStore for JsonStore {
    fn load(&self, path: &Path) -> Result<ConfigMap> {
        let text = fs::read_to_string(path).map_err(|e| VolumeError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, path: &Path, params: &ConfigMap) -> Result<()> {
        let text = serde_json::to_string_pretty(params)?;
        fs::write(path, text).map_err(|e| VolumeError::write(path, e))
    }
}

/// Pick a store from the file extension; anything but `.json` is YAML
pub fn store_for_path(path: &Path) -> Box<dyn ConfigStore> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Box::new(JsonStore),
        _ => Box::new(YamlStore),
    }
}

/// Copy of `defaults` with values replaced by `overrides` on shared keys only
pub fn parse_params(defaults: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut params = defaults.clone();
    for (key, value) in overrides {
        if let Some(slot) = params.get_mut(key) {
            *slot = value.clone();
        }
    }
    params
}

pub fn read_params(path: impl AsRef<Path>) -> Result<ConfigMap> {
    let path = path.as_ref();
    store_for_path(path).load(path)
}

pub fn write_params(path: impl AsRef<Path>, params: &ConfigMap) -> Result<()> {
    let path = path.as_ref();
    store_for_path(path).save(path, params)
}

/// Load a parameter file, set every key in `updates`, and save it back
pub fn modify_params(path: impl AsRef<Path>, updates: &ConfigMap) -> Result<()> {
    let path = path.as_ref();
    let store = store_for_path(path);
    let mut params = store.load(path)?;
    params.extend(updates.iter().map(|(k, v)| (k.clone(), v.clone())));
    store.save(path, &params)
}

/// Human-readable dump, one `key: value` per line, nested mappings indented
pub fn format_params(params: &ConfigMap) -> String {
    let mut out = String::new();
    write_mapping(&mut out, params, 0);
    out
}

fn write_mapping(out: &mut String, params: &ConfigMap, depth: usize) {
    let indent = "    ".repeat(depth);
    for (key, value) in params {
        match value {
            ConfigValue::Mapping(inner) => {
                out.push_str(&format!("{indent}{key}:\n"));
                write_mapping(out, inner, depth + 1);
            }
            other => out.push_str(&format!("{indent}{key}: {other}\n")),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Scalar(s) => write!(f, "{}", s),
            ConfigValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ConfigValue::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
