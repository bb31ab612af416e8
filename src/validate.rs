//! Reconstruction parameter checks.
//!
//! Invalid values are replaced by defaults and reported as warnings; nothing
//! here fails. Only float values count as floats, so `2` is rejected where
//! `2.0` is accepted.

use crate::config::{ConfigMap, ConfigValue};
use log::warn;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_P: f64 = 1.2;
pub const DEFAULT_Q: f64 = 2.0;

/// Noise weighting applied to the sinogram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightType {
    Unweighted,
    Transmission,
    TransmissionRoot,
    Emission,
}

impl WeightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightType::Unweighted => "unweighted",
            WeightType::Transmission => "transmission",
            WeightType::TransmissionRoot => "transmission_root",
            WeightType::Emission => "emission",
        }
    }
}

impl FromStr for WeightType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unweighted" => Ok(WeightType::Unweighted),
            "transmission" => Ok(WeightType::Transmission),
            "transmission_root" => Ok(WeightType::TransmissionRoot),
            "emission" => Ok(WeightType::Emission),
            _ => Err(()),
        }
    }
}

/// A substituted parameter value
#[derive(Debug, Clone, PartialEq)]
pub struct ParamWarning {
    pub parameter: &'static str,
    pub message: String,
}

impl fmt::Display for ParamWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parameter, self.message)
    }
}

/// Parameters after clamping
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParams {
    pub p: f64,
    pub q: f64,
    pub delta_channel: Option<f64>,
    pub delta_pixel: Option<f64>,
    pub roi_radius: Option<f64>,
    pub weight_type: Option<WeightType>,
}

impl ValidatedParams {
    /// Store the checked values back into a parameter mapping.
    ///
    /// Parameters left unset stay absent from the mapping.
    pub fn write_into(&self, params: &mut ConfigMap) {
        params.insert("p".into(), ConfigValue::from(self.p));
        params.insert("q".into(), ConfigValue::from(self.q));
        let optional = [
            ("delta_channel", self.delta_channel),
            ("delta_pixel", self.delta_pixel),
            ("roi_radius", self.roi_radius),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.insert(key.into(), ConfigValue::from(value));
            }
        }
        if let Some(weight_type) = self.weight_type {
            params.insert("weight_type".into(), ConfigValue::from(weight_type.as_str()));
        }
    }
}

#[derive(Default)]
struct Warnings(Vec<ParamWarning>);

impl Warnings {
    fn push(&mut self, parameter: &'static str, message: String) {
        warn!("Parameter {}: {}", parameter, message);
        self.0.push(ParamWarning { parameter, message });
    }
}

/// Check `p`, `q`, the spacing parameters and `weight_type`, substituting defaults
pub fn validate(raw: &ConfigMap) -> (ValidatedParams, Vec<ParamWarning>) {
    let mut warnings = Warnings::default();

    let (p, q) = check_pq(raw.get("p"), raw.get("q"), &mut warnings);
    let delta_channel = check_delta_channel(
        raw.get("delta_channel"),
        raw.get("delta_pixel"),
        &mut warnings,
    );
    let delta_pixel = check_positive("delta_pixel", raw.get("delta_pixel"), &mut warnings);
    let roi_radius = check_positive("roi_radius", raw.get("roi_radius"), &mut warnings);
    let weight_type = check_weight_type(raw.get("weight_type"), &mut warnings);

    let params = ValidatedParams {
        p,
        q,
        delta_channel,
        delta_pixel,
        roi_radius,
        weight_type,
    };
    (params, warnings.0)
}

#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_pq(
    p: Option<&ConfigValue>,
    q: Option<&ConfigValue>,
    warnings: &mut Warnings,
) -> (f64, f64) {
    let mut q = match q.and_then(ConfigValue::as_f64) {
        Some(q) => q,
        None => {
            warnings.push("q", format!("not a float; setting q = {DEFAULT_Q:?}"));
            DEFAULT_Q
        }
    };
    let mut p = match p.and_then(ConfigValue::as_f64) {
        Some(p) => p,
        None => {
            warnings.push("p", format!("not a float; setting p = {DEFAULT_P:?}"));
            DEFAULT_P
        }
    };

    if !(1.0..=2.0).contains(&q) {
        warnings.push("q", format!("{q} outside [1, 2]; setting q = 2.0"));
        q = 2.0;
    }

    if !(p >= 1.0) {
        warnings.push("p", format!("{p} < 1; setting p = 1.0"));
        p = 1.0;
    }
    if !(p <= 2.0) {
        warnings.push("p", format!("{p} > 2; setting p = 2.0"));
        p = 2.0;
    }

    if !(p < q) {
        warnings.push("p", format!("p = {p} is not below q = {q}; setting p = q"));
        p = q;
    }

    (p, q)
}

fn check_positive(
    parameter: &'static str,
    value: Option<&ConfigValue>,
    warnings: &mut Warnings,
) -> Option<f64> {
    let value = value.filter(|v| !v.is_null())?;
    match value.as_f64() {
        Some(x) if x > 0.0 => Some(x),
        _ => {
            warnings.push(
                parameter,
                format!("{value} is not a positive float; setting {parameter} = 1.0"),
            );
            Some(1.0)
        }
    }
}

/// `delta_channel` is only checked when `delta_pixel` is set; otherwise a
/// float passes through unchanged and any other value is left in the mapping.
fn check_delta_channel(
    delta_channel: Option<&ConfigValue>,
    delta_pixel: Option<&ConfigValue>,
    warnings: &mut Warnings,
) -> Option<f64> {
    if delta_pixel.map_or(true, ConfigValue::is_null) {
        return delta_channel.and_then(ConfigValue::as_f64);
    }
    match delta_channel.and_then(ConfigValue::as_f64) {
        Some(x) if x > 0.0 => Some(x),
        _ => {
            let shown = delta_channel.map_or_else(|| "missing".to_string(), |v| v.to_string());
            warnings.push(
                "delta_channel",
                format!("{shown} is not a positive float; setting delta_channel = 1.0"),
            );
            Some(1.0)
        }
    }
}

fn check_weight_type(value: Option<&ConfigValue>, warnings: &mut Warnings) -> Option<WeightType> {
    let value = value.filter(|v| !v.is_null())?;
    match value.as_str().map(WeightType::from_str) {
        Some(Ok(weight_type)) => Some(weight_type),
        _ => {
            warnings.push(
                "weight_type",
                format!("{value} is not a known weighting; setting weight_type = unweighted"),
            );
            Some(WeightType::Unweighted)
        }
    }
}
