use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One damped pendulum term: `amplitude * sin(t * frequency + phase) * exp(-damping * t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub damping: f64,
}

impl Oscillator {
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        self.amplitude * (t * self.frequency + self.phase).sin() * (-self.damping * t).exp()
    }
}

/// Coherent-noise displacement. Present on `Params` means enabled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseParams {
    #[serde(default)]
    pub seed: f64,
    #[serde(default = "NoiseParams::default_smoothing")]
    pub smoothing: f64,
    #[serde(default = "NoiseParams::default_multiplier")]
    pub x_multiplier: f64,
    #[serde(default = "NoiseParams::default_multiplier")]
    pub y_multiplier: f64,
}

impl NoiseParams {
    fn default_smoothing() -> f64 {
        100.0
    }
    fn default_multiplier() -> f64 {
        20.0
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0.0,
            smoothing: Self::default_smoothing(),
            x_multiplier: Self::default_multiplier(),
            y_multiplier: Self::default_multiplier(),
        }
    }
}

/// All tunable parameters — exposed as UI sliders in the frontend.
///
/// Field names and order follow the exported file name format, so keep
/// `strokeWidth` first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    pub t_max: f64,
    pub t_incr: f64,

    pub a1: f64,
    pub f1: f64,
    pub p1: f64,
    pub d1: f64,

    pub a2: f64,
    pub f2: f64,
    pub p2: f64,
    pub d2: f64,

    pub a3: f64,
    pub f3: f64,
    pub p3: f64,
    pub d3: f64,

    pub a4: f64,
    pub f4: f64,
    pub p4: f64,
    pub d4: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseParams>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            stroke_width: 1.0,
            t_max: 100.0,
            t_incr: 0.02,
            a1: 160.0,
            f1: 2.01,
            p1: 0.0,
            d1: 0.0,
            a2: 160.0,
            f2: 3.0,
            p2: 7.0 * PI / 16.0,
            d2: 0.0,
            a3: 160.0,
            f3: 3.0,
            p3: 0.0,
            d3: 0.0,
            a4: 160.0,
            f4: 2.0,
            p4: 0.0,
            d4: 0.0,
            noise: None,
        }
    }
}

/// Every addressable field name, in serialization order.
pub const FIELD_NAMES: [&str; 23] = [
    "strokeWidth", "t_max", "t_incr",
    "a1", "f1", "p1", "d1",
    "a2", "f2", "p2", "d2",
    "a3", "f3", "p3", "d3",
    "a4", "f4", "p4", "d4",
    "seed", "smoothing", "xMultiplier", "yMultiplier",
];

/// Name -> field lookup shared by the shared and mutable accessors.
macro_rules! named_field {
    ($params:expr, $name:expr, $as_ref:ident, $($borrow:tt)+) => {{
        let field = match $name {
            "strokeWidth" => $($borrow)+ $params.stroke_width,
            "t_max" => $($borrow)+ $params.t_max,
            "t_incr" => $($borrow)+ $params.t_incr,
            "a1" => $($borrow)+ $params.a1,
            "f1" => $($borrow)+ $params.f1,
            "p1" => $($borrow)+ $params.p1,
            "d1" => $($borrow)+ $params.d1,
            "a2" => $($borrow)+ $params.a2,
            "f2" => $($borrow)+ $params.f2,
            "p2" => $($borrow)+ $params.p2,
            "d2" => $($borrow)+ $params.d2,
            "a3" => $($borrow)+ $params.a3,
            "f3" => $($borrow)+ $params.f3,
            "p3" => $($borrow)+ $params.p3,
            "d3" => $($borrow)+ $params.d3,
            "a4" => $($borrow)+ $params.a4,
            "f4" => $($borrow)+ $params.f4,
            "p4" => $($borrow)+ $params.p4,
            "d4" => $($borrow)+ $params.d4,
            _ => {
                let noise = $params.noise.$as_ref()?;
                match $name {
                    "seed" => $($borrow)+ noise.seed,
                    "smoothing" => $($borrow)+ noise.smoothing,
                    "xMultiplier" => $($borrow)+ noise.x_multiplier,
                    "yMultiplier" => $($borrow)+ noise.y_multiplier,
                    _ => return None,
                }
            }
        };
        Some(field)
    }};
}

impl Params {
    /// The two oscillators driving x, then the two driving y.
    pub fn oscillators(&self) -> [Oscillator; 4] {
        let osc = |amplitude, frequency, phase, damping| Oscillator {
            amplitude,
            frequency,
            phase,
            damping,
        };
        [
            osc(self.a1, self.f1, self.p1, self.d1),
            osc(self.a2, self.f2, self.p2, self.d2),
            osc(self.a3, self.f3, self.p3, self.d3),
            osc(self.a4, self.f4, self.p4, self.d4),
        ]
    }

    fn field(&self, name: &str) -> Option<&f64> {
        named_field!(self, name, as_ref, &)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut f64> {
        named_field!(self, name, as_mut, &mut)
    }

    /// Read a field by name. Noise fields read as `None` while noise is off.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.field(name).copied()
    }

    /// Write a field by name. Returns false for unknown names and for noise
    /// fields while noise is off.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                *field = value;
                true
            }
            None => false,
        }
    }

    /// Reject values the sweep cannot run on. Range limits are the
    /// control layer's job, see `RangeTable::clamp`.
    pub fn validate(&self) -> Result<()> {
        for name in FIELD_NAMES {
            if let Some(v) = self.get(name) {
                if !v.is_finite() {
                    return Err(Error::InvalidParam { name, reason: "must be finite" });
                }
            }
        }
        if self.t_incr <= 0.0 {
            return Err(Error::InvalidParam { name: "t_incr", reason: "must be positive" });
        }
        if self.stroke_width <= 0.0 {
            return Err(Error::InvalidParam { name: "strokeWidth", reason: "must be positive" });
        }
        if let Some(noise) = &self.noise {
            if noise.smoothing <= 0.0 {
                return Err(Error::InvalidParam { name: "smoothing", reason: "must be positive" });
            }
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let params: Params = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Drawing surface. The curve is centered on it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 800, height: 800 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_original_names_in_order() {
        let json = Params::default().to_json().unwrap();
        assert!(json.starts_with(r#"{"strokeWidth":1.0,"t_max":100.0,"t_incr":0.02,"a1":160.0"#));
        assert!(!json.contains("noise"));
    }

    #[test]
    fn json_round_trip_with_noise() {
        let params = Params {
            noise: Some(NoiseParams { seed: 3.0, ..NoiseParams::default() }),
            ..Params::default()
        };
        let back = Params::from_json(&params.to_json().unwrap()).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let params = Params::from_json(r#"{"a1": 50, "noise": {"seed": 9}}"#).unwrap();
        assert_eq!(params.a1, 50.0);
        assert_eq!(params.f1, 2.01);
        let noise = params.noise.unwrap();
        assert_eq!(noise.seed, 9.0);
        assert_eq!(noise.smoothing, 100.0);
    }

    #[test]
    fn rejects_non_positive_step() {
        let err = Params::from_json(r#"{"t_incr": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidParam { name: "t_incr", .. }));
    }

    #[test]
    fn named_access() {
        let mut params = Params::default();
        assert!(params.set("d3", 0.01));
        assert_eq!(params.get("d3"), Some(0.01));
        assert!(!params.set("bogus", 1.0));
        assert!(!params.set("seed", 4.0));
        assert_eq!(params.get("seed"), None);

        params.noise = Some(NoiseParams::default());
        assert!(params.set("seed", 4.0));
        assert_eq!(params.get("seed"), Some(4.0));
    }

    #[test]
    fn every_field_name_reads_back_what_was_set() {
        let mut params = Params { noise: Some(NoiseParams::default()), ..Params::default() };
        for (i, name) in FIELD_NAMES.iter().enumerate() {
            assert!(params.set(name, i as f64 + 0.5), "{name} not settable");
        }
        for (i, name) in FIELD_NAMES.iter().enumerate() {
            assert_eq!(params.get(name), Some(i as f64 + 0.5), "{name}");
        }
        assert_eq!(params.d2, 10.5);
        assert_eq!(params.noise.unwrap().y_multiplier, 22.5);
    }

    #[test]
    fn oscillator_evaluate() {
        let osc = Oscillator { amplitude: 2.0, frequency: 1.0, phase: PI / 2.0, damping: 0.0 };
        assert!((osc.evaluate(0.0) - 2.0).abs() < 1e-12);
        let damped = Oscillator { damping: 1.0, ..osc };
        assert!((damped.evaluate(1.0) - 2.0 * (1.0 + PI / 2.0).sin() * (-1.0f64).exp()).abs() < 1e-12);
    }
}
