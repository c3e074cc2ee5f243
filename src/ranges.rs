use std::f64::consts::TAU;

use serde::Serialize;

use crate::config::Params;
use crate::rng::Rng;

/// Declared bounds of one control.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub decimals: u32,
}

impl Range {
    pub const fn new(min: f64, max: f64, decimals: u32) -> Self {
        Self { min, max, decimals }
    }

    /// Slider step implied by the precision.
    pub fn step(&self) -> f64 {
        10f64.powi(-(self.decimals as i32))
    }

    /// Round to the declared precision, staying inside `[min, max]`.
    pub fn quantize(&self, v: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        let mut q = (v * scale).round() / scale;
        if q > self.max {
            q = (self.max * scale).floor() / scale;
        }
        if q < self.min {
            q = (self.min * scale).ceil() / scale;
        }
        q
    }
}

/// Ordered `name -> Range` table. Order fixes the sequence of RNG draws.
#[derive(Clone, Debug, Default)]
pub struct RangeTable {
    entries: Vec<(&'static str, Range)>,
}

const AMPLITUDE: Range = Range::new(0.0, 500.0, 0);
const FREQUENCY: Range = Range::new(0.0, 10.0, 2);
const PHASE: Range = Range::new(0.0, TAU, 3);
const DAMPING: Range = Range::new(0.0, 0.1, 4);

const OSCILLATOR_FIELDS: [[&str; 4]; 4] = [
    ["a1", "f1", "p1", "d1"],
    ["a2", "f2", "p2", "d2"],
    ["a3", "f3", "p3", "d3"],
    ["a4", "f4", "p4", "d4"],
];

impl RangeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, range: Range) -> Self {
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, range));
        self
    }

    fn with_oscillators(mut self) -> Self {
        for [a, f, p, d] in OSCILLATOR_FIELDS {
            self = self
                .with(a, AMPLITUDE)
                .with(f, FREQUENCY)
                .with(p, PHASE)
                .with(d, DAMPING);
        }
        self
    }

    fn with_noise(self) -> Self {
        self.with("seed", Range::new(0.0, 1000.0, 0))
            .with("smoothing", Range::new(1.0, 500.0, 0))
            .with("xMultiplier", Range::new(0.0, 100.0, 0))
            .with("yMultiplier", Range::new(0.0, 100.0, 0))
    }

    /// Bounds of every control slider.
    pub fn sliders() -> Self {
        Self::new()
            .with("t_max", Range::new(0.0, 1000.0, 0))
            .with("t_incr", Range::new(0.01, 1.0, 2))
            .with_oscillators()
            .with("strokeWidth", Range::new(0.5, 5.0, 1))
            .with_noise()
    }

    /// What "Randomize" touches: the oscillators and the noise, not the sweep
    /// or the stroke.
    pub fn randomizable() -> Self {
        Self::new().with_oscillators().with_noise()
    }

    pub fn get(&self, name: &str) -> Option<Range> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, r)| *r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Range)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pull every ranged field into bounds.
    pub fn clamp(&self, params: &mut Params) {
        for (name, range) in self.iter() {
            if let Some(v) = params.get(name) {
                params.set(name, v.clamp(range.min, range.max));
            }
        }
    }
}

/// Draw each ranged field uniformly from its range at its precision. Fields
/// with no entry, and noise fields while noise is off, keep `base` values.
pub fn randomize(base: &Params, table: &RangeTable, rng: &mut Rng) -> Params {
    let mut params = base.clone();
    for (name, range) in table.iter() {
        let v = range.quantize(rng.range_f64(range.min, range.max));
        params.set(name, v);
    }
    params
}
