use rayon::prelude::*;
use serde::Serialize;

use crate::config::{NoiseParams, Params};
use crate::noise::{gradient_noise3, linear_remap};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sampled curve, in sweep order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CurvePath {
    pub points: Vec<Point>,
}

impl CurvePath {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min_x, min_y, max_x, max_y)`, or None when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.points.first()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(self.points.iter().fold(init, |(x0, y0, x1, y1), p| {
            (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
        }))
    }
}

/// Number of `i >= 0` with `i * t_incr < t_max`.
pub fn sample_count(t_max: f64, t_incr: f64) -> usize {
    if !(t_incr > 0.0) || !t_incr.is_finite() || !(t_max > 0.0) || !t_max.is_finite() {
        return 0;
    }
    let mut n = (t_max / t_incr).ceil() as usize;
    while n > 0 && (n - 1) as f64 * t_incr >= t_max {
        n -= 1;
    }
    while (n as f64) * t_incr < t_max {
        n += 1;
    }
    n
}

/// Displacement added to both axes. The x and y offsets share one noise
/// query; only the multipliers differ.
#[inline]
pub fn noise_offset(x: f64, y: f64, noise: &NoiseParams) -> (f64, f64) {
    let n = gradient_noise3(x / noise.smoothing, y / noise.smoothing, noise.seed);
    let offset = linear_remap(n, -1.0, 1.0, 0.0, 1.0);
    (offset * noise.x_multiplier, offset * noise.y_multiplier)
}

/// Sweep `t` over `[0, t_max)` in `t_incr` steps and trace the four damped
/// oscillators around `center`, displacing each point by noise if enabled.
pub fn generate(params: &Params, center: (f64, f64)) -> CurvePath {
    let [o1, o2, o3, o4] = params.oscillators();
    let noise = params.noise;
    let n = sample_count(params.t_max, params.t_incr);

    let points = (0..n)
        .into_par_iter()
        .map(|i| {
            let t = i as f64 * params.t_incr;
            let mut x = o1.evaluate(t) + o2.evaluate(t) + center.0;
            let mut y = o3.evaluate(t) + o4.evaluate(t) + center.1;
            if let Some(noise) = &noise {
                let (dx, dy) = noise_offset(x, y, noise);
                x += dx;
                y += dy;
            }
            Point::new(x, y)
        })
        .collect();

    CurvePath { points }
}
