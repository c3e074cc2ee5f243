pub mod config;
pub mod curve;
pub mod error;
pub mod logging;
pub mod noise;
pub mod ranges;
pub mod render;
pub mod rng;
pub mod smooth;
pub mod svg;

use std::time::Instant;

use config::{Canvas, Params};
use curve::CurvePath;
use smooth::SmoothPath;

pub use error::{Error, Result};

pub struct Drawing {
    pub canvas: Canvas,
    pub path: CurvePath,
    pub smooth: SmoothPath,
    pub svg: String,
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Run the full pipeline: sample, smooth, serialize and rasterize.
pub fn render_drawing(params: &Params, canvas: Canvas) -> (Drawing, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Sample the pendulum sweep
    let t = Instant::now();
    let path = curve::generate(params, canvas.center());
    timings.push(Timing {
        name: "sample",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });
    tracing::debug!(points = path.len(), bounds = ?path.bounds(), "sampled curve");

    // 2. Bézier smoothing
    let t = Instant::now();
    let smooth = smooth::smooth(&path);
    timings.push(Timing {
        name: "smooth",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. SVG
    let t = Instant::now();
    let svg = svg::to_svg(&smooth, canvas, params.stroke_width);
    timings.push(Timing {
        name: "svg",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 4. Raster preview
    let t = Instant::now();
    let rgba = render::render_rgba(&smooth, canvas, params.stroke_width);
    timings.push(Timing {
        name: "raster",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    let drawing = Drawing {
        canvas,
        path,
        smooth,
        svg,
        rgba,
    };

    (drawing, timings)
}
