use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use harmonograph::config::{Canvas, NoiseParams, Params};
use harmonograph::ranges::{RangeTable, randomize};
use harmonograph::rng::Rng;
use harmonograph::{Drawing, logging, render, svg};

/// Longest single path component most filesystems accept.
const MAX_FILE_NAME: usize = 255;

/// Same per-side cap as the server.
const MAX_SIDE: i64 = 4096;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a harmonograph curve to SVG")]
struct Args {
    /// Params JSON file; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "artifacts")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..=MAX_SIDE))]
    width: u32,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..=MAX_SIDE))]
    height: u32,

    /// Redraw the oscillators (and noise, if enabled) at random
    #[arg(long)]
    randomize: bool,

    /// RNG seed for --randomize; clock-derived when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Enable noise displacement with default settings
    #[arg(long)]
    noise: bool,

    #[arg(long)]
    noise_seed: Option<f64>,

    #[arg(long)]
    smoothing: Option<f64>,

    #[arg(long)]
    x_multiplier: Option<f64>,

    #[arg(long)]
    y_multiplier: Option<f64>,

    /// Also write a PNG preview
    #[arg(long)]
    png: bool,
}

impl Args {
    fn wants_noise(&self) -> bool {
        self.noise
            || self.noise_seed.is_some()
            || self.smoothing.is_some()
            || self.x_multiplier.is_some()
            || self.y_multiplier.is_some()
    }

    fn params(&self) -> anyhow::Result<Params> {
        let mut params = match &self.config {
            Some(path) => Params::load(path)
                .with_context(|| format!("failed to load params from {}", path.display()))?,
            None => Params::default(),
        };

        if self.wants_noise() {
            let noise = params.noise.get_or_insert_with(NoiseParams::default);
            if let Some(v) = self.noise_seed {
                noise.seed = v;
            }
            if let Some(v) = self.smoothing {
                noise.smoothing = v;
            }
            if let Some(v) = self.x_multiplier {
                noise.x_multiplier = v;
            }
            if let Some(v) = self.y_multiplier {
                noise.y_multiplier = v;
            }
        }

        if self.randomize {
            let mut rng = match self.seed {
                Some(seed) => Rng::new(seed),
                None => Rng::from_clock(),
            };
            params = randomize(&params, &RangeTable::randomizable(), &mut rng);
        }

        RangeTable::sliders().clamp(&mut params);
        params.validate()?;
        Ok(params)
    }
}

/// Write the SVG under its export name, or under `harmonograph.svg` with a
/// sidecar `harmonograph.json` when that name is too long for the filesystem.
/// Returns every path written.
fn write_artifacts(
    drawing: &Drawing,
    params: &Params,
    out_dir: &Path,
    png: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let write = |name: &str, bytes: &[u8]| -> anyhow::Result<PathBuf> {
        let path = out_dir.join(name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("saved {}", path.display());
        Ok(path)
    };

    let mut written = Vec::new();
    let export_name = svg::export_file_name(params)?;
    if export_name.len() <= MAX_FILE_NAME {
        written.push(write(&export_name, drawing.svg.as_bytes())?);
    } else {
        written.push(write("harmonograph.svg", drawing.svg.as_bytes())?);
        written.push(write("harmonograph.json", params.to_json()?.as_bytes())?);
    }

    if png {
        let bytes = render::encode_png(&drawing.rgba, drawing.canvas)?;
        written.push(write("harmonograph.png", &bytes)?);
    }
    Ok(written)
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing()?;
    let args = Args::parse();
    let params = args.params()?;
    let canvas = Canvas {
        width: args.width,
        height: args.height,
    };

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    info!(
        width = canvas.width,
        height = canvas.height,
        noise = params.noise.is_some(),
        "rendering harmonograph"
    );

    let (drawing, timings) = harmonograph::render_drawing(&params, canvas);

    for t in &timings {
        info!("{:10} {:8.1} ms", t.name, t.ms);
    }
    info!(points = drawing.path.len(), "curve sampled");

    write_artifacts(&drawing, &params, &args.out_dir, args.png)?;
    Ok(())
}
