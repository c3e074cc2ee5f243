use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use harmonograph::config::{Canvas, Params};
use harmonograph::ranges::{RangeTable, randomize};
use harmonograph::rng::Rng;
use harmonograph::{logging, render, svg};

#[derive(Deserialize)]
struct RenderRequest {
    params: Option<Params>,
    width: Option<u32>,
    height: Option<u32>,
    /// Also return a PNG data URL; the SVG alone is enough for the page.
    #[serde(default)]
    preview: bool,
}

#[derive(Serialize)]
struct RenderResponse {
    svg: String,
    file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<String>,
    point_count: usize,
    timings: Vec<TimingEntry>,
    width: u32,
    height: u32,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Deserialize)]
struct RandomizeRequest {
    params: Option<Params>,
    seed: Option<u64>,
}

#[derive(Serialize)]
struct Slider {
    name: &'static str,
    min: f64,
    max: f64,
    step: f64,
}

type ApiError = (StatusCode, String);

fn internal(err: impl std::fmt::Display) -> ApiError {
    warn!("request failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

fn encode_png(rgba: &[u8], canvas: Canvas) -> harmonograph::Result<String> {
    let png = render::encode_png(rgba, canvas)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{}", b64))
}

async fn ranges_handler() -> Json<Vec<Slider>> {
    let sliders: Vec<Slider> = RangeTable::sliders()
        .iter()
        .map(|(name, range)| Slider {
            name,
            min: range.min,
            max: range.max,
            step: range.step(),
        })
        .collect();
    Json(sliders)
}

async fn defaults_handler() -> Json<Params> {
    Json(Params::default())
}

fn build_response(
    params: &Params,
    canvas: Canvas,
    with_preview: bool,
) -> harmonograph::Result<RenderResponse> {
    let (drawing, timings) = harmonograph::render_drawing(params, canvas);
    let total = timings.last().map(|t| t.ms).unwrap_or_default();
    info!(points = drawing.path.len(), ms = total, "rendered");

    let preview = if with_preview {
        Some(encode_png(&drawing.rgba, canvas)?)
    } else {
        None
    };

    Ok(RenderResponse {
        file_name: svg::export_file_name(params)?,
        preview,
        point_count: drawing.path.len(),
        svg: drawing.svg,
        timings: timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect(),
        width: canvas.width,
        height: canvas.height,
    })
}

async fn render_handler(Json(req): Json<RenderRequest>) -> Result<Json<RenderResponse>, ApiError> {
    let defaults = Canvas::default();
    let canvas = Canvas {
        width: req.width.unwrap_or(defaults.width).clamp(1, 4096),
        height: req.height.unwrap_or(defaults.height).clamp(1, 4096),
    };
    let mut params = req.params.unwrap_or_default();
    RangeTable::sliders().clamp(&mut params);
    params
        .validate()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let with_preview = req.preview;
    let response = tokio::task::spawn_blocking(move || build_response(&params, canvas, with_preview))
        .await
        .map_err(internal)?
        .map_err(internal)?;

    Ok(Json(response))
}

async fn randomize_handler(Json(req): Json<RandomizeRequest>) -> Json<Params> {
    let base = req.params.unwrap_or_default();
    let mut rng = match req.seed {
        Some(seed) => Rng::new(seed),
        None => Rng::from_clock(),
    };
    Json(randomize(&base, &RangeTable::randomizable(), &mut rng))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing()?;

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/defaults", get(defaults_handler))
        .route("/api/ranges", get(ranges_handler))
        .route("/api/render", post(render_handler))
        .route("/api/randomize", post(randomize_handler))
        .fallback_service(frontend);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("harmonograph server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
