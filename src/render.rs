use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use rayon::prelude::*;

use crate::config::Canvas;
use crate::curve::Point;
use crate::error::Result;
use crate::smooth::{SmoothPath, flatten};

const PAPER: [u8; 4] = [255, 255, 255, 255];
const INK: [u8; 4] = [0, 0, 0, 255];

/// Sub-samples per Bézier segment when rasterizing.
const FLATTEN_STEPS: usize = 4;

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

/// Line segment with its vertical extent, padded by the stroke radius.
struct Span {
    a: Point,
    b: Point,
    y0: f64,
    y1: f64,
}

#[inline]
fn dist_to_segment(px: f64, py: f64, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((px - a.x) * dx + (py - a.y) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * dx - px, a.y + t * dy - py);
    (cx * cx + cy * cy).sqrt()
}

/// Rasterize the path as a black anti-aliased stroke on white, RGBA8.
pub fn render_rgba(smooth: &SmoothPath, canvas: Canvas, stroke_width: f64) -> Vec<u8> {
    let w = canvas.width as usize;
    let h = canvas.height as usize;
    let mut rgba = vec![0u8; w * h * 4];
    for px in rgba.chunks_exact_mut(4) {
        px.copy_from_slice(&PAPER);
    }
    if w == 0 || h == 0 {
        return rgba;
    }

    // Coverage falls off over one pixel around the stroke edge.
    let radius = (stroke_width / 2.0).max(0.5);
    let reach = radius + 0.5;
    let polyline = flatten(smooth, FLATTEN_STEPS);
    let spans: Vec<Span> = polyline
        .windows(2)
        .map(|pair| Span {
            a: pair[0],
            b: pair[1],
            y0: pair[0].y.min(pair[1].y) - reach,
            y1: pair[0].y.max(pair[1].y) + reach,
        })
        .collect();

    rgba.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let cy = y as f64 + 0.5;
            let near: Vec<&Span> = spans.iter().filter(|s| cy >= s.y0 && cy <= s.y1).collect();
            if near.is_empty() {
                return;
            }
            for s in near {
                let x0 = (s.a.x.min(s.b.x) - reach).floor().max(0.0) as usize;
                let x1 = ((s.a.x.max(s.b.x) + reach).ceil().max(0.0) as usize).min(w);
                for x in x0..x1 {
                    let d = dist_to_segment(x as f64 + 0.5, cy, s.a, s.b);
                    let coverage = (radius + 0.5 - d).clamp(0.0, 1.0) as f32;
                    if coverage <= 0.0 {
                        continue;
                    }
                    let out = &mut row[x * 4..x * 4 + 4];
                    // Darkest contribution wins, so overlaps do not accumulate.
                    let color = lerp_color(PAPER, INK, coverage);
                    if color[0] < out[0] {
                        out.copy_from_slice(&color);
                    }
                }
            }
        });

    rgba
}

/// PNG-encode an RGBA8 buffer.
pub fn encode_png(rgba: &[u8], canvas: Canvas) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        rgba,
        canvas.width,
        canvas.height,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurvePath;
    use crate::smooth::smooth;

    fn pixel(rgba: &[u8], w: usize, x: usize, y: usize) -> [u8; 4] {
        let i = (y * w + x) * 4;
        [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
    }

    #[test]
    fn horizontal_line_inks_its_row_only() {
        let canvas = Canvas { width: 40, height: 20 };
        let path = CurvePath { points: vec![Point::new(5.0, 10.5), Point::new(35.0, 10.5)] };
        let rgba = render_rgba(&smooth(&path), canvas, 1.0);
        assert_eq!(rgba.len(), 40 * 20 * 4);
        assert_eq!(pixel(&rgba, 40, 20, 10), INK);
        assert_eq!(pixel(&rgba, 40, 20, 2), PAPER);
        assert_eq!(pixel(&rgba, 40, 2, 10), PAPER);
    }

    #[test]
    fn wider_stroke_covers_more() {
        let canvas = Canvas { width: 50, height: 50 };
        let path = CurvePath { points: vec![Point::new(10.0, 25.0), Point::new(40.0, 25.0)] };
        let ink = |width| {
            render_rgba(&smooth(&path), canvas, width)
                .chunks_exact(4)
                .filter(|px| px[0] < 128)
                .count()
        };
        assert!(ink(5.0) > ink(1.0));
    }

    #[test]
    fn empty_path_is_blank() {
        let canvas = Canvas { width: 8, height: 8 };
        let rgba = render_rgba(&SmoothPath::default(), canvas, 1.0);
        assert!(rgba.chunks_exact(4).all(|px| px == PAPER));
    }

    #[test]
    fn png_has_signature() {
        let canvas = Canvas { width: 4, height: 4 };
        let png = encode_png(&render_rgba(&SmoothPath::default(), canvas, 1.0), canvas).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
