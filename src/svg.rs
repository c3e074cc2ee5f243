use std::fmt::Write;

use crate::config::{Canvas, Params};
use crate::error::Result;
use crate::smooth::SmoothPath;

/// Coordinates are written with this many decimals, trailing zeros dropped.
const PRECISION: usize = 3;

fn num(out: &mut String, v: f64) {
    let start = out.len();
    let _ = write!(out, "{:.*}", PRECISION, v);
    if out[start..].contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if &out[start..] == "-0" {
        out.replace_range(start.., "0");
    }
}

fn pair(out: &mut String, x: f64, y: f64) {
    num(out, x);
    out.push(',');
    num(out, y);
}

/// `d` attribute: one `M`, then a `C` per segment.
pub fn path_data(smooth: &SmoothPath) -> String {
    let mut d = String::with_capacity(smooth.segments.len() * 48 + 16);
    let Some(first) = smooth.segments.first() else {
        return d;
    };
    d.push('M');
    pair(&mut d, first.from.x, first.from.y);
    for seg in &smooth.segments {
        d.push_str(" C");
        pair(&mut d, seg.c1.x, seg.c1.y);
        d.push(' ');
        pair(&mut d, seg.c2.x, seg.c2.y);
        d.push(' ');
        pair(&mut d, seg.to.x, seg.to.y);
    }
    d
}

/// Standalone SVG document: one black, unfilled path on a canvas-sized view.
pub fn to_svg(smooth: &SmoothPath, canvas: Canvas, stroke_width: f64) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0,0,{w},{h}">"#,
        w = canvas.width,
        h = canvas.height,
    );
    out.push_str(r#"<path fill="none" stroke="black" stroke-width=""#);
    num(&mut out, stroke_width);
    out.push_str(r#"" stroke-linecap="round" stroke-linejoin="round" d=""#);
    out.push_str(&path_data(smooth));
    out.push_str(r#""/></svg>"#);
    out
}

/// Download name: `harmonograph` followed by the params as JSON.
pub fn export_file_name(params: &Params) -> Result<String> {
    Ok(format!("harmonograph{}.svg", params.to_json()?))
}
