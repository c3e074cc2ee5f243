use crate::curve::{CurvePath, Point};

/// One cubic Bézier span between consecutive samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

impl Segment {
    pub fn at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            b0 * self.from.x + b1 * self.c1.x + b2 * self.c2.x + b3 * self.to.x,
            b0 * self.from.y + b1 * self.c1.y + b2 * self.c2.y + b3 * self.to.y,
        )
    }
}

/// Bézier form of a sampled curve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmoothPath {
    pub segments: Vec<Segment>,
}

/// Catmull-Rom through every sample, endpoints doubled.
pub fn smooth(path: &CurvePath) -> SmoothPath {
    let pts = &path.points;
    if pts.len() < 2 {
        return SmoothPath::default();
    }
    let last = pts.len() - 1;
    let segments = (0..last)
        .map(|i| {
            let p0 = pts[i.saturating_sub(1)];
            let p1 = pts[i];
            let p2 = pts[i + 1];
            let p3 = pts[(i + 2).min(last)];
            Segment {
                from: p1,
                c1: Point::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0),
                c2: Point::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0),
                to: p2,
            }
        })
        .collect();
    SmoothPath { segments }
}

/// Polyline with `steps` sub-samples per segment, endpoints included once.
pub fn flatten(smooth: &SmoothPath, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let Some(first) = smooth.segments.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(smooth.segments.len() * steps + 1);
    out.push(first.from);
    for seg in &smooth.segments {
        for k in 1..steps {
            out.push(seg.at(k as f64 / steps as f64));
        }
        out.push(seg.to);
    }
    out
}
