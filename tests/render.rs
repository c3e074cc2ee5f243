use std::f64::consts::PI;

use harmonograph::config::{Canvas, NoiseParams, Params};
use harmonograph::curve::generate;
use harmonograph::ranges::{RangeTable, randomize};
use harmonograph::rng::Rng;
use harmonograph::{render_drawing, svg};

fn reference_params() -> Params {
    Params {
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
        t_max: 100.0,
        t_incr: 0.02,
        ..Params::default()
    }
}

#[test]
fn reference_curve_is_reproducible() {
    let params = reference_params();
    let a = generate(&params, (400.0, 400.0));
    let b = generate(&params.clone(), (400.0, 400.0));
    assert_eq!(a.len(), 5000);
    let bits = |p: &harmonograph::curve::CurvePath| {
        p.points.iter().map(|q| (q.x.to_bits(), q.y.to_bits())).collect::<Vec<_>>()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn reference_curve_matches_formula() {
    let params = reference_params();
    let path = generate(&params, (0.0, 0.0));
    let i = 1234;
    let t = i as f64 * 0.02;
    let x = 160.0 * (t * 2.01).sin() + 160.0 * (t * 3.0 + 7.0 * PI / 16.0).sin();
    let y = 160.0 * (t * 3.0).sin() + 160.0 * (t * 2.0).sin();
    assert!((path.points[i].x - x).abs() < 1e-9);
    assert!((path.points[i].y - y).abs() < 1e-9);
}

#[test]
fn silent_noise_is_identity() {
    let plain = reference_params();
    let noisy = Params {
        noise: Some(NoiseParams {
            seed: 123.0,
            smoothing: 7.0,
            x_multiplier: 0.0,
            y_multiplier: 0.0,
        }),
        ..reference_params()
    };
    let canvas = Canvas::default();
    assert_eq!(generate(&plain, canvas.center()), generate(&noisy, canvas.center()));
}

#[test]
fn noisy_curve_is_reproducible() {
    let params = Params {
        noise: Some(NoiseParams { seed: 8.0, ..NoiseParams::default() }),
        ..reference_params()
    };
    assert_eq!(generate(&params, (400.0, 400.0)), generate(&params, (400.0, 400.0)));
}

#[test]
fn pipeline_produces_all_outputs() {
    let canvas = Canvas { width: 320, height: 240 };
    let params = Params { stroke_width: 2.0, t_max: 20.0, ..reference_params() };
    let (drawing, timings) = render_drawing(&params, canvas);

    assert_eq!(drawing.path.len(), 1000);
    assert_eq!(drawing.smooth.segments.len(), 999);
    assert!(drawing.svg.contains(r#"stroke-width="2""#));
    assert_eq!(drawing.rgba.len(), 320 * 240 * 4);
    assert!(drawing.rgba.chunks_exact(4).any(|px| px[0] < 128));

    let names: Vec<_> = timings.iter().map(|t| t.name).collect();
    assert_eq!(names, ["sample", "smooth", "svg", "raster", "TOTAL"]);
}

#[test]
fn randomized_params_render_and_name() {
    let base = Params { noise: Some(NoiseParams::default()), ..Params::default() };
    let mut params = randomize(&base, &RangeTable::randomizable(), &mut Rng::new(2024));
    RangeTable::sliders().clamp(&mut params);
    params.validate().unwrap();

    let name = svg::export_file_name(&params).unwrap();
    let json = &name["harmonograph".len()..name.len() - ".svg".len()];
    assert_eq!(Params::from_json(json).unwrap(), params);

    let (drawing, _) = render_drawing(&params, Canvas { width: 64, height: 64 });
    assert_eq!(drawing.path.len(), 5000);
}
