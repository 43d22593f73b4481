// Host-side tests for the point generators.

use folio_core::generate::{generate_field, generate_galaxy, FieldParams, GalaxyParams, ParamsError};
use folio_core::Rgb;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn small_galaxy() -> GalaxyParams {
    GalaxyParams {
        count: 2000,
        ..GalaxyParams::default()
    }
}

#[test]
fn field_returns_exactly_count_points() {
    let mut rng = StdRng::seed_from_u64(1);
    for count in [0u32, 1, 10, 1000] {
        let params = FieldParams::for_sections(count, 4.0, 3);
        let buf = generate_field(&params, &mut rng).unwrap();
        assert_eq!(buf.len(), count as usize);
        assert_eq!(buf.positions.len(), count as usize * 3);
        assert!(buf.colors.is_none());
    }
}

#[test]
fn field_with_zero_count_is_empty() {
    let mut rng = StdRng::seed_from_u64(2);
    let buf = generate_field(&FieldParams::for_sections(0, 4.0, 3), &mut rng).unwrap();
    assert!(buf.is_empty());
}

#[test]
fn field_spans_every_section() {
    let params = FieldParams::for_sections(5000, 4.0, 3);
    assert_eq!(params.y_top, 2.0);
    assert_eq!(params.y_bottom, -10.0);

    let mut rng = StdRng::seed_from_u64(3);
    let buf = generate_field(&params, &mut rng).unwrap();
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for i in 0..buf.len() {
        let [x, y, z] = buf.point(i);
        assert!(x.abs() <= params.half_extent);
        assert!(z.abs() <= params.half_extent);
        assert!(y <= params.y_top && y >= params.y_bottom);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    // 5000 uniform samples cover the span comfortably
    assert!(max_y > 1.0);
    assert!(min_y < -9.0);
}

#[test]
fn field_reruns_differ() {
    let params = FieldParams::for_sections(100, 4.0, 3);
    let mut rng = StdRng::seed_from_u64(4);
    let a = generate_field(&params, &mut rng).unwrap();
    let b = generate_field(&params, &mut rng).unwrap();
    assert_eq!(a.len(), b.len());
    assert_ne!(a.positions, b.positions);
}

#[test]
fn inverted_span_is_rejected() {
    let params = FieldParams {
        count: 10,
        half_extent: 5.0,
        y_top: -1.0,
        y_bottom: 1.0,
    };
    let mut rng = StdRng::seed_from_u64(5);
    assert!(matches!(
        generate_field(&params, &mut rng),
        Err(ParamsError::Span { .. })
    ));
}

#[test]
fn galaxy_returns_exactly_count_points_with_colors() {
    let mut rng = StdRng::seed_from_u64(6);
    for count in [0u32, 1, 3, 999] {
        let params = GalaxyParams {
            count,
            ..GalaxyParams::default()
        };
        let buf = generate_galaxy(&params, &mut rng).unwrap();
        assert_eq!(buf.len(), count as usize);
        let colors = buf.colors.as_ref().unwrap();
        assert_eq!(colors.len(), count as usize * 3);
    }
}

#[test]
fn galaxy_points_stay_within_scattered_radius() {
    let params = small_galaxy();
    let mut rng = StdRng::seed_from_u64(7);
    let buf = generate_galaxy(&params, &mut rng).unwrap();
    let limit = params.radius * (1.0 + std::f32::consts::SQRT_2 * params.randomness) + 1e-4;
    let y_limit = params.randomness * params.radius + 1e-4;
    for i in 0..buf.len() {
        let [x, y, z] = buf.point(i);
        assert!((x * x + z * z).sqrt() <= limit);
        assert!(y.abs() <= y_limit);
    }
}

#[test]
fn galaxy_without_randomness_lies_on_branches() {
    let params = GalaxyParams {
        count: 600,
        randomness: 0.0,
        spin: 0.0,
        branches: 3,
        ..GalaxyParams::default()
    };
    let mut rng = StdRng::seed_from_u64(8);
    let buf = generate_galaxy(&params, &mut rng).unwrap();
    for i in 0..buf.len() {
        let [x, y, z] = buf.point(i);
        assert_eq!(y, 0.0);
        let r = (x * x + z * z).sqrt();
        if r < 1e-3 {
            continue;
        }
        let expected = (i % 3) as f32 / 3.0 * std::f32::consts::TAU;
        let (sin, cos) = expected.sin_cos();
        assert!((x / r - cos).abs() < 1e-3, "point {} off its arm", i);
        assert!((z / r - sin).abs() < 1e-3, "point {} off its arm", i);
    }
}

#[test]
fn galaxy_colors_blend_from_inside_to_outside() {
    let params = GalaxyParams {
        count: 1000,
        randomness: 0.0,
        inside_color: Rgb::new(1.0, 0.0, 0.0),
        outside_color: Rgb::new(0.0, 0.0, 1.0),
        ..GalaxyParams::default()
    };
    let mut rng = StdRng::seed_from_u64(9);
    let buf = generate_galaxy(&params, &mut rng).unwrap();
    for i in 0..buf.len() {
        let [x, _, z] = buf.point(i);
        let t = (x * x + z * z).sqrt() / params.radius;
        let [r, g, b] = buf.color(i).unwrap();
        assert!((r - (1.0 - t)).abs() < 1e-3);
        assert_eq!(g, 0.0);
        assert!((b - t).abs() < 1e-3);
    }
}

#[test]
fn galaxy_rejects_invalid_params() {
    let mut rng = StdRng::seed_from_u64(10);
    let cases = [
        (GalaxyParams { radius: 0.0, ..small_galaxy() }, ParamsError::Radius(0.0)),
        (GalaxyParams { branches: 0, ..small_galaxy() }, ParamsError::NoBranches),
        (
            GalaxyParams { randomness_power: 0.5, ..small_galaxy() },
            ParamsError::RandomnessPower(0.5),
        ),
        (
            GalaxyParams { randomness: -1.0, ..small_galaxy() },
            ParamsError::Randomness(-1.0),
        ),
        (GalaxyParams { size: 0.0, ..small_galaxy() }, ParamsError::Size(0.0)),
    ];
    for (params, expected) in cases {
        assert_eq!(generate_galaxy(&params, &mut rng).unwrap_err(), expected);
    }
}

#[test]
fn galaxy_colors_stay_between_inside_and_outside() {
    let params = small_galaxy();
    let mut rng = StdRng::seed_from_u64(11);
    let buf = generate_galaxy(&params, &mut rng).unwrap();
    let a = params.inside_color.to_array();
    let b = params.outside_color.to_array();
    for i in 0..buf.len() {
        let c = buf.color(i).unwrap();
        for ch in 0..3 {
            let (lo, hi) = (a[ch].min(b[ch]), a[ch].max(b[ch]));
            assert!(c[ch] >= lo - 1e-6 && c[ch] <= hi + 1e-6);
        }
    }
}
