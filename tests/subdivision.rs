use approx::assert_relative_eq;
use nalgebra::{Point2, Rotation2, Similarity2, Translation2, Vector2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use subdivo::prelude::*;

const SCHEMES: [SubdivisionScheme; 3] = [
    SubdivisionScheme::BSpline,
    SubdivisionScheme::DynLevin,
    SubdivisionScheme::CatmullRom,
];

fn random_points(rng: &mut StdRng, count: usize) -> Vec<Point2<f64>> {
    (0..count)
        .map(|_| {
            Point2::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
            )
        })
        .collect()
}

fn zigzag() -> Vec<Point2<f64>> {
    vec![
        Point2::new(0., 0.),
        Point2::new(2., 5.),
        Point2::new(4., -1.),
        Point2::new(7., 3.),
        Point2::new(9., 0.),
        Point2::new(12., 6.),
    ]
}

#[test]
fn affine_invariance() {
    let similarity = Similarity2::new(Vector2::new(4., -2.), 0.6, 2.5);
    let matrix = similarity.to_homogeneous();

    for scheme in [SubdivisionScheme::BSpline, SubdivisionScheme::DynLevin] {
        for open in [true, false] {
            let config = CurveConfig::default()
                .with_scheme(scheme)
                .with_degree(3)
                .with_resolution(3)
                .with_open(open);
            let points = zigzag();
            let fine = subdivide(&points, &config);
            let mapped = subdivide(&points.transformed(&matrix), &config);
            assert_eq!(fine.len(), mapped.len());
            for (a, b) in fine.iter().zip(mapped.iter()) {
                assert_relative_eq!(matrix.transform_point(a.point()), *b.point(), epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn weights_sum_to_one_for_random_polygons() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let count = rng.random_range(3..12);
        let points = random_points(&mut rng, count);
        let degree = rng.random_range(2..7);
        let resolution = rng.random_range(0..5);
        let open = rng.random_bool(0.5);
        let tension = rng.random_range(0.0..1.0);
        for scheme in SCHEMES {
            let config = CurveConfig::default()
                .with_scheme(scheme)
                .with_degree(degree)
                .with_resolution(resolution)
                .with_open(open)
                .with_tension(tension);
            for s in subdivide(&points, &config) {
                assert_relative_eq!(s.weights().sum(), 1.0, epsilon = 1e-9);
                assert_relative_eq!(s.weights().evaluate(&points), *s.point(), epsilon = 1e-6);
            }
        }
    }
}

#[test]
fn dyn_levin_interpolates_previous_level() {
    for open in [true, false] {
        for resolution in 0..4 {
            let config = CurveConfig::default()
                .with_scheme(SubdivisionScheme::DynLevin)
                .with_open(open);
            let coarse = subdivide(&zigzag(), &config.with_resolution(resolution));
            let fine = subdivide(&zigzag(), &config.with_resolution(resolution + 1));
            for (i, s) in coarse.iter().enumerate() {
                assert_relative_eq!(*s.point(), *fine[i * 2].point(), epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn closed_curves_repeat_their_first_sample() {
    let points = vec![
        Point2::new(0., 0.),
        Point2::new(0., 10.),
        Point2::new(10., 10.),
        Point2::new(10., 0.),
    ];
    for scheme in SCHEMES {
        for resolution in 0..=3 {
            let config = CurveConfig::default()
                .with_scheme(scheme)
                .with_resolution(resolution)
                .with_open(false);
            let curve = SubdivisionEngine::try_new(points.clone(), config).unwrap();
            let fine = curve.fine_samples();
            assert_eq!(fine.first().unwrap().point(), fine.last().unwrap().point());
        }
    }
}

#[test]
fn catmull_rom_passes_through_control_points() {
    for tension in [0., 0.5, 1.] {
        let config = CurveConfig::default()
            .with_scheme(SubdivisionScheme::CatmullRom)
            .with_resolution(2)
            .with_tension(tension);
        let points = zigzag();
        let fine = subdivide(&points, &config);
        // every window contributes 4 samples after its start
        assert_eq!(fine.len(), (points.len() - 1) * 4 + 1);
        for (i, p) in points.iter().enumerate() {
            assert_relative_eq!(*fine[i * 4].point(), *p, epsilon = 1e-9);
        }
    }
}

#[test]
fn incremental_moves_match_full_subdivision() {
    let mut rng = StdRng::seed_from_u64(42);
    for scheme in SCHEMES {
        for open in [true, false] {
            let config = CurveConfig::default()
                .with_scheme(scheme)
                .with_degree(4)
                .with_resolution(3)
                .with_open(open);
            let mut points = zigzag();
            let mut curve = SubdivisionEngine::try_new(points.clone(), config).unwrap();
            for _ in 0..5 {
                let index = rng.random_range(0..points.len());
                let target = Point2::new(rng.random_range(-5.0..15.0), rng.random_range(-5.0..5.0));
                points[index] = target;
                curve
                    .adjust_points(&PointMap::from([(index, target)]))
                    .unwrap();
            }
            let fresh = SubdivisionEngine::try_new(points, config).unwrap();
            for (a, b) in curve.fine_samples().iter().zip(fresh.fine_samples()) {
                assert_relative_eq!(*a.point(), *b.point(), epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn arclength_is_monotonic() {
    let mut curve = SubdivisionEngine::try_new(
        zigzag(),
        CurveConfig::default().with_degree(3).with_resolution(4),
    )
    .unwrap();
    let table = curve.arclength_table();
    let cumulative = table.cumulative();
    assert_relative_eq!(cumulative[0], 0.);
    assert_relative_eq!(cumulative[cumulative.len() - 1], 1.);
    assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));

    let mut previous = 0.;
    for i in 0..=20 {
        let u = i as f64 / 20.;
        let location = curve.eval_at(u).unwrap();
        assert!(location.u() >= previous);
        previous = location.u();
    }
}

#[test]
fn eval_and_closest_point_agree() {
    let mut curve = SubdivisionEngine::try_new(
        zigzag(),
        CurveConfig::default()
            .with_scheme(SubdivisionScheme::CatmullRom)
            .with_resolution(3),
    )
    .unwrap();
    for u in [0.1, 0.35, 0.5, 0.8] {
        let location = curve.eval_at(u).unwrap();
        let hit = curve.closest_point(location.point()).unwrap();
        assert_relative_eq!(hit.distance(), 0., epsilon = 1e-9);
        assert_relative_eq!(hit.u(), u, epsilon = 1e-9);
    }
}

#[test]
fn transformed_engine_matches_transformed_points() {
    let transform = (Translation2::new(1., 2.) * Rotation2::new(1.1)).to_homogeneous();
    let config = CurveConfig::default().with_degree(3).with_resolution(3);
    let curve = SubdivisionEngine::try_new(zigzag(), config).unwrap();
    let moved = curve.transformed(&transform);
    let fresh = SubdivisionEngine::try_new(zigzag().transformed(&transform), config).unwrap();
    for (a, b) in moved.fine_points().iter().zip(fresh.fine_points().iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-9);
    }
}
