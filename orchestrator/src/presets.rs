//! Ready made client partitions for demonstrations.

use ml_core::Point;

const EXAMPLE_ONE_CLIENT_1: [(f64, f64); 21] = [
    (10., -9.),
    (9., -8.7),
    (8., -8.5),
    (7., -9.),
    (6., -6.5),
    (5., -6.),
    (4., -3.),
    (3., -3.),
    (2., -3.),
    (1., -2.),
    (0., 1.),
    (-1., 3.),
    (-2., 2.),
    (-3., 1.),
    (-4., 3.),
    (-5., 4.),
    (-6., 6.),
    (-7., 5.3),
    (-8., 7.8),
    (-9., 5.6),
    (-10., 9.8),
];

const EXAMPLE_ONE_CLIENT_2: [(f64, f64); 21] = [
    (10., -3.),
    (9., 0.),
    (8., -2.),
    (7., -1.),
    (6., -9.),
    (5., 0.),
    (4., 1.),
    (3., 3.1),
    (2., 2.),
    (1., 2.3),
    (0., 0.8),
    (-1., 4.),
    (-2., 4.),
    (-3., 4.5),
    (-4., 5.),
    (-5., 5.),
    (-6., 5.6),
    (-7., 4.),
    (-8., 7.),
    (-9., 7.3),
    (-10., 7.),
];

const EXAMPLE_ONE_CLIENT_3: [(f64, f64); 21] = [
    (10., -18.),
    (9., -16.),
    (8., -15.),
    (7., -14.5),
    (6., -9.),
    (5., -12.4),
    (4., -10.),
    (3., -9.1),
    (2., -8.),
    (1., -3.),
    (0., -6.6),
    (-1., -4.),
    (-2., -2.),
    (-3., 0.),
    (-4., -1.),
    (-5., 3.),
    (-6., 3.9),
    (-7., 3.),
    (-8., 5.1),
    (-9., 8.2),
    (-10., 10.),
];

/// Three noisy, downward sloping partitions of 21 points each, one per client.
///
/// The clients disagree on the intercept, so pushing them one after another
/// visibly pulls the global model in different directions.
pub fn example_one() -> Vec<Vec<Point>> {
    [
        &EXAMPLE_ONE_CLIENT_1,
        &EXAMPLE_ONE_CLIENT_2,
        &EXAMPLE_ONE_CLIENT_3,
    ]
    .into_iter()
    .map(|partition| partition.iter().copied().map(Point::from).collect())
    .collect()
}
