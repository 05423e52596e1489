//! Natural cubic spline through a sequence of points, as Bézier segments.

use crate::charts::{PathCommand, Point};

/// Path commands for a natural spline through `points`.
///
/// One point gives a bare move, two points a straight segment.
pub fn natural_spline(points: &[Point]) -> Vec<PathCommand> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut commands = vec![PathCommand::MoveTo(*first)];
    match points.len() {
        1 => {}
        2 => commands.push(PathCommand::LineTo(points[1])),
        _ => {
            let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
            let (ax, bx) = control_points(&xs);
            let (ay, by) = control_points(&ys);

            for i in 0..points.len() - 1 {
                commands.push(PathCommand::CubicTo(
                    Point::new(ax[i], ay[i]),
                    Point::new(bx[i], by[i]),
                    points[i + 1],
                ));
            }
        }
    }
    commands
}

/// First and second Bézier control values per segment, solved with the
/// tridiagonal system for zero second derivative at both ends.
fn control_points(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];

    a[0] = 0.0;
    b[0] = 2.0;
    r[0] = x[0] + 2.0 * x[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * x[i] + 2.0 * x[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * x[n - 1] + x[n];

    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }

    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }

    b[n - 1] = (x[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * x[i + 1] - a[i + 1];
    }

    (a, b)
}

/// Sample a cubic Bézier segment, excluding its start point.
pub fn flatten_cubic(start: Point, c1: Point, c2: Point, end: Point, steps: usize) -> Vec<Point> {
    (1..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let (w0, w1, w2, w3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            Point::new(
                w0 * start.x + w1 * c1.x + w2 * c2.x + w3 * end.x,
                w0 * start.y + w1 * c1.y + w2 * c2.y + w3 * end.y,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn two_points_make_a_line() {
        let cmds = natural_spline(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(
            cmds,
            vec![
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(1.0, 1.0)),
            ]
        );
    }

    #[test]
    fn collinear_points_stay_on_the_line() {
        let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
        for cmd in natural_spline(&points) {
            if let PathCommand::CubicTo(c1, c2, end) = cmd {
                assert_relative_eq!(c1.y, 2.0 * c1.x, epsilon = 1e-9);
                assert_relative_eq!(c2.y, 2.0 * c2.x, epsilon = 1e-9);
                assert_relative_eq!(end.y, 2.0 * end.x, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn spline_passes_through_every_point() {
        let points = [
            Point::new(0.0, 5.0),
            Point::new(10.0, 1.0),
            Point::new(20.0, 7.0),
            Point::new(30.0, 3.0),
        ];
        let cmds = natural_spline(&points);
        assert_eq!(cmds.len(), points.len());
        for (cmd, expected) in cmds.iter().skip(1).zip(points.iter().skip(1)) {
            match cmd {
                PathCommand::CubicTo(_, _, end) => assert_eq!(end, expected),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn flatten_ends_on_endpoint() {
        let p = flatten_cubic(
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 0.0),
            8,
        );
        assert_eq!(p.len(), 8);
        assert_relative_eq!(p[7].x, 3.0);
        assert_relative_eq!(p[7].y, 0.0);
    }
}
