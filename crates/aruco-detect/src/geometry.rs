//! Minimal 2D kernel for the fitter: lines, incremental line fits, and
//! line–line intersection. Everything is `f32`; the fitter's numerics rely
//! on plain (uncontracted) float evaluation order.

use nalgebra::{Point2, Vector2};

/// 2D cross product (z component of the 3D cross).
#[inline]
pub(crate) fn cross(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// A line given by a center point and a (unit) direction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Line {
    pub center: Point2<f32>,
    pub dir: Vector2<f32>,
}

/// Incremental total-least-squares line fit.
///
/// Accumulates raw moments and solves for the principal axis:
/// `θ = ½·atan2(2·(Σxy − Σx·Σy/n), (Σx² − Σx·x̄) − (Σy² − Σy·ȳ))`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LineFit {
    sx: f32,
    sy: f32,
    sxx: f32,
    sxy: f32,
    syy: f32,
    n: u32,
}

impl LineFit {
    pub fn add(&mut self, x: f32, y: f32) {
        self.sx += x;
        self.sy += y;
        self.sxx += x * x;
        self.sxy += x * y;
        self.syy += y * y;
        self.n += 1;
    }

    /// Solve the accumulated fit; fails with fewer than two points.
    pub fn solve(&self) -> Option<Line> {
        if self.n < 2 {
            return None;
        }
        let n = self.n as f32;
        let cx = self.sx / n;
        let cy = self.sy / n;

        let mxx = self.sxx - self.sx * cx;
        let myy = self.syy - self.sy * cy;
        let tx = mxx - myy;
        let ty = 2.0 * (self.sxy - self.sx * self.sy / n);
        let theta = 0.5 * ty.atan2(tx);

        Some(Line {
            center: Point2::new(cx, cy),
            dir: Vector2::new(theta.cos(), theta.sin()),
        })
    }
}

/// Intersect two lines; fails when they are near parallel (`|det| < 1e-3`).
pub(crate) fn intersect_lines(a: &Line, b: &Line) -> Option<Point2<f32>> {
    let (x1, y1) = (a.center.x, a.center.y);
    let (x2, y2) = (x1 + a.dir.x, y1 + a.dir.y);
    let (x3, y3) = (b.center.x, b.center.y);
    let (x4, y4) = (x3 + b.dir.x, y3 + b.dir.y);

    let det = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if det.abs() < 1e-3 {
        return None;
    }
    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / det;
    Some(Point2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fit_needs_two_points() {
        let mut fit = LineFit::default();
        assert!(fit.solve().is_none());
        fit.add(1.0, 1.0);
        assert!(fit.solve().is_none());
        fit.add(2.0, 2.0);
        assert!(fit.solve().is_some());
    }

    #[test]
    fn fit_recovers_horizontal_line() {
        let mut fit = LineFit::default();
        for x in 0..20 {
            fit.add(x as f32, 5.0);
        }
        let line = fit.solve().expect("fit");
        assert_relative_eq!(line.center.y, 5.0, epsilon = 1e-5);
        assert_relative_eq!(line.dir.y.abs(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(line.dir.x.abs(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn fit_recovers_diagonal_direction() {
        let mut fit = LineFit::default();
        for i in 0..30 {
            fit.add(i as f32, 10.0 + i as f32);
        }
        let line = fit.solve().expect("fit");
        let slope = line.dir.y / line.dir.x;
        assert_relative_eq!(slope, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn perpendicular_lines_intersect() {
        let h = Line {
            center: Point2::new(0.0, 3.0),
            dir: Vector2::new(1.0, 0.0),
        };
        let v = Line {
            center: Point2::new(7.0, 0.0),
            dir: Vector2::new(0.0, 1.0),
        };
        let p = intersect_lines(&h, &v).expect("intersection");
        assert_relative_eq!(p.x, 7.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn parallel_lines_fail() {
        let a = Line {
            center: Point2::new(0.0, 0.0),
            dir: Vector2::new(1.0, 0.0),
        };
        let b = Line {
            center: Point2::new(0.0, 1.0),
            dir: Vector2::new(1.0, 0.0),
        };
        assert!(intersect_lines(&a, &b).is_none());
    }

    #[test]
    fn cross_sign() {
        assert!(cross(Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)) > 0.0);
        assert!(cross(Vector2::new(0.0, 1.0), Vector2::new(1.0, 0.0)) < 0.0);
    }
}
