use super::curve::ParametricCurve2d;
use super::{lerp_point, Point2d, Vector2d};
use crate::error::{InputError, PathError};
use crate::util::Interval;
use smallvec::{smallvec, SmallVec};

/// Control points held inline before a buffer spills onto the heap.
/// Hand-placed robot paths rarely go beyond a cubic or quartic.
const INLINE_POINTS: usize = 8;

type PointBuf<T> = SmallVec<[T; INLINE_POINTS]>;

/// Evaluates the Bezier curve defined by `points` at parameter `t`.
///
/// The curve has degree `points.len() - 1`. `t` is not clamped, so the curve can be
/// extrapolated slightly outside `[0, 1]`, e.g. for finite differences.
///
/// # Errors
/// Returns [PathError::InvalidInput] if fewer than 2 points are given.
pub fn evaluate(points: &[Point2d], t: f64) -> Result<Point2d, PathError> {
    if points.len() < 2 {
        return Err(InputError::TooFewPoints(points.len()).into());
    }
    Ok(de_casteljau(points, t, lerp_point))
}

/// Runs de Casteljau's reduction over `values` and returns the final value.
///
/// Each pass replaces `buf[i]` with the interpolation of `buf[i]` and `buf[i + 1]`,
/// shrinking the live prefix by one until a single value remains.
/// `values` must not be empty.
pub(crate) fn de_casteljau<T: Copy>(values: &[T], t: f64, lerp: impl Fn(T, T, f64) -> T) -> T {
    let mut buf: PointBuf<T> = values.iter().copied().collect();
    for len in (2..=buf.len()).rev() {
        for i in 0..len - 1 {
            buf[i] = lerp(buf[i], buf[i + 1], t);
        }
    }
    buf[0]
}

/// A Bezier curve of arbitrary degree.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCurve2d {
    points: PointBuf<Point2d>,
}

impl BezierCurve2d {
    /// Creates a curve from its control points.
    ///
    /// # Errors
    /// Returns [PathError::InvalidInput] if there are fewer than 2 points,
    /// or if any coordinate is NaN or infinite.
    pub fn new(points: &[Point2d]) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(InputError::TooFewPoints(points.len()).into());
        }
        if let Some(idx) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(InputError::NonFinitePoint(idx).into());
        }
        Ok(Self {
            points: points.iter().copied().collect(),
        })
    }

    /// Creates a straight line between two points.
    pub fn line(start: Point2d, end: Point2d) -> Self {
        Self {
            points: smallvec![start, end],
        }
    }

    /// The degree of the curve, one less than the number of control points.
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    pub fn control_points(&self) -> &[Point2d] {
        &self.points
    }

    /// The point at `t = 0`.
    pub fn start(&self) -> Point2d {
        self.points[0]
    }

    /// The point at `t = 1`.
    pub fn end(&self) -> Point2d {
        self.points[self.points.len() - 1]
    }

    /// Splits the curve at `t` into two curves of the same degree.
    ///
    /// The first traces `[0, t]` and the second `[t, 1]` of this curve, each
    /// reparameterised over `[0, 1]`.
    pub fn subdivide(&self, t: f64) -> [BezierCurve2d; 2] {
        let n = self.points.len();
        let mut row = self.points.clone();
        let mut left = PointBuf::with_capacity(n);
        let mut right = PointBuf::with_capacity(n);
        left.push(row[0]);
        right.push(row[n - 1]);

        for len in (2..=n).rev() {
            for i in 0..len - 1 {
                row[i] = lerp_point(row[i], row[i + 1], t);
            }
            left.push(row[0]);
            right.push(row[len - 2]);
        }

        right.reverse();
        [Self { points: left }, Self { points: right }]
    }

    /// Reverses the direction of the curve.
    pub fn reverse(&mut self) {
        self.points.reverse()
    }
}

impl ParametricCurve2d for BezierCurve2d {
    fn sample(&self, t: f64) -> Point2d {
        de_casteljau(&self.points, t, lerp_point)
    }

    fn bounds(&self) -> Interval<f64> {
        Interval::UNIT
    }

    /// Samples the hodograph, the degree `n - 1` curve over `n * (p[i + 1] - p[i])`.
    fn sample_dt(&self, t: f64) -> Vector2d {
        let n = self.degree() as f64;
        let deltas: PointBuf<Vector2d> = self
            .points
            .windows(2)
            .map(|w| (w[1] - w[0]) * n)
            .collect();
        de_casteljau(&deltas, t, |a: Vector2d, b: Vector2d, t: f64| {
            a * (1.0 - t) + b * t
        })
    }
}
