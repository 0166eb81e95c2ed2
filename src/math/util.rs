use super::{Point2d, Vector2d};
use std::f64::consts::{PI, TAU};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a direction of travel is turned into a heading angle, in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeadingConvention {
    /// `atan2(dx, dy)`: zero along +y, increasing towards +x.
    ///
    /// This is the frame the existing pure pursuit followers on the robot expect.
    #[default]
    Compat,
    /// `atan2(dy, dx)`: zero along +x, increasing counter-clockwise.
    Standard,
}

impl HeadingConvention {
    /// Computes the heading of a direction vector.
    ///
    /// A zero vector has a heading of zero in either convention.
    pub fn heading(self, dir: Vector2d) -> f64 {
        match self {
            HeadingConvention::Compat => dir.x.atan2(dir.y),
            HeadingConvention::Standard => dir.y.atan2(dir.x),
        }
    }
}

/// Linearly interpolates between two scalars.
///
/// Written as `a * (1 - t) + b * t` so that `t = 0` and `t = 1` reproduce the
/// end values exactly.
#[inline(always)]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Linearly interpolates between two points, componentwise.
#[inline(always)]
pub fn lerp_point(a: Point2d, b: Point2d, t: f64) -> Point2d {
    Point2d::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Wraps an angle into `(-π, π]`. Angles already in range are returned unchanged.
pub fn wrap_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

/// Shifts `angle` by whole turns so it lies within π of `reference`.
///
/// Interpolating between `reference` and the result then takes the short way
/// round the circle.
pub fn unwrap_angle(reference: f64, angle: f64) -> f64 {
    reference + wrap_angle(angle - reference)
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn lerp_is_exact_at_ends() {
        let (a, b) = (0.1, 0.7);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_approx_eq!(lerp(a, b, 0.5), 0.4);
    }

    #[test]
    fn heading_conventions() {
        let east = Vector2d::new(1.0, 0.0);
        let north = Vector2d::new(0.0, 1.0);

        assert_approx_eq!(HeadingConvention::Compat.heading(east), FRAC_PI_2);
        assert_approx_eq!(HeadingConvention::Compat.heading(north), 0.0);
        assert_approx_eq!(HeadingConvention::Standard.heading(east), 0.0);
        assert_approx_eq!(HeadingConvention::Standard.heading(north), FRAC_PI_2);

        let zero = Vector2d::new(0.0, 0.0);
        assert_eq!(HeadingConvention::Compat.heading(zero), 0.0);
        assert_eq!(HeadingConvention::Standard.heading(zero), 0.0);
    }

    #[test]
    fn wrap_into_half_open_range() {
        assert_eq!(wrap_angle(1.0), 1.0);
        assert_eq!(wrap_angle(PI), PI);
        assert_approx_eq!(wrap_angle(-PI), PI);
        assert_approx_eq!(wrap_angle(1.0 + TAU), 1.0);
        assert_approx_eq!(wrap_angle(-1.0 - 3.0 * TAU), -1.0);
        assert_approx_eq!(wrap_angle(3.0 * PI / 2.0), -FRAC_PI_2);
    }

    #[test]
    fn unwrap_takes_the_short_way_round() {
        assert_eq!(unwrap_angle(0.0, 1.0), 1.0);
        assert_approx_eq!(unwrap_angle(3.1, -3.1), TAU - 3.1);
        assert_approx_eq!(unwrap_angle(-3.1, 3.1), 3.1 - TAU);
        assert_approx_eq!(unwrap_angle(10.0, 0.0), 4.0 * PI);
    }
}
