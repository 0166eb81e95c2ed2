use crate::math::Point2d;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user-placed anchor that shapes a Bezier path.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    /// Desired heading in radians, blended along the path when headings are
    /// supplied rather than derived from the curve.
    #[cfg_attr(feature = "serde", serde(default))]
    pub heading: Option<f64>,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, heading: None }
    }

    pub const fn with_heading(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading: Some(heading),
        }
    }

    pub fn position(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}

impl From<Point2d> for ControlPoint {
    fn from(p: Point2d) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A position on the field together with a heading in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    pub fn from_point(position: Point2d, heading: f64) -> Self {
        Self::new(position.x, position.y, heading)
    }

    pub fn position(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}
