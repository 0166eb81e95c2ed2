//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use bezier::{evaluate, BezierCurve2d};
pub(crate) use bezier::de_casteljau;
pub use curve::{approximate_length, ParametricCurve2d};
pub use util::*;

mod bezier;
mod curve;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
