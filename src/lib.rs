//! Bezier path generation for autonomous mobile robots.
//!
//! A handful of control points define a Bezier curve of any degree. The
//! [PathGenerator] samples it at evenly spaced parameter steps and turns each
//! sample into a [Waypoint] carrying a pose and target speeds, ready for a
//! pure pursuit style follower.
//!
//! ```
//! use bezier_path::{generate_path, ConstantProfile, ControlPoint};
//!
//! let points = [ControlPoint::new(0.0, 0.0), ControlPoint::new(10.0, 0.0)];
//! let path =
//!     generate_path(&points, ConstantProfile, ConstantProfile, 10, 1.0, 0.5, false).unwrap();
//! assert_eq!(path.len(), 11);
//! assert!(path.start().is_start() && path.end().is_end());
//! ```

pub use cgmath;
pub use config::{GeneratorConfig, HeadingConvention, HeadingMode, MAX_SAMPLE_COUNT};
#[cfg(feature = "serde")]
pub use config::PathFile;
#[cfg(feature = "serde")]
pub use error::LoadError;
pub use error::{ConfigError, InputError, PathError};
pub use generator::{generate_path, PathGenerator, Sample, Samples};
pub use point::{ControlPoint, Pose};
pub use profile::{ConstantProfile, ProfileSpec, SpeedProfile, TrapezoidProfile};
pub use util::Interval;
pub use waypoint::{
    Path, Waypoint, DEFAULT_POSITION_TOLERANCE, DEFAULT_ROTATION_TOLERANCE, GENERAL_FOLLOW_RADIUS,
};

mod config;
pub mod debug;
mod error;
mod generator;
pub mod math;
mod point;
mod profile;
mod util;
mod waypoint;
