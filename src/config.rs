//! Generator settings and path files.

use crate::error::{ConfigError, PathError};
pub use crate::math::HeadingConvention;
use crate::waypoint::{DEFAULT_POSITION_TOLERANCE, DEFAULT_ROTATION_TOLERANCE};
#[cfg(feature = "serde")]
use crate::{
    error::LoadError, generator::PathGenerator, point::ControlPoint, profile::ProfileSpec,
    waypoint::Path,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The largest sample count a generator accepts.
///
/// Every sample becomes a waypoint held in memory, so the count is bounded well
/// below the point where the step index could overflow.
pub const MAX_SAMPLE_COUNT: usize = 1_000_000;

/// Where waypoint headings come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeadingMode {
    /// Headings are blended from the control points' own headings.
    /// Control points without a heading count as zero.
    #[default]
    Supplied,
    /// Headings follow the local tangent of the curve.
    Tangent,
}

impl From<bool> for HeadingMode {
    /// Maps a "constant heading" flag onto a mode; `true` derives headings
    /// from the curve tangent.
    fn from(constant_heading: bool) -> Self {
        if constant_heading {
            HeadingMode::Tangent
        } else {
            HeadingMode::Supplied
        }
    }
}

/// Settings for one generation call.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GeneratorConfig {
    /// Number of parameter steps; the path has one more waypoint than this.
    pub sample_count: usize,
    /// Cap passed to the linear speed profile.
    pub max_linear_speed: f64,
    /// Cap passed to the angular speed profile.
    pub max_angular_speed: f64,
    pub heading_mode: HeadingMode,
    pub heading_convention: HeadingConvention,
    /// Arrival distance attached to the end waypoint.
    pub position_tolerance: f64,
    /// Arrival heading error attached to the end waypoint.
    pub rotation_tolerance: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_count: 100,
            max_linear_speed: 1.0,
            max_angular_speed: 1.0,
            heading_mode: HeadingMode::default(),
            heading_convention: HeadingConvention::default(),
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
            rotation_tolerance: DEFAULT_ROTATION_TOLERANCE,
        }
    }
}

impl GeneratorConfig {
    pub fn new(sample_count: usize, max_linear_speed: f64, max_angular_speed: f64) -> Self {
        Self {
            sample_count,
            max_linear_speed,
            max_angular_speed,
            ..Default::default()
        }
    }

    pub fn with_heading_mode(mut self, heading_mode: impl Into<HeadingMode>) -> Self {
        self.heading_mode = heading_mode.into();
        self
    }

    pub fn with_heading_convention(mut self, heading_convention: HeadingConvention) -> Self {
        self.heading_convention = heading_convention;
        self
    }

    pub fn with_tolerances(mut self, position_tolerance: f64, rotation_tolerance: f64) -> Self {
        self.position_tolerance = position_tolerance;
        self.rotation_tolerance = rotation_tolerance;
        self
    }

    /// The parameter distance between consecutive samples.
    ///
    /// Tangent headings take their backward difference over this distance.
    pub fn step(&self) -> f64 {
        1.0 / self.sample_count as f64
    }

    /// Checks the settings before any sampling happens.
    pub fn validate(&self) -> Result<(), PathError> {
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSampleCount.into());
        }
        if self.sample_count > MAX_SAMPLE_COUNT {
            return Err(ConfigError::TooManySamples {
                count: self.sample_count,
                max: MAX_SAMPLE_COUNT,
            }
            .into());
        }
        for (name, value) in [
            ("max linear speed", self.max_linear_speed),
            ("max angular speed", self.max_angular_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveSpeed { name, value }.into());
            }
        }
        for (name, value) in [
            ("position tolerance", self.position_tolerance),
            ("rotation tolerance", self.rotation_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeTolerance { name, value }.into());
            }
        }
        Ok(())
    }
}

/// A complete path description: control points, settings and profiles.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathFile {
    pub control_points: Vec<ControlPoint>,
    #[serde(default)]
    pub config: GeneratorConfig,
    #[serde(default)]
    pub linear_profile: ProfileSpec,
    #[serde(default)]
    pub angular_profile: ProfileSpec,
}

#[cfg(feature = "serde")]
impl PathFile {
    /// Loads a path file from JSON on disk.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a path file from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Generates the waypoints this file describes.
    pub fn generate(&self) -> Result<Path, PathError> {
        PathGenerator::new(
            &self.control_points,
            self.linear_profile,
            self.angular_profile,
        )?
        .generate(&self.config)
    }
}
