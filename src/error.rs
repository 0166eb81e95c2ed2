//! Errors raised while building a path.

use thiserror::Error;

/// An error that aborts path generation.
///
/// Generation never returns a partially built path: any of these errors means no
/// waypoints were produced.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PathError {
    #[error("Invalid control points: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Invalid generator configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// A problem with the control points supplied for a curve.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("a Bezier curve needs at least 2 control points, found {0}")]
    TooFewPoints(usize),

    #[error("control point {0} has a non-finite coordinate")]
    NonFinitePoint(usize),
}

/// A problem with the generator settings or speed profiles.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("the sample count must be at least 1")]
    ZeroSampleCount,

    #[error("the sample count must be at most {max}, found {count}")]
    TooManySamples { count: usize, max: usize },

    #[error("the {name} must be positive and finite, found {value}")]
    NonPositiveSpeed { name: &'static str, value: f64 },

    #[error("the {name} must be finite and not negative, found {value}")]
    NegativeTolerance { name: &'static str, value: f64 },

    #[error("the {name} profile returned {value} at t = {t}")]
    NonFiniteProfile { name: &'static str, t: f64, value: f64 },
}

/// An error that occurs while loading a path file.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot load the path file: {0}")]
    FileLoadError(#[from] std::io::Error),

    #[error("Cannot read the path file: {0}")]
    DeserialiseError(#[from] serde_json::Error),
}
