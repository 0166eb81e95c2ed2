//! Speed profiles along a path.
//!
//! A profile maps the curve parameter `t` and a speed cap to the target speed at
//! that point of the path. Linear and angular speeds each get their own profile.

use crate::util::Interval;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pure function from `(t, max)` to a target speed.
///
/// Implementations must return a finite value for every `t` in `[0, 1]`.
/// Any `Fn(f64, f64) -> f64` is a profile.
pub trait SpeedProfile {
    /// The target speed at parameter `t` given the speed cap `max`.
    fn speed(&self, t: f64, max: f64) -> f64;
}

impl<F> SpeedProfile for F
where
    F: Fn(f64, f64) -> f64,
{
    fn speed(&self, t: f64, max: f64) -> f64 {
        self(t, max)
    }
}

/// Runs at the speed cap for the whole path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstantProfile;

impl SpeedProfile for ConstantProfile {
    fn speed(&self, _t: f64, max: f64) -> f64 {
        max
    }
}

/// Ramps up from a floor to the speed cap, holds, then ramps back down.
///
/// The floor keeps the follower from being asked to stand still at either end
/// of the path, where it would otherwise stall.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TrapezoidProfile {
    /// Fraction of the parameter range spent accelerating.
    pub ramp_up: f64,
    /// Fraction of the parameter range spent decelerating.
    pub ramp_down: f64,
    /// Fraction of the cap used at the very start and end, clamped to `[0, 1]`.
    pub min_fraction: f64,
}

impl Default for TrapezoidProfile {
    fn default() -> Self {
        Self {
            ramp_up: 0.2,
            ramp_down: 0.2,
            min_fraction: 0.1,
        }
    }
}

impl SpeedProfile for TrapezoidProfile {
    fn speed(&self, t: f64, max: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let up = if self.ramp_up > 0.0 { t / self.ramp_up } else { 1.0 };
        let down = if self.ramp_down > 0.0 {
            (1.0 - t) / self.ramp_down
        } else {
            1.0
        };
        let ramp = up.min(down).min(1.0);
        let floor = self.min_fraction.clamp(0.0, 1.0);
        max * Interval::new(floor, 1.0).lerp(ramp)
    }
}

/// A profile chosen by name, as read from a path file.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProfileSpec {
    #[default]
    Constant,
    Trapezoid(TrapezoidProfile),
}

impl SpeedProfile for ProfileSpec {
    fn speed(&self, t: f64, max: f64) -> f64 {
        match self {
            ProfileSpec::Constant => ConstantProfile.speed(t, max),
            ProfileSpec::Trapezoid(profile) => profile.speed(t, max),
        }
    }
}
