//! Waypoints handed to a trajectory follower.

use crate::point::Pose;
use cgmath::prelude::*;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Distance from the end pose within which the path counts as complete, in field units.
pub const DEFAULT_POSITION_TOLERANCE: f64 = 0.05;

/// Heading error at the end pose within which the path counts as complete, in radians.
pub const DEFAULT_ROTATION_TOLERANCE: f64 = 0.01;

/// Follow radius given to every interior waypoint.
/// Negative zero leaves the lookahead to the follower.
pub const GENERAL_FOLLOW_RADIUS: f64 = -0.0;

/// A single annotated point of a generated path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(tag = "kind"))]
pub enum Waypoint {
    /// Where the path begins.
    Start { pose: Pose },
    /// An interior point the follower drives through without stopping.
    General {
        pose: Pose,
        linear_speed: f64,
        angular_speed: f64,
        follow_radius: f64,
    },
    /// Where the path ends. The follower stops once within both tolerances.
    End {
        pose: Pose,
        linear_speed: f64,
        angular_speed: f64,
        follow_radius: f64,
        position_tolerance: f64,
        rotation_tolerance: f64,
    },
}

impl Waypoint {
    pub fn pose(&self) -> Pose {
        match *self {
            Waypoint::Start { pose } => pose,
            Waypoint::General { pose, .. } => pose,
            Waypoint::End { pose, .. } => pose,
        }
    }

    /// The target linear speed, zero for the start and end.
    pub fn linear_speed(&self) -> f64 {
        match *self {
            Waypoint::Start { .. } => 0.0,
            Waypoint::General { linear_speed, .. } => linear_speed,
            Waypoint::End { linear_speed, .. } => linear_speed,
        }
    }

    /// The target angular speed, zero for the start and end.
    pub fn angular_speed(&self) -> f64 {
        match *self {
            Waypoint::Start { .. } => 0.0,
            Waypoint::General { angular_speed, .. } => angular_speed,
            Waypoint::End { angular_speed, .. } => angular_speed,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Waypoint::Start { .. })
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Waypoint::End { .. })
    }
}

/// An ordered, immutable sequence of waypoints.
///
/// The first waypoint is always a [Waypoint::Start], the last always a
/// [Waypoint::End], and everything between is [Waypoint::General].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Path {
    waypoints: Vec<Waypoint>,
}

impl Path {
    pub(crate) fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        debug_assert!(waypoints.len() >= 2);
        debug_assert!(waypoints[0].is_start());
        debug_assert!(waypoints[waypoints.len() - 1].is_end());
        Self { waypoints }
    }

    /// The number of waypoints, including the start and end.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false: a path holds at least a start and an end.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn start(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    pub fn end(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn into_vec(self) -> Vec<Waypoint> {
        self.waypoints
    }

    /// The length of the polyline through all waypoints.
    pub fn length(&self) -> f64 {
        self.waypoints
            .iter()
            .map(|w| w.pose().position())
            .tuple_windows()
            .map(|(a, b)| a.distance(b))
            .sum()
    }
}

impl Index<usize> for Path {
    type Output = Waypoint;

    fn index(&self, index: usize) -> &Waypoint {
        &self.waypoints[index]
    }
}

impl IntoIterator for Path {
    type Item = Waypoint;
    type IntoIter = std::vec::IntoIter<Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

impl From<Path> for Vec<Waypoint> {
    fn from(path: Path) -> Self {
        path.waypoints
    }
}
