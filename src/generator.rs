//! Conversion of a Bezier curve into a profiled waypoint sequence.

use std::iter::FusedIterator;

use log::{debug, log_enabled, trace, Level};
use smallvec::SmallVec;

use crate::config::{GeneratorConfig, HeadingConvention, HeadingMode};
use crate::debug::{debug_sample, debug_speeds};
use crate::error::{ConfigError, PathError};
use crate::math::{
    approximate_length, de_casteljau, lerp, unwrap_angle, wrap_angle, BezierCurve2d,
    ParametricCurve2d, Point2d,
};
use crate::point::{ControlPoint, Pose};
use crate::profile::SpeedProfile;
use crate::waypoint::{Path, Waypoint, GENERAL_FOLLOW_RADIUS};

/// Chord count used when logging the approximate curve length.
const LENGTH_SEGMENTS: usize = 64;

/// Generates waypoint sequences for a fixed set of control points and profiles.
///
/// The generator keeps no state between calls, so generating twice with the
/// same settings gives identical paths.
#[derive(Clone, Debug)]
pub struct PathGenerator<V, A> {
    curve: BezierCurve2d,
    /// Control point headings, present if at least one control point has one.
    /// Each is unwrapped to within π of the one before it.
    headings: Option<SmallVec<[f64; 8]>>,
    velocity_profile: V,
    angular_profile: A,
}

/// A position and heading on the curve at one parameter step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Step number, from `0` to the sample count inclusive.
    pub index: usize,
    pub t: f64,
    pub position: Point2d,
    pub heading: f64,
}

/// Lazily samples a curve at evenly spaced parameter steps.
///
/// Yields `sample_count + 1` samples, the first at exactly `t = 0` and the last
/// at exactly `t = 1`.
pub struct Samples<'a> {
    curve: &'a BezierCurve2d,
    headings: Option<&'a [f64]>,
    sample_count: usize,
    step: f64,
    heading_mode: HeadingMode,
    heading_convention: HeadingConvention,
    index: usize,
}

impl<V, A> PathGenerator<V, A>
where
    V: SpeedProfile,
    A: SpeedProfile,
{
    /// Creates a generator from control points and the linear and angular profiles.
    ///
    /// # Errors
    /// Returns [PathError::InvalidInput] if there are fewer than 2 control points
    /// or any coordinate is not finite.
    pub fn new(
        control_points: &[ControlPoint],
        velocity_profile: V,
        angular_profile: A,
    ) -> Result<Self, PathError> {
        let positions: SmallVec<[Point2d; 8]> =
            control_points.iter().map(ControlPoint::position).collect();
        let curve = BezierCurve2d::new(&positions)?;
        let headings = control_points
            .iter()
            .any(|p| p.heading.is_some())
            .then(|| {
                let mut headings: SmallVec<[f64; 8]> = control_points
                    .iter()
                    .map(|p| p.heading.unwrap_or(0.0))
                    .collect();
                for i in 1..headings.len() {
                    headings[i] = unwrap_angle(headings[i - 1], headings[i]);
                }
                headings
            });

        Ok(Self {
            curve,
            headings,
            velocity_profile,
            angular_profile,
        })
    }

    pub fn curve(&self) -> &BezierCurve2d {
        &self.curve
    }

    /// Returns an iterator over the curve samples for the given settings.
    pub fn samples(&self, config: &GeneratorConfig) -> Result<Samples<'_>, PathError> {
        config.validate()?;
        Ok(Samples {
            curve: &self.curve,
            headings: self.headings.as_deref(),
            sample_count: config.sample_count,
            step: config.step(),
            heading_mode: config.heading_mode,
            heading_convention: config.heading_convention,
            index: 0,
        })
    }

    /// Samples the curve and builds the waypoint sequence.
    ///
    /// The first sample becomes the start waypoint, the last the end waypoint
    /// (carrying the configured tolerances), and every other sample a general
    /// waypoint with speeds taken from the profiles.
    ///
    /// # Errors
    /// Returns [PathError::InvalidConfiguration] if the settings are invalid or a
    /// profile returns a non-finite speed. No partial path is ever returned.
    pub fn generate(&self, config: &GeneratorConfig) -> Result<Path, PathError> {
        let samples = self.samples(config)?;
        let mut waypoints = Vec::with_capacity(samples.len());

        for sample in samples {
            let linear_speed = profile_speed(
                "linear",
                &self.velocity_profile,
                sample.t,
                config.max_linear_speed,
            )?;
            let angular_speed = profile_speed(
                "angular",
                &self.angular_profile,
                sample.t,
                config.max_angular_speed,
            )?;
            debug_speeds(sample.index, linear_speed, angular_speed);

            let pose = Pose::from_point(sample.position, sample.heading);
            let waypoint = if sample.index == 0 {
                Waypoint::Start { pose }
            } else if sample.index == config.sample_count {
                Waypoint::End {
                    pose,
                    linear_speed: 0.0,
                    angular_speed: 0.0,
                    follow_radius: 0.0,
                    position_tolerance: config.position_tolerance,
                    rotation_tolerance: config.rotation_tolerance,
                }
            } else {
                Waypoint::General {
                    pose,
                    linear_speed,
                    angular_speed,
                    follow_radius: GENERAL_FOLLOW_RADIUS,
                }
            };
            waypoints.push(waypoint);
        }

        if log_enabled!(Level::Debug) {
            debug!(
                "Generated {} waypoints from a degree {} curve (~{:.3} long, {:?} headings)",
                waypoints.len(),
                self.curve.degree(),
                approximate_length(&self.curve, LENGTH_SEGMENTS),
                config.heading_mode
            );
        }

        Ok(Path::from_waypoints(waypoints))
    }
}

/// Evaluates a profile and rejects non-finite speeds.
fn profile_speed(
    name: &'static str,
    profile: &impl SpeedProfile,
    t: f64,
    max: f64,
) -> Result<f64, PathError> {
    let value = profile.speed(t, max);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFiniteProfile { name, t, value }.into())
    }
}

impl Samples<'_> {
    fn heading_at(&self, t: f64, position: Point2d) -> f64 {
        match self.heading_mode {
            HeadingMode::Tangent => {
                let previous = self.curve.sample(t - self.step);
                self.heading_convention.heading((position - previous) / self.step)
            }
            HeadingMode::Supplied => self
                .headings
                .map_or(0.0, |headings| wrap_angle(de_casteljau(headings, t, lerp))),
        }
    }
}

impl Iterator for Samples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.index > self.sample_count {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let t = index as f64 / self.sample_count as f64;
        let position = self.curve.sample(t);
        let heading = self.heading_at(t, position);

        trace!(
            "Sample {}: t = {:.4}, ({:.4}, {:.4}) @ {:.4} rad",
            index,
            t,
            position.x,
            position.y,
            heading
        );
        debug_sample(index, t, position, heading);

        Some(Sample {
            index,
            t,
            position,
            heading,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .sample_count
            .saturating_add(1)
            .saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}

impl FusedIterator for Samples<'_> {}

/// Generates a path in one call.
///
/// `constant_heading` derives each heading from the curve tangent; otherwise
/// headings are blended from the control points.
///
/// # Errors
/// Returns [PathError::InvalidInput] for fewer than 2 control points and
/// [PathError::InvalidConfiguration] for a sample count of zero or above
/// [MAX_SAMPLE_COUNT](crate::MAX_SAMPLE_COUNT), non-positive speed caps or a
/// profile returning a non-finite speed.
pub fn generate_path<V, A>(
    control_points: &[ControlPoint],
    velocity_profile: V,
    angular_profile: A,
    sample_count: usize,
    max_linear_speed: f64,
    max_angular_speed: f64,
    constant_heading: bool,
) -> Result<Path, PathError>
where
    V: SpeedProfile,
    A: SpeedProfile,
{
    let config = GeneratorConfig::new(sample_count, max_linear_speed, max_angular_speed)
        .with_heading_mode(constant_heading);
    PathGenerator::new(control_points, velocity_profile, angular_profile)?.generate(&config)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::InputError;
    use crate::profile::ConstantProfile;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn straight() -> Vec<ControlPoint> {
        vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(10.0, 0.0)]
    }

    #[test]
    fn oversized_sample_count_is_rejected() {
        let generator = PathGenerator::new(&straight(), ConstantProfile, ConstantProfile).unwrap();
        let config = GeneratorConfig::new(usize::MAX, 1.0, 1.0);
        assert!(matches!(
            generator.samples(&config),
            Err(PathError::InvalidConfiguration(ConfigError::TooManySamples { .. }))
        ));
        assert!(matches!(
            generator.generate(&config),
            Err(PathError::InvalidConfiguration(ConfigError::TooManySamples { .. }))
        ));
    }

    #[test]
    fn sample_count_and_endpoints() {
        let generator = PathGenerator::new(&straight(), ConstantProfile, ConstantProfile).unwrap();
        let config = GeneratorConfig::new(7, 1.0, 1.0);
        let samples: Vec<_> = generator.samples(&config).unwrap().collect();

        assert_eq!(samples.len(), 8);
        assert_eq!(samples[0].t, 0.0);
        assert_eq!(samples[7].t, 1.0);
        assert_eq!(samples[7].position, Point2d::new(10.0, 0.0));
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(s.index, i);
        }
    }

    #[test]
    fn samples_size_hint() {
        let generator = PathGenerator::new(&straight(), ConstantProfile, ConstantProfile).unwrap();
        let mut samples = generator.samples(&GeneratorConfig::new(4, 1.0, 1.0)).unwrap();
        assert_eq!(samples.len(), 5);
        samples.next();
        assert_eq!(samples.len(), 4);
        samples.by_ref().for_each(drop);
        assert_eq!(samples.len(), 0);
        assert_eq!(samples.next(), None);
    }

    #[test]
    fn tangent_headings_on_a_line() {
        let diagonal = [ControlPoint::new(0.0, 0.0), ControlPoint::new(5.0, 5.0)];
        let generator = PathGenerator::new(&diagonal, ConstantProfile, ConstantProfile).unwrap();

        let compat = GeneratorConfig::new(10, 1.0, 1.0).with_heading_mode(HeadingMode::Tangent);
        for s in generator.samples(&compat).unwrap() {
            assert_approx_eq!(s.heading, FRAC_PI_4);
        }

        let east = [ControlPoint::new(0.0, 0.0), ControlPoint::new(5.0, 0.0)];
        let generator = PathGenerator::new(&east, ConstantProfile, ConstantProfile).unwrap();
        for s in generator.samples(&compat).unwrap() {
            assert_approx_eq!(s.heading, FRAC_PI_2);
        }
        let standard = compat.with_heading_convention(HeadingConvention::Standard);
        for s in generator.samples(&standard).unwrap() {
            assert_approx_eq!(s.heading, 0.0);
        }
    }

    #[test]
    fn tangent_heading_uses_backward_difference() {
        let points = [
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(4.0, 6.0),
            ControlPoint::new(10.0, 0.0),
        ];
        let generator = PathGenerator::new(&points, ConstantProfile, ConstantProfile).unwrap();
        let config = GeneratorConfig::new(8, 1.0, 1.0).with_heading_mode(true);
        let curve = generator.curve();

        for s in generator.samples(&config).unwrap() {
            let prev = curve.sample(s.t - 0.125);
            let d = (s.position - prev) * 8.0;
            assert_eq!(s.heading, d.x.atan2(d.y));
        }
    }

    #[test]
    fn supplied_headings_are_blended() {
        let points = [
            ControlPoint::with_heading(0.0, 0.0, 0.0),
            ControlPoint::new(5.0, 5.0),
            ControlPoint::with_heading(10.0, 0.0, 1.0),
        ];
        let generator = PathGenerator::new(&points, ConstantProfile, ConstantProfile).unwrap();
        let samples: Vec<_> = generator
            .samples(&GeneratorConfig::new(4, 1.0, 1.0))
            .unwrap()
            .collect();

        assert_eq!(samples[0].heading, 0.0);
        assert_eq!(samples[4].heading, 1.0);
        // Quadratic blend of (0, 0, 1) at t = 0.5
        assert_approx_eq!(samples[2].heading, 0.25);
    }

    #[test]
    fn supplied_headings_blend_across_the_seam() {
        let points = [
            ControlPoint::with_heading(0.0, 0.0, 3.1),
            ControlPoint::with_heading(10.0, 0.0, -3.1),
        ];
        let generator = PathGenerator::new(&points, ConstantProfile, ConstantProfile).unwrap();
        let samples: Vec<_> = generator
            .samples(&GeneratorConfig::new(2, 1.0, 1.0))
            .unwrap()
            .collect();

        assert_eq!(samples[0].heading, 3.1);
        assert_approx_eq!(samples[1].heading.abs(), PI);
        assert_approx_eq!(samples[2].heading, -3.1);

        // Every step turns a little, never most of a revolution
        let generator = PathGenerator::new(&points, ConstantProfile, ConstantProfile).unwrap();
        let samples: Vec<_> = generator
            .samples(&GeneratorConfig::new(20, 1.0, 1.0))
            .unwrap()
            .collect();
        for pair in samples.windows(2) {
            let turn = wrap_angle(pair[1].heading - pair[0].heading);
            assert!(turn.abs() < 0.01, "turned {} between samples", turn);
            assert!(pair[1].heading > -PI && pair[1].heading <= PI);
        }
    }

    #[test]
    fn no_supplied_headings_gives_zero() {
        let generator = PathGenerator::new(&straight(), ConstantProfile, ConstantProfile).unwrap();
        for s in generator.samples(&GeneratorConfig::new(5, 1.0, 1.0)).unwrap() {
            assert_eq!(s.heading, 0.0);
        }
    }

    #[test]
    fn control_points_are_not_modified() {
        let points = vec![
            ControlPoint::with_heading(0.0, 0.0, 0.3),
            ControlPoint::new(3.0, 4.0),
        ];
        let copy = points.clone();
        generate_path(&points, ConstantProfile, ConstantProfile, 10, 1.0, 1.0, true).unwrap();
        assert_eq!(points, copy);
    }

    #[test]
    fn angular_profile_is_independent() {
        let path = generate_path(
            &straight(),
            |_t: f64, max: f64| max,
            |t: f64, max: f64| t * max,
            4,
            2.0,
            3.0,
            false,
        )
        .unwrap();

        for (i, waypoint) in path.iter().enumerate().skip(1).take(3) {
            let t = i as f64 / 4.0;
            assert_eq!(waypoint.linear_speed(), 2.0);
            assert_approx_eq!(waypoint.angular_speed(), t * 3.0);
        }
    }

    #[test]
    fn end_waypoint_carries_tolerances() {
        let generator = PathGenerator::new(&straight(), ConstantProfile, ConstantProfile).unwrap();
        let config = GeneratorConfig::new(3, 1.0, 1.0).with_tolerances(0.2, 0.05);
        let path = generator.generate(&config).unwrap();

        match *path.end() {
            Waypoint::End {
                linear_speed,
                angular_speed,
                position_tolerance,
                rotation_tolerance,
                ..
            } => {
                assert_eq!(linear_speed, 0.0);
                assert_eq!(angular_speed, 0.0);
                assert_eq!(position_tolerance, 0.2);
                assert_eq!(rotation_tolerance, 0.05);
            }
            other => panic!("expected an end waypoint, found {:?}", other),
        }
    }

    #[test]
    fn single_step_has_no_general_waypoints() {
        let path = generate_path(&straight(), ConstantProfile, ConstantProfile, 1, 1.0, 1.0, false)
            .unwrap();
        assert_eq!(path.len(), 2);
        assert!(path[0].is_start());
        assert!(path[1].is_end());
    }

    #[test]
    fn non_finite_profile_aborts() {
        let result = generate_path(
            &straight(),
            ConstantProfile,
            |t: f64, max: f64| if t > 0.5 { f64::NAN } else { max },
            10,
            1.0,
            1.0,
            false,
        );
        assert!(matches!(
            result,
            Err(PathError::InvalidConfiguration(ConfigError::NonFiniteProfile {
                name: "angular",
                ..
            }))
        ));
    }

    #[test]
    fn invalid_inputs() {
        let result = generate_path(
            &[ControlPoint::new(1.0, 1.0)],
            ConstantProfile,
            ConstantProfile,
            10,
            1.0,
            1.0,
            false,
        );
        assert_eq!(
            result,
            Err(PathError::InvalidInput(InputError::TooFewPoints(1)))
        );

        let result =
            generate_path(&straight(), ConstantProfile, ConstantProfile, 10, 0.0, 1.0, false);
        assert!(matches!(
            result,
            Err(PathError::InvalidConfiguration(ConfigError::NonPositiveSpeed { .. }))
        ));
    }
}
