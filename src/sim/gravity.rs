//! Gravity models
//!
//! Gravity is a mass-independent acceleration. Two models exist: a constant
//! downward pull, and an attractor whose pull is recomputed from the
//! particle's current position every step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, ensure_positive, ensure_unit};

/// How attractor strength falls off with distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Falloff {
    /// `strength / d²`
    #[default]
    InverseSquare,
    /// `strength / d`
    Linear,
}

impl Falloff {
    /// Distance exponent of the falloff curve
    pub fn exponent(&self) -> i32 {
        match self {
            Falloff::InverseSquare => 2,
            Falloff::Linear => 1,
        }
    }
}

/// Acceleration model applied during integration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GravityModel {
    /// No acceleration, no damping
    #[default]
    None,
    /// Constant acceleration with per-step velocity damping.
    ///
    /// When built with [`GravityModel::frozen`] the magnitude comes from the
    /// particle's distance at construction and does not track later motion.
    Fixed { acceleration: Vec2, damping: f32 },
    /// Pull toward `center`, recomputed from the current position
    Attractor {
        center: Vec2,
        strength: f32,
        falloff: Falloff,
        /// Distances below this are treated as this distance
        reference_distance: f32,
    },
}

impl GravityModel {
    /// Constant downward gravity `(0, -g)`
    pub fn downward(g: f32, damping: f32) -> Self {
        GravityModel::Fixed {
            acceleration: Vec2::new(0.0, -g),
            damping,
        }
    }

    /// Downward gravity with `g = G * k / d²`, where `d` is measured once
    /// between `initial_position` and `center`.
    ///
    /// The result is a snapshot: it does not change as the particle moves.
    pub fn frozen(
        initial_position: Vec2,
        center: Vec2,
        gravitational_constant: f32,
        scale: f32,
        damping: f32,
    ) -> Result<Self, SimError> {
        let distance = ensure_positive("distance", initial_position.distance(center))?;
        let g = gravitational_constant * (scale / (distance * distance));
        Ok(Self::downward(g, damping))
    }

    /// Attractor pulling toward `center`
    pub fn attractor(center: Vec2, strength: f32, falloff: Falloff) -> Self {
        GravityModel::Attractor {
            center,
            strength,
            falloff,
            reference_distance: 1.0,
        }
    }

    /// Check the model's parameters
    pub fn validate(&self) -> Result<(), SimError> {
        match *self {
            GravityModel::None => Ok(()),
            GravityModel::Fixed {
                acceleration,
                damping,
            } => {
                if !acceleration.is_finite() {
                    return Err(SimError::invalid("acceleration", acceleration.length()));
                }
                ensure_unit("damping", damping).map(|_| ())
            }
            GravityModel::Attractor {
                center,
                strength,
                reference_distance,
                ..
            } => {
                if !center.is_finite() {
                    return Err(SimError::invalid("center", center.length()));
                }
                if !strength.is_finite() {
                    return Err(SimError::invalid("strength", strength));
                }
                ensure_positive("reference_distance", reference_distance).map(|_| ())
            }
        }
    }

    /// Acceleration felt by a particle at `position`
    pub fn acceleration_at(&self, position: Vec2) -> Vec2 {
        match *self {
            GravityModel::None => Vec2::ZERO,
            GravityModel::Fixed { acceleration, .. } => acceleration,
            GravityModel::Attractor {
                center,
                strength,
                falloff,
                reference_distance,
            } => {
                let offset = center - position;
                let direction = offset.normalize_or_zero();
                let distance = offset.length().max(reference_distance);
                direction * (strength / distance.powi(falloff.exponent()))
            }
        }
    }

    /// Velocity multiplier applied after each velocity update
    pub fn damping(&self) -> f32 {
        match *self {
            GravityModel::Fixed { damping, .. } => damping,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attractor_inverse_square() {
        let model = GravityModel::attractor(Vec2::new(400.0, 300.0), 4000.0, Falloff::InverseSquare);
        let accel = model.acceleration_at(Vec2::new(300.0, 300.0));
        assert!((accel.x - 0.4).abs() < 1e-6);
        assert!(accel.y.abs() < 1e-6);
    }

    #[test]
    fn test_attractor_linear_falloff() {
        let model = GravityModel::attractor(Vec2::new(400.0, 300.0), 4000.0, Falloff::Linear);
        let accel = model.acceleration_at(Vec2::new(400.0, 200.0));
        assert!(accel.x.abs() < 1e-6);
        assert!((accel.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_attractor_tracks_position() {
        let model = GravityModel::attractor(Vec2::ZERO, 100.0, Falloff::InverseSquare);
        let near = model.acceleration_at(Vec2::new(10.0, 0.0));
        let far = model.acceleration_at(Vec2::new(20.0, 0.0));
        assert!(near.x < 0.0 && far.x < 0.0);
        assert!((near.length() / far.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_attractor_at_center_is_zero() {
        let model = GravityModel::attractor(Vec2::new(5.0, 5.0), 100.0, Falloff::InverseSquare);
        assert_eq!(model.acceleration_at(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    }

    #[test]
    fn test_attractor_reference_distance_caps_magnitude() {
        let model = GravityModel::Attractor {
            center: Vec2::ZERO,
            strength: 100.0,
            falloff: Falloff::InverseSquare,
            reference_distance: 10.0,
        };
        let accel = model.acceleration_at(Vec2::new(0.5, 0.0));
        assert!((accel.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frozen_gravity_magnitude() {
        let model = GravityModel::frozen(
            Vec2::new(400.0, 300.0),
            Vec2::new(400.0, 0.0),
            6.67e-7,
            100.0,
            0.995,
        )
        .unwrap();
        let expected = 6.67e-7 * (100.0 / (300.0 * 300.0));
        let accel = model.acceleration_at(Vec2::new(0.0, 0.0));
        assert_eq!(accel.x, 0.0);
        assert!((accel.y + expected).abs() < 1e-12);
        // Snapshot: same pull anywhere
        assert_eq!(accel, model.acceleration_at(Vec2::new(400.0, 1.0)));
        assert_eq!(model.damping(), 0.995);
    }

    #[test]
    fn test_frozen_gravity_rejects_zero_distance() {
        let p = Vec2::new(400.0, 0.0);
        assert!(GravityModel::frozen(p, p, 6.67e-7, 100.0, 1.0).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(GravityModel::None.validate().is_ok());
        assert!(GravityModel::downward(9.8, 1.0).validate().is_ok());
        assert!(GravityModel::downward(9.8, 1.5).validate().is_err());
        assert!(GravityModel::downward(f32::NAN, 1.0).validate().is_err());
        let bad = GravityModel::Attractor {
            center: Vec2::ZERO,
            strength: 1.0,
            falloff: Falloff::Linear,
            reference_distance: 0.0,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_damping_only_for_fixed() {
        assert_eq!(GravityModel::None.damping(), 1.0);
        assert_eq!(
            GravityModel::attractor(Vec2::ZERO, 1.0, Falloff::Linear).damping(),
            1.0
        );
    }
}
