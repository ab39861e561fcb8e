//! The simulated particle
//!
//! One `ParticleBody` is built at startup and mutated in place every frame.

use glam::Vec2;

use super::collision::{Bounds, Restitution, WallHits, resolve_walls};
use super::gravity::GravityModel;
use crate::error::{SimError, ensure_positive};

/// A single particle with its gravity model
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBody {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Unused by the gravity models (acceleration is mass-independent)
    mass: f32,
    radius: f32,
    gravity: GravityModel,
}

impl ParticleBody {
    /// Create a particle. Radius and mass must be finite and positive.
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        mass: f32,
        radius: f32,
        gravity: GravityModel,
    ) -> Result<Self, SimError> {
        let radius = ensure_positive("radius", radius)?;
        let mass = ensure_positive("mass", mass)?;
        gravity.validate()?;
        Ok(Self {
            position,
            velocity,
            mass,
            radius,
            gravity,
        })
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn gravity(&self) -> &GravityModel {
        &self.gravity
    }

    /// Current acceleration from the gravity model
    pub fn acceleration(&self) -> Vec2 {
        self.gravity.acceleration_at(self.position)
    }

    /// Advance one explicit Euler step of `dt` seconds.
    ///
    /// Velocity is updated first and the new velocity moves the position.
    pub fn integrate(&mut self, dt: f32) -> Result<(), SimError> {
        let dt = ensure_positive("dt", dt)?;
        self.step(dt);
        Ok(())
    }

    /// Step backward by `dt` seconds. With no acceleration this undoes
    /// `integrate(dt)` up to float rounding.
    pub fn rewind(&mut self, dt: f32) -> Result<(), SimError> {
        let dt = ensure_positive("dt", dt)?;
        self.step(-dt);
        Ok(())
    }

    fn step(&mut self, dt: f32) {
        let acceleration = self.acceleration();
        self.velocity += acceleration * dt;
        self.velocity *= self.gravity.damping();
        self.position += self.velocity * dt;
    }

    /// Clamp the particle inside `bounds` and reflect off crossed walls
    pub fn resolve_boundary(&mut self, bounds: Bounds, restitution: Restitution) -> WallHits {
        let hits = resolve_walls(
            &mut self.position,
            &mut self.velocity,
            self.radius,
            bounds,
            restitution,
        );
        if hits.any() {
            log::debug!("Wall hit {:?} -> pos {} vel {}", hits, self.position, self.velocity);
        }
        hits
    }

    /// Legacy pointer-follow law: `velocity = (target - position) * velocity`.
    ///
    /// This is an elementwise scale, not a steering law. Velocity grows without
    /// bound while the pointer is away from the particle, and a zero velocity
    /// component stays zero.
    pub fn follow_pointer(&mut self, target: Vec2) {
        self.velocity *= target - self.position;
    }
}
