//! Space Sim - a single 2D particle under simplified gravity
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, integration, wall collisions)
//! - `renderer`: Vertex geometry for drawing the particle
//! - `platform`: The window/renderer collaborator that drives the frame loop
//! - `settings`: Data-driven simulation configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{Preset, SimSettings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (~60 Hz)
    pub const SIM_DT: f32 = 0.0167;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock delta fed into the stepper in one frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f32 = 20.0;
    pub const PARTICLE_MASS: f32 = 10.0;
    pub const LAUNCH_SPEED: f32 = 100.0;
    /// Launch angle in degrees, counter-clockwise from +x
    pub const LAUNCH_ANGLE_DEG: f32 = 65.0;

    /// Gravitational constant used by the frozen pseudo-gravity
    pub const GRAVITATIONAL_CONSTANT: f32 = 0.000000667;
    /// Scale factor applied on top of G for the frozen pseudo-gravity
    pub const GRAVITY_SCALE: f32 = 100.0;
    /// Per-step velocity damping for the fixed gravity model
    pub const VELOCITY_DAMPING: f32 = 0.995;

    /// Fraction of the wall-normal velocity lost by the legacy wall policy
    pub const LEGACY_WALL_DAMPING: f32 = 0.97;

    /// Polygon sides used to draw the particle
    pub const CIRCLE_SEGMENTS: u32 = 50;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(100.0, 65.0_f32.to_radians());
        assert!((v.x - 42.261826).abs() < 1e-3);
        assert!((v.y - 90.630779).abs() < 1e-3);
        assert!((v.length() - 100.0).abs() < 1e-3);
    }
}
