//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Explicit timestep only
//! - No randomness
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod gravity;
pub mod tick;

pub use body::ParticleBody;
pub use collision::{Bounds, Restitution, WallHits, resolve_walls};
pub use gravity::{Falloff, GravityModel};
pub use tick::{FixedStepper, FrameInput, FrameOutput, StepReport, tick};
