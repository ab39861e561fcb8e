//! Simulation settings
//!
//! Loaded from a JSON file by the native driver, or built from a preset.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, ensure_positive};
use crate::polar_to_cartesian;
use crate::sim::{Bounds, Falloff, FrameInput, GravityModel, ParticleBody, Restitution};

/// Built-in starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Frozen downward pseudo-gravity with heavy wall absorption
    #[default]
    FallingBody,
    /// Inverse-square pull toward the viewport center, elastic walls
    Attractor,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::FallingBody => "falling-body",
            Preset::Attractor => "attractor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "falling-body" | "falling" | "fixed" => Some(Preset::FallingBody),
            "attractor" | "orbit" => Some(Preset::Attractor),
            _ => None,
        }
    }
}

/// Gravity as configured; resolved into a [`GravityModel`] when the body is built
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GravitySettings {
    None,
    /// Constant `(0, -g)`
    Downward { g: f32, damping: f32 },
    /// `g = G * scale / d²`, with `d` measured once from the initial position
    Frozen {
        center: Vec2,
        gravitational_constant: f32,
        scale: f32,
        damping: f32,
    },
    Attractor {
        center: Vec2,
        strength: f32,
        falloff: Falloff,
        reference_distance: f32,
    },
}

impl GravitySettings {
    /// Resolve into a model for a particle starting at `initial_position`
    pub fn model(&self, initial_position: Vec2) -> Result<GravityModel, SimError> {
        let model = match *self {
            GravitySettings::None => GravityModel::None,
            GravitySettings::Downward { g, damping } => GravityModel::downward(g, damping),
            GravitySettings::Frozen {
                center,
                gravitational_constant,
                scale,
                damping,
            } => GravityModel::frozen(
                initial_position,
                center,
                gravitational_constant,
                scale,
                damping,
            )?,
            GravitySettings::Attractor {
                center,
                strength,
                falloff,
                reference_distance,
            } => GravityModel::Attractor {
                center,
                strength,
                falloff,
                reference_distance,
            },
        };
        model.validate()?;
        Ok(model)
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSettings {
    // === World ===
    /// Boundary rectangle (origin at bottom-left)
    pub viewport: Bounds,
    /// Fixed timestep in seconds
    pub dt: f32,
    /// Wall bounce coefficient
    pub restitution: Restitution,
    pub gravity: GravitySettings,

    // === Particle ===
    pub initial_position: Vec2,
    /// Launch speed (units/s)
    pub launch_speed: f32,
    /// Launch angle in degrees, counter-clockwise from +x
    pub launch_angle_deg: f32,
    pub mass: f32,
    pub radius: f32,

    // === Host ===
    /// Legacy pointer-follow mode
    #[serde(default)]
    pub pointer_follow: bool,
    /// Polygon sides used to draw the particle
    pub circle_segments: u32,
    /// Frames to simulate in a headless run
    pub frames: u32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl SimSettings {
    /// Create settings from a preset
    pub fn from_preset(preset: Preset) -> Self {
        let viewport = Bounds::VIEWPORT;
        let (initial_position, gravity, restitution) = match preset {
            Preset::FallingBody => (
                viewport.size() / 2.0,
                GravitySettings::Frozen {
                    center: Vec2::new(VIEWPORT_WIDTH / 2.0, 0.0),
                    gravitational_constant: GRAVITATIONAL_CONSTANT,
                    scale: GRAVITY_SCALE,
                    damping: VELOCITY_DAMPING,
                },
                Restitution::LEGACY_ABSORBING,
            ),
            Preset::Attractor => (
                Vec2::new(VIEWPORT_WIDTH * 0.375, VIEWPORT_HEIGHT / 2.0),
                GravitySettings::Attractor {
                    center: viewport.size() / 2.0,
                    strength: 4000.0,
                    falloff: Falloff::InverseSquare,
                    reference_distance: PARTICLE_RADIUS,
                },
                Restitution::ELASTIC,
            ),
        };

        Self {
            viewport,
            dt: SIM_DT,
            restitution,
            gravity,
            initial_position,
            launch_speed: LAUNCH_SPEED,
            launch_angle_deg: LAUNCH_ANGLE_DEG,
            mass: PARTICLE_MASS,
            radius: PARTICLE_RADIUS,
            pointer_follow: false,
            circle_segments: CIRCLE_SEGMENTS,
            frames: 600,
        }
    }

    /// Check every numeric field
    pub fn validate(&self) -> Result<(), SimError> {
        ensure_positive("dt", self.dt)?;
        ensure_positive("mass", self.mass)?;
        ensure_positive("radius", self.radius)?;
        if !self.launch_speed.is_finite() {
            return Err(SimError::invalid("launch_speed", self.launch_speed));
        }
        if !self.launch_angle_deg.is_finite() {
            return Err(SimError::invalid("launch_angle_deg", self.launch_angle_deg));
        }
        if !self.initial_position.is_finite() {
            return Err(SimError::invalid(
                "initial_position",
                self.initial_position.length(),
            ));
        }
        if self.circle_segments < 3 {
            return Err(SimError::invalid(
                "circle_segments",
                self.circle_segments as f32,
            ));
        }
        self.gravity.model(self.initial_position)?;
        Ok(())
    }

    /// Initial velocity from launch speed and angle
    pub fn launch_velocity(&self) -> Vec2 {
        polar_to_cartesian(self.launch_speed, self.launch_angle_deg.to_radians())
    }

    /// Build the particle described by these settings
    pub fn build_body(&self) -> Result<ParticleBody, SimError> {
        self.validate()?;
        ParticleBody::new(
            self.initial_position,
            self.launch_velocity(),
            self.mass,
            self.radius,
            self.gravity.model(self.initial_position)?,
        )
    }

    /// Frame input for the configured viewport (no pointer yet)
    pub fn frame_input(&self) -> Result<FrameInput, SimError> {
        let mut input = FrameInput::new(self.viewport);
        input.restitution = self.restitution;
        input.pointer_follow = self.pointer_follow;
        Ok(input)
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: SimSettings =
            serde_json::from_str(json).map_err(|e| SimError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Settings(e.to_string()))
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let json = fs::read_to_string(path)
            .map_err(|e| SimError::Settings(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| SimError::Settings(format!("{}: {}", path.display(), e)))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
