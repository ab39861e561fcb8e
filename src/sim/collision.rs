//! Wall collision detection and response
//!
//! The viewport is an axis-aligned box with its origin at (0, 0). Each axis
//! is clamped and reflected independently, so a corner hit corrects both
//! axes in the same call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, ensure_positive, ensure_unit};

/// Axis-aligned boundary rectangle anchored at the origin.
///
/// Both sides are always finite and positive; every constructor, including
/// deserialization, goes through [`Bounds::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    width: f32,
    height: f32,
}

/// Unchecked wire form of [`Bounds`]
#[derive(Deserialize)]
struct RawBounds {
    width: f32,
    height: f32,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = SimError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Bounds::new(raw.width, raw.height)
    }
}

impl Bounds {
    /// Default 800x600 viewport
    pub const VIEWPORT: Bounds = Bounds {
        width: crate::consts::VIEWPORT_WIDTH,
        height: crate::consts::VIEWPORT_HEIGHT,
    };

    /// Build bounds, rejecting non-positive or non-finite sizes
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        Ok(Self {
            width: ensure_positive("width", width)?,
            height: ensure_positive("height", height)?,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether a circle of `radius` at `position` lies fully inside (edges inclusive)
    pub fn contains_circle(&self, position: Vec2, radius: f32) -> bool {
        position.x >= radius
            && position.x <= self.width - radius
            && position.y >= radius
            && position.y <= self.height - radius
    }
}

/// Fraction of the wall-normal velocity kept after a bounce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Restitution(f32);

impl Restitution {
    /// Perfect bounce, no energy lost
    pub const ELASTIC: Restitution = Restitution(1.0);
    /// Legacy wall policy: 97% of the normal speed is absorbed
    pub const LEGACY_ABSORBING: Restitution = Restitution(1.0 - crate::consts::LEGACY_WALL_DAMPING);

    pub fn new(coefficient: f32) -> Result<Self, SimError> {
        ensure_unit("restitution", coefficient).map(Restitution)
    }

    pub fn coefficient(&self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Restitution {
    type Error = SimError;

    fn try_from(coefficient: f32) -> Result<Self, Self::Error> {
        Restitution::new(coefficient)
    }
}

impl From<Restitution> for f32 {
    fn from(restitution: Restitution) -> f32 {
        restitution.0
    }
}

impl Default for Restitution {
    fn default() -> Self {
        Restitution::ELASTIC
    }
}

/// Which walls were crossed during one boundary resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.bottom || self.top
    }
}

/// Outcome of resolving one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisHit {
    None,
    Low,
    High,
    /// Axis is narrower than the particle; it cannot move on this axis
    Wedged,
}

/// Clamp and reflect a single axis against `[0, extent]`.
///
/// The edge itself does not trigger: a particle resting exactly at
/// `radius` or `extent - radius` is left alone.
fn resolve_axis(
    pos: &mut f32,
    vel: &mut f32,
    radius: f32,
    extent: f32,
    restitution: Restitution,
) -> AxisHit {
    if extent < radius * 2.0 {
        let centered = extent / 2.0;
        if *pos == centered && *vel == 0.0 {
            return AxisHit::None;
        }
        *pos = centered;
        *vel = 0.0;
        return AxisHit::Wedged;
    }

    let hit = if *pos < radius {
        *pos = radius;
        AxisHit::Low
    } else if *pos > extent - radius {
        *pos = extent - radius;
        AxisHit::High
    } else {
        return AxisHit::None;
    };

    *vel = -*vel * restitution.coefficient();
    hit
}

/// Keep a circle inside `bounds`, reflecting velocity off any crossed wall.
///
/// Pure function of its inputs. Calling it again on its own output is a no-op.
pub fn resolve_walls(
    position: &mut Vec2,
    velocity: &mut Vec2,
    radius: f32,
    bounds: Bounds,
    restitution: Restitution,
) -> WallHits {
    let x = resolve_axis(
        &mut position.x,
        &mut velocity.x,
        radius,
        bounds.width,
        restitution,
    );
    let y = resolve_axis(
        &mut position.y,
        &mut velocity.y,
        radius,
        bounds.height,
        restitution,
    );

    if x == AxisHit::Wedged || y == AxisHit::Wedged {
        log::debug!(
            "Particle (r={}) wedged in {}x{} bounds",
            radius,
            bounds.width,
            bounds.height
        );
    }

    WallHits {
        left: x == AxisHit::Low,
        right: x == AxisHit::High,
        bottom: y == AxisHit::Low,
        top: y == AxisHit::High,
    }
}
