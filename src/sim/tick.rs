//! Per-frame simulation step
//!
//! Runs one frame in a fixed order: pointer follow (optional), boundary
//! resolution, integration, then hands position and radius to the renderer.

use glam::Vec2;

use super::body::ParticleBody;
use super::collision::{Bounds, Restitution, WallHits};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::error::{SimError, ensure_positive};

/// Everything the host supplies for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Current viewport, used as the boundary rectangle
    pub viewport: Bounds,
    /// Pointer position in simulation coordinates (y up), if known
    pub pointer: Option<Vec2>,
    /// Legacy pointer-follow mode
    pub pointer_follow: bool,
    /// Wall bounce coefficient
    pub restitution: Restitution,
}

impl FrameInput {
    pub fn new(viewport: Bounds) -> Self {
        Self {
            viewport,
            pointer: None,
            pointer_follow: false,
            restitution: Restitution::default(),
        }
    }
}

/// What the renderer needs after a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub position: Vec2,
    pub radius: f32,
    pub hits: WallHits,
}

/// Advance the particle by one frame of `dt` seconds.
///
/// `dt` is checked before anything is mutated, so a rejected frame leaves
/// the body untouched.
pub fn tick(body: &mut ParticleBody, input: &FrameInput, dt: f32) -> Result<FrameOutput, SimError> {
    let dt = ensure_positive("dt", dt)?;

    if input.pointer_follow {
        if let Some(target) = input.pointer {
            body.follow_pointer(target);
        }
    }

    let hits = body.resolve_boundary(input.viewport, input.restitution);
    body.integrate(dt)?;

    Ok(FrameOutput {
        position: body.position,
        radius: body.radius(),
        hits,
    })
}

/// Summary of one `FixedStepper::advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Fixed steps run this frame
    pub steps: u32,
    /// Steps that hit at least one wall
    pub wall_hits: u32,
    /// Whether the frame was dropped because of an error
    pub skipped: bool,
    /// Output of the last successful step
    pub last: Option<FrameOutput>,
}

/// Fixed-timestep accumulator for hosts with a variable frame rate
#[derive(Debug, Clone)]
pub struct FixedStepper {
    dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedStepper {
    pub fn new(dt: f32) -> Result<Self, SimError> {
        Ok(Self {
            dt: ensure_positive("dt", dt)?,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        })
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Time banked but not yet simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed `frame_dt` seconds of wall time and run as many fixed steps as fit.
    ///
    /// Invalid frame deltas and failing steps drop the frame instead of
    /// stopping the loop.
    pub fn advance(
        &mut self,
        body: &mut ParticleBody,
        input: &FrameInput,
        frame_dt: f32,
    ) -> StepReport {
        let mut report = StepReport::default();

        let frame_dt = match ensure_positive("frame_dt", frame_dt) {
            Ok(dt) => dt.min(MAX_FRAME_DT),
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                report.skipped = true;
                return report;
            }
        };
        self.accumulator += frame_dt;

        while self.accumulator >= self.dt && report.steps < self.max_substeps {
            match tick(body, input, self.dt) {
                Ok(output) => {
                    if output.hits.any() {
                        report.wall_hits += 1;
                    }
                    report.last = Some(output);
                }
                Err(e) => {
                    log::warn!("Skipping frame: {}", e);
                    self.accumulator = 0.0;
                    report.skipped = true;
                    return report;
                }
            }
            self.accumulator -= self.dt;
            report.steps += 1;
        }

        // Drop backlog the substep cap could not absorb
        if report.steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::gravity::GravityModel;

    fn viewport() -> Bounds {
        Bounds::new(800.0, 600.0).unwrap()
    }

    fn body(position: Vec2, velocity: Vec2, gravity: GravityModel) -> ParticleBody {
        ParticleBody::new(position, velocity, 10.0, 20.0, gravity).unwrap()
    }

    #[test]
    fn test_tick_resolves_then_integrates() {
        let mut b = body(Vec2::new(10.0, 300.0), Vec2::new(-50.0, 0.0), GravityModel::None);
        let out = tick(&mut b, &FrameInput::new(viewport()), 0.1).unwrap();
        assert!(out.hits.left);
        assert_eq!(out.radius, 20.0);
        // Clamped to 20 then moved by +50 * 0.1
        assert!((out.position.x - 25.0).abs() < 1e-4);
        assert_eq!(out.position, b.position);
    }

    #[test]
    fn test_tick_rejects_bad_dt_without_mutation() {
        let mut b = body(Vec2::new(10.0, 300.0), Vec2::new(-50.0, 0.0), GravityModel::None);
        let before = b.clone();
        assert!(tick(&mut b, &FrameInput::new(viewport()), -0.0167).is_err());
        assert_eq!(b, before);
    }

    #[test]
    fn test_pointer_follow_gated_by_flag() {
        let mut input = FrameInput::new(viewport());
        input.pointer = Some(Vec2::new(410.0, 310.0));

        let mut off = body(Vec2::new(400.0, 300.0), Vec2::new(1.0, 2.0), GravityModel::None);
        tick(&mut off, &input, 0.01).unwrap();
        assert_eq!(off.velocity, Vec2::new(1.0, 2.0));

        input.pointer_follow = true;
        let mut on = body(Vec2::new(400.0, 300.0), Vec2::new(1.0, 2.0), GravityModel::None);
        tick(&mut on, &input, 0.01).unwrap();
        assert_eq!(on.velocity, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_pointer_follow_without_pointer_is_noop() {
        let mut input = FrameInput::new(viewport());
        input.pointer_follow = true;
        let mut b = body(Vec2::new(400.0, 300.0), Vec2::new(1.0, 2.0), GravityModel::None);
        tick(&mut b, &input, 0.01).unwrap();
        assert_eq!(b.velocity, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_stepper_runs_whole_steps() {
        let mut stepper = FixedStepper::new(0.01).unwrap();
        let mut b = body(Vec2::new(400.0, 300.0), Vec2::new(10.0, 0.0), GravityModel::None);
        let input = FrameInput::new(viewport());

        let report = stepper.advance(&mut b, &input, 0.035);
        assert_eq!(report.steps, 3);
        assert!(!report.skipped);
        assert!(report.last.is_some());
        assert!((stepper.pending() - 0.005).abs() < 1e-4);
    }

    #[test]
    fn test_stepper_caps_substeps() {
        let mut stepper = FixedStepper::new(0.001).unwrap();
        let mut b = body(Vec2::new(400.0, 300.0), Vec2::ZERO, GravityModel::None);
        let report = stepper.advance(&mut b, &FrameInput::new(viewport()), 5.0);
        assert_eq!(report.steps, MAX_SUBSTEPS);
        assert!(stepper.pending() <= stepper.dt());
    }

    #[test]
    fn test_stepper_skips_invalid_frame() {
        let mut stepper = FixedStepper::new(0.01).unwrap();
        let mut b = body(Vec2::new(400.0, 300.0), Vec2::new(10.0, 0.0), GravityModel::None);
        let before = b.clone();
        let report = stepper.advance(&mut b, &FrameInput::new(viewport()), f32::NAN);
        assert!(report.skipped);
        assert_eq!(report.steps, 0);
        assert_eq!(b, before);
        assert_eq!(stepper.pending(), 0.0);
    }

    #[test]
    fn test_stepper_rejects_bad_dt() {
        assert!(FixedStepper::new(0.0).is_err());
    }
}
