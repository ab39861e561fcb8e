//! Platform abstraction layer
//!
//! The window/renderer is an external collaborator. It supplies the frame
//! delta, viewport size and pointer, and receives vertices to draw. The
//! simulation never touches window or GPU state directly.

use glam::Vec2;

use crate::error::SimError;
use crate::renderer::{self, Vertex};
use crate::settings::SimSettings;
use crate::sim::{Bounds, FixedStepper, FrameOutput, WallHits};

/// Host window/renderer driving the frame loop
pub trait Frontend {
    /// Wall-clock seconds since the previous frame
    fn frame_dt(&mut self) -> f32;
    /// Current viewport size in pixels
    fn viewport(&self) -> (f32, f32);
    /// Pointer position in window coordinates (origin top-left, y down)
    fn pointer(&self) -> Option<Vec2>;
    /// Draw one frame
    fn present(&mut self, vertices: &[Vertex]);
    /// Whether the host wants the loop to stop
    fn should_close(&self) -> bool;
}

/// Flip a window-space pointer (y down) into simulation space (y up)
pub fn screen_to_world(pointer: Vec2, viewport_height: f32) -> Vec2 {
    Vec2::new(pointer.x, viewport_height - pointer.y)
}

/// Totals from a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u32,
    pub steps: u32,
    pub skipped_frames: u32,
    pub wall_hits: u32,
    pub final_position: Vec2,
}

/// Drive the simulation until the frontend asks to close.
///
/// Frames that fail (bad delta, bad viewport) are skipped and counted; the
/// loop itself only fails if the settings cannot build a particle.
pub fn run<F: Frontend>(frontend: &mut F, settings: &SimSettings) -> Result<RunSummary, SimError> {
    let mut body = settings.build_body()?;
    let mut stepper = FixedStepper::new(settings.dt)?;
    let mut input = settings.frame_input()?;
    let mut summary = RunSummary::default();

    log::info!(
        "Particle at {} with velocity {} (r={}, m={})",
        body.position,
        body.velocity,
        body.radius(),
        body.mass()
    );

    while !frontend.should_close() {
        summary.frames += 1;

        let (width, height) = frontend.viewport();
        let mut hits = WallHits::default();
        match Bounds::new(width, height) {
            Ok(viewport) => {
                input.viewport = viewport;
                input.pointer = frontend
                    .pointer()
                    .map(|p| screen_to_world(p, viewport.height()));

                let report = stepper.advance(&mut body, &input, frontend.frame_dt());
                summary.steps += report.steps;
                summary.wall_hits += report.wall_hits;
                if report.skipped {
                    summary.skipped_frames += 1;
                }
                if let Some(last) = report.last {
                    hits = last.hits;
                }
            }
            Err(e) => {
                log::warn!("Skipping frame {}: {}", summary.frames, e);
                summary.skipped_frames += 1;
            }
        }

        let frame = FrameOutput {
            position: body.position,
            radius: body.radius(),
            hits,
        };
        frontend.present(&renderer::particle(&frame, settings.circle_segments));
    }

    summary.final_position = body.position;
    log::info!(
        "Run finished: {} frames, {} steps, {} skipped, final position {}",
        summary.frames,
        summary.steps,
        summary.skipped_frames,
        summary.final_position
    );
    Ok(summary)
}

/// Frontend with no window: fixed frame delta, fixed viewport, stops after
/// a set number of frames. Keeps the last presented frame.
#[derive(Debug, Clone)]
pub struct HeadlessFrontend {
    frame_dt: f32,
    viewport: (f32, f32),
    pointer: Option<Vec2>,
    frames_left: u32,
    last_frame: Vec<Vertex>,
    bytes_presented: usize,
}

impl HeadlessFrontend {
    pub fn new(frame_dt: f32, viewport: (f32, f32), frames: u32) -> Self {
        Self {
            frame_dt,
            viewport,
            pointer: None,
            frames_left: frames,
            last_frame: Vec::new(),
            bytes_presented: 0,
        }
    }

    /// Headless host matching the settings' viewport and timestep
    pub fn from_settings(settings: &SimSettings) -> Self {
        Self::new(
            settings.dt,
            (settings.viewport.width(), settings.viewport.height()),
            settings.frames,
        )
    }

    /// Pin the pointer at a window-space position
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    pub fn last_frame(&self) -> &[Vertex] {
        &self.last_frame
    }

    /// Last frame as the raw vertex buffer a GPU upload would see
    pub fn last_frame_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.last_frame)
    }

    /// Total vertex-buffer bytes handed to `present` so far
    pub fn bytes_presented(&self) -> usize {
        self.bytes_presented
    }
}

impl Frontend for HeadlessFrontend {
    fn frame_dt(&mut self) -> f32 {
        self.frame_dt
    }

    fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    fn present(&mut self, vertices: &[Vertex]) {
        self.frames_left = self.frames_left.saturating_sub(1);
        self.bytes_presented += vertices.len() * Vertex::STRIDE;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(vertices);
    }

    fn should_close(&self) -> bool {
        self.frames_left == 0
    }
}
