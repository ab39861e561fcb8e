//! Rendering hand-off
//!
//! The simulation only exposes a position and radius. This module turns
//! them into vertex geometry for whatever window/renderer drives the loop.

pub mod shapes;
pub mod vertex;

pub use shapes::{circle, particle};
pub use vertex::{Vertex, colors};
