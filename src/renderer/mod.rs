//! WebGPU rendering module
//!
//! Two draws per frame against a fixed square surface: the gradient
//! disc (per-pixel distance test on a full-viewport quad) and the
//! flat-color segment quad.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{InitError, RenderState};
