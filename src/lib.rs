//! Bouncing Circle - a minimal real-time animation
//!
//! Core modules:
//! - `sim`: Frame-by-frame motion state (wall reflection, ballistic launch)
//! - `renderer`: WebGPU two-pass pipeline (gradient disc + flat segment)

pub mod renderer;
pub mod sim;

use glam::Vec2;

/// Compile-time configuration. Nothing here is exposed at runtime.
pub mod consts {
    use glam::Vec2;

    /// Square window edge length in logical pixels
    pub const WINDOW_SIZE: f32 = 600.0;

    /// Circle defaults
    pub const CIRCLE_RADIUS: f32 = 25.0;
    /// Velocity at startup, before the ballistic launch
    pub const START_VELOCITY: Vec2 = Vec2::new(5.0, 0.0);

    /// Segment defaults - a horizontal bar centered in the window
    pub const SEGMENT_LENGTH: f32 = WINDOW_SIZE / 3.0;
    pub const SEGMENT_THICKNESS: f32 = 3.0;
    /// Vertical travel per Up/Down key event
    pub const SEGMENT_STEP: f32 = 5.0;

    /// Ballistic launch parameters
    pub const LAUNCH_SPEED: f32 = 10.0;
    /// Launch angle above the +x axis, radians
    pub const LAUNCH_ANGLE: f32 = 25.0 * std::f32::consts::PI / 180.0;
}

/// Velocity vector applied at the ballistic launch: fixed speed at a
/// fixed angle measured from the +x axis.
#[inline]
pub fn launch_velocity() -> Vec2 {
    let (sin, cos) = consts::LAUNCH_ANGLE.sin_cos();
    Vec2::new(consts::LAUNCH_SPEED * cos, consts::LAUNCH_SPEED * sin)
}
