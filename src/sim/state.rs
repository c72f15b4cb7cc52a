//! Simulation state and core types
//!
//! Everything advanced by the frame loop lives here. All entities are
//! singletons with process lifetime; nothing is allocated after startup.

use glam::Vec2;

use crate::consts::*;

/// Motion regime of the circle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionMode {
    /// Axis-aligned bouncing with the startup velocity
    Bouncing,
    /// Fixed-angle launch vector; entered once, never left.
    /// Wall reflection still applies in this mode.
    Ballistic,
}

/// The bouncing circle
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    /// Center position in window pixels, y up
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// The player-controlled horizontal segment
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// Vertical center in window pixels; length and thickness are constants
    pub y: f32,
}

/// Complete simulation state, passed by `&mut` into `advance`/`apply_key`
#[derive(Debug, Clone)]
pub struct SimState {
    pub circle: Circle,
    pub segment: Segment,
    pub mode: MotionMode,
}

impl SimState {
    /// Startup state: circle at window center moving horizontally,
    /// segment centered, bouncing mode.
    pub fn new() -> Self {
        Self {
            circle: Circle {
                pos: Vec2::splat(WINDOW_SIZE / 2.0),
                vel: START_VELOCITY,
                radius: CIRCLE_RADIUS,
            },
            segment: Segment {
                y: WINDOW_SIZE / 2.0,
            },
            mode: MotionMode::Bouncing,
        }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_state() {
        let state = SimState::new();
        assert_eq!(state.circle.pos, Vec2::new(300.0, 300.0));
        assert_eq!(state.circle.vel, Vec2::new(5.0, 0.0));
        assert_eq!(state.circle.radius, CIRCLE_RADIUS);
        assert_eq!(state.segment.y, 300.0);
        assert_eq!(state.mode, MotionMode::Bouncing);
    }

    #[test]
    fn test_startup_state_within_bounds() {
        let state = SimState::new();
        assert!(state.circle.pos.x - state.circle.radius >= 0.0);
        assert!(state.circle.pos.x + state.circle.radius <= WINDOW_SIZE);
        assert!(state.segment.y - SEGMENT_THICKNESS / 2.0 >= 0.0);
        assert!(state.segment.y + SEGMENT_THICKNESS / 2.0 <= WINDOW_SIZE);
    }
}
