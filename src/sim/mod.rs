//! Frame simulation module
//!
//! All motion logic lives here. This module must stay pure:
//! - One step per rendered frame (implicit unit timestep)
//! - State is a single owned value, mutated in place
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Circle, MotionMode, Segment, SimState};
pub use tick::{KeyAction, SimKey, advance, apply_key};
