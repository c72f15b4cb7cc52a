//! Per-frame state advancement and input handling
//!
//! `advance` runs once per rendered frame; `apply_key` runs once per
//! delivered key event. Out-of-bounds state is corrected in place by
//! clamping - that is the steady-state mechanism, not an error.

use crate::consts::*;
use crate::launch_velocity;

use super::state::{MotionMode, SimState};

/// Keys the simulation reacts to. Everything else is dropped at the
/// window layer before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimKey {
    /// Move the segment up
    Up,
    /// Move the segment down
    Down,
    /// One-shot switch to ballistic mode
    Launch,
}

/// Key transition, mirroring the window event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

/// Advance the circle by one frame: Euler step, then wall reflection
/// per axis, x before y, low bound before high bound. A violated bound
/// negates that axis' velocity and clamps the position onto the bound.
/// The segment is driven purely by input and is untouched here.
pub fn advance(state: &mut SimState) {
    let circle = &mut state.circle;
    circle.pos += circle.vel;

    if circle.pos.x - circle.radius < 0.0 {
        circle.vel.x = -circle.vel.x;
        circle.pos.x = circle.radius;
    }
    if circle.pos.x + circle.radius > WINDOW_SIZE {
        circle.vel.x = -circle.vel.x;
        circle.pos.x = WINDOW_SIZE - circle.radius;
    }
    if circle.pos.y - circle.radius < 0.0 {
        circle.vel.y = -circle.vel.y;
        circle.pos.y = circle.radius;
    }
    if circle.pos.y + circle.radius > WINDOW_SIZE {
        circle.vel.y = -circle.vel.y;
        circle.pos.y = WINDOW_SIZE - circle.radius;
    }
}

/// Apply a single key event. Up/Down act on press and repeat and are
/// clamped to the segment's travel range. Launch acts on press only and
/// only while bouncing: it replaces the velocity with the fixed-angle
/// launch vector and flips the mode, once, for good.
pub fn apply_key(state: &mut SimState, key: SimKey, action: KeyAction) {
    if action == KeyAction::Release {
        return;
    }

    match key {
        SimKey::Up => {
            state.segment.y += SEGMENT_STEP;
            if state.segment.y + SEGMENT_THICKNESS / 2.0 > WINDOW_SIZE {
                state.segment.y = WINDOW_SIZE - SEGMENT_THICKNESS / 2.0;
            }
        }
        SimKey::Down => {
            state.segment.y -= SEGMENT_STEP;
            if state.segment.y - SEGMENT_THICKNESS / 2.0 < 0.0 {
                state.segment.y = SEGMENT_THICKNESS / 2.0;
            }
        }
        SimKey::Launch => {
            if action == KeyAction::Press && state.mode == MotionMode::Bouncing {
                state.circle.vel = launch_velocity();
                state.mode = MotionMode::Ballistic;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_euler_step() {
        let mut state = SimState::new();
        advance(&mut state);
        assert_eq!(state.circle.pos, Vec2::new(305.0, 300.0));
        assert_eq!(state.circle.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_reflection_left_wall() {
        let mut state = SimState::new();
        state.circle.pos = Vec2::new(CIRCLE_RADIUS + 1.0, 300.0);
        state.circle.vel = Vec2::new(-5.0, 0.0);

        advance(&mut state);

        // Position clamps onto the bound and the velocity sign flips
        assert_eq!(state.circle.pos.x, CIRCLE_RADIUS);
        assert_eq!(state.circle.vel.x, 5.0);
    }

    #[test]
    fn test_right_wall_scenario() {
        // From center with vel (5, 0): x first reaches 575 after 55
        // steps, which touches but does not cross the wall (the check
        // is strict). The flip lands on step 56.
        let mut state = SimState::new();
        let steps = ((WINDOW_SIZE / 2.0 - CIRCLE_RADIUS) / 5.0).ceil() as u32;
        assert_eq!(steps, 55);

        for _ in 0..steps {
            advance(&mut state);
        }
        assert_eq!(state.circle.pos.x, WINDOW_SIZE - CIRCLE_RADIUS);
        assert_eq!(state.circle.vel.x, 5.0);

        advance(&mut state);
        assert_eq!(state.circle.pos.x, WINDOW_SIZE - CIRCLE_RADIUS);
        assert_eq!(state.circle.vel.x, -5.0);
    }

    #[test]
    fn test_reflection_preserves_speed() {
        let mut state = SimState::new();
        state.circle.pos = Vec2::new(570.0, 30.0);
        state.circle.vel = Vec2::new(9.0, -8.0);

        for _ in 0..100 {
            advance(&mut state);
            assert_eq!(state.circle.vel.x.abs(), 9.0);
            assert_eq!(state.circle.vel.y.abs(), 8.0);
        }
    }

    #[test]
    fn test_segment_up_down() {
        let mut state = SimState::new();
        apply_key(&mut state, SimKey::Up, KeyAction::Press);
        assert_eq!(state.segment.y, 305.0);
        apply_key(&mut state, SimKey::Down, KeyAction::Repeat);
        apply_key(&mut state, SimKey::Down, KeyAction::Repeat);
        assert_eq!(state.segment.y, 295.0);
    }

    #[test]
    fn test_segment_clamps_at_top() {
        let mut state = SimState::new();
        let top = WINDOW_SIZE - SEGMENT_THICKNESS / 2.0;
        for _ in 0..1000 {
            apply_key(&mut state, SimKey::Up, KeyAction::Press);
            assert!(state.segment.y <= top);
        }
        assert_eq!(state.segment.y, top);
    }

    #[test]
    fn test_segment_clamps_at_bottom() {
        let mut state = SimState::new();
        let bottom = SEGMENT_THICKNESS / 2.0;
        for _ in 0..1000 {
            apply_key(&mut state, SimKey::Down, KeyAction::Repeat);
            assert!(state.segment.y >= bottom);
        }
        assert_eq!(state.segment.y, bottom);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut state = SimState::new();
        apply_key(&mut state, SimKey::Up, KeyAction::Release);
        apply_key(&mut state, SimKey::Launch, KeyAction::Release);
        assert_eq!(state.segment.y, 300.0);
        assert_eq!(state.mode, MotionMode::Bouncing);
    }

    #[test]
    fn test_down_then_launch() {
        let mut state = SimState::new();
        apply_key(&mut state, SimKey::Down, KeyAction::Press);
        apply_key(&mut state, SimKey::Launch, KeyAction::Press);

        assert_eq!(state.segment.y, 300.0 - SEGMENT_STEP);
        assert_eq!(state.mode, MotionMode::Ballistic);
        let expected = Vec2::new(
            LAUNCH_SPEED * LAUNCH_ANGLE.cos(),
            LAUNCH_SPEED * LAUNCH_ANGLE.sin(),
        );
        assert_eq!(state.circle.vel, expected);
    }

    #[test]
    fn test_launch_is_one_way_and_idempotent() {
        let mut state = SimState::new();
        apply_key(&mut state, SimKey::Launch, KeyAction::Press);
        let vel_after_first = state.circle.vel;

        apply_key(&mut state, SimKey::Launch, KeyAction::Press);
        assert_eq!(state.circle.vel, vel_after_first);
        assert_eq!(state.mode, MotionMode::Ballistic);

        // A later press must not reset a velocity changed by reflection
        state.circle.vel = -vel_after_first;
        apply_key(&mut state, SimKey::Launch, KeyAction::Press);
        assert_eq!(state.circle.vel, -vel_after_first);
        assert_eq!(state.mode, MotionMode::Ballistic);
    }

    #[test]
    fn test_launch_ignores_repeat() {
        let mut state = SimState::new();
        apply_key(&mut state, SimKey::Launch, KeyAction::Repeat);
        assert_eq!(state.mode, MotionMode::Bouncing);
        assert_eq!(state.circle.vel, START_VELOCITY);
    }

    #[test]
    fn test_reflection_still_applies_in_ballistic_mode() {
        let mut state = SimState::new();
        apply_key(&mut state, SimKey::Launch, KeyAction::Press);

        // Run long enough to hit a wall at least once
        let mut flipped = false;
        let launched = launch_velocity();
        for _ in 0..200 {
            advance(&mut state);
            if state.circle.vel != launched {
                flipped = true;
            }
            assert!(state.circle.pos.x >= CIRCLE_RADIUS);
            assert!(state.circle.pos.x <= WINDOW_SIZE - CIRCLE_RADIUS);
        }
        assert!(flipped);
        assert_eq!(state.mode, MotionMode::Ballistic);
    }

    proptest! {
        #[test]
        fn circle_stays_within_walls(
            x in CIRCLE_RADIUS..=WINDOW_SIZE - CIRCLE_RADIUS,
            y in CIRCLE_RADIUS..=WINDOW_SIZE - CIRCLE_RADIUS,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
        ) {
            let mut state = SimState::new();
            state.circle.pos = Vec2::new(x, y);
            state.circle.vel = Vec2::new(vx, vy);

            for _ in 0..500 {
                advance(&mut state);
                prop_assert!(state.circle.pos.x >= CIRCLE_RADIUS);
                prop_assert!(state.circle.pos.x <= WINDOW_SIZE - CIRCLE_RADIUS);
                prop_assert!(state.circle.pos.y >= CIRCLE_RADIUS);
                prop_assert!(state.circle.pos.y <= WINDOW_SIZE - CIRCLE_RADIUS);
            }
        }

        #[test]
        fn segment_stays_within_window(ups in prop::collection::vec(prop::bool::ANY, 0..300)) {
            let mut state = SimState::new();
            for up in ups {
                let key = if up { SimKey::Up } else { SimKey::Down };
                apply_key(&mut state, key, KeyAction::Press);
                prop_assert!(state.segment.y - SEGMENT_THICKNESS / 2.0 >= 0.0);
                prop_assert!(state.segment.y + SEGMENT_THICKNESS / 2.0 <= WINDOW_SIZE);
            }
        }
    }
}
