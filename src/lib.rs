//! Slime Soccer - a two-slime arcade soccer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, grabbing, AI, match flow)
//! - `settings`: Match configuration supplied by the menu layer
//! - `tuning`: Data-driven AI difficulty tables
//!
//! Rendering, menus and input capture live outside this crate. They feed
//! [`sim::TickInput`] into [`sim::tick`] once per frame and read back
//! [`sim::Snapshot`]s and [`sim::GameEvent`]s.

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{ConfigError, Difficulty, MatchConfig, MatchDuration, PlayerMode};
pub use tuning::DifficultyTuning;

use glam::Vec2;

/// Game configuration constants
///
/// Units are field units and ticks. Screen coordinates: y grows downward,
/// so "above" means a smaller y.
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 80.0;
    /// y of the ground line; slime centers rest here
    pub const GROUND_Y: f32 = FIELD_HEIGHT - GROUND_HEIGHT;

    /// Goal mouth
    pub const GOAL_WIDTH: f32 = 80.0;
    pub const GOAL_HEIGHT: f32 = 120.0;
    /// Lower lip of the crossbar; a ball below this (y greater) is in the mouth
    pub const GOAL_LIP_Y: f32 = GROUND_Y - GOAL_HEIGHT;

    /// Slimes
    pub const SLIME_RADIUS: f32 = 40.0;
    pub const SLIME_SPEED: f32 = 5.0;
    pub const SLIME_JUMP_POWER: f32 = -12.0;
    /// Slack when deciding whether a slime is standing on the ground
    pub const GROUNDED_EPSILON: f32 = 1.0;

    /// Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_DAMPING: f32 = 0.99;
    pub const BALL_BOUNCE_DAMPING: f32 = 0.8;
    pub const MAX_BALL_SPEED: f32 = 13.0;

    pub const GRAVITY: f32 = 0.6;

    /// Held ball sits slightly inside the contact distance
    pub const HOLD_DISTANCE: f32 = SLIME_RADIUS + BALL_RADIUS - 5.0;
    /// Angular velocity gained per unit of holder horizontal speed
    pub const GRAB_SWING_GAIN: f32 = 0.008;
    /// Per-tick decay of the held ball's angular velocity
    pub const GRAB_SWING_DAMPING: f32 = 0.85;

    /// Own-goal camping threshold (1 second)
    pub const OWN_GOAL_TICKS: u32 = TICK_RATE;

    /// Kickoff positions
    pub const LEFT_START_X: f32 = 200.0;
    pub const RIGHT_START_X: f32 = 600.0;
    pub const BALL_START_X: f32 = FIELD_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = 150.0;
}

/// Below this length an offset is treated as zero
const DEGENERATE_LENGTH_SQ: f32 = 1e-8;

/// Angle of `offset` (atan2), or 0 when the offset is degenerate
#[inline]
pub fn contact_angle(offset: Vec2) -> f32 {
    if offset.length_squared() < DEGENERATE_LENGTH_SQ {
        return 0.0;
    }
    offset.y.atan2(offset.x)
}

/// Rescale `vel` so its length does not exceed `max`, keeping direction.
///
/// Zero-length vectors are returned untouched.
#[inline]
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max && speed > 0.0 {
        vel * (max / speed)
    } else {
        vel
    }
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle_positive(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
