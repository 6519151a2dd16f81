//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed phase and slime order (left before right)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Contact, ball_slime_contact, release_velocity};
pub use physics::SlimeInput;
pub use state::{
    AiMemory, Ball, GameEvent, GameState, GoalCause, GrabState, MatchPhase, Score, Side, Slime,
    Snapshot, Winner, World,
};
pub use tick::{TickInput, tick, tick_events};
