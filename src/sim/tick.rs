//! Fixed timestep simulation tick
//!
//! Phase order within one tick:
//! 1. human input, then the AI, set slime velocities and grab intents
//! 2. slimes integrate (left, then right) and the own-goal timer runs
//! 3. the ball swings/releases if held, or integrates freely, then walls
//! 4. ball-in-goal check
//! 5. contact resolution (left slime, then right slime)
//! 6. match clock
//!
//! The first goal in a tick resets the field and skips the remaining
//! physics phases, so one tick awards at most one point.

use serde::{Deserialize, Serialize};

use super::ai;
use super::collision::{resolve_contact, update_held_ball};
use super::physics::{
    SlimeInput, apply_input, ball_goal_scorer, bounce_off_walls, integrate_free_ball,
    integrate_slime, update_goal_line_timer,
};
use super::state::{GameEvent, GameState, GoalCause, MatchPhase, Side};
use crate::settings::PlayerMode;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Ignored in single-player mode (the AI drives the left slime)
    pub left: SlimeInput,
    pub right: SlimeInput,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.pause {
        match state.phase {
            MatchPhase::Playing => {
                state.phase = MatchPhase::Paused;
                return;
            }
            MatchPhase::Paused => state.phase = MatchPhase::Playing,
            MatchPhase::Finished => {}
        }
    }

    if state.phase != MatchPhase::Playing {
        return;
    }

    if let Some((scorer, cause)) = step_world(state, input) {
        state.award_goal(scorer, cause);
    }

    state.elapsed_ticks += 1;
    state.ticks_remaining = state.ticks_remaining.saturating_sub(1);
    if state.ticks_remaining == 0 {
        state.stop();
    }
}

/// Run the physics phases; stops at the first goal and reports it
fn step_world(state: &mut GameState, input: &TickInput) -> Option<(Side, GoalCause)> {
    apply_intents(state, input);

    for side in [Side::Left, Side::Right] {
        let slime = state.world.slime_mut(side);
        integrate_slime(slime);
        if update_goal_line_timer(slime) {
            return Some((side.opponent(), GoalCause::OwnGoalCamping));
        }
    }

    if state.world.ball.is_free() {
        integrate_free_ball(&mut state.world.ball);
        bounce_off_walls(&mut state.world.ball);
    } else if let Some(event) = update_held_ball(&mut state.world) {
        state.events.push(event);
        bounce_off_walls(&mut state.world.ball);
    }

    if let Some(scorer) = ball_goal_scorer(&state.world.ball) {
        return Some((scorer, GoalCause::BallInGoal));
    }

    for side in [Side::Left, Side::Right] {
        if let Some(event) = resolve_contact(&mut state.world, side) {
            state.events.push(event);
        }
    }

    None
}

fn apply_intents(state: &mut GameState, input: &TickInput) {
    match state.config.player_mode {
        PlayerMode::Multi => {
            apply_input(&mut state.world.left, &input.left);
            apply_input(&mut state.world.right, &input.right);
        }
        PlayerMode::Single => {
            apply_input(&mut state.world.right, &input.right);
            let tuning = state.config.tuning();
            let world = &mut state.world;
            ai::update(
                &mut world.left,
                &world.ball,
                &world.right,
                tuning,
                state.elapsed_ticks,
                &mut state.rng,
            );
        }
    }
}

/// Convenience for callers that want this tick's events by value
pub fn tick_events(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    tick(state, input);
    state.events.clone()
}
