//! Per-tick integration, boundaries and goal rules
//!
//! Tuned arcade model: velocities are in units/tick, gravity is applied
//! before the position step (semi-implicit Euler).

use glam::Vec2;

use super::state::{Ball, Side, Slime};
use crate::clamp_speed;
use crate::consts::*;

/// Discrete per-tick controls for a human slime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlimeInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump button state; a jump fires on the press edge while grounded
    pub jump: bool,
    /// Held while the player wants to grab/hold the ball
    pub grab: bool,
}

/// Turn human intents into slime velocity and grab intent
pub fn apply_input(slime: &mut Slime, input: &SlimeInput) {
    slime.vel.x = if input.move_left {
        -SLIME_SPEED
    } else if input.move_right {
        SLIME_SPEED
    } else {
        0.0
    };
    if input.jump && !slime.jump_held && slime.is_grounded() {
        slime.vel.y = SLIME_JUMP_POWER;
    }
    slime.jump_held = input.jump;
    slime.is_grabbing = input.grab;
}

/// Gravity, position step, wall clamp and landing for one slime
pub fn integrate_slime(slime: &mut Slime) {
    slime.vel.y += GRAVITY;
    slime.pos += slime.vel;

    // Hard stop at the side walls; horizontal velocity is left alone
    slime.pos.x = slime.pos.x.clamp(SLIME_RADIUS, FIELD_WIDTH - SLIME_RADIUS);

    if slime.pos.y > GROUND_Y {
        slime.pos.y = GROUND_Y;
        slime.vel.y = 0.0;
    }
}

/// Advance the own-goal camping timer.
///
/// Returns true on the tick the slime has spent a full second inside the
/// goal mouth it defends; the timer clears as soon as it steps out.
pub fn update_goal_line_timer(slime: &mut Slime) -> bool {
    if slime.side.in_own_goal_mouth(slime.pos.x) {
        slime.goal_line_ticks += 1;
        slime.goal_line_ticks >= OWN_GOAL_TICKS
    } else {
        slime.goal_line_ticks = 0;
        false
    }
}

/// Free-body step for an unheld ball: gravity, horizontal drag, position
pub fn integrate_free_ball(ball: &mut Ball) {
    ball.vel.y += GRAVITY;
    ball.vel.x *= BALL_DAMPING;
    ball.pos += ball.vel;
}

/// Clamp the ball into the field, reflecting and damping the crossing
/// velocity component on each wall it touched. A ball that touched any
/// wall leaves at no more than `MAX_BALL_SPEED`.
pub fn bounce_off_walls(ball: &mut Ball) {
    let min = Vec2::splat(BALL_RADIUS);
    let max = Vec2::new(FIELD_WIDTH - BALL_RADIUS, GROUND_Y - BALL_RADIUS);
    let mut touched = false;

    if ball.pos.x < min.x {
        ball.pos.x = min.x;
        ball.vel.x = -ball.vel.x * BALL_BOUNCE_DAMPING;
        touched = true;
    }
    if ball.pos.x > max.x {
        ball.pos.x = max.x;
        ball.vel.x = -ball.vel.x * BALL_BOUNCE_DAMPING;
        touched = true;
    }
    if ball.pos.y > max.y {
        ball.pos.y = max.y;
        ball.vel.y = -ball.vel.y * BALL_BOUNCE_DAMPING;
        touched = true;
    }
    if ball.pos.y < min.y {
        ball.pos.y = min.y;
        ball.vel.y = -ball.vel.y * BALL_BOUNCE_DAMPING;
        touched = true;
    }

    if touched {
        ball.vel = clamp_speed(ball.vel, MAX_BALL_SPEED);
    }
}

/// Clamp a point into the area the ball may occupy
pub fn clamp_to_field(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(BALL_RADIUS, FIELD_WIDTH - BALL_RADIUS),
        pos.y.clamp(BALL_RADIUS, GROUND_Y - BALL_RADIUS),
    )
}

/// Side that scores if the ball sits in a goal mouth, if any
pub fn ball_goal_scorer(ball: &Ball) -> Option<Side> {
    if ball.pos.y <= GOAL_LIP_Y {
        return None;
    }
    if ball.pos.x <= BALL_RADIUS {
        Some(Side::Right)
    } else if ball.pos.x >= FIELD_WIDTH - BALL_RADIUS {
        Some(Side::Left)
    } else {
        None
    }
}
