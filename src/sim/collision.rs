//! Slime/ball contact and the grab state machine
//!
//! Ball possession is `Free` or `Held { by }`. A held ball rides a
//! side-dependent front arc around its holder, swings with the holder's
//! movement and is thrown on release. The other slime can strip it with a
//! fast tackle. Free balls bounce off a slime's dome.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::physics::clamp_to_field;
use super::state::{Ball, GameEvent, GrabState, Side, Slime, World};
use crate::consts::*;
use crate::{clamp_speed, contact_angle, direction, wrap_angle_positive};

/// Speed a stripped ball leaves the contact point with
const STRIP_KICK_SPEED: f32 = 8.0;
/// Tackler speed needed to strip a held ball
const STRIP_MIN_SPEED: f32 = 2.0;
/// Vertical tackler speed that strips regardless of total speed
const STRIP_MIN_VERTICAL_SPEED: f32 = 5.0;
/// Rebound gain on the incoming ball speed
const REBOUND_GAIN: f32 = 1.5;
/// Share of the slime's velocity passed to a rebounding ball
const REBOUND_MOMENTUM_SHARE: f32 = 0.5;

/// Result of a slime/ball overlap check
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Angle from slime center to ball center (0 for coincident centers)
    pub angle: f32,
    /// Center distance
    pub distance: f32,
}

/// Detect overlap between a slime and the ball
pub fn ball_slime_contact(ball_pos: Vec2, slime_pos: Vec2) -> Option<Contact> {
    let offset = ball_pos - slime_pos;
    let distance = offset.length();
    if distance < SLIME_RADIUS + BALL_RADIUS {
        Some(Contact {
            angle: contact_angle(offset),
            distance,
        })
    } else {
        None
    }
}

/// Keep a held ball in front of its holder.
///
/// Left holder: [-90°, 90°]. Right holder: wrapped to [0°, 360°) then
/// limited to [90°, 270°].
pub fn clamp_grab_angle(holder: Side, angle: f32) -> f32 {
    match holder {
        Side::Left => angle.clamp(-FRAC_PI_2, FRAC_PI_2),
        Side::Right => wrap_angle_positive(angle).clamp(FRAC_PI_2, 3.0 * FRAC_PI_2),
    }
}

/// One tick of swing for a held ball: returns the new (angle, angular_vel)
pub fn swing(holder: Side, holder_vx: f32, angle: f32, angular_vel: f32) -> (f32, f32) {
    let sign = match holder {
        Side::Left => 1.0,
        Side::Right => -1.0,
    };
    let angular_vel = (angular_vel - holder_vx * GRAB_SWING_GAIN * sign) * GRAB_SWING_DAMPING;
    (clamp_grab_angle(holder, angle + angular_vel), angular_vel)
}

/// Where a held ball sits for a holder at `holder_pos`
pub fn held_ball_position(holder_pos: Vec2, angle: f32) -> Vec2 {
    clamp_to_field(holder_pos + direction(angle) * HOLD_DISTANCE)
}

/// Throw velocity when a holder lets go.
///
/// The faster the ball was swinging the harder the throw; the holder's own
/// velocity is carried over with a small upward pop.
pub fn release_velocity(holder_vel: Vec2, angle: f32, angular_vel: f32) -> Vec2 {
    let release_speed = angular_vel.abs() * 20.0;
    Vec2::new(
        holder_vel.x * 1.5 + angle.cos() * (3.0 + release_speed),
        holder_vel.y - 2.0 + angle.sin() * release_speed * 0.3,
    )
}

/// Rebound velocity of a free ball bouncing off a slime
pub fn rebound_velocity(ball_vel: Vec2, angle: f32, slime_vel: Vec2) -> Vec2 {
    let speed = ball_vel.length() * REBOUND_GAIN;
    clamp_speed(
        direction(angle) * speed + slime_vel * REBOUND_MOMENTUM_SHARE,
        MAX_BALL_SPEED,
    )
}

/// Velocity of a ball knocked loose by a tackle
pub fn strip_velocity(angle: f32, tackler_vel: Vec2) -> Vec2 {
    clamp_speed(direction(angle) * STRIP_KICK_SPEED + tackler_vel, MAX_BALL_SPEED)
}

/// Pin a held ball to its holder's arc and velocity
fn attach(ball: &mut Ball, holder: &Slime, angle: f32, angular_vel: f32) {
    let angle = clamp_grab_angle(holder.side, angle);
    ball.grab = GrabState::Held {
        by: holder.side,
        angle,
        angular_vel,
    };
    ball.pos = held_ball_position(holder.pos, angle);
    ball.vel = holder.vel;
}

fn drop_ball(ball: &mut Ball, holder: &mut Slime, vel: Vec2) {
    ball.grab = GrabState::Free;
    ball.vel = vel;
    holder.has_ball = false;
}

/// Advance a held ball by one tick, releasing it if the holder let go.
///
/// Does nothing for a free ball.
pub fn update_held_ball(world: &mut World) -> Option<GameEvent> {
    let GrabState::Held {
        by,
        angle,
        angular_vel,
    } = world.ball.grab
    else {
        return None;
    };

    let (holder, _, ball) = world.split_mut(by);
    let (angle, angular_vel) = swing(by, holder.vel.x, angle, angular_vel);
    attach(ball, holder, angle, angular_vel);

    if holder.is_grabbing {
        return None;
    }

    let vel = release_velocity(holder.vel, angle, angular_vel);
    drop_ball(ball, holder, vel);
    log::debug!("{} slime released the ball at {:?}", by.as_str(), vel);
    Some(GameEvent::BallReleased { by, vel })
}

/// Resolve contact between the ball and the slime on `side`.
///
/// In order: a fast tackle strips a ball held by the other slime; a
/// grabbing slime takes a free ball; otherwise a free ball rebounds off the
/// dome when it is above the slime or in its forward half-arc.
pub fn resolve_contact(world: &mut World, side: Side) -> Option<GameEvent> {
    let (slime, other, ball) = world.split_mut(side);
    let contact = ball_slime_contact(ball.pos, slime.pos)?;

    match ball.holder() {
        Some(holder) if holder != side => {
            let speed = slime.vel.length();
            if speed > STRIP_MIN_SPEED || slime.vel.y.abs() > STRIP_MIN_VERTICAL_SPEED {
                drop_ball(ball, other, strip_velocity(contact.angle, slime.vel));
                log::debug!("{} slime stripped the ball", side.as_str());
                return Some(GameEvent::BallStripped {
                    by: side,
                    from: holder,
                });
            }
            None
        }
        Some(_) => None,
        None if slime.is_grabbing => {
            attach(ball, slime, contact.angle, 0.0);
            slime.has_ball = true;
            log::debug!("{} slime grabbed the ball", side.as_str());
            Some(GameEvent::BallGrabbed { by: side })
        }
        None => {
            let above = ball.pos.y < slime.pos.y;
            if above || contact.angle.abs() < PI * 0.5 {
                ball.pos = slime.pos + direction(contact.angle) * (SLIME_RADIUS + BALL_RADIUS);
                ball.vel = rebound_velocity(ball.vel, contact.angle, slime.vel);
            }
            None
        }
    }
}
