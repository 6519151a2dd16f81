//! Slime Soccer headless driver
//!
//! Plays a demo match at full speed: the AI takes the left slime and a
//! scripted chaser stands in for the human on the right. Goals and the
//! result are logged; the final snapshot is printed as JSON.
//!
//! Usage: `slime-soccer [config.json]`

use slime_soccer::MatchConfig;
use slime_soccer::consts::*;
use slime_soccer::sim::{GameEvent, GameState, MatchPhase, SlimeInput, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Slime Soccer (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path),
        None => MatchConfig::default(),
    };

    let mut state = GameState::new(config);
    while state.phase == MatchPhase::Playing {
        let input = TickInput {
            right: chaser_input(&state),
            ..Default::default()
        };
        tick(&mut state, &input);

        for event in state.events() {
            if let GameEvent::Goal { scorer, cause } = event {
                log::info!(
                    "[{:>3}s] {:?} by {}",
                    state.time_left_secs(),
                    cause,
                    scorer.as_str()
                );
            }
        }
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize final snapshot: {e}"),
    }
}

fn load_config(path: &str) -> MatchConfig {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read {path}: {e}, using default config");
            return MatchConfig::default();
        }
    };
    match MatchConfig::from_json(&json) {
        Ok(config) => {
            log::info!("Loaded match config from {path}");
            config
        }
        Err(e) => {
            log::warn!("{e}, using default config");
            MatchConfig::default()
        }
    }
}

/// Stand-in for a human on the right: run behind the ball, hop at it,
/// grab it when it's low and carry it toward the left goal.
fn chaser_input(state: &GameState) -> SlimeInput {
    let me = &state.world.right;
    let ball = &state.world.ball;
    let behind = ball.pos.x + SLIME_RADIUS * 0.5;
    let diff = behind - me.pos.x;
    let has_ball = me.has_ball;

    SlimeInput {
        move_left: has_ball || diff < -8.0,
        move_right: !has_ball && diff > 8.0,
        jump: !has_ball && (ball.pos.x - me.pos.x).abs() < 60.0 && ball.pos.y < GROUND_Y - 70.0,
        // Let go (throw) once close enough to the left goal
        grab: if has_ball {
            me.pos.x > 150.0
        } else {
            ball.pos.y > GROUND_Y - 40.0
        },
    }
}
