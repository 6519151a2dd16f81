//! Data-driven AI difficulty tables
//!
//! All AI balance numbers live here so the policy in `sim::ai` contains no
//! per-difficulty magic numbers.

use serde::{Deserialize, Serialize};

use crate::settings::Difficulty;

/// AI behavior parameters for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTuning {
    /// Multiplier on `SLIME_SPEED` for AI movement
    pub speed: f32,
    /// Ticks to wait after a retarget before re-deciding
    pub reaction_ticks: u32,
    /// 0..1, tightens target offsets and widens jump windows
    pub accuracy: f32,
    /// 0..1, pushes zone boundaries toward the opponent's goal
    pub aggression: f32,
    /// Probability of attempting a jump when the jump window is open
    pub jump_chance: f32,
    /// Horizontal distance at which the AI tries to grab
    pub grab_distance: f32,
    /// Minimum target change (units) before the AI retargets
    pub min_target_change: f32,
    /// Multiplier on `SLIME_JUMP_POWER`
    pub jump_power_scale: f32,
    /// Lead the ball using its velocity when attacking
    pub predicts_ball: bool,
    /// Rush to the goal line when the ball is about to score
    pub emergency_defense: bool,
    /// Shade midfield position against the opponent's movement
    pub anticipates_opponent: bool,
}

pub const EASY: DifficultyTuning = DifficultyTuning {
    speed: 0.5,
    reaction_ticks: 30,
    accuracy: 0.4,
    aggression: 0.2,
    jump_chance: 0.3,
    grab_distance: 80.0,
    min_target_change: 20.0,
    jump_power_scale: 0.8,
    predicts_ball: false,
    emergency_defense: false,
    anticipates_opponent: false,
};

pub const MEDIUM: DifficultyTuning = DifficultyTuning {
    speed: 0.8,
    reaction_ticks: 15,
    accuracy: 0.7,
    aggression: 0.6,
    jump_chance: 0.6,
    grab_distance: 60.0,
    min_target_change: 15.0,
    jump_power_scale: 1.0,
    predicts_ball: false,
    emergency_defense: false,
    anticipates_opponent: false,
};

pub const HARD: DifficultyTuning = DifficultyTuning {
    speed: 1.2,
    reaction_ticks: 5,
    accuracy: 0.95,
    aggression: 1.0,
    jump_chance: 0.9,
    grab_distance: 40.0,
    min_target_change: 10.0,
    jump_power_scale: 1.1,
    predicts_ball: true,
    emergency_defense: true,
    anticipates_opponent: true,
};

/// Look up the tuning table for a difficulty tier
pub fn for_difficulty(difficulty: Difficulty) -> &'static DifficultyTuning {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

impl DifficultyTuning {
    /// x above which the ball counts as in the attacking zone
    pub fn offense_line(&self, field_width: f32) -> f32 {
        field_width * (0.3 + self.aggression * 0.3)
    }

    /// x below which the ball counts as in the defending zone
    pub fn defense_line(&self, field_width: f32) -> f32 {
        field_width * (0.7 - self.aggression * 0.2)
    }

    /// Resting x when the ball is in midfield
    pub fn midfield_x(&self, field_width: f32) -> f32 {
        field_width * (0.25 + self.aggression * 0.15)
    }
}
