//! Match configuration
//!
//! Chosen once by the menu layer before kickoff and handed to
//! [`crate::sim::GameState::new`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AI difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a difficulty key, falling back to the default tier
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty '{}', using {}", s, Self::default().as_str());
            Self::default()
        })
    }
}

/// Who controls the slimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerMode {
    /// Human plays the right slime, AI plays the left
    #[default]
    Single,
    /// Two humans, one per slime
    Multi,
}

/// Match length presets offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchDuration {
    OneMinute,
    TwoMinutes,
    FourMinutes,
    EightMinutes,
    WorldCup,
}

impl MatchDuration {
    pub const ALL: [MatchDuration; 5] = [
        MatchDuration::OneMinute,
        MatchDuration::TwoMinutes,
        MatchDuration::FourMinutes,
        MatchDuration::EightMinutes,
        MatchDuration::WorldCup,
    ];

    pub fn secs(&self) -> u32 {
        match self {
            MatchDuration::OneMinute => 60,
            MatchDuration::TwoMinutes => 120,
            MatchDuration::FourMinutes => 240,
            MatchDuration::EightMinutes => 480,
            MatchDuration::WorldCup => 300,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            MatchDuration::OneMinute => "1min",
            MatchDuration::TwoMinutes => "2min",
            MatchDuration::FourMinutes => "4min",
            MatchDuration::EightMinutes => "8min",
            MatchDuration::WorldCup => "worldcup",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

/// Errors from loading a match configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid match config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Match duration must be at least one second")]
    ZeroDuration,
}

/// Everything the core needs to know at kickoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Match length in seconds
    pub duration_secs: u32,
    /// AI tier (single player only); unknown keys fall back to the default
    #[serde(deserialize_with = "lenient_difficulty")]
    pub difficulty: Difficulty,
    pub player_mode: PlayerMode,
    /// Seed for the AI's random source
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duration_secs: MatchDuration::OneMinute.secs(),
            difficulty: Difficulty::Medium,
            player_mode: PlayerMode::Single,
            seed: 0,
        }
    }
}

fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Difficulty, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let key = String::deserialize(deserializer)?;
    Ok(Difficulty::parse_or_default(&key))
}

impl MatchConfig {
    pub fn single(difficulty: Difficulty, duration: MatchDuration) -> Self {
        Self {
            duration_secs: duration.secs(),
            difficulty,
            player_mode: PlayerMode::Single,
            ..Default::default()
        }
    }

    pub fn multi(duration: MatchDuration) -> Self {
        Self {
            duration_secs: duration.secs(),
            player_mode: PlayerMode::Multi,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// AI tuning for this match
    pub fn tuning(&self) -> &'static crate::tuning::DifficultyTuning {
        crate::tuning::for_difficulty(self.difficulty)
    }
}
