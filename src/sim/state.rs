//! Game state and core simulation types
//!
//! The whole match lives in one owned [`GameState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::{MatchConfig, PlayerMode};

/// Which half a slime defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Kickoff x for this side's slime
    pub fn start_x(self) -> f32 {
        match self {
            Side::Left => LEFT_START_X,
            Side::Right => RIGHT_START_X,
        }
    }

    /// Whether `x` lies inside the goal mouth this side defends
    pub fn in_own_goal_mouth(self, x: f32) -> bool {
        match self {
            Side::Left => x < GOAL_WIDTH,
            Side::Right => x > FIELD_WIDTH - GOAL_WIDTH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Decision memory for an AI-driven slime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiMemory {
    /// Desired horizontal position
    pub target_x: f32,
    /// Ticks left before the next re-evaluation
    pub decision_cooldown: u32,
    /// Elapsed match tick of the last retarget
    pub last_decision_tick: u64,
    /// Holding the kickoff position until the grace window ends
    pub stable_start: bool,
}

impl AiMemory {
    pub fn kickoff(side: Side) -> Self {
        Self {
            target_x: side.start_x(),
            decision_cooldown: 0,
            last_decision_tick: 0,
            stable_start: true,
        }
    }
}

/// A slime (half-dome player)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slime {
    pub side: Side,
    /// Center of the dome; rests on the ground line
    pub pos: Vec2,
    pub vel: Vec2,
    /// Grab intent (level-triggered)
    pub is_grabbing: bool,
    /// Jump button state from the previous tick
    pub jump_held: bool,
    /// True iff this slime currently holds the ball
    pub has_ball: bool,
    /// Consecutive ticks spent inside its own goal mouth
    pub goal_line_ticks: u32,
    /// Present only when the AI drives this slime
    pub ai: Option<AiMemory>,
}

impl Slime {
    pub fn new(side: Side, ai_controlled: bool) -> Self {
        Self {
            side,
            pos: Vec2::new(side.start_x(), GROUND_Y),
            vel: Vec2::ZERO,
            is_grabbing: false,
            jump_held: false,
            has_ball: false,
            goal_line_ticks: 0,
            ai: ai_controlled.then(|| AiMemory::kickoff(side)),
        }
    }

    /// Put the slime back at kickoff, keeping who controls it
    pub fn reset(&mut self) {
        *self = Slime::new(self.side, self.ai.is_some());
    }

    pub fn is_grounded(&self) -> bool {
        self.pos.y >= GROUND_Y - GROUNDED_EPSILON
    }

    /// Seconds spent in its own goal mouth
    pub fn goal_line_time(&self) -> f32 {
        self.goal_line_ticks as f32 * SIM_DT
    }
}

/// Ball possession
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GrabState {
    Free,
    /// Ball rides an arc around the holder's center
    Held {
        by: Side,
        /// Angle of the ball relative to the holder (radians)
        angle: f32,
        /// Per-tick change of `angle`
        angular_vel: f32,
    },
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub grab: GrabState,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::ZERO,
            grab: GrabState::Free,
        }
    }
}

impl Ball {
    pub fn holder(&self) -> Option<Side> {
        match self.grab {
            GrabState::Held { by, .. } => Some(by),
            GrabState::Free => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.grab, GrabState::Free)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Goals per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn leader(&self) -> Winner {
        use std::cmp::Ordering;
        match self.left.cmp(&self.right) {
            Ordering::Greater => Winner::Left,
            Ordering::Less => Winner::Right,
            Ordering::Equal => Winner::Draw,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Playing,
    Paused,
    /// Clock ran out or the match was stopped
    Finished,
}

/// Match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Left,
    Right,
    Draw,
}

/// Why a point was awarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalCause {
    /// Ball crossed the end line under the crossbar
    BallInGoal,
    /// Defender stood in its own goal mouth too long
    OwnGoalCamping,
}

/// Things that happened during the latest tick, for scoreboard/audio layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Goal { scorer: Side, cause: GoalCause },
    BallGrabbed { by: Side },
    BallReleased { by: Side, vel: Vec2 },
    BallStripped { by: Side, from: Side },
    MatchEnded { winner: Winner },
}

/// Both slimes and the ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub left: Slime,
    pub right: Slime,
    pub ball: Ball,
}

impl World {
    pub fn kickoff(mode: PlayerMode) -> Self {
        Self {
            left: Slime::new(Side::Left, mode == PlayerMode::Single),
            right: Slime::new(Side::Right, false),
            ball: Ball::default(),
        }
    }

    /// Return every entity to its kickoff state
    pub fn reset_positions(&mut self) {
        self.left.reset();
        self.right.reset();
        self.ball = Ball::default();
    }

    pub fn slime(&self, side: Side) -> &Slime {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn slime_mut(&mut self, side: Side) -> &mut Slime {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// (slime on `side`, its opponent, ball)
    pub fn split_mut(&mut self, side: Side) -> (&mut Slime, &mut Slime, &mut Ball) {
        match side {
            Side::Left => (&mut self.left, &mut self.right, &mut self.ball),
            Side::Right => (&mut self.right, &mut self.left, &mut self.ball),
        }
    }
}

/// Read-only view handed to renderers after each tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub left: Slime,
    pub right: Slime,
    pub ball: Ball,
    pub score: Score,
    pub time_left_secs: u32,
    pub phase: MatchPhase,
    pub winner: Option<Winner>,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: MatchConfig,
    pub world: World,
    pub score: Score,
    pub phase: MatchPhase,
    pub winner: Option<Winner>,
    /// Match clock, in ticks
    pub ticks_remaining: u32,
    /// Ticks simulated since kickoff of this match
    pub elapsed_ticks: u64,
    /// AI random source, seeded from the config
    pub rng: Pcg32,
    /// Events from the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(config: MatchConfig) -> Self {
        log::info!(
            "Match start: {}s, {:?} mode, difficulty {}, seed {}",
            config.duration_secs,
            config.player_mode,
            config.difficulty.as_str(),
            config.seed
        );
        Self {
            world: World::kickoff(config.player_mode),
            score: Score::default(),
            phase: MatchPhase::Playing,
            winner: None,
            ticks_remaining: config.duration_secs.saturating_mul(TICK_RATE),
            elapsed_ticks: 0,
            rng: Pcg32::seed_from_u64(config.seed),
            events: Vec::new(),
            config,
        }
    }

    /// Restart with the same configuration: score, clock and entities reset
    pub fn start_new_match(&mut self) {
        *self = GameState::new(self.config.clone());
    }

    /// Kickoff reset after a goal; score and clock persist
    pub fn reset_positions(&mut self) {
        self.world.reset_positions();
    }

    pub fn award_goal(&mut self, scorer: Side, cause: GoalCause) {
        self.score.award(scorer);
        log::info!(
            "Goal for {} ({:?}), score {}-{}",
            scorer.as_str(),
            cause,
            self.score.left,
            self.score.right
        );
        self.events.push(GameEvent::Goal { scorer, cause });
        self.reset_positions();
    }

    /// End the match now and decide the winner by score
    pub fn stop(&mut self) {
        if self.phase == MatchPhase::Finished {
            return;
        }
        let winner = self.score.leader();
        self.phase = MatchPhase::Finished;
        self.winner = Some(winner);
        log::info!(
            "Match over: {:?} ({}-{})",
            winner,
            self.score.left,
            self.score.right
        );
        self.events.push(GameEvent::MatchEnded { winner });
    }

    /// Whole seconds left on the clock (rounded up)
    pub fn time_left_secs(&self) -> u32 {
        self.ticks_remaining.div_ceil(TICK_RATE)
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ticks as f32 * SIM_DT
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            left: self.world.left.clone(),
            right: self.world.right.clone(),
            ball: self.world.ball.clone(),
            score: self.score,
            time_left_secs: self.time_left_secs(),
            phase: self.phase,
            winner: self.winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MatchDuration;

    #[test]
    fn test_new_match_kickoff() {
        let state = GameState::new(MatchConfig::default());
        assert_eq!(state.world.left.pos, Vec2::new(200.0, GROUND_Y));
        assert_eq!(state.world.right.pos, Vec2::new(600.0, GROUND_Y));
        assert_eq!(state.world.ball.pos, Vec2::new(400.0, 150.0));
        assert!(state.world.left.ai.is_some());
        assert!(state.world.right.ai.is_none());
        assert_eq!(state.time_left_secs(), 60);
        assert_eq!(state.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_multi_mode_has_no_ai() {
        let state = GameState::new(MatchConfig::multi(MatchDuration::TwoMinutes));
        assert!(state.world.left.ai.is_none());
        assert_eq!(state.time_left_secs(), 120);
    }

    #[test]
    fn test_reset_positions_idempotent() {
        let mut state = GameState::new(MatchConfig::default());
        state.world.left.pos = Vec2::new(55.0, 100.0);
        state.world.left.goal_line_ticks = 12;
        state.world.right.vel = Vec2::new(3.0, -4.0);
        state.world.ball.grab = GrabState::Held {
            by: Side::Right,
            angle: 3.0,
            angular_vel: 0.1,
        };
        state.score.left = 2;

        state.reset_positions();
        let first = state.world.clone();
        state.reset_positions();
        assert_eq!(state.world, first);
        assert_eq!(state.score.left, 2);
        assert_eq!(state.world, World::kickoff(PlayerMode::Single));
    }

    #[test]
    fn test_stop_decides_winner_once() {
        let mut state = GameState::new(MatchConfig::default());
        state.score.right = 1;
        state.stop();
        state.stop();
        assert_eq!(state.winner, Some(Winner::Right));
        assert_eq!(state.events().len(), 1);
    }

    #[test]
    fn test_start_new_match_clears_score() {
        let mut state = GameState::new(MatchConfig::default());
        state.award_goal(Side::Left, GoalCause::BallInGoal);
        state.ticks_remaining = 5;
        state.start_new_match();
        assert_eq!(state.score, Score::default());
        assert_eq!(state.ticks_remaining, 60 * TICK_RATE);
    }
}
