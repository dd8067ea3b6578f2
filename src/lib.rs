//! Math Ninja Blitz - a fruit-slicing math quiz arcade game
//!
//! Core modules:
//! - `engine`: Deterministic game engine (phases, fruit flight, questions, scoring)
//! - `progress`: Durable player progress and the delta merge that updates it
//! - `survey`: Pre-game warmup quiz with its katana reward
//! - `platform`: Browser host bridge (wasm exports, persistence wiring)

pub mod engine;
pub mod platform;
pub mod progress;
pub mod survey;

pub use engine::{Command, Engine, EngineEvent, Phase, SessionState};
pub use progress::{NinjaProgress, ProgressDelta, SwordId};

/// Game configuration constants
pub mod consts {
    /// Playfield is a normalized 0-100 percent space, y growing downward
    pub const FIELD_MAX: f32 = 100.0;
    /// Fruit past this y has fallen off screen and is culled
    pub const FIELD_CULL_Y: f32 = 110.0;
    /// Horizontal spawn band, keeps fruit clear of the screen edges
    pub const SPAWN_X_MIN: f32 = 10.0;
    pub const SPAWN_X_MAX: f32 = 90.0;
    /// Fruit launch from just below the bottom edge
    pub const SPAWN_Y: f32 = 100.0;

    /// Downward acceleration (percent units/s²)
    pub const GRAVITY: f32 = 180.0;
    /// Horizontal launch speed range (symmetric, percent units/s)
    pub const SPAWN_VX_MAX: f32 = 45.0;
    /// Vertical launch speed range (upward, percent units/s)
    pub const SPAWN_VY_MIN: f32 = -210.0;
    pub const SPAWN_VY_MAX: f32 = -120.0;

    /// One fruit per second while slicing
    pub const SPAWN_INTERVAL_SECS: f32 = 1.0;
    /// Chance a spawn comes up a bomb
    pub const BOMB_PROBABILITY: f64 = 0.2;
    /// Sliced fruit linger this long before despawning
    pub const FRUIT_DESPAWN_SECS: f32 = 0.25;

    /// Fruit slices that complete a round and earn a question
    pub const REQUIRED_SLICES: u32 = 5;
    /// Beat between the last slice and the question appearing
    pub const QUIZ_ENTRY_DELAY_SECS: f32 = 0.5;
    /// How long answer feedback stays up
    pub const FEEDBACK_SECS: f32 = 1.0;
    /// Phase countdowns (whole seconds, ticked at 1 Hz by the host)
    pub const SLICING_COUNTDOWN_SECS: u32 = 60;
    pub const QUIZ_COUNTDOWN_SECS: u32 = 60;

    /// Points per fruit sliced
    pub const FRUIT_POINTS: u32 = 10;
    /// Penalty for slicing a bomb
    pub const BOMB_PENALTY: u32 = 10;
    /// Points per correct answer (also credited to cumulative score)
    pub const ANSWER_POINTS: u32 = 10;
    /// Extra penalty when the quiz countdown expires unanswered
    pub const QUIZ_TIMEOUT_PENALTY: u32 = 1;
    /// Penalty when the slicing countdown expires short of five slices
    pub const SLICE_TIMEOUT_PENALTY: u32 = 5;
    /// Consecutive correct answers that unlock the next sword
    pub const UNLOCK_STREAK: u32 = 3;

    /// Lives cap; a fresh record starts full
    pub const MAX_LIVES: u8 = 3;
    /// Grade levels span 1st through 12th
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 12;
    /// Cumulative score needed to leave level N is N * this
    pub const LEVEL_THRESHOLD_STEP: u32 = 1000;

    /// Frame dt ceiling, so a backgrounded tab can't teleport fruit
    pub const MAX_FRAME_DT: f32 = 0.1;
}
