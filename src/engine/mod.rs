//! Deterministic game engine
//!
//! Every gameplay rule lives below this module and nowhere else. The engine
//! never reads a clock or an entropy source: the host supplies frame time,
//! wall-clock stamps and the RNG seed, so a seeded session replays exactly.

pub mod controller;
pub mod fruit;
pub mod questions;
pub mod scoring;
pub mod state;

pub use controller::{Command, Engine, EngineEvent};
pub use fruit::{BOMB_GLYPH, FRUIT_GLYPHS, Fruit, FruitField, FruitKind};
pub use questions::QuizQuestion;
pub use scoring::ScoreEvent;
pub use state::{Feedback, FeedbackKind, Phase, SessionState};
