//! Session state and phase definitions
//!
//! Everything scoped to a single playthrough lives here. Durable state is in
//! [`crate::progress`]; when a session ends this whole struct is dropped.

use serde::{Deserialize, Serialize};

use super::fruit::FruitField;
use super::questions::QuizQuestion;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Fruit in flight, blade active
    Slicing,
    /// A question is up, quiz countdown running
    Quiz,
    /// Answer verdict shown for a short beat
    Feedback,
    /// Out of lives; terminal
    GameOver,
    /// Campaign cap reached; terminal, only ever set by the host
    Completed,
}

impl Phase {
    /// Terminal phases accept no input and never transition out
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::Completed)
    }
}

/// Which way a quiz round resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Correct,
    Wrong,
}

/// Verdict banner shown during [`Phase::Feedback`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    /// Points the answer banked, when it banked any
    pub points: Option<u32>,
}

/// All state for one playthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    /// Session score; separate from the durable cumulative score
    pub score: u32,
    /// Consecutive correct answers. Wrong answers reset it, bombs do not.
    pub streak: u32,
    /// Whole seconds left on the active phase countdown
    pub countdown: u32,
    /// Fruit slices banked toward the current round (bombs never count)
    pub slices_this_round: u32,
    pub fruits: FruitField,
    /// Present exactly while a quiz round is up
    pub question: Option<QuizQuestion>,
    pub feedback: Option<Feedback>,
    /// Latched once the round outcome is decided; all round input is ignored
    /// until the next phase starts
    pub round_resolved: bool,
    /// Seconds until the earned question appears
    pub quiz_entry_secs: f32,
    /// Seconds left on the feedback banner
    pub feedback_secs: f32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh session, ready to slice
    pub fn new() -> Self {
        Self {
            phase: Phase::Slicing,
            score: 0,
            streak: 0,
            countdown: SLICING_COUNTDOWN_SECS,
            slices_this_round: 0,
            fruits: FruitField::new(),
            question: None,
            feedback: None,
            round_resolved: false,
            quiz_entry_secs: 0.0,
            feedback_secs: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(Phase::GameOver.is_terminal());
        assert!(Phase::Completed.is_terminal());
        assert!(!Phase::Slicing.is_terminal());
        assert!(!Phase::Quiz.is_terminal());
        assert!(!Phase::Feedback.is_terminal());
    }

    #[test]
    fn test_phase_snapshot_names() {
        // The presentation layer keys off these exact strings
        assert_eq!(serde_json::to_string(&Phase::Slicing).unwrap(), "\"SLICING\"");
        assert_eq!(serde_json::to_string(&Phase::GameOver).unwrap(), "\"GAME_OVER\"");
    }

    #[test]
    fn test_new_session_starts_slicing() {
        let s = SessionState::new();
        assert_eq!(s.phase, Phase::Slicing);
        assert_eq!(s.countdown, SLICING_COUNTDOWN_SECS);
        assert_eq!(s.score, 0);
        assert!(s.question.is_none());
        assert!(!s.round_resolved);
    }
}
