//! Scoring ledger
//!
//! The single place gameplay events turn into score changes. Mutates the
//! session in place; changes to the durable record come back as a
//! [`ProgressDelta`] for the caller to merge, so this module never writes
//! progress itself. Session score saturates at zero. Lives only ever go down
//! here; nothing in the game regenerates them.

use serde::{Deserialize, Serialize};

use super::state::{Feedback, FeedbackKind, SessionState};
use crate::consts::*;
use crate::progress::{NinjaProgress, ProgressDelta};

/// Everything a session can be scored for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEvent {
    FruitSliced,
    BombSliced,
    CorrectAnswer,
    WrongAnswer { timed_out: bool },
    /// Slicing countdown ran out short of five slices
    SliceTimeout,
}

/// Apply one event to the session, returning the durable-progress delta it
/// produced (only answer outcomes produce one).
pub fn apply(
    session: &mut SessionState,
    progress: &NinjaProgress,
    event: ScoreEvent,
    now_ms: f64,
) -> Option<ProgressDelta> {
    match event {
        ScoreEvent::FruitSliced => {
            session.score += FRUIT_POINTS;
            None
        }
        ScoreEvent::BombSliced => {
            session.score = session.score.saturating_sub(BOMB_PENALTY);
            None
        }
        ScoreEvent::SliceTimeout => {
            session.score = session.score.saturating_sub(SLICE_TIMEOUT_PENALTY);
            None
        }
        ScoreEvent::CorrectAnswer => Some(correct_answer(session, progress)),
        ScoreEvent::WrongAnswer { timed_out } => {
            Some(wrong_answer(session, progress, timed_out, now_ms))
        }
    }
}

fn correct_answer(session: &mut SessionState, progress: &NinjaProgress) -> ProgressDelta {
    session.score += ANSWER_POINTS;
    session.streak += 1;

    let cumulative = progress.cumulative_score + ANSWER_POINTS;
    let mut delta = ProgressDelta {
        cumulative_score: Some(cumulative),
        high_score: Some(progress.high_score.max(cumulative)),
        total_rounds: Some(progress.total_rounds + 1),
        ..ProgressDelta::default()
    };

    // A streak of exactly three unlocks the next sword; longer streaks
    // already claimed theirs
    let mut unlock_note = String::new();
    if session.streak == UNLOCK_STREAK {
        if let Some(sword) = progress.next_locked_sword() {
            delta.unlock_sword = Some(sword);
            unlock_note = format!(" & {} Unlocked!", sword.display_name());
        }
    }

    session.feedback = Some(Feedback {
        kind: FeedbackKind::Correct,
        message: format!("Correct! +{ANSWER_POINTS} Pts{unlock_note}"),
        points: Some(ANSWER_POINTS),
    });
    delta
}

fn wrong_answer(
    session: &mut SessionState,
    progress: &NinjaProgress,
    timed_out: bool,
    now_ms: f64,
) -> ProgressDelta {
    session.streak = 0;
    if timed_out {
        session.score = session.score.saturating_sub(QUIZ_TIMEOUT_PENALTY);
    }

    session.feedback = Some(Feedback {
        kind: FeedbackKind::Wrong,
        message: if timed_out {
            "Time's Up! -1 Life".to_string()
        } else {
            "Wrong! -1 Life".to_string()
        },
        points: None,
    });

    ProgressDelta {
        lives: Some(progress.lives.saturating_sub(1)),
        last_life_lost_ms: Some(now_ms),
        ..ProgressDelta::default()
    }
}
