//! Pre-game warmup quiz
//!
//! A short multiple-choice set run before the first blitz. The host screen
//! fetches questions from the hosted service and hands them over; when the
//! fetch fails it falls back to the built-in set. Two of three correct earns
//! the Legendary Katana.

use serde::{Deserialize, Serialize};

use crate::engine::questions::{self, QuizQuestion};

/// Correct answers needed to earn the reward
pub const REWARD_THRESHOLD: u32 = 2;

/// The katana granted for passing the warmup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyReward {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub bonus: String,
}

impl SurveyReward {
    fn legendary_katana() -> Self {
        Self {
            id: "legendary-katana".to_string(),
            name: "Legendary Katana".to_string(),
            description: "A blade forged from pure mathematical logic.".to_string(),
            icon: "⚔️".to_string(),
            bonus: "Double Points".to_string(),
        }
    }
}

/// Walks a question list one answer at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    questions: Vec<QuizQuestion>,
    index: usize,
    correct: u32,
    complete: bool,
}

impl Survey {
    /// Run over a service-provided question set
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let complete = questions.is_empty();
        Self {
            questions,
            index: 0,
            correct: 0,
            complete,
        }
    }

    /// Run over the built-in fallback set
    pub fn with_fallback() -> Self {
        Self::new(questions::fallback_survey())
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.complete {
            return None;
        }
        self.questions.get(self.index)
    }

    /// (answered so far, total)
    pub fn position(&self) -> (usize, usize) {
        (self.index, self.questions.len())
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Record an answer for the current question and advance
    pub fn answer(&mut self, option_index: usize) {
        if self.complete {
            return;
        }
        let Some(question) = self.questions.get(self.index) else {
            self.complete = true;
            return;
        };
        if question.is_correct(option_index) {
            self.correct += 1;
        }
        self.index += 1;
        if self.index >= self.questions.len() {
            self.complete = true;
        }
    }

    pub fn passed(&self) -> bool {
        self.complete && self.correct >= REWARD_THRESHOLD
    }

    /// The katana, once earned
    pub fn reward(&self) -> Option<SurveyReward> {
        self.passed().then(SurveyReward::legendary_katana)
    }
}
