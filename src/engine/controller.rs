//! Phase controller
//!
//! Owns the authoritative phase and routes both tick sources (per-frame time
//! and the host's 1 Hz countdown) plus the host's commands through one
//! resolution guard, so a slice and a timeout landing on the same instant
//! can never score a round twice.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::fruit::FruitKind;
use super::questions;
use super::scoring::{self, ScoreEvent};
use super::state::{Phase, SessionState};
use crate::consts::*;
use crate::progress::{NinjaProgress, ProgressDelta};

/// Discrete commands from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The blade touched entity `id`
    Slice(u32),
    /// The player picked an answer option
    Answer(usize),
    /// Dashboard level-up action
    LevelUp,
    /// Leave the game
    Exit,
}

/// Events emitted back to the host
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A durable-progress change for the store to persist
    Progress(ProgressDelta),
    /// The cumulative score just crossed the level-up threshold
    LevelUpAvailable,
    /// The player asked to leave; the engine is done
    Exited,
}

/// The mini-game engine. One instance per playthrough.
///
/// `session` and `progress` are open for the host to read (and, for
/// `progress`, to seed); all gameplay mutation goes through [`Engine::frame`],
/// [`Engine::countdown_tick`] and [`Engine::handle`].
#[derive(Debug)]
pub struct Engine {
    pub session: SessionState,
    pub progress: NinjaProgress,
    rng: Pcg32,
    events: Vec<EngineEvent>,
    now_ms: f64,
    exited: bool,
}

impl Engine {
    /// Start a session over the given progress record.
    ///
    /// A record with no lives left has nothing to play; the session opens
    /// already on the game-over screen.
    pub fn new(mut progress: NinjaProgress, seed: u64) -> Self {
        progress.normalize();
        let mut session = SessionState::new();
        if progress.lives == 0 {
            session.phase = Phase::GameOver;
        } else {
            session.fruits.prime_spawner();
        }
        Self {
            session,
            progress,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            now_ms: 0.0,
            exited: false,
        }
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance by `dt` seconds of host frame time.
    ///
    /// `now_ms` is the host wall clock, threaded through so life-loss
    /// timestamps never require a clock read inside the engine.
    pub fn frame(&mut self, dt: f32, now_ms: f64) {
        if self.exited || self.session.phase.is_terminal() {
            return;
        }
        self.now_ms = now_ms;
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        match self.session.phase {
            Phase::Slicing => {
                self.session.fruits.step(dt, &mut self.rng);
                if self.session.round_resolved {
                    self.session.quiz_entry_secs -= dt;
                    if self.session.quiz_entry_secs <= 0.0 {
                        self.enter_quiz();
                    }
                }
            }
            Phase::Feedback => {
                self.session.feedback_secs -= dt;
                if self.session.feedback_secs <= 0.0 {
                    self.leave_feedback();
                }
            }
            Phase::Quiz | Phase::GameOver | Phase::Completed => {}
        }
    }

    /// One tick of the host's 1 Hz countdown.
    pub fn countdown_tick(&mut self) {
        if self.exited || self.session.phase.is_terminal() {
            return;
        }
        match self.session.phase {
            // Once the round is made, the clock stops mattering
            Phase::Slicing if !self.session.round_resolved => {
                self.session.countdown = self.session.countdown.saturating_sub(1);
                if self.session.countdown == 0 {
                    // Too slow: flat penalty, but the quiz happens anyway
                    self.score(ScoreEvent::SliceTimeout);
                    self.enter_quiz();
                }
            }
            Phase::Quiz => {
                self.session.countdown = self.session.countdown.saturating_sub(1);
                if self.session.countdown == 0 {
                    self.resolve_answer(None);
                }
            }
            _ => {}
        }
    }

    /// Process one host command.
    pub fn handle(&mut self, cmd: Command) {
        if self.exited {
            return;
        }
        match cmd {
            Command::Slice(id) => self.slice(id),
            Command::Answer(index) => {
                if self.session.phase != Phase::Quiz {
                    return;
                }
                let valid = self
                    .session
                    .question
                    .as_ref()
                    .is_some_and(|q| index < q.options.len());
                if valid {
                    self.resolve_answer(Some(index));
                }
            }
            Command::LevelUp => self.level_up(),
            Command::Exit => {
                self.exited = true;
                self.events.push(EngineEvent::Exited);
            }
        }
    }

    fn slice(&mut self, id: u32) {
        if self.session.phase != Phase::Slicing || self.session.round_resolved {
            return;
        }
        match self.session.fruits.slice(id) {
            Some(FruitKind::Bomb) => self.score(ScoreEvent::BombSliced),
            Some(FruitKind::Fruit) => {
                self.score(ScoreEvent::FruitSliced);
                self.session.slices_this_round += 1;
                if self.session.slices_this_round >= REQUIRED_SLICES {
                    // Round made; short beat before the question comes up
                    self.session.round_resolved = true;
                    self.session.quiz_entry_secs = QUIZ_ENTRY_DELAY_SECS;
                }
            }
            None => {}
        }
    }

    fn enter_quiz(&mut self) {
        self.session.phase = Phase::Quiz;
        self.session.countdown = QUIZ_COUNTDOWN_SECS;
        self.session.round_resolved = false;
        self.session.fruits.clear();
        self.session.question = Some(questions::generate(self.progress.level, &mut self.rng));
    }

    /// Settle the quiz round. `None` means the countdown ran out.
    ///
    /// Taking the question is what makes this idempotent: an answer that
    /// races the timeout finds no question and is dropped.
    fn resolve_answer(&mut self, choice: Option<usize>) {
        let Some(question) = self.session.question.take() else {
            return;
        };
        let event = match choice {
            Some(index) if question.is_correct(index) => ScoreEvent::CorrectAnswer,
            Some(_) => ScoreEvent::WrongAnswer { timed_out: false },
            None => ScoreEvent::WrongAnswer { timed_out: true },
        };
        self.score(event);
        self.session.phase = Phase::Feedback;
        self.session.feedback_secs = FEEDBACK_SECS;
    }

    fn leave_feedback(&mut self) {
        self.session.feedback = None;
        if self.progress.lives == 0 {
            self.session.phase = Phase::GameOver;
        } else {
            self.start_round();
        }
    }

    fn start_round(&mut self) {
        self.session.phase = Phase::Slicing;
        self.session.countdown = SLICING_COUNTDOWN_SECS;
        self.session.slices_this_round = 0;
        self.session.round_resolved = false;
        self.session.question = None;
        self.session.fruits.clear();
        self.session.fruits.prime_spawner();
    }

    fn level_up(&mut self) {
        if !self.progress.can_level_up() {
            return;
        }
        let delta = ProgressDelta {
            level: Some(self.progress.level + 1),
            ..ProgressDelta::default()
        };
        self.progress.merge(&delta);
        self.events.push(EngineEvent::Progress(delta));
    }

    /// Run an event through the ledger and book any durable fallout.
    fn score(&mut self, event: ScoreEvent) {
        if let Some(delta) = scoring::apply(&mut self.session, &self.progress, event, self.now_ms) {
            self.note_threshold_crossing(&delta);
            self.progress.merge(&delta);
            self.events.push(EngineEvent::Progress(delta));
        }
    }

    /// Edge-triggered: fires only on the answer that crosses the threshold
    fn note_threshold_crossing(&mut self, delta: &ProgressDelta) {
        let Some(new_score) = delta.cumulative_score else {
            return;
        };
        let threshold = self.progress.level_threshold();
        if self.progress.level < MAX_LEVEL
            && self.progress.cumulative_score < threshold
            && new_score >= threshold
        {
            self.events.push(EngineEvent::LevelUpAvailable);
        }
    }
}
