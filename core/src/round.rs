use crate::config::RoundConfig;
use crate::countdown::Countdown;
use crate::level::{LevelRequirement, RoundOutcome, RoundSummary};
use crate::problem::{self, Problem};
use crate::store::{load_level, save_level, KeyValueStore};
use chrono::Utc;
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

const ANSWER_TOLERANCE: f64 = 0.001;

pub const MSG_CORRECT: &str = "Correct!";
pub const MSG_WRONG: &str = "Try again!";
pub const MSG_INVALID: &str = "Please enter a valid number!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub level: u32,
    pub current_problem: Option<Problem>,
    pub correct_answers: u32,
    pub mistakes: u32,
    pub time_left_secs: u32,
    pub phase: Phase,
}

/// Transient result of a submission. The host shows it and drops it once
/// `clear_after` has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub message: &'static str,
    pub is_correct: Option<bool>,
    pub clear_after: Duration,
}

pub struct RoundController<S: KeyValueStore> {
    state: RoundState,
    countdown: Countdown,
    config: RoundConfig,
    store: S,
    rng: StdRng,
    last_summary: Option<RoundSummary>,
}

impl<S: KeyValueStore> RoundController<S> {
    pub fn new(store: S, config: RoundConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_entropy())
    }

    pub fn with_rng(store: S, config: RoundConfig, rng: StdRng) -> Self {
        let level = load_level(&store);
        debug!("controller ready at level {}", level);
        Self {
            state: RoundState {
                level,
                current_problem: None,
                correct_answers: 0,
                mistakes: 0,
                time_left_secs: config.round_secs,
                phase: Phase::Idle,
            },
            countdown: Countdown::new(),
            config,
            store,
            rng,
            last_summary: None,
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    pub fn requirement(&self) -> LevelRequirement {
        self.config.requirement(self.state.level)
    }

    pub fn is_active(&self) -> bool {
        self.state.phase == Phase::Active
    }

    pub fn start_round(&mut self) {
        self.start_round_at(Instant::now());
    }

    /// Works from any phase. Restarting an active round discards it without
    /// evaluation and replaces its countdown.
    pub fn start_round_at(&mut self, now: Instant) {
        self.state.time_left_secs = self.config.round_secs;
        self.state.correct_answers = 0;
        self.state.mistakes = 0;
        self.state.current_problem = Some(problem::generate(self.state.level, &mut self.rng));
        self.state.phase = Phase::Active;
        self.countdown.start(now);
        debug!(
            "round started at level {} ({}s)",
            self.state.level, self.state.time_left_secs
        );
    }

    pub fn submit_answer(&mut self, raw: &str) -> Option<Feedback> {
        if !self.is_active() {
            return None;
        }
        let current = self.state.current_problem?;

        let parsed = match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => return Some(self.feedback(MSG_INVALID, None)),
        };

        if (parsed - current.answer as f64).abs() < ANSWER_TOLERANCE {
            self.state.correct_answers += 1;
            self.state.current_problem = Some(problem::generate(self.state.level, &mut self.rng));
            Some(self.feedback(MSG_CORRECT, Some(true)))
        } else {
            self.state.mistakes += 1;
            Some(self.feedback(MSG_WRONG, Some(false)))
        }
    }

    pub fn tick(&mut self) {
        if !self.is_active() {
            return;
        }
        self.state.time_left_secs = self.state.time_left_secs.saturating_sub(1);
        if self.state.time_left_secs == 0 {
            self.finish();
        }
    }

    /// Applies every tick that became due since the last poll.
    pub fn poll_timer(&mut self, now: Instant) {
        for _ in 0..self.countdown.due_ticks(now) {
            if !self.is_active() {
                break;
            }
            self.tick();
        }
    }

    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.countdown.until_next(now)
    }

    pub fn timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    fn feedback(&self, message: &'static str, is_correct: Option<bool>) -> Feedback {
        Feedback {
            message,
            is_correct,
            clear_after: self.config.feedback_clear(),
        }
    }

    fn finish(&mut self) {
        self.countdown.cancel();
        self.state.phase = Phase::Complete;

        let level = self.state.level;
        let requirement = self.requirement();
        let outcome = RoundOutcome::evaluate(
            &requirement,
            self.state.correct_answers,
            self.state.mistakes,
            self.config.fail_badly_below,
        );
        let new_level = outcome.next_level(level);

        info!(
            "round over at level {}: {} correct, {} mistakes -> {:?}, level {}",
            level, self.state.correct_answers, self.state.mistakes, outcome, new_level
        );

        self.state.level = new_level;
        if outcome.persists() {
            if let Err(e) = save_level(&mut self.store, new_level) {
                error!("failed to save level {}: {}", new_level, e);
            }
        }

        self.last_summary = Some(RoundSummary {
            level_played: level,
            new_level,
            correct_answers: self.state.correct_answers,
            mistakes: self.state.mistakes,
            requirement,
            outcome,
            finished_at: Utc::now(),
        });
    }
}
