use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_CORRECT: u32 = 20;
pub const FAIL_BADLY_BELOW: u32 = 10;

const START_MISTAKES: u32 = 5;
const FLOOR_MISTAKES: u32 = 2;
const LEVELS_PER_MISTAKE: u32 = 3;

/// Upper bound on a problem's answer at `level`.
pub fn target_range(level: u32) -> u32 {
    level.saturating_mul(5)
}

pub fn max_mistakes(level: u32) -> u32 {
    let steps = (level.max(1) - 1) / LEVELS_PER_MISTAKE;
    START_MISTAKES.saturating_sub(steps).max(FLOOR_MISTAKES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRequirement {
    pub min_correct: u32,
    pub max_mistakes: u32,
}

impl LevelRequirement {
    pub fn for_level(level: u32) -> Self {
        Self::with_min_correct(level, MIN_CORRECT)
    }

    pub fn with_min_correct(level: u32, min_correct: u32) -> Self {
        Self {
            min_correct,
            max_mistakes: max_mistakes(level),
        }
    }

    pub fn is_met(&self, correct: u32, mistakes: u32) -> bool {
        correct >= self.min_correct && mistakes <= self.max_mistakes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Passed,
    FailedBadly,
    FailedNeutral,
}

impl RoundOutcome {
    pub fn evaluate(
        req: &LevelRequirement,
        correct: u32,
        mistakes: u32,
        fail_badly_below: u32,
    ) -> Self {
        if req.is_met(correct, mistakes) {
            RoundOutcome::Passed
        } else if correct < fail_badly_below {
            RoundOutcome::FailedBadly
        } else {
            RoundOutcome::FailedNeutral
        }
    }

    pub fn next_level(&self, level: u32) -> u32 {
        match self {
            RoundOutcome::Passed => level.saturating_add(1),
            RoundOutcome::FailedBadly => level.saturating_sub(1).max(1),
            RoundOutcome::FailedNeutral => level,
        }
    }

    /// Whether this outcome writes the level back to the store.
    pub fn persists(&self) -> bool {
        !matches!(self, RoundOutcome::FailedNeutral)
    }
}

/// Result of one finished round, kept for the completion screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub level_played: u32,
    pub new_level: u32,
    pub correct_answers: u32,
    pub mistakes: u32,
    pub requirement: LevelRequirement,
    pub outcome: RoundOutcome,
    pub finished_at: DateTime<Utc>,
}

impl RoundSummary {
    pub fn passed(&self) -> bool {
        self.outcome == RoundOutcome::Passed
    }

    pub fn correct_met(&self) -> bool {
        self.correct_answers >= self.requirement.min_correct
    }

    pub fn mistakes_met(&self) -> bool {
        self.mistakes <= self.requirement.max_mistakes
    }
}
