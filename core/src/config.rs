use crate::level::{LevelRequirement, FAIL_BADLY_BELOW, MIN_CORRECT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub round_secs: u32,
    pub min_correct: u32,
    pub fail_badly_below: u32,
    pub feedback_clear_ms: u64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_secs: 60,
            min_correct: MIN_CORRECT,
            fail_badly_below: FAIL_BADLY_BELOW,
            feedback_clear_ms: 500,
        }
    }
}

impl RoundConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn requirement(&self, level: u32) -> LevelRequirement {
        LevelRequirement::with_min_correct(level, self.min_correct)
    }

    pub fn feedback_clear(&self) -> Duration {
        Duration::from_millis(self.feedback_clear_ms)
    }
}
