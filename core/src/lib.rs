//! Timed arithmetic drill: problem generation and the round/level state machine.
//!
//! The host owns rendering and the clock. It calls [`round::RoundController::start_round`],
//! [`round::RoundController::submit_answer`] and polls the timer once a frame.

pub mod config;
pub mod countdown;
pub mod level;
pub mod problem;
pub mod round;
pub mod store;

pub use config::RoundConfig;
pub use level::{LevelRequirement, RoundOutcome, RoundSummary};
pub use problem::{Operation, Problem};
pub use round::{Feedback, Phase, RoundController, RoundState};
pub use store::{KeyValueStore, MemoryStore, StoreError};
