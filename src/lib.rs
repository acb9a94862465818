// Library interface for power-drill
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod logging;
pub mod mode;
pub mod questions;
pub mod session;
pub mod tui;

// Re-export commonly used items for easier testing
pub use config::{ConfigOverrides, QuizConfig};
pub use driver::{DriverOutcome, run_configured, run_drill};
pub use mode::{Mode, TopicFlags};
pub use questions::{
    QuestionItem, QuestionPool, build_question_pool, generate_cube_questions,
    generate_square_questions,
};
pub use session::{
    FinishReason, InteractionPort, KeepOrder, RandomOrder, RoundResult, SessionState,
    SessionSummary, Shuffle, play_round, run_session,
};
