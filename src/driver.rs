use crate::config::{CUBE_UPPER_BOUND, ConfigOverrides, QuizConfig, SQUARE_UPPER_BOUND};
use crate::error::AppError;
use crate::info_log;
use crate::input::Prompted;
use crate::questions::build_question_pool;
use crate::session::{InteractionPort, SessionSummary, Shuffle, run_session};

/// How a whole program run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOutcome {
    /// A session ran; its summary says why it stopped.
    Completed(SessionSummary),
    /// Quit before any question was asked.
    Cancelled,
    /// The configuration produced no questions.
    NoTopicsSelected,
}

/// Runs the banner, configuration prompts and the session.
pub fn run_drill<P, S>(
    port: &mut P,
    overrides: &ConfigOverrides,
    shuffler: &mut S,
) -> Result<DriverOutcome, AppError>
where
    P: InteractionPort + ?Sized,
    S: Shuffle + ?Sized,
{
    port.write_line(&format!(
        "Math Quiz: Squares, Square Roots (to {}) and Cubes, Cube Roots (to {})",
        overrides.square_end.unwrap_or(SQUARE_UPPER_BOUND),
        overrides.cube_end.unwrap_or(CUBE_UPPER_BOUND)
    ));
    port.write_line("- Enter numbers only. Type 'q' to quit at any time.");

    let config = match QuizConfig::gather(port, overrides) {
        Prompted::Answered(config) => config,
        _ => {
            info_log!("Cancelled during setup");
            port.write_line("Exiting quiz…");
            return Ok(DriverOutcome::Cancelled);
        }
    };
    info_log!("Configuration: {:?}", config);
    run_configured(port, &config, shuffler)
}

/// Builds the pool for an already gathered configuration and runs it.
pub fn run_configured<P, S>(
    port: &mut P,
    config: &QuizConfig,
    shuffler: &mut S,
) -> Result<DriverOutcome, AppError>
where
    P: InteractionPort + ?Sized,
    S: Shuffle + ?Sized,
{
    let pool = build_question_pool(config)?;
    if pool.is_empty() {
        if config.topics.is_empty() {
            port.write_line("No topics selected; exiting.");
        } else {
            port.write_line("No questions in the selected range; exiting.");
        }
        return Ok(DriverOutcome::NoTopicsSelected);
    }

    Ok(DriverOutcome::Completed(run_session(pool, port, shuffler)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use crate::session::{FinishReason, KeepOrder};
    use std::collections::VecDeque;

    struct ScriptedPort {
        inputs: VecDeque<&'static str>,
        output: Vec<String>,
    }

    impl InteractionPort for ScriptedPort {
        fn read_line(&mut self, _prompt: &str) -> Option<String> {
            self.inputs.pop_front().map(str::to_string)
        }

        fn write_line(&mut self, text: &str) {
            self.output.push(text.to_string());
        }
    }

    fn port(inputs: &[&'static str]) -> ScriptedPort {
        ScriptedPort {
            inputs: inputs.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    #[test]
    fn test_quit_at_menu_is_cancelled() {
        let mut port = port(&["quit"]);
        let outcome = run_drill(&mut port, &ConfigOverrides::default(), &mut KeepOrder).unwrap();
        assert_eq!(outcome, DriverOutcome::Cancelled);
        assert_eq!(port.output.last().unwrap(), "Exiting quiz…");
        assert!(!port.output.iter().any(|l| l.contains("Final score")));
    }

    #[test]
    fn test_empty_range_reports_and_skips_summary() {
        let mut port = port(&["1", "30"]);
        let outcome = run_drill(&mut port, &ConfigOverrides::default(), &mut KeepOrder).unwrap();
        assert_eq!(outcome, DriverOutcome::NoTopicsSelected);
        assert_eq!(
            port.output.last().unwrap(),
            "No questions in the selected range; exiting."
        );
    }

    #[test]
    fn test_no_topics_reports_and_skips_summary() {
        let mut port = port(&[]);
        let config = QuizConfig::default();
        assert!(config.topics.is_empty());

        let outcome = run_configured(&mut port, &config, &mut KeepOrder).unwrap();
        assert_eq!(outcome, DriverOutcome::NoTopicsSelected);
        assert_eq!(port.output, vec!["No topics selected; exiting."]);
    }

    #[test]
    fn test_full_run_with_overrides() {
        let mut port = port(&["9"]);
        let overrides = ConfigOverrides {
            mode: Some(Mode::Squares),
            square_start: Some(3),
            square_end: Some(3),
            ..ConfigOverrides::default()
        };
        let outcome = run_drill(&mut port, &overrides, &mut KeepOrder).unwrap();
        let DriverOutcome::Completed(summary) = outcome else {
            panic!("expected a completed session");
        };
        assert_eq!(summary.reason, FinishReason::AllCorrect);
        assert_eq!(
            port.output[0],
            "Math Quiz: Squares, Square Roots (to 3) and Cubes, Cube Roots (to 10)"
        );
        assert_eq!(port.output.last().unwrap(), "\nFinal score: 1/1 correct");
    }
}
