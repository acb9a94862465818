use crate::input::{Prompted, classify, parse_lower_bound, parse_mode};
use crate::mode::{Mode, TopicFlags};
use crate::session::InteractionPort;

pub const DEFAULT_LOWER_BOUND: u32 = 1;
pub const SQUARE_UPPER_BOUND: u32 = 25;
pub const CUBE_UPPER_BOUND: u32 = 10;

/// Everything needed to build a question pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub topics: TopicFlags,
    /// Lower bound for squares/square roots; `None` uses the default.
    pub square_start: Option<u32>,
    /// Lower bound for cubes/cube roots; `None` uses the default.
    pub cube_start: Option<u32>,
    pub square_end: u32,
    pub cube_end: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            topics: TopicFlags::default(),
            square_start: None,
            cube_start: None,
            square_end: SQUARE_UPPER_BOUND,
            cube_end: CUBE_UPPER_BOUND,
        }
    }
}

/// Values supplied up front; anything left `None` is asked for interactively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub mode: Option<Mode>,
    pub square_start: Option<u32>,
    pub cube_start: Option<u32>,
    pub square_end: Option<u32>,
    pub cube_end: Option<u32>,
}

impl QuizConfig {
    #[must_use]
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            topics: mode.flags(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn square_start(&self) -> u32 {
        self.square_start.unwrap_or(DEFAULT_LOWER_BOUND)
    }

    #[must_use]
    pub fn cube_start(&self) -> u32 {
        self.cube_start.unwrap_or(DEFAULT_LOWER_BOUND)
    }

    /// Builds the configuration, prompting for the mode and for lower bounds
    /// of the selected domains unless `overrides` already supplies them.
    ///
    /// Returns `Prompted::Cancelled` on a quit token or closed input.
    pub fn gather<P: InteractionPort + ?Sized>(
        port: &mut P,
        overrides: &ConfigOverrides,
    ) -> Prompted<Self> {
        let mode = match overrides.mode {
            Some(mode) => mode,
            None => match choose_mode(port) {
                Prompted::Answered(mode) => mode,
                _ => return Prompted::Cancelled,
            },
        };

        let mut config = Self::with_mode(mode);
        config.square_end = overrides.square_end.unwrap_or(SQUARE_UPPER_BOUND);
        config.cube_end = overrides.cube_end.unwrap_or(CUBE_UPPER_BOUND);

        if config.topics.uses_squares() {
            config.square_start = match overrides.square_start {
                Some(start) => Some(start),
                None => {
                    let label = format!("squares/square roots (upper limit {})", config.square_end);
                    match ask_lower_bound(port, &label) {
                        Prompted::Answered(start) => Some(start),
                        _ => return Prompted::Cancelled,
                    }
                }
            };
        }
        if config.topics.uses_cubes() {
            config.cube_start = match overrides.cube_start {
                Some(start) => Some(start),
                None => {
                    let label = format!("cubes/cube roots (upper limit {})", config.cube_end);
                    match ask_lower_bound(port, &label) {
                        Prompted::Answered(start) => Some(start),
                        _ => return Prompted::Cancelled,
                    }
                }
            };
        }

        Prompted::Answered(config)
    }
}

/// Shows the menu and loops until a valid choice or a quit.
pub fn choose_mode<P: InteractionPort + ?Sized>(port: &mut P) -> Prompted<Mode> {
    for line in Mode::menu_lines() {
        port.write_line(&line);
    }
    loop {
        let line = port.read_line("Enter 1-7 (or 'q' to quit): ");
        match classify(line, parse_mode) {
            Prompted::Invalid(e) => port.write_line(&e.to_string()),
            outcome => return outcome,
        }
    }
}

fn ask_lower_bound<P: InteractionPort + ?Sized>(port: &mut P, label: &str) -> Prompted<u32> {
    let prompt = format!(
        "Bottom number to study for {label} (press Enter for {DEFAULT_LOWER_BOUND}): "
    );
    loop {
        let line = port.read_line(&prompt);
        match classify(line, |raw| parse_lower_bound(raw, DEFAULT_LOWER_BOUND)) {
            Prompted::Invalid(e) => port.write_line(&e.to_string()),
            outcome => return outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct ScriptedPort {
        inputs: VecDeque<&'static str>,
        prompts: Vec<String>,
        output: Vec<String>,
    }

    impl ScriptedPort {
        fn new(inputs: &[&'static str]) -> Self {
            Self {
                inputs: inputs.iter().copied().collect(),
                prompts: Vec::new(),
                output: Vec::new(),
            }
        }
    }

    impl InteractionPort for ScriptedPort {
        fn read_line(&mut self, prompt: &str) -> Option<String> {
            self.prompts.push(prompt.to_string());
            self.inputs.pop_front().map(str::to_string)
        }

        fn write_line(&mut self, text: &str) {
            self.output.push(text.to_string());
        }
    }

    #[test]
    fn test_defaults() {
        let config = QuizConfig::default();
        assert!(config.topics.is_empty());
        assert_eq!(config.square_start(), 1);
        assert_eq!(config.cube_start(), 1);
        assert_eq!((config.square_end, config.cube_end), (25, 10));
    }

    #[test]
    fn test_gather_squares_only_asks_one_bound() {
        let mut port = ScriptedPort::new(&["1", "3"]);
        let config = QuizConfig::gather(&mut port, &ConfigOverrides::default());
        let Prompted::Answered(config) = config else {
            panic!("expected a configuration");
        };
        assert_eq!(config.topics, Mode::Squares.flags());
        assert_eq!(config.square_start, Some(3));
        assert_eq!(config.cube_start, None);
        assert_eq!(port.prompts.len(), 2);
        assert!(port.prompts[1].contains("squares/square roots (upper limit 25)"));
    }

    #[test]
    fn test_gather_blank_bound_uses_default() {
        let mut port = ScriptedPort::new(&["7", "", "  "]);
        let Prompted::Answered(config) = QuizConfig::gather(&mut port, &ConfigOverrides::default())
        else {
            panic!("expected a configuration");
        };
        assert_eq!(config.square_start, Some(1));
        assert_eq!(config.cube_start, Some(1));
        assert!(port.prompts[2].contains("cubes/cube roots (upper limit 10)"));
    }

    #[test]
    fn test_gather_reprompts_on_bad_input() {
        let mut port = ScriptedPort::new(&["0", "eight", "6", "-2", "x", "4"]);
        let Prompted::Answered(config) = QuizConfig::gather(&mut port, &ConfigOverrides::default())
        else {
            panic!("expected a configuration");
        };
        assert_eq!(config.topics, Mode::CubesAndRoots.flags());
        assert_eq!(config.cube_start, Some(4));
        let errors: Vec<&str> = port
            .output
            .iter()
            .filter(|l| l.starts_with("Please"))
            .map(String::as_str)
            .collect();
        assert_eq!(
            errors,
            vec![
                "Please enter a number between 1 and 7.",
                "Please enter a number between 1 and 7.",
                "Please enter a non-negative integer.",
                "Please enter a whole number, or press Enter to accept the default.",
            ]
        );
    }

    #[test]
    fn test_gather_quit_at_menu() {
        let mut port = ScriptedPort::new(&["q"]);
        assert_eq!(
            QuizConfig::gather(&mut port, &ConfigOverrides::default()),
            Prompted::Cancelled
        );
    }

    #[test]
    fn test_gather_quit_at_bound() {
        let mut port = ScriptedPort::new(&["5", "Exit"]);
        assert_eq!(
            QuizConfig::gather(&mut port, &ConfigOverrides::default()),
            Prompted::Cancelled
        );
    }

    #[test]
    fn test_gather_closed_input_cancels() {
        let mut port = ScriptedPort::new(&["3"]);
        assert_eq!(
            QuizConfig::gather(&mut port, &ConfigOverrides::default()),
            Prompted::Cancelled
        );
    }

    #[test]
    fn test_overrides_skip_prompts() {
        let mut port = ScriptedPort::new(&[]);
        let overrides = ConfigOverrides {
            mode: Some(Mode::All),
            square_start: Some(20),
            cube_start: Some(0),
            square_end: Some(30),
            cube_end: None,
        };
        let Prompted::Answered(config) = QuizConfig::gather(&mut port, &overrides) else {
            panic!("expected a configuration");
        };
        assert!(port.prompts.is_empty());
        assert!(port.output.is_empty());
        assert_eq!(config.square_start, Some(20));
        assert_eq!(config.cube_start, Some(0));
        assert_eq!((config.square_end, config.cube_end), (30, 10));
    }
}
