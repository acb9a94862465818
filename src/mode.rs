use crate::error::InputError;
use std::str::FromStr;

/// Which of the four topics are included in a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicFlags {
    pub squares: bool,
    pub square_roots: bool,
    pub cubes: bool,
    pub cube_roots: bool,
}

impl TopicFlags {
    #[must_use]
    pub const fn new(squares: bool, square_roots: bool, cubes: bool, cube_roots: bool) -> Self {
        Self {
            squares,
            square_roots,
            cubes,
            cube_roots,
        }
    }

    #[must_use]
    pub fn uses_squares(self) -> bool {
        self.squares || self.square_roots
    }

    #[must_use]
    pub fn uses_cubes(self) -> bool {
        self.cubes || self.cube_roots
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.uses_squares() && !self.uses_cubes()
    }
}

/// The seven practice presets offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Squares,
    SquareRoots,
    Cubes,
    CubeRoots,
    SquaresAndRoots,
    CubesAndRoots,
    All,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Squares,
        Mode::SquareRoots,
        Mode::Cubes,
        Mode::CubeRoots,
        Mode::SquaresAndRoots,
        Mode::CubesAndRoots,
        Mode::All,
    ];

    #[must_use]
    pub fn from_number(choice: u8) -> Option<Self> {
        match choice {
            1..=7 => Some(Self::ALL[usize::from(choice) - 1]),
            _ => None,
        }
    }

    /// Menu number, 1-7.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Squares => 1,
            Self::SquareRoots => 2,
            Self::Cubes => 3,
            Self::CubeRoots => 4,
            Self::SquaresAndRoots => 5,
            Self::CubesAndRoots => 6,
            Self::All => 7,
        }
    }

    #[must_use]
    pub fn flags(self) -> TopicFlags {
        match self {
            Self::Squares => TopicFlags::new(true, false, false, false),
            Self::SquareRoots => TopicFlags::new(false, true, false, false),
            Self::Cubes => TopicFlags::new(false, false, true, false),
            Self::CubeRoots => TopicFlags::new(false, false, false, true),
            Self::SquaresAndRoots => TopicFlags::new(true, true, false, false),
            Self::CubesAndRoots => TopicFlags::new(false, false, true, true),
            Self::All => TopicFlags::new(true, true, true, true),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Squares => "Squares only",
            Self::SquareRoots => "Square roots only",
            Self::Cubes => "Cubes only",
            Self::CubeRoots => "Cube roots only",
            Self::SquaresAndRoots => "Squares + Square roots",
            Self::CubesAndRoots => "Cubes + Cube roots",
            Self::All => "All four",
        }
    }

    /// Lines of the selection menu, header first.
    pub fn menu_lines() -> Vec<String> {
        let mut lines = vec!["\nSelect a practice mode:".to_string()];
        lines.extend(
            Self::ALL
                .iter()
                .map(|mode| format!("  {}) {}", mode.number(), mode.label())),
        );
        lines
    }
}

impl FromStr for Mode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .ok_or(InputError::InvalidMenuChoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_flags() {
        let expected = [
            (1, (true, false, false, false)),
            (2, (false, true, false, false)),
            (3, (false, false, true, false)),
            (4, (false, false, false, true)),
            (5, (true, true, false, false)),
            (6, (false, false, true, true)),
            (7, (true, true, true, true)),
        ];
        for (choice, (sq, sqr, cu, cur)) in expected {
            let flags = Mode::from_number(choice).unwrap().flags();
            assert_eq!(flags, TopicFlags::new(sq, sqr, cu, cur), "choice {choice}");
        }
    }

    #[test]
    fn test_number_round_trips_through_from_number() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_number(mode.number()), Some(mode));
        }
    }

    #[test]
    fn test_out_of_range_choices() {
        assert_eq!(Mode::from_number(0), None);
        assert_eq!(Mode::from_number(8), None);
        assert_eq!("9".parse::<Mode>(), Err(InputError::InvalidMenuChoice));
        assert_eq!("two".parse::<Mode>(), Err(InputError::InvalidMenuChoice));
        assert_eq!("".parse::<Mode>(), Err(InputError::InvalidMenuChoice));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 6 \n".parse::<Mode>(), Ok(Mode::CubesAndRoots));
    }

    #[test]
    fn test_topic_domains() {
        assert!(Mode::SquareRoots.flags().uses_squares());
        assert!(!Mode::SquareRoots.flags().uses_cubes());
        assert!(Mode::CubeRoots.flags().uses_cubes());
        assert!(TopicFlags::default().is_empty());
        assert!(!Mode::All.flags().is_empty());
    }

    #[test]
    fn test_menu_lines() {
        let lines = Mode::menu_lines();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "  1) Squares only");
        assert_eq!(lines[7], "  7) All four");
    }
}
