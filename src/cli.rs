use crate::config::ConfigOverrides;
use crate::debug_log;
use crate::mode::Mode;
use crate::session::InteractionPort;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Squares, square roots, cubes and cube roots drill
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Practice mode 1-7, skipping the menu
    #[arg(short = 'm', long = "mode", value_parser = clap::value_parser!(u8).range(1..=7))]
    pub mode: Option<u8>,

    /// Lower bound for squares/square roots
    #[arg(long)]
    pub square_start: Option<u32>,

    /// Lower bound for cubes/cube roots
    #[arg(long)]
    pub cube_start: Option<u32>,

    /// Upper bound for squares/square roots
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(0..=100_000))]
    pub square_end: u32,

    /// Upper bound for cubes/cube roots
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=100_000))]
    pub cube_end: u32,

    /// Seed for the question order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            mode: self.mode.and_then(Mode::from_number),
            square_start: self.square_start,
            cube_start: self.cube_start,
            square_end: Some(self.square_end),
            cube_end: Some(self.cube_end),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub const INTERRUPTED_MESSAGE: &str = "\nInterrupted. Goodbye!";

/// Farewell printed when Ctrl-C arrives during a line-mode session.
pub fn write_interrupted<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{INTERRUPTED_MESSAGE}")?;
    writer.flush()
}

/// Makes Ctrl-C in line mode print a farewell and exit with status 0.
///
/// The full-screen interface reads Ctrl-C as a key press instead, so it does
/// not install this.
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        log::info!("Interrupted by signal");
        let _ = write_interrupted(&mut io::stdout());
        std::process::exit(0);
    })
}

/// Line-oriented `InteractionPort` over any reader/writer pair.
///
/// Prompts are written without a trailing newline and flushed so the answer
/// is typed on the same line.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> InteractionPort for CliInterface<R, W> {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.writer, "{prompt}").and_then(|()| self.writer.flush()) {
            debug_log!("Failed to write prompt: {}", e);
        }
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => {
                debug_log!("Input closed");
                None
            }
            Ok(_) => Some(input),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            }
        }
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("Failed to write line: {}", e);
        }
    }
}
