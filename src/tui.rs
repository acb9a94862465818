//! TUI (Terminal User Interface) front-end for the drill
//!
//! Implements [`InteractionPort`] on top of Ratatui: everything the session
//! writes goes into a scrolling transcript, and `read_line` collects keystrokes
//! into an input box until ENTER.
//!
//! ESC or Ctrl-C ends input, which the session treats like a quit.

use crate::session::InteractionPort;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const MAX_INPUT_LENGTH: usize = 24;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow);
const INPUT_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Result of one key press while reading a line.
#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Pending,
    Submit(String),
    Close,
}

/// Context for rendering the UI.
struct RenderContext<'a> {
    transcript: &'a [String],
    prompt: &'a str,
    current_input: &'a str,
    reading: bool,
}

fn line_style(text: &str) -> Style {
    if text.starts_with("Correct!") {
        SUCCESS_STYLE
    } else if text.starts_with("Incorrect.") {
        ERROR_STYLE
    } else if text.starts_with("Please") {
        INFO_STYLE
    } else if text.starts_with("Round") || text.starts_with("Final score") {
        HEADER_STYLE
    } else {
        Style::default()
    }
}

/// Applies one key to the pending input line.
fn apply_key(input: &mut String, key: KeyEvent) -> KeyOutcome {
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if has_ctrl => KeyOutcome::Close,
        KeyCode::Esc => KeyOutcome::Close,
        KeyCode::Enter => KeyOutcome::Submit(std::mem::take(input)),
        KeyCode::Backspace => {
            input.pop();
            KeyOutcome::Pending
        }
        KeyCode::Char(c) if has_ctrl || has_alt => {
            debug_log!("apply_key() - Ignoring '{}' with modifier {:?}", c, key.modifiers);
            KeyOutcome::Pending
        }
        KeyCode::Char(c)
            if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD =>
        {
            debug_log!("apply_key() - Ignoring control character {:?}", c);
            KeyOutcome::Pending
        }
        KeyCode::Char(c) if input.chars().count() < MAX_INPUT_LENGTH => {
            input.push(c);
            KeyOutcome::Pending
        }
        _ => KeyOutcome::Pending,
    }
}

/// Full-screen interface.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    transcript: Vec<String>,
    prompt: String,
    current_input: String,
    reading: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            transcript: Vec::new(),
            prompt: String::new(),
            current_input: String::new(),
            reading: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Keeps the final transcript on screen until a key is pressed.
    pub fn wait_for_exit(&mut self) {
        self.transcript.push(String::new());
        self.transcript.push("Press any key to exit.".to_string());
        self.reading = false;
        self.draw_or_log();
        loop {
            match self.next_key() {
                Ok(Some(_)) | Err(_) => break,
                Ok(None) => {}
            }
        }
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            transcript: &self.transcript,
            prompt: &self.prompt,
            current_input: &self.current_input,
            reading: self.reading,
        };
        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(6),    // Transcript
                Constraint::Length(3), // Input
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_transcript(f, chunks[1], ctx.transcript);
        Self::render_input(f, chunks[2], ctx);
        Self::render_instructions(f, chunks[3], ctx.reading);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("POWER DRILL: squares, cubes and their roots")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    /// Shows the most recent lines that fit.
    fn render_transcript(f: &mut Frame, area: Rect, transcript: &[String]) {
        let block = Block::default().title("Quiz").borders(Borders::ALL);
        let visible = usize::from(block.inner(area).height);
        let skip = transcript.len().saturating_sub(visible);

        let lines: Vec<Line> = transcript
            .iter()
            .skip(skip)
            .map(|text| Line::from(Span::styled(text.as_str(), line_style(text))))
            .collect();
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_input(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let line = if ctx.reading {
            Line::from(vec![
                Span::raw(ctx.prompt),
                Span::styled(ctx.current_input, INPUT_STYLE),
                Span::styled("_", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from("")
        };
        let paragraph =
            Paragraph::new(line).block(Block::default().title("Answer").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, reading: bool) {
        let text = if reading {
            "Type your answer | ENTER: Submit | BACKSPACE: Delete | q or ESC: Quit"
        } else {
            "Press any key to exit"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Next key press, or `None` if the poll timed out or the event was not a press.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl InteractionPort for TuiInterface {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompt = prompt.to_string();
        self.current_input.clear();
        self.reading = true;

        let outcome = loop {
            if self.draw().is_err() {
                info_log!("read_line() - Draw failed, closing input");
                break KeyOutcome::Close;
            }
            match self.next_key() {
                Ok(Some(key)) => match apply_key(&mut self.current_input, key) {
                    KeyOutcome::Pending => {}
                    done => break done,
                },
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_line() - Error handling input: {}", e);
                    break KeyOutcome::Close;
                }
            }
        };

        self.reading = false;
        match outcome {
            KeyOutcome::Submit(line) => {
                self.transcript.push(format!("{}{}", self.prompt, line));
                Some(line)
            }
            _ => None,
        }
    }

    fn write_line(&mut self, text: &str) {
        self.transcript.extend(text.split('\n').map(str::to_string));
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
