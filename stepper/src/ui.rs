use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use thiserror::Error;

use crate::session::Command;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("input source disconnected")]
    Disconnected,
}

pub trait StepperUi {
    fn draw(&mut self, lines: &[String]) -> Result<(), UiError>;
    fn poll_command(&mut self, timeout: Duration) -> Result<Option<Command>, UiError>;
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Right => Some(Command::Step),
        KeyCode::Char('b') | KeyCode::Left | KeyCode::Backspace => Some(Command::Back),
        KeyCode::Enter | KeyCode::Char('r') => Some(Command::RunStop),
        KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

pub struct TerminalUi<W: Write> {
    stdout: W,
    is_raw_mode_owner: bool, // True except in tests.
}

impl TerminalUi<Stdout> {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, Hide, Clear(ClearType::All))?;
        Ok(Self {
            stdout,
            is_raw_mode_owner: true,
        })
    }
}

impl<W: Write> TerminalUi<W> {
    fn handle_event(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) => command_for(key),
            _ => None,
        }
    }
}

impl<W: Write> StepperUi for TerminalUi<W> {
    fn draw(&mut self, lines: &[String]) -> Result<(), UiError> {
        queue!(self.stdout, MoveTo(0, 0))?;
        for line in lines {
            queue!(
                self.stdout,
                Clear(ClearType::CurrentLine),
                Print(line),
                Print("\r\n")
            )?;
        }
        queue!(self.stdout, Clear(ClearType::FromCursorDown))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn poll_command(&mut self, timeout: Duration) -> Result<Option<Command>, UiError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read() {
            Ok(event) => Ok(self.handle_event(event)),
            Err(_) => Err(UiError::Disconnected),
        }
    }
}

impl<W: Write> Drop for TerminalUi<W> {
    fn drop(&mut self) {
        if self.is_raw_mode_owner {
            // Only the instance that enabled raw mode may turn it off again.
            execute!(self.stdout, Show, Print("\r\n")).ok();
            terminal::disable_raw_mode().ok();
        }
    }
}
