use std::{collections::VecDeque, time::Duration};

use crate::{
    session::Command,
    ui::{StepperUi, UiError},
};

/// Scripted stand-in for the terminal. Once the scripted commands run out it
/// answers a number of idle polls and then asks to quit.
#[derive(Default)]
pub struct MockUi {
    pub commands: VecDeque<Command>,
    pub frames: Vec<Vec<String>>,
    pub idle_polls_before_quit: usize,
    pub fail_polls: bool,
}

impl MockUi {
    pub fn with_commands<I>(commands: I) -> Self
    where
        I: IntoIterator<Item = Command>,
    {
        Self {
            commands: commands.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl StepperUi for MockUi {
    fn draw(&mut self, lines: &[String]) -> Result<(), UiError> {
        self.frames.push(lines.to_vec());
        Ok(())
    }

    fn poll_command(&mut self, _timeout: Duration) -> Result<Option<Command>, UiError> {
        if self.fail_polls {
            return Err(UiError::Disconnected);
        }

        if let Some(command) = self.commands.pop_front() {
            return Ok(Some(command));
        }

        if self.idle_polls_before_quit > 0 {
            self.idle_polls_before_quit -= 1;
            Ok(None)
        } else {
            Ok(Some(Command::Quit))
        }
    }
}
