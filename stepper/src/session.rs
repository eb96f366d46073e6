use std::time::{Duration, Instant};

use tracing::info;

use common::Generator;

/// What the user asked for, independent of how it was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Step,
    Back,
    /// Starts or stops auto-run, or restarts once the maze is complete.
    RunStop,
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives one generator: manual commands plus auto-run at a fixed interval.
pub struct Session<G: Generator> {
    generator: G,
    is_running: bool,
    interval: Duration,
    next_step: Instant,
}

impl<G: Generator> Session<G> {
    pub fn new(generator: G, interval: Duration, now: Instant) -> Self {
        Self {
            generator,
            is_running: false,
            interval,
            next_step: now,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn apply(&mut self, command: Command, now: Instant) -> Flow {
        match command {
            Command::Step => {
                // Manual stepping is disabled while auto-run owns the generator.
                if !self.is_running {
                    self.generator.step();
                }
            }
            Command::Back => {
                self.is_running = false;
                self.generator.back();
            }
            Command::RunStop => {
                if self.generator.is_complete() {
                    self.restart();
                } else {
                    self.is_running = !self.is_running;
                    self.next_step = now;
                }
            }
            Command::Restart => self.restart(),
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn restart(&mut self) {
        self.is_running = false;
        self.generator.restart();
        info!("restarted");
    }

    /// Advances auto-run if a step is due. Returns whether the generator moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_running || now < self.next_step {
            return false;
        }

        self.generator.step();
        self.next_step = now + self.interval;

        if self.generator.is_complete() {
            self.is_running = false;
        }

        true
    }

    /// How long the driver may block waiting for input before the next tick.
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        if self.is_running {
            self.next_step.saturating_duration_since(now).min(idle)
        } else {
            idle
        }
    }
}

#[cfg(test)]
mod tests {
    use common::{Backtrack, Grid, Phase};

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(10);

    fn session(width: usize, height: usize) -> (Session<Backtrack>, Instant) {
        let now = Instant::now();
        let generator = Backtrack::with_seed(Grid::new(width, height), 17);
        (Session::new(generator, INTERVAL, now), now)
    }

    #[test]
    fn test_step_and_back_commands() {
        let (mut session, now) = session(3, 3);

        assert_eq!(session.apply(Command::Step, now), Flow::Continue);
        assert_eq!(session.generator().phase(), Phase::Running);
        assert!(session.generator().can_undo());

        session.apply(Command::Back, now);
        assert_eq!(session.generator().phase(), Phase::NotStarted);
        assert!(!session.generator().can_undo());
    }

    #[test]
    fn test_auto_run_steps_on_schedule_until_complete() {
        let (mut session, mut now) = session(3, 2);

        session.apply(Command::RunStop, now);
        assert!(session.is_running());

        assert!(session.tick(now));
        assert!(!session.tick(now), "second step should wait for the interval");
        assert_eq!(session.timeout(now, Duration::from_secs(1)), INTERVAL);

        let mut steps = 1;
        while session.is_running() {
            now += INTERVAL;
            assert!(session.tick(now));
            steps += 1;
            assert!(steps <= 13, "auto-run should stop on completion");
        }

        assert!(session.generator().is_complete());
        assert_eq!(steps, 12);
        assert!(!session.tick(now + INTERVAL));
    }

    #[test]
    fn test_manual_step_ignored_while_running() {
        let (mut session, now) = session(3, 3);
        session.apply(Command::RunStop, now);

        session.apply(Command::Step, now);

        assert_eq!(session.generator().phase(), Phase::NotStarted);
    }

    #[test]
    fn test_back_stops_auto_run() {
        let (mut session, now) = session(3, 3);
        session.apply(Command::RunStop, now);
        session.tick(now);

        session.apply(Command::Back, now);

        assert!(!session.is_running());
        assert_eq!(session.generator().phase(), Phase::NotStarted);
        assert_eq!(session.timeout(now, INTERVAL * 5), INTERVAL * 5);
    }

    #[test]
    fn test_run_stop_restarts_completed_maze() {
        let (mut session, now) = session(2, 2);
        while !session.generator().is_complete() {
            session.apply(Command::Step, now);
        }

        session.apply(Command::RunStop, now);

        assert!(!session.is_running());
        assert_eq!(session.generator().phase(), Phase::NotStarted);
        assert_eq!(session.generator().grid(), &Grid::new(2, 2));
    }

    #[test]
    fn test_restart_and_quit() {
        let (mut session, now) = session(3, 3);
        session.apply(Command::Step, now);
        session.apply(Command::Step, now);

        assert_eq!(session.apply(Command::Restart, now), Flow::Continue);
        assert!(!session.generator().can_undo());

        assert_eq!(session.apply(Command::Quit, now), Flow::Quit);
    }
}
