use std::time::{Duration, Instant};

use tracing::{debug, info};

use common::{Backtrack, Generator, Grid};

use crate::{
    config::Config,
    render,
    session::{Flow, Session},
    ui::{StepperUi, UiError},
};

const IDLE_POLL: Duration = Duration::from_millis(100);

pub fn build_generator(config: &Config) -> Backtrack {
    let grid = Grid::new(config.width, config.height);
    match config.seed {
        Some(seed) => Backtrack::with_seed(grid, seed),
        None => Backtrack::new(grid),
    }
}

pub fn run(config: &Config, ui: &mut dyn StepperUi) -> Result<(), UiError> {
    let generator = build_generator(config);
    info!(
        width = config.width,
        height = config.height,
        seed = generator.seed(),
        steps_per_second = config.steps_per_second,
        "starting maze stepper"
    );

    let mut session = Session::new(generator, config.step_interval(), Instant::now());
    main_loop(&mut session, ui)
}

pub fn main_loop<G: Generator>(
    session: &mut Session<G>,
    ui: &mut dyn StepperUi,
) -> Result<(), UiError> {
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            ui.draw(&render::frame(session.generator(), session.is_running()))?;
            needs_redraw = false;
        }

        let timeout = session.timeout(Instant::now(), IDLE_POLL);
        if let Some(command) = ui.poll_command(timeout)? {
            debug!(?command, "command");
            if session.apply(command, Instant::now()) == Flow::Quit {
                return Ok(());
            }
            needs_redraw = true;
        }

        if session.tick(Instant::now()) {
            needs_redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use common::Phase;

    use super::*;
    use crate::{session::Command, test_helpers::MockUi};

    fn session_for(width: usize, height: usize, seed: u64) -> Session<Backtrack> {
        let generator = Backtrack::with_seed(Grid::new(width, height), seed);
        Session::new(generator, Duration::ZERO, Instant::now())
    }

    #[test]
    fn test_build_generator_uses_configured_seed() {
        let config = Config {
            width: 5,
            height: 4,
            seed: Some(9),
            ..Default::default()
        };

        let generator = build_generator(&config);

        assert_eq!(generator.seed(), 9);
        assert_eq!(generator.grid().width(), 5);
        assert_eq!(generator.grid().height(), 4);
    }

    #[test]
    fn test_quit_ends_loop_after_first_frame() {
        let mut session = session_for(3, 3, 1);
        let mut ui = MockUi::with_commands([Command::Quit]);

        main_loop(&mut session, &mut ui).unwrap();

        assert_eq!(ui.frames.len(), 1);
        assert_eq!(session.generator().phase(), Phase::NotStarted);
    }

    #[test]
    fn test_manual_steps_redraw_each_time() {
        let mut session = session_for(3, 3, 1);
        let mut ui = MockUi::with_commands([
            Command::Step,
            Command::Step,
            Command::Back,
            Command::Quit,
        ]);

        main_loop(&mut session, &mut ui).unwrap();

        assert_eq!(ui.frames.len(), 4);
        assert_eq!(session.generator().history().undo_len(), 1);
        assert!(session.generator().can_redo());
    }

    #[test]
    fn test_auto_run_completes_maze() {
        let mut session = session_for(4, 4, 3);
        let mut ui = MockUi::with_commands([Command::RunStop]);
        ui.idle_polls_before_quit = 64;

        main_loop(&mut session, &mut ui).unwrap();

        assert!(session.generator().is_complete());
        assert!(!session.is_running());
        let last = ui.frames.last().expect("at least one frame should be drawn");
        assert!(last.iter().any(|line| line.starts_with("Complete")));
    }

    #[test]
    fn test_ui_errors_propagate() {
        let mut session = session_for(2, 2, 1);
        let mut ui = MockUi::default();
        ui.fail_polls = true;

        let result = main_loop(&mut session, &mut ui);

        assert!(matches!(result, Err(UiError::Disconnected)));
    }
}
