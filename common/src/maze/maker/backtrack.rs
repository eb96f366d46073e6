use rand::{Rng, SeedableRng, prelude::IndexedRandom, rngs::StdRng};
use tracing::{debug, trace};

use super::{Generator, Phase, StartCell};
use crate::{
    error::GridError,
    maze::{
        Cell, Grid, VisitState,
        action::{Action, History},
    },
};

/// Randomized depth-first search, advanced one action per [`Generator::step`].
///
/// Every action is recorded, so [`Generator::back`] can unwind the search
/// exactly and later steps replay the undone actions before exploring again.
pub struct Backtrack {
    grid: Grid,
    seed: u64,
    rng: StdRng,
    start_choice: StartCell,
    start: Cell,
    path: Vec<Cell>,
    history: History,
    has_started: bool,
    is_complete: bool,
}

impl Backtrack {
    /// Takes ownership of `grid` and seeds itself from the thread RNG.
    pub fn new(grid: Grid) -> Self {
        Self::with_seed(grid, rand::random())
    }

    pub fn with_seed(grid: Grid, seed: u64) -> Self {
        Self::build(grid, seed, StartCell::Random)
    }

    /// Like [`Backtrack::with_seed`] but always begins at `start`.
    pub fn starting_at(grid: Grid, seed: u64, start: Cell) -> Result<Self, GridError> {
        grid.get_tile(start)?;
        Ok(Self::build(grid, seed, StartCell::Fixed(start)))
    }

    fn build(grid: Grid, seed: u64, start_choice: StartCell) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = pick_start(&grid, start_choice, &mut rng);

        Backtrack {
            grid,
            seed,
            rng,
            start_choice,
            start,
            path: Vec::new(),
            history: History::new(),
            has_started: false,
            is_complete: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn start_cell(&self) -> Cell {
        self.start
    }

    /// The active DFS path, bottom first.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn bootstrap(&mut self) {
        let start = self.start;
        let record = Action::Backtrack { cell: start };

        // After a full rewind the bootstrap sits on top of the redo stack;
        // replaying it keeps the rest of the undone future intact.
        if self.history.peek_redo() == Some(&record) {
            self.history.redo();
        } else {
            self.history.record(record);
        }

        self.grid
            .mark_tile(start)
            .expect("start cell should lie inside the grid");

        if self.grid.get_neighbors(start).is_empty() {
            // A lone cell has nothing to explore: it is final as soon as it's reached.
            self.grid
                .mark_tile(start)
                .expect("start cell should lie inside the grid");
        } else {
            self.path.push(start);
        }

        self.has_started = true;
        debug!(start = %start, seed = self.seed, "maze generation started");
        self.check_completion();
    }

    fn replay(&mut self, action: Action) {
        trace!(?action, "redo");

        match action {
            Action::Forward { from, to } => {
                self.grid
                    .remove_wall_between(from, to)
                    .expect("recorded moves should join adjacent cells");
                self.grid
                    .mark_tile(to)
                    .expect("recorded cells should lie inside the grid");
                self.path.push(to);
            }
            Action::Backtrack { cell } => {
                if self.path.last() == Some(&cell) {
                    self.path.pop();
                }
                self.grid
                    .mark_tile(cell)
                    .expect("recorded cells should lie inside the grid");
            }
        }
    }

    fn explore(&mut self, current: Cell) {
        let unvisited: Vec<Cell> = self
            .grid
            .get_neighbors(current)
            .into_iter()
            .filter(|&(neighbor, _)| !self.grid.has_visited(neighbor))
            .map(|(neighbor, _)| neighbor)
            .collect();

        if let Some(&next) = unvisited.choose(&mut self.rng) {
            self.grid
                .remove_wall_between(current, next)
                .expect("neighbors should always be adjacent");
            self.grid
                .mark_tile(next)
                .expect("neighbors should lie inside the grid");
            self.history.record(Action::Forward {
                from: current,
                to: next,
            });
            self.path.push(next);
            trace!(from = %current, to = %next, "carved passage");
        } else {
            self.path.pop();
            self.grid
                .mark_tile(current)
                .expect("path cells should lie inside the grid");
            self.history.record(Action::Backtrack { cell: current });
            trace!(cell = %current, "backtracked");
        }
    }

    fn rewind(&mut self, action: Action) {
        trace!(?action, "undo");

        match action {
            Action::Forward { from, to } => {
                if self.path.last() == Some(&to) {
                    self.path.pop();
                }
                self.grid
                    .set_wall_between(from, to)
                    .expect("recorded moves should join adjacent cells");
                self.grid
                    .unmark_tile(to)
                    .expect("recorded cells should lie inside the grid");
            }
            // The bootstrap record is the only one that can empty the undo stack.
            Action::Backtrack { cell } if !self.history.can_undo() => {
                if self.path.last() == Some(&cell) {
                    self.path.pop();
                }
                let state = self
                    .grid
                    .unmark_tile(cell)
                    .expect("start cell should lie inside the grid");
                if state != VisitState::Unvisited {
                    self.grid
                        .unmark_tile(cell)
                        .expect("start cell should lie inside the grid");
                }
            }
            Action::Backtrack { cell } => {
                self.path.push(cell);
                self.grid
                    .unmark_tile(cell)
                    .expect("recorded cells should lie inside the grid");
            }
        }
    }

    fn check_completion(&mut self) {
        if self.path.is_empty() && !self.history.can_redo() && !self.is_complete {
            self.is_complete = true;
            debug!(
                actions = self.history.undo_len(),
                passages = self.grid.open_passages(),
                "maze generation complete"
            );
        }
    }
}

fn pick_start(grid: &Grid, start_choice: StartCell, rng: &mut StdRng) -> Cell {
    match start_choice {
        StartCell::Fixed(cell) => cell,
        StartCell::Random => Cell::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        ),
    }
}

impl Generator for Backtrack {
    fn step(&mut self) {
        if self.is_complete {
            return;
        }

        if !self.has_started {
            self.bootstrap();
            return;
        }

        if let Some(action) = self.history.redo() {
            self.replay(action);
        } else if let Some(&current) = self.path.last() {
            self.explore(current);
        }

        self.check_completion();
    }

    fn back(&mut self) {
        let Some(action) = self.history.undo() else {
            return;
        };

        self.rewind(action);

        if !self.history.can_undo() {
            self.has_started = false;
        }
        self.is_complete = false;
    }

    fn restart(&mut self) {
        self.path.clear();
        self.history.clear();
        self.grid.reset();
        self.rng = StdRng::seed_from_u64(self.seed);
        self.start = pick_start(&self.grid, self.start_choice, &mut self.rng);
        self.has_started = false;
        self.is_complete = false;
        debug!(seed = self.seed, start = %self.start, "maze generation restarted");
    }

    fn is_complete(&self) -> bool {
        self.is_complete
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn current_tile(&self) -> Option<Cell> {
        self.path.last().copied()
    }

    fn phase(&self) -> Phase {
        if self.is_complete {
            Phase::Complete
        } else if self.has_started {
            Phase::Running
        } else {
            Phase::NotStarted
        }
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }
}
