pub mod backtrack;

use strum::Display;

use super::{Cell, Grid};

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Complete,
}

/// How a generator chooses where to begin carving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartCell {
    /// Drawn from the generator's own seeded RNG, so a restart picks the same
    /// cell again.
    #[default]
    Random,
    Fixed(Cell),
}

/// A maze generator that can be driven one action at a time, in either
/// direction. Drivers never touch the grid except through [`Generator::grid`].
pub trait Generator {
    /// Performs one action: replays the most recently undone action if there
    /// is one, otherwise explores. Does nothing once complete.
    fn step(&mut self);

    /// Undoes the most recent action. Does nothing if there is none.
    fn back(&mut self);

    /// Clears all history and the grid and starts over with the original seed.
    fn restart(&mut self);

    fn is_complete(&self) -> bool;

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    /// The cell on top of the active path.
    fn current_tile(&self) -> Option<Cell>;

    fn phase(&self) -> Phase;

    fn grid(&self) -> &Grid;
}
