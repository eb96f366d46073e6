pub mod error;
pub mod maze;

pub use error::GridError;
pub use maze::{
    Cell, Direction, Grid, Tile, VisitState, Walls,
    action::{Action, History},
    maker::{Generator, Phase, StartCell, backtrack::Backtrack},
};
