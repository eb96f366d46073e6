pub mod action;
pub mod maker;

use std::fmt;

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::GridError;

/// Coordinates of one cell. Cheap to copy; only meaningful together with the
/// grid it was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Cell {
        Cell { x, y }
    }

    /// The direction from `self` to `other`, if the two share an edge.
    pub fn direction_to(&self, other: &Cell) -> Option<Direction> {
        let dx = other.x as isize - self.x as isize;
        let dy = other.y as isize - self.y as isize;

        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    // No upper bound check here: the grid filters out cells past its edge.
    fn step(&self, direction: Direction) -> Option<Cell> {
        let Cell { x, y } = *self;
        match direction {
            Direction::North => y.checked_sub(1).map(|y| Cell { x, y }),
            Direction::East => x.checked_add(1).map(|x| Cell { x, y }),
            Direction::South => y.checked_add(1).map(|y| Cell { x, y }),
            Direction::West => x.checked_sub(1).map(|x| Cell { x, y }),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    fn wall(self) -> Walls {
        match self {
            Direction::North => Walls::NORTH,
            Direction::East => Walls::EAST,
            Direction::South => Walls::SOUTH,
            Direction::West => Walls::WEST,
        }
    }
}

/// Four-bit set of closed sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Walls(u8);

impl Walls {
    pub const NORTH: Walls = Walls(1 << 0);
    pub const EAST: Walls = Walls(1 << 1);
    pub const SOUTH: Walls = Walls(1 << 2);
    pub const WEST: Walls = Walls(1 << 3);
    pub const ALL: Walls = Walls(0b1111);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.wall().0 != 0
    }

    fn insert(&mut self, direction: Direction) {
        self.0 |= direction.wall().0;
    }

    fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.wall().0;
    }
}

/// Unvisited cells have never been reached, Visited cells sit on the active
/// DFS path, and Selected cells have been backtracked past and are final.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
pub enum VisitState {
    #[default]
    Unvisited,
    Visited,
    Selected,
}

impl VisitState {
    pub fn advance(self) -> VisitState {
        match self {
            VisitState::Unvisited => VisitState::Visited,
            VisitState::Visited | VisitState::Selected => VisitState::Selected,
        }
    }

    pub fn retreat(self) -> VisitState {
        match self {
            VisitState::Selected => VisitState::Visited,
            VisitState::Visited | VisitState::Unvisited => VisitState::Unvisited,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub walls: Walls,
    pub state: VisitState,
}

impl Default for Tile {
    fn default() -> Self {
        Tile {
            walls: Walls::ALL,
            state: VisitState::Unvisited,
        }
    }
}

/// A `width` x `height` arena of tiles stored row by row. Cloning it gives an
/// independent deep copy.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid must have at least one cell, got {width}x{height}"
        );

        Grid {
            tiles: vec![Tile::default(); width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: Cell) -> Result<usize, GridError> {
        if self.contains(cell) {
            Ok(cell.y * self.width + cell.x)
        } else {
            Err(GridError::OutOfBounds {
                x: cell.x,
                y: cell.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Checked constructor for a coordinate on this grid.
    pub fn get_cell(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        let cell = Cell::new(x, y);
        self.index(cell)?;
        Ok(cell)
    }

    pub fn get_tile(&self, cell: Cell) -> Result<&Tile, GridError> {
        let i = self.index(cell)?;
        Ok(&self.tiles[i])
    }

    fn tile_mut(&mut self, cell: Cell) -> Result<&mut Tile, GridError> {
        let i = self.index(cell)?;
        Ok(&mut self.tiles[i])
    }

    /// Every coordinate, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell { x, y }))
    }

    /// In-bounds cells sharing an edge with `cell`, each with the direction
    /// leading to it. Empty if `cell` itself is off the grid.
    pub fn get_neighbors(&self, cell: Cell) -> Vec<(Cell, Direction)> {
        if !self.contains(cell) {
            return Vec::new();
        }

        Direction::iter()
            .filter_map(|direction| {
                cell.step(direction)
                    .filter(|&neighbor| self.contains(neighbor))
                    .map(|neighbor| (neighbor, direction))
            })
            .collect()
    }

    fn shared_wall(&self, a: Cell, b: Cell) -> Result<(usize, usize, Direction), GridError> {
        let i = self.index(a)?;
        let j = self.index(b)?;
        let direction = a.direction_to(&b).ok_or(GridError::NotAdjacent { a, b })?;
        Ok((i, j, direction))
    }

    pub fn remove_wall_between(&mut self, a: Cell, b: Cell) -> Result<(), GridError> {
        let (i, j, direction) = self.shared_wall(a, b)?;
        self.tiles[i].walls.remove(direction);
        self.tiles[j].walls.remove(direction.opposite());
        Ok(())
    }

    pub fn set_wall_between(&mut self, a: Cell, b: Cell) -> Result<(), GridError> {
        let (i, j, direction) = self.shared_wall(a, b)?;
        self.tiles[i].walls.insert(direction);
        self.tiles[j].walls.insert(direction.opposite());
        Ok(())
    }

    /// Off-grid cells count as walled on every side.
    pub fn has_wall(&self, cell: Cell, direction: Direction) -> bool {
        match self.get_tile(cell) {
            Ok(tile) => tile.walls.contains(direction),
            Err(_) => true,
        }
    }

    /// Moves the cell one step along Unvisited -> Visited -> Selected and
    /// returns the new state.
    pub fn mark_tile(&mut self, cell: Cell) -> Result<VisitState, GridError> {
        let tile = self.tile_mut(cell)?;
        tile.state = tile.state.advance();
        Ok(tile.state)
    }

    /// Inverse of [`Grid::mark_tile`].
    pub fn unmark_tile(&mut self, cell: Cell) -> Result<VisitState, GridError> {
        let tile = self.tile_mut(cell)?;
        tile.state = tile.state.retreat();
        Ok(tile.state)
    }

    pub fn has_visited(&self, cell: Cell) -> bool {
        self.get_tile(cell)
            .is_ok_and(|tile| tile.state != VisitState::Unvisited)
    }

    pub fn reset(&mut self) {
        self.tiles.fill(Tile::default());
    }

    /// Number of interior walls that have been removed, each counted once.
    pub fn open_passages(&self) -> usize {
        self.cells()
            .map(|cell| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&direction| {
                        cell.step(direction)
                            .is_some_and(|neighbor| self.contains(neighbor))
                            && !self.has_wall(cell, direction)
                    })
                    .count()
            })
            .sum()
    }

    pub fn log(&self) -> String {
        let rows = 2 * self.height + 1;
        let cols = 2 * self.width + 1;
        let mut open = vec![vec![false; cols]; rows];

        for cell in self.cells() {
            let r = 2 * cell.y + 1;
            let c = 2 * cell.x + 1;
            open[r][c] = true;

            if !self.has_wall(cell, Direction::East) {
                open[r][c + 1] = true;
            }
            if !self.has_wall(cell, Direction::South) {
                open[r + 1][c] = true;
            }
        }

        open.iter()
            .map(|row| {
                row.iter()
                    .map(|&is_open| if is_open { "  " } else { "██" })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
