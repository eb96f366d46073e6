use common::{Cell, Direction, Generator, Grid, VisitState};

const WALL: &str = "██";
const UNVISITED: &str = "░░";
const ON_PATH: &str = "▒▒";
const FINAL: &str = "  ";
const CURRENT: &str = "@@";

/// Draws the grid two characters per block: walls, cells and the gaps
/// between neighbouring cells. Cells on the active path are shaded, cells
/// that are finished are blank and the current cell is marked.
pub fn draw_grid(grid: &Grid, current: Option<Cell>) -> Vec<String> {
    let mut lines = Vec::with_capacity(2 * grid.height() + 1);
    lines.push(WALL.repeat(2 * grid.width() + 1));

    for y in 0..grid.height() {
        let mut cells = String::from(WALL);
        let mut below = String::from(WALL);

        for x in 0..grid.width() {
            let cell = Cell::new(x, y);

            cells.push_str(cell_glyph(grid, cell, current));
            cells.push_str(gap_glyph(grid, cell, Direction::East));

            below.push_str(gap_glyph(grid, cell, Direction::South));
            below.push_str(WALL);
        }

        lines.push(cells);
        lines.push(below);
    }

    lines
}

fn state(grid: &Grid, cell: Cell) -> VisitState {
    grid.get_tile(cell)
        .map(|tile| tile.state)
        .unwrap_or_default()
}

fn cell_glyph(grid: &Grid, cell: Cell, current: Option<Cell>) -> &'static str {
    if current == Some(cell) {
        return CURRENT;
    }

    match state(grid, cell) {
        VisitState::Unvisited => UNVISITED,
        VisitState::Visited => ON_PATH,
        VisitState::Selected => FINAL,
    }
}

fn gap_glyph(grid: &Grid, cell: Cell, direction: Direction) -> &'static str {
    if grid.has_wall(cell, direction) {
        return WALL;
    }

    // An open gap always joins two reached cells; it stays shaded while
    // either end is still on the path.
    let neighbor = match direction {
        Direction::East => Cell::new(cell.x + 1, cell.y),
        _ => Cell::new(cell.x, cell.y + 1),
    };
    if state(grid, cell) == VisitState::Visited || state(grid, neighbor) == VisitState::Visited {
        ON_PATH
    } else {
        FINAL
    }
}

pub fn status_line(generator: &dyn Generator, is_running: bool) -> String {
    let grid = generator.grid();
    let current = generator
        .current_tile()
        .map(|cell| cell.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{} | {}x{} | passages {}/{} | current {} | {}",
        generator.phase(),
        grid.width(),
        grid.height(),
        grid.open_passages(),
        grid.cell_count() - 1,
        current,
        if is_running { "running" } else { "paused" },
    )
}

pub fn help_line(generator: &dyn Generator, is_running: bool) -> String {
    let run = if generator.is_complete() {
        "restart"
    } else if is_running {
        "stop"
    } else {
        "run"
    };

    let mut keys = Vec::new();
    if !is_running && !generator.is_complete() {
        keys.push("[space] step".to_string());
    }
    if generator.can_undo() {
        keys.push("[←] back".to_string());
    }
    keys.push(format!("[enter] {run}"));
    keys.push("[R] restart".to_string());
    keys.push("[q] quit".to_string());

    keys.join("  ")
}

/// The whole frame: maze, then status and key help.
pub fn frame(generator: &dyn Generator, is_running: bool) -> Vec<String> {
    let mut lines = draw_grid(generator.grid(), generator.current_tile());
    lines.push(String::new());
    lines.push(status_line(generator, is_running));
    lines.push(help_line(generator, is_running));
    lines
}
