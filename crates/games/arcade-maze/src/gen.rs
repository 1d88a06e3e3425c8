use serde::{Deserialize, Serialize};

use arcade_core::rng::GameRng;

/// Maze side length in cells.
pub const MAZE_SIZE: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Path,
}

/// A carved maze grid, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    tiles: Vec<Tile>,
}

impl Maze {
    /// Tile lookup; everything outside the grid reads as wall.
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 || x >= MAZE_SIZE || y >= MAZE_SIZE {
            return Tile::Wall;
        }
        self.tiles[(y * MAZE_SIZE + x) as usize]
    }

    pub fn is_path(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Tile::Path
    }

    fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if (0..MAZE_SIZE).contains(&x) && (0..MAZE_SIZE).contains(&y) {
            self.tiles[(y * MAZE_SIZE + x) as usize] = tile;
        }
    }
}

/// Candidate carve directions, two cells at a time.
const DIRECTIONS: [(i32, i32); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];

/// Carve a maze with a depth-first backtracker starting at (0, 0).
///
/// The walk uses an explicit stack rather than recursion so grid size never
/// threatens the call stack. Each frame holds its own shuffled direction
/// order; a neighbor two cells away that is still wall gets carved (both the
/// wall between and the neighbor) and pushed.
pub fn generate(rng: &mut GameRng) -> Maze {
    let mut maze = Maze {
        tiles: vec![Tile::Wall; (MAZE_SIZE * MAZE_SIZE) as usize],
    };
    maze.set(0, 0, Tile::Path);

    struct Frame {
        x: i32,
        y: i32,
        dirs: [(i32, i32); 4],
        next: usize,
    }

    let new_frame = |rng: &mut GameRng, x: i32, y: i32| {
        let mut dirs = DIRECTIONS;
        rng.shuffle(&mut dirs);
        Frame { x, y, dirs, next: 0 }
    };

    let mut stack = vec![new_frame(rng, 0, 0)];
    while let Some(frame) = stack.last_mut() {
        let mut carved = None;
        while frame.next < frame.dirs.len() {
            let (dx, dy) = frame.dirs[frame.next];
            frame.next += 1;
            let nx = frame.x + dx;
            let ny = frame.y + dy;
            let in_bounds = (0..MAZE_SIZE).contains(&nx) && (0..MAZE_SIZE).contains(&ny);
            if in_bounds && maze.tile(nx, ny) == Tile::Wall {
                carved = Some((frame.x + dx / 2, frame.y + dy / 2, nx, ny));
                break;
            }
        }
        match carved {
            Some((wx, wy, nx, ny)) => {
                maze.set(wx, wy, Tile::Path);
                maze.set(nx, ny, Tile::Path);
                stack.push(new_frame(rng, nx, ny));
            },
            None => {
                stack.pop();
            },
        }
    }

    // The goal corner is force-cleared; if both approaches are walls, open
    // the one above it.
    maze.set(MAZE_SIZE - 1, MAZE_SIZE - 1, Tile::Path);
    if maze.tile(MAZE_SIZE - 1, MAZE_SIZE - 2) == Tile::Wall
        && maze.tile(MAZE_SIZE - 2, MAZE_SIZE - 1) == Tile::Wall
    {
        maze.set(MAZE_SIZE - 1, MAZE_SIZE - 2, Tile::Path);
    }

    maze
}
