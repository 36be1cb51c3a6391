/// Maze layout, pellets, and grid/world coordinate transforms.
///
/// ## Layout legend:
///   '1' = wall                  '.' = pellet
///   'P' = power pellet          'S' = player spawn
///   'G' = ghost spawn (assigned cyclically to the four ghost identities
///         in scan order)
///   anything else = open floor
///
/// Parsing is lenient: unknown glyphs are floor, a missing 'S' falls back
/// to a fixed cell. Wall queries are fail-closed: anything outside the
/// grid is a wall.

use crate::config::{CELL_SIZE, MAZE_OFFSET_X, MAZE_OFFSET_Y};
use crate::domain::geometry::Vec2;

use rand::Rng;

/// Ghost identities, in the order 'G' glyphs are assigned to them.
pub const GHOST_NAMES: [&str; 4] = ["blinky", "pinky", "inky", "clyde"];

/// Cell used as the player spawn when the layout has no 'S'.
const FALLBACK_PLAYER_SPAWN: (i32, i32) = (11, 16);

/// Cell ghosts will route through once chase AI lands.
const GHOST_HOUSE_EXIT: (i32, i32) = (11, 8);

/// The standard board. All rows are the same length; the outer border is
/// solid wall.
pub const LAYOUT: [&str; 21] = [
    "1111111111111111111111111",
    "1P..........1..........P1",
    "1.111.11111.1.11111.111.1",
    "1.......................1",
    "1.111.1.111111111.1.111.1",
    "1.....1.....1.....1.....1",
    "11111.11111.1.11111.11111",
    "1.....1...........1.....1",
    "1.111.1.111...111.1.111.1",
    "1.1...1.1.G.G.G.G.1...1.1",
    "1.1.1.1.111111111.1.1.1.1",
    "1...1.1.....S.....1.1...1",
    "11111.1.111111111.1.11111",
    "1.....1.....1.....1.....1",
    "1.111.11111.1.11111.111.1",
    "1...P...1.......1...P...1",
    "111.111.1.11111.1.111.111",
    "1.......1...1...1.......1",
    "1.11111.111.1.111.11111.1",
    "1P.....................P1",
    "1111111111111111111111111",
];

/// A single collectible. `eaten` is monotonic: once true it never reverts.
pub struct Pellet {
    pub position: Vec2,
    pub is_power: bool,
    pub points: u32,
    pub eaten: bool,
    /// Random phase offset so power pellets don't pulse in lockstep.
    pub pulse_phase: f32,
}

impl Pellet {
    pub fn new(position: Vec2, is_power: bool) -> Self {
        Pellet {
            position,
            is_power,
            points: if is_power { 50 } else { 10 },
            eaten: false,
            pulse_phase: rand::thread_rng().gen_range(0.0..std::f32::consts::TAU),
        }
    }
}

/// Result of one pellet-collision sweep.
pub struct PelletHit {
    /// Total points from pellets eaten this call.
    pub score: u32,
    /// Whether any of them was a power pellet.
    pub power: bool,
    /// Where they were, for effect emission.
    pub eaten_at: Vec<Vec2>,
}

/// The board: wall grid, pellets, spawn points. Immutable after parse
/// except for the monotonic pellet `eaten` flags.
pub struct Maze {
    rows: Vec<Vec<char>>,
    pub pellets: Vec<Pellet>,
    pub player_spawn: Vec2,
    /// Ghost name → spawn position, in 'G' encounter order.
    pub ghost_spawns: Vec<(&'static str, Vec2)>,
    /// Reserved until ghosts learn to leave the house deliberately.
    #[allow(dead_code)]
    pub ghost_house_exit: Vec2,
}

impl Maze {
    /// Parse an ASCII layout. Never fails: unknown glyphs are open floor
    /// and a missing 'S' uses the documented fallback cell.
    pub fn parse(layout: &[&str]) -> Self {
        let mut pellets = Vec::new();
        let mut ghost_spawns = Vec::new();
        let mut player_spawn = None;
        let mut ghost_index = 0usize;

        for (r, row) in layout.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let pos = Self::grid_to_world((c as i32, r as i32));
                match ch {
                    '.' => pellets.push(Pellet::new(pos, false)),
                    'P' => pellets.push(Pellet::new(pos, true)),
                    'S' => player_spawn = Some(pos),
                    'G' => {
                        let name = GHOST_NAMES[ghost_index % GHOST_NAMES.len()];
                        ghost_spawns.push((name, pos));
                        ghost_index += 1;
                    }
                    _ => {}
                }
            }
        }

        Maze {
            rows: layout.iter().map(|row| row.chars().collect()).collect(),
            pellets,
            player_spawn: player_spawn
                .unwrap_or_else(|| Self::grid_to_world(FALLBACK_PLAYER_SPAWN)),
            ghost_spawns,
            ghost_house_exit: Self::grid_to_world(GHOST_HOUSE_EXIT),
        }
    }

    /// The embedded standard board.
    pub fn standard() -> Self {
        Self::parse(&LAYOUT)
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Center of a grid cell in world space.
    pub fn grid_to_world((col, row): (i32, i32)) -> Vec2 {
        Vec2::new(
            MAZE_OFFSET_X + col as f32 * CELL_SIZE + CELL_SIZE / 2.0,
            MAZE_OFFSET_Y + row as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        )
    }

    /// Grid cell containing a world position.
    pub fn world_to_grid(pos: Vec2) -> (i32, i32) {
        (
            ((pos.x - MAZE_OFFSET_X) / CELL_SIZE).floor() as i32,
            ((pos.y - MAZE_OFFSET_Y) / CELL_SIZE).floor() as i32,
        )
    }

    /// Is this cell a wall? Fail-closed: anything outside the grid is.
    pub fn is_wall(&self, (col, row): (i32, i32)) -> bool {
        if row < 0 || col < 0 {
            return true;
        }
        match self.rows.get(row as usize).and_then(|r| r.get(col as usize)) {
            Some(&ch) => ch == '1',
            None => true,
        }
    }

    /// Eat every uneaten pellet within half a cell of `pos`.
    /// Idempotent per pellet: an eaten pellet is skipped, never re-scored.
    pub fn check_pellet_collision(&mut self, pos: Vec2) -> PelletHit {
        let mut hit = PelletHit { score: 0, power: false, eaten_at: Vec::new() };
        for pellet in &mut self.pellets {
            if !pellet.eaten && pos.distance_to(pellet.position) < CELL_SIZE / 2.0 {
                pellet.eaten = true;
                hit.score += pellet.points;
                hit.eaten_at.push(pellet.position);
                if pellet.is_power {
                    hit.power = true;
                }
            }
        }
        hit
    }
}
