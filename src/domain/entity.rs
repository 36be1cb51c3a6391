/// Moving things: the shared grid-movement core, the player, and ghosts.
///
/// Movement is continuous in position but grid-discrete in topology: an
/// entity may only change heading while centered in a cell, and a wall
/// directly ahead stops it only at a center. Between centers it glides at
/// `direction × speed` regardless of what the grid looks like.

use crate::config::{CELL_SIZE, CENTER_TOLERANCE, MAZE_OFFSET_X, MAZE_OFFSET_Y, MOUTH_RATE};
use crate::domain::geometry::{Dir, Vec2};
use crate::domain::maze::Maze;

use rand::seq::SliceRandom;
use rand::Rng;

/// Shared movement state for anything that walks the maze.
pub struct Body {
    pub position: Vec2,
    pub spawn: Vec2,
    pub velocity: Vec2,
    pub direction: Dir,
    pub speed: f32,
}

impl Body {
    pub fn new(spawn: Vec2, speed: f32, direction: Dir) -> Self {
        Body {
            position: spawn,
            spawn,
            velocity: Vec2::ZERO,
            direction,
            speed,
        }
    }

    /// Grid cell currently containing this body.
    pub fn grid_pos(&self) -> (i32, i32) {
        Maze::world_to_grid(self.position)
    }

    /// Within tolerance of a cell's geometric center on both axes.
    /// Only at these moments may the heading change.
    pub fn is_centered(&self) -> bool {
        let off_x = (self.position.x - MAZE_OFFSET_X).rem_euclid(CELL_SIZE);
        let off_y = (self.position.y - MAZE_OFFSET_Y).rem_euclid(CELL_SIZE);
        (off_x - CELL_SIZE / 2.0).abs() < CENTER_TOLERANCE
            && (off_y - CELL_SIZE / 2.0).abs() < CENTER_TOLERANCE
    }

    /// Commit `desired` as the current heading, but only while centered
    /// and only when the neighboring cell that way is open.
    pub fn try_turn(&mut self, maze: &Maze, desired: Dir) {
        if !self.is_centered() {
            return;
        }
        let (c, r) = self.grid_pos();
        let (dx, dy) = desired.delta();
        if !maze.is_wall((c + dx, r + dy)) {
            self.direction = desired;
        }
    }

    /// One movement tick: hard stop when centered facing a wall, glide
    /// otherwise. Position always integrates `velocity × dt`.
    pub fn advance(&mut self, dt: f32, maze: &Maze) {
        let (c, r) = self.grid_pos();
        let (dx, dy) = self.direction.delta();
        if self.is_centered() && maze.is_wall((c + dx, r + dy)) {
            self.velocity = Vec2::ZERO;
        } else {
            self.velocity = self.direction.unit() * self.speed;
        }
        self.position = self.position + self.velocity * dt;
    }

    /// Reposition at the original spawn. The body is reused, not rebuilt.
    pub fn respawn(&mut self) {
        self.position = self.spawn;
        self.velocity = Vec2::ZERO;
    }
}

// ── Player ──

pub struct Player {
    pub body: Body,
    /// Steering intent, committed at the next cell center it fits.
    pub next_direction: Dir,
    pub lives: u32,
    pub invulnerable: bool,
    pub invulnerable_timer: f32,
    /// Mouth animation phase in degrees, wrapped at 90.
    pub mouth_angle: f32,
}

impl Player {
    pub fn new(spawn: Vec2, speed: f32, lives: u32) -> Self {
        Player {
            body: Body::new(spawn, speed, Dir::Left),
            next_direction: Dir::Left,
            lives,
            invulnerable: false,
            invulnerable_timer: 0.0,
            mouth_angle: 0.0,
        }
    }

    pub fn set_desired(&mut self, dir: Dir) {
        self.next_direction = dir;
    }

    pub fn update(&mut self, dt: f32, maze: &Maze) {
        self.body.try_turn(maze, self.next_direction);
        self.body.advance(dt, maze);
        self.animate_mouth(dt);

        if self.invulnerable {
            self.invulnerable_timer -= dt;
            if self.invulnerable_timer <= 0.0 {
                self.invulnerable = false;
            }
        }
    }

    fn animate_mouth(&mut self, dt: f32) {
        if self.body.velocity.length() > 0.0 {
            self.mouth_angle = (self.mouth_angle + MOUTH_RATE * dt) % 90.0;
        } else {
            self.mouth_angle = 0.0;
        }
    }

    /// Lose one life and start the damage-immunity countdown.
    pub fn lose_life(&mut self, invulnerability: f32) {
        self.lives = self.lives.saturating_sub(1);
        self.invulnerable = true;
        self.invulnerable_timer = invulnerability;
    }

    /// Back to the spawn cell, heading left, mouth shut.
    pub fn reset(&mut self) {
        self.body.respawn();
        self.body.direction = Dir::Left;
        self.next_direction = Dir::Left;
        self.mouth_angle = 0.0;
    }
}

// ── Ghost ──

/// A randomized no-backtrack walker. Target-seeking behavior is the
/// designated extension point; nothing here chases anybody yet.
pub struct Ghost {
    pub body: Body,
    pub name: &'static str,
}

impl Ghost {
    pub fn new(name: &'static str, spawn: Vec2, speed: f32) -> Self {
        Ghost {
            body: Body::new(spawn, speed, Dir::Up),
            name,
        }
    }

    pub fn update(&mut self, dt: f32, maze: &Maze, rng: &mut impl Rng) {
        if self.body.is_centered() {
            if let Some(&dir) = self.candidate_directions(maze).choose(rng) {
                self.body.direction = dir;
            }
        }
        self.body.advance(dt, maze);
    }

    /// Open neighbor directions, minus the reversal of the current
    /// heading whenever the heading is still open and an alternative
    /// exists. Reversing is allowed only as a last resort (dead ends).
    pub fn candidate_directions(&self, maze: &Maze) -> Vec<Dir> {
        let (c, r) = self.body.grid_pos();
        let mut open: Vec<Dir> = Dir::CARDINAL
            .iter()
            .copied()
            .filter(|d| {
                let (dx, dy) = d.delta();
                !maze.is_wall((c + dx, r + dy))
            })
            .collect();

        if open.contains(&self.body.direction) && open.len() > 1 {
            let rev = self.body.direction.reverse();
            open.retain(|&d| d != rev);
        }
        open
    }

    pub fn reset(&mut self) {
        self.body.respawn();
        self.body.direction = Dir::Up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_maze() -> Maze {
        Maze::parse(&[
            "11111",
            "1...1",
            "1...1",
            "1...1",
            "11111",
        ])
    }

    #[test]
    fn exact_cell_center_is_centered() {
        let body = Body::new(Maze::grid_to_world((2, 2)), 100.0, Dir::Left);
        assert!(body.is_centered());
    }

    #[test]
    fn offset_beyond_tolerance_is_not_centered() {
        let center = Maze::grid_to_world((2, 2));
        for offset in [
            Vec2::new(CENTER_TOLERANCE + 0.1, 0.0),
            Vec2::new(0.0, CENTER_TOLERANCE + 0.1),
        ] {
            let body = Body::new(center + offset, 100.0, Dir::Left);
            assert!(!body.is_centered());
        }
        // Just inside the tolerance still counts.
        let body = Body::new(center + Vec2::new(CENTER_TOLERANCE - 0.5, 0.0), 100.0, Dir::Left);
        assert!(body.is_centered());
    }

    #[test]
    fn centered_facing_wall_stops_dead() {
        let maze = open_maze();
        // (3, 2) is the rightmost open cell; (4, 2) is border wall.
        let mut body = Body::new(Maze::grid_to_world((3, 2)), 100.0, Dir::Right);
        body.velocity = Vec2::new(100.0, 0.0);
        body.advance(1.0 / 60.0, &maze);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.position, Maze::grid_to_world((3, 2)));
    }

    #[test]
    fn open_heading_integrates_position() {
        let maze = open_maze();
        let start = Maze::grid_to_world((1, 2));
        let mut body = Body::new(start, 100.0, Dir::Right);
        body.advance(0.1, &maze);
        assert_eq!(body.velocity, Vec2::new(100.0, 0.0));
        assert!(body.position.distance_to(start + Vec2::new(10.0, 0.0)) < 1e-3);
    }

    #[test]
    fn turn_commits_only_into_open_cells() {
        let maze = open_maze();
        let mut body = Body::new(Maze::grid_to_world((1, 1)), 100.0, Dir::Right);
        // Up is border wall: the turn is refused.
        body.try_turn(&maze, Dir::Up);
        assert_eq!(body.direction, Dir::Right);
        // Down is open: committed.
        body.try_turn(&maze, Dir::Down);
        assert_eq!(body.direction, Dir::Down);
    }

    #[test]
    fn turn_is_refused_between_centers() {
        let maze = open_maze();
        let off_center = Maze::grid_to_world((1, 2)) + Vec2::new(CELL_SIZE / 2.0, 0.0);
        let mut body = Body::new(off_center, 100.0, Dir::Right);
        body.try_turn(&maze, Dir::Down);
        assert_eq!(body.direction, Dir::Right);
    }

    #[test]
    fn player_mouth_advances_only_while_moving() {
        let maze = open_maze();
        let mut player = Player::new(Maze::grid_to_world((1, 2)), 100.0, 3);
        player.set_desired(Dir::Right);
        player.update(0.05, &maze);
        assert!(player.mouth_angle > 0.0);

        // Pin it against the left wall: velocity zeroes, mouth shuts.
        let mut stuck = Player::new(Maze::grid_to_world((1, 2)), 100.0, 3);
        stuck.set_desired(Dir::Left);
        stuck.update(0.05, &maze);
        assert_eq!(stuck.body.velocity, Vec2::ZERO);
        assert_eq!(stuck.mouth_angle, 0.0);
    }

    #[test]
    fn life_loss_starts_invulnerability_countdown() {
        let maze = open_maze();
        let mut player = Player::new(Maze::grid_to_world((1, 1)), 100.0, 3);
        player.lose_life(3.0);
        assert_eq!(player.lives, 2);
        assert!(player.invulnerable);

        player.update(2.9, &maze);
        assert!(player.invulnerable);
        player.update(0.2, &maze);
        assert!(!player.invulnerable);
    }

    #[test]
    fn lives_never_go_below_zero() {
        let mut player = Player::new(Vec2::ZERO, 100.0, 1);
        player.lose_life(3.0);
        player.lose_life(3.0);
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn ghost_never_backtracks_when_alternatives_exist() {
        // Corridor: from (2, 1) both left and right are open; heading
        // right means left (the reversal) must be excluded.
        let maze = Maze::parse(&[
            "11111",
            "1...1",
            "1.1.1",
            "11111",
        ]);
        let mut ghost = Ghost::new("blinky", Maze::grid_to_world((2, 1)), 100.0);
        ghost.body.direction = Dir::Right;

        let candidates = ghost.candidate_directions(&maze);
        assert!(candidates.contains(&Dir::Right));
        assert!(!candidates.contains(&Dir::Left));

        // And the random choice can only ever pick from that set.
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            ghost.body.direction = Dir::Right;
            ghost.body.position = Maze::grid_to_world((2, 1));
            ghost.update(0.0, &maze, &mut rng);
            assert_ne!(ghost.body.direction, Dir::Left);
        }
    }

    #[test]
    fn dead_end_allows_the_reversal() {
        let maze = Maze::parse(&[
            "11111",
            "1..11",
            "11111",
        ]);
        // Heading right into the dead end at (2, 1): only exit is left.
        let mut ghost = Ghost::new("pinky", Maze::grid_to_world((2, 1)), 100.0);
        ghost.body.direction = Dir::Right;
        assert_eq!(ghost.candidate_directions(&maze), vec![Dir::Left]);
    }

    #[test]
    fn respawn_repositions_without_rebuilding() {
        let mut ghost = Ghost::new("inky", Maze::grid_to_world((2, 2)), 100.0);
        ghost.body.position = Vec2::new(999.0, 999.0);
        ghost.body.direction = Dir::Left;
        ghost.reset();
        assert_eq!(ghost.body.position, Maze::grid_to_world((2, 2)));
        assert_eq!(ghost.body.direction, Dir::Up);
        assert_eq!(ghost.body.velocity, Vec2::ZERO);
    }
}
