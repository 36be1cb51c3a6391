/// The playing scene: one self-contained game session.
///
/// Owns the maze, the entities, the score, and the power-pellet timer.
/// A new session is built from scratch on every entry into the Playing
/// state; nothing here outlives the scene.

use raylib::prelude::*;

use rand::rngs::ThreadRng;

use crate::config::{
    CELL_SIZE, GameConfig, MAZE_OFFSET_X, MAZE_OFFSET_Y, RulesConfig, SCREEN_WIDTH,
};
use crate::domain::entity::{Ghost, Player};
use crate::domain::geometry::Dir;
use crate::domain::maze::Maze;
use crate::scene::{Scene, SceneAction};
use crate::ui::input::InputManager;
use crate::ui::particles::ParticleSystem;
use crate::ui::sound::SoundManager;

const STEER_KEYS: [KeyboardKey; 8] = [
    KeyboardKey::KEY_UP,
    KeyboardKey::KEY_DOWN,
    KeyboardKey::KEY_LEFT,
    KeyboardKey::KEY_RIGHT,
    KeyboardKey::KEY_W,
    KeyboardKey::KEY_S,
    KeyboardKey::KEY_A,
    KeyboardKey::KEY_D,
];

fn steer_dir(key: KeyboardKey) -> Dir {
    use KeyboardKey::*;
    match key {
        KEY_UP | KEY_W => Dir::Up,
        KEY_DOWN | KEY_S => Dir::Down,
        KEY_LEFT | KEY_A => Dir::Left,
        KEY_RIGHT | KEY_D => Dir::Right,
        _ => Dir::None,
    }
}

/// Classic palette, one color per ghost identity.
fn ghost_color(name: &str) -> Color {
    match name {
        "blinky" => Color::new(255, 0, 0, 255),
        "pinky" => Color::new(255, 184, 255, 255),
        "inky" => Color::new(0, 255, 255, 255),
        _ => Color::new(255, 184, 82, 255),
    }
}

pub struct GameScene {
    maze: Maze,
    player: Player,
    ghosts: Vec<Ghost>,
    particles: ParticleSystem,
    score: u32,
    power_active: bool,
    power_timer: f32,
    rules: RulesConfig,
    /// Wall-clock of the session, drives pulse and blink animations.
    elapsed: f32,
    rng: ThreadRng,
}

impl GameScene {
    /// A brand-new session: fresh maze, fresh pellets, entities at their
    /// spawns, score zero.
    pub fn new(config: &GameConfig) -> Self {
        let maze = Maze::standard();
        let player = Player::new(
            maze.player_spawn,
            config.speed.player,
            config.rules.starting_lives,
        );
        let ghosts = maze
            .ghost_spawns
            .iter()
            .map(|&(name, spawn)| Ghost::new(name, spawn, config.speed.ghost))
            .collect();

        GameScene {
            maze,
            player,
            ghosts,
            particles: ParticleSystem::new(),
            score: 0,
            power_active: false,
            power_timer: 0.0,
            rules: config.rules.clone(),
            elapsed: 0.0,
            rng: rand::thread_rng(),
        }
    }

    /// Sweep pellets under the player, bank the score, fire effects.
    fn eat_pellets(&mut self, sound: &SoundManager) {
        let hit = self.maze.check_pellet_collision(self.player.body.position);
        if hit.score == 0 {
            return;
        }
        self.score += hit.score;

        if hit.power {
            sound.play("eat_power_pellet", 0);
            self.power_active = true;
            self.power_timer = self.rules.power_pellet_duration;
        } else {
            sound.play("eat_pellet", 0);
        }

        for pos in hit.eaten_at {
            let (count, speed, life, color) = if hit.power {
                (16, (50.0, 150.0), (0.4, 0.8), (255, 184, 82))
            } else {
                (6, (30.0, 80.0), (0.2, 0.5), (255, 255, 180))
            };
            self.particles.emit(pos, color, count, speed, life, &mut self.rng);
        }
    }

    /// Ghost touching a vulnerable player costs a life and repositions
    /// everyone at their spawns. The session itself keeps running.
    fn resolve_ghost_contact(&mut self, sound: &SoundManager) {
        if self.player.invulnerable {
            return;
        }
        let touched = self
            .ghosts
            .iter()
            .any(|g| g.body.position.distance_to(self.player.body.position) < CELL_SIZE / 2.0);
        if !touched {
            return;
        }

        sound.play("death", 0);
        self.particles.emit(
            self.player.body.position,
            (255, 255, 0),
            24,
            (60.0, 180.0),
            (0.4, 0.9),
            &mut self.rng,
        );
        self.player.lose_life(self.rules.invulnerability_duration);
        self.player.reset();
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
    }

    fn draw_maze(&self, d: &mut RaylibDrawHandle) {
        let fill = Color::new(0, 0, 80, 255);
        let edge = Color::new(60, 60, 255, 255);
        for row in 0..self.maze.height() as i32 {
            for col in 0..self.maze.width() as i32 {
                if !self.maze.is_wall((col, row)) {
                    continue;
                }
                let x = MAZE_OFFSET_X + col as f32 * CELL_SIZE;
                let y = MAZE_OFFSET_Y + row as f32 * CELL_SIZE;
                d.draw_rectangle(x as i32, y as i32, CELL_SIZE as i32, CELL_SIZE as i32, fill);
                d.draw_rectangle_lines_ex(
                    Rectangle::new(x, y, CELL_SIZE, CELL_SIZE),
                    2.0,
                    edge,
                );
            }
        }
    }

    fn draw_pellets(&self, d: &mut RaylibDrawHandle) {
        for pellet in &self.maze.pellets {
            if pellet.eaten {
                continue;
            }
            let center = Vector2::new(pellet.position.x, pellet.position.y);
            if pellet.is_power {
                let radius = 6.0 + 2.0 * (self.elapsed * 4.0 + pellet.pulse_phase).sin();
                d.draw_circle_v(center, radius, Color::new(255, 184, 82, 255));
            } else {
                d.draw_circle_v(center, 3.0, Color::new(255, 255, 180, 255));
            }
        }
    }

    fn draw_player(&self, d: &mut RaylibDrawHandle) {
        // Blink at 10 Hz while damage-immune.
        if self.player.invulnerable && (self.elapsed * 10.0) as i32 % 2 == 1 {
            return;
        }
        let pos = self.player.body.position;
        let center = Vector2::new(pos.x, pos.y);
        let base = match self.player.body.direction {
            Dir::Right | Dir::None => 0.0,
            Dir::Down => 90.0,
            Dir::Left => 180.0,
            Dir::Up => 270.0,
        };
        let half = self.player.mouth_angle / 2.0;
        d.draw_circle_sector(
            center,
            CELL_SIZE / 2.0 - 2.0,
            base + half,
            base + 360.0 - half,
            32,
            Color::YELLOW,
        );
    }

    fn draw_ghosts(&self, d: &mut RaylibDrawHandle) {
        for ghost in &self.ghosts {
            let pos = ghost.body.position;
            let color = ghost_color(ghost.name);
            let r = CELL_SIZE / 2.0 - 4.0;

            // Dome plus skirt.
            d.draw_circle_v(Vector2::new(pos.x, pos.y - 2.0), r, color);
            d.draw_rectangle(
                (pos.x - r) as i32,
                (pos.y - 2.0) as i32,
                (r * 2.0) as i32,
                (r + 2.0) as i32,
                color,
            );

            // Eyes track the heading.
            let look = ghost.body.direction.unit() * 2.0;
            for dx in [-5.0, 5.0] {
                let eye = Vector2::new(pos.x + dx, pos.y - 5.0);
                d.draw_circle_v(eye, 3.5, Color::WHITE);
                d.draw_circle_v(
                    Vector2::new(eye.x + look.x, eye.y + look.y),
                    1.8,
                    Color::BLACK,
                );
            }
        }
    }

    fn draw_hud(&self, d: &mut RaylibDrawHandle) {
        d.draw_text(
            &format!("SCORE {}", self.score),
            MAZE_OFFSET_X as i32,
            40,
            32,
            Color::WHITE,
        );

        for i in 0..self.player.lives {
            let x = SCREEN_WIDTH as f32 - 60.0 - i as f32 * 36.0;
            d.draw_circle_v(Vector2::new(x, 56.0), 12.0, Color::YELLOW);
        }

        if self.power_active {
            let label = format!("POWER {:.1}", self.power_timer);
            let w = measure_text(&label, 24);
            d.draw_text(
                &label,
                (SCREEN_WIDTH - w) / 2,
                44,
                24,
                Color::new(255, 184, 82, 255),
            );
        }
    }
}

impl Scene for GameScene {
    fn handle_events(&mut self, _input: &InputManager, _sound: &SoundManager) -> SceneAction {
        // No transition leads out of a running session; quitting is the
        // window's close signal, handled by the engine.
        SceneAction::None
    }

    fn update(&mut self, dt: f32, input: &InputManager, sound: &SoundManager) {
        self.elapsed += dt;
        self.particles.update(dt);

        // Steering: most recently pressed held movement key wins.
        if let Some(key) = input.most_recent_down(&STEER_KEYS) {
            self.player.set_desired(steer_dir(key));
        }

        self.player.update(dt, &self.maze);
        for ghost in &mut self.ghosts {
            ghost.update(dt, &self.maze, &mut self.rng);
        }

        self.eat_pellets(sound);

        if self.power_active {
            self.power_timer -= dt;
            if self.power_timer <= 0.0 {
                self.power_active = false;
                self.power_timer = 0.0;
            }
        }

        self.resolve_ghost_contact(sound);
    }

    fn draw(&self, d: &mut RaylibDrawHandle) {
        self.draw_maze(d);
        self.draw_pellets(d);
        self.draw_player(d);
        self.draw_ghosts(d);
        self.particles.draw(d);
        self.draw_hud(d);
    }
}
