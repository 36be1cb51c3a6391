/// The engine: owns the window, the input and sound subsystems, and the
/// active scene. Runs the fixed-cadence frame loop.
///
/// Scene transitions are applied strictly between frames: the active
/// scene runs a full handle/update/draw pass, returns a `SceneAction`,
/// and the engine acts on it before the next frame starts.

use raylib::prelude::*;

use crate::config::{GameConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::scene::game::GameScene;
use crate::scene::menu::MainMenuScene;
use crate::scene::{GameState, Scene, SceneAction};
use crate::ui::input::InputManager;
use crate::ui::sound::SoundManager;

pub struct Engine {
    config: GameConfig,
    input: InputManager,
    sound: SoundManager,
    state: GameState,
    scene: Box<dyn Scene>,
    running: bool,
}

impl Engine {
    pub fn new(config: GameConfig) -> Self {
        let sound = SoundManager::new();
        let scene = Box::new(MainMenuScene::new(&sound));
        Engine {
            config,
            input: InputManager::new(),
            sound,
            state: GameState::MainMenu,
            scene,
            running: true,
        }
    }

    /// The scene registry. States without a scene yield `None`.
    fn build_scene(&self, state: GameState) -> Option<Box<dyn Scene>> {
        match state {
            GameState::MainMenu => Some(Box::new(MainMenuScene::new(&self.sound))),
            // Always a fresh session: entering Playing never resumes.
            GameState::Playing => Some(Box::new(GameScene::new(&self.config))),
            GameState::Paused | GameState::GameOver | GameState::LevelTransition => None,
        }
    }

    /// Swap the active scene. An unregistered target is reported and
    /// ignored; the current scene stays active.
    pub fn change_state(&mut self, state: GameState) {
        match self.build_scene(state) {
            Some(scene) => {
                self.scene = scene;
                self.state = state;
            }
            None => {
                eprintln!(
                    "Warning: no scene registered for {state:?}, staying in {:?}",
                    self.state
                );
            }
        }
    }

    /// Open the window and run until quit. The window and audio stream
    /// are released when this returns, on the panic path included.
    pub fn run(&mut self) {
        let (mut rl, thread) = raylib::init()
            .size(SCREEN_WIDTH, SCREEN_HEIGHT)
            .title("Chomper")
            .build();
        rl.set_target_fps(self.config.display.target_fps);

        while self.running && !rl.window_should_close() {
            let dt = rl.get_frame_time();

            self.input.update(&mut rl);
            let action = self.scene.handle_events(&self.input, &self.sound);
            self.scene.update(dt, &self.input, &self.sound);

            {
                let mut d = rl.begin_drawing(&thread);
                d.clear_background(Color::BLACK);
                self.scene.draw(&mut d);
            }

            match action {
                SceneAction::None => {}
                SceneAction::Switch(state) => self.change_state(state),
                SceneAction::Quit => self.running = false,
            }
        }
    }
}
