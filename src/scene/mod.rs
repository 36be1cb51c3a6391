/// Scene contract and the state-machine vocabulary the engine runs on.
///
/// Every scene answers the same three calls each frame: handle discrete
/// input, advance simulation by dt, render. Scenes never swap themselves;
/// they return a `SceneAction` and the engine applies it between frames.

pub mod game;
pub mod menu;

use raylib::prelude::RaylibDrawHandle;

use crate::ui::input::InputManager;
use crate::ui::sound::SoundManager;

/// Every state the machine knows about. Only `MainMenu` and `Playing`
/// have scenes behind them; the rest are declared for the transition
/// table but unreachable until their flows are designed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    MainMenu,
    Playing,
    #[allow(dead_code)]
    Paused,
    #[allow(dead_code)]
    GameOver,
    #[allow(dead_code)]
    LevelTransition,
}

/// What a scene wants the engine to do once the current frame is over.
pub enum SceneAction {
    None,
    Switch(GameState),
    Quit,
}

pub trait Scene {
    /// React to this frame's discrete input (edge-triggered keys).
    fn handle_events(&mut self, input: &InputManager, sound: &SoundManager) -> SceneAction;

    /// Advance the simulation by `dt` seconds.
    fn update(&mut self, dt: f32, input: &InputManager, sound: &SoundManager);

    /// Render onto the already-open frame.
    fn draw(&self, d: &mut RaylibDrawHandle);
}
