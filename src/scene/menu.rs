/// Title screen: a two-entry menu driven by just-pressed keys.

use raylib::prelude::*;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::scene::{GameState, Scene, SceneAction};
use crate::ui::input::InputManager;
use crate::ui::sound::SoundManager;

const OPTIONS: [&str; 2] = ["Start Game", "Quit"];

pub struct MainMenuScene {
    selected: usize,
    elapsed: f32,
}

impl MainMenuScene {
    pub fn new(sound: &SoundManager) -> Self {
        sound.play("intro", 0);
        MainMenuScene { selected: 0, elapsed: 0.0 }
    }
}

impl Scene for MainMenuScene {
    fn handle_events(&mut self, input: &InputManager, sound: &SoundManager) -> SceneAction {
        use KeyboardKey::*;

        if input.was_key_just_pressed(KEY_UP) || input.was_key_just_pressed(KEY_W) {
            self.selected = (self.selected + OPTIONS.len() - 1) % OPTIONS.len();
            sound.play("menu_select", 0);
        }
        if input.was_key_just_pressed(KEY_DOWN) || input.was_key_just_pressed(KEY_S) {
            self.selected = (self.selected + 1) % OPTIONS.len();
            sound.play("menu_select", 0);
        }

        if input.was_key_just_pressed(KEY_ENTER) || input.was_key_just_pressed(KEY_SPACE) {
            sound.play("menu_select", 0);
            return match self.selected {
                0 => SceneAction::Switch(GameState::Playing),
                _ => SceneAction::Quit,
            };
        }
        if input.was_key_just_pressed(KEY_ESCAPE) {
            return SceneAction::Quit;
        }
        SceneAction::None
    }

    fn update(&mut self, dt: f32, _input: &InputManager, _sound: &SoundManager) {
        self.elapsed += dt;
    }

    fn draw(&self, d: &mut RaylibDrawHandle) {
        let title = "CHOMPER";
        let title_size = 80;
        let tw = measure_text(title, title_size);
        // Slow pulse on the title brightness.
        let pulse = 200.0 + 55.0 * (self.elapsed * 2.0).sin();
        d.draw_text(
            title,
            (SCREEN_WIDTH - tw) / 2,
            SCREEN_HEIGHT / 4,
            title_size,
            Color::new(255, pulse as u8, 0, 255),
        );

        let option_size = 36;
        for (i, option) in OPTIONS.iter().enumerate() {
            let color = if i == self.selected { Color::YELLOW } else { Color::GRAY };
            let label = if i == self.selected {
                format!("> {option}")
            } else {
                format!("  {option}")
            };
            let w = measure_text(&label, option_size);
            d.draw_text(
                &label,
                (SCREEN_WIDTH - w) / 2,
                SCREEN_HEIGHT / 2 + i as i32 * 60,
                option_size,
                color,
            );
        }

        let hint = "Arrows / WASD to move, Enter to confirm";
        let hint_size = 20;
        let hw = measure_text(hint, hint_size);
        d.draw_text(
            hint,
            (SCREEN_WIDTH - hw) / 2,
            SCREEN_HEIGHT - 100,
            hint_size,
            Color::DARKGRAY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        // Drive the index arithmetic directly; key plumbing is covered by
        // the input module's own tests.
        let mut selected = 0usize;
        selected = (selected + OPTIONS.len() - 1) % OPTIONS.len();
        assert_eq!(selected, OPTIONS.len() - 1);
        selected = (selected + 1) % OPTIONS.len();
        assert_eq!(selected, 0);
    }
}
