/// Keyboard state tracker.
///
/// Two query sets, rebuilt once per frame from the window's key events:
///   - held: keys currently down (continuous actions — steering)
///   - just pressed: keys that went down this frame (edge-triggered
///     actions — menu confirm)
///
/// The held list keeps press order, oldest first, so "most recent held
/// key wins" steering is a reverse scan.

use raylib::prelude::{KeyboardKey, RaylibHandle};

pub struct InputManager {
    held: Vec<KeyboardKey>,
    just_pressed: Vec<KeyboardKey>,
}

impl InputManager {
    pub fn new() -> Self {
        InputManager {
            held: Vec::with_capacity(8),
            just_pressed: Vec::with_capacity(8),
        }
    }

    /// Drain this frame's key events and refresh both sets.
    /// Call once per frame, before the active scene runs.
    pub fn update(&mut self, rl: &mut RaylibHandle) {
        self.just_pressed.clear();
        while let Some(key) = rl.get_key_pressed() {
            self.press(key);
        }
        // Releases: drop anything no longer reported down.
        self.held.retain(|&k| rl.is_key_down(k));
    }

    /// Is this key currently held down?
    pub fn is_key_down(&self, key: KeyboardKey) -> bool {
        self.held.contains(&key)
    }

    /// Did this key go down this frame? (edge trigger)
    pub fn was_key_just_pressed(&self, key: KeyboardKey) -> bool {
        self.just_pressed.contains(&key)
    }

    /// The most recently pressed of `keys` that is still held.
    pub fn most_recent_down(&self, keys: &[KeyboardKey]) -> Option<KeyboardKey> {
        self.held.iter().rev().find(|k| keys.contains(k)).copied()
    }

    // ── Event application (update() feeds these; tests drive them directly) ──

    fn press(&mut self, key: KeyboardKey) {
        if !self.held.contains(&key) {
            self.held.push(key);
            self.just_pressed.push(key);
        }
    }

    #[cfg(test)]
    fn release(&mut self, key: KeyboardKey) {
        self.held.retain(|&k| k != key);
    }

    #[cfg(test)]
    fn begin_frame(&mut self) {
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::KeyboardKey::*;

    #[test]
    fn press_populates_both_sets() {
        let mut input = InputManager::new();
        input.press(KEY_LEFT);
        assert!(input.is_key_down(KEY_LEFT));
        assert!(input.was_key_just_pressed(KEY_LEFT));
    }

    #[test]
    fn just_pressed_lasts_one_frame() {
        let mut input = InputManager::new();
        input.press(KEY_ENTER);
        input.begin_frame();
        assert!(!input.was_key_just_pressed(KEY_ENTER));
        assert!(input.is_key_down(KEY_ENTER));
    }

    #[test]
    fn release_clears_held_only() {
        let mut input = InputManager::new();
        input.press(KEY_A);
        input.release(KEY_A);
        assert!(!input.is_key_down(KEY_A));
        // The press edge from this frame is still visible.
        assert!(input.was_key_just_pressed(KEY_A));
    }

    #[test]
    fn queries_have_no_side_effects() {
        let mut input = InputManager::new();
        input.press(KEY_W);
        for _ in 0..3 {
            assert!(input.is_key_down(KEY_W));
            assert!(input.was_key_just_pressed(KEY_W));
        }
    }

    #[test]
    fn most_recent_held_key_wins() {
        let mut input = InputManager::new();
        input.press(KEY_LEFT);
        input.press(KEY_UP);
        let arrows = [KEY_LEFT, KEY_RIGHT, KEY_UP, KEY_DOWN];
        assert_eq!(input.most_recent_down(&arrows), Some(KEY_UP));

        input.release(KEY_UP);
        assert_eq!(input.most_recent_down(&arrows), Some(KEY_LEFT));

        input.release(KEY_LEFT);
        assert_eq!(input.most_recent_down(&arrows), None);
    }
}
