/// Backend-facing pieces: keyboard state, particle effects, sound.

pub mod input;
pub mod particles;
pub mod sound;
