/// Backend-free game model: geometry, maze, entities.
/// Nothing in here touches the window, audio, or input backends.

pub mod entity;
pub mod geometry;
pub mod maze;
