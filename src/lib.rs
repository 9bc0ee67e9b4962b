//! Space Invaders: pure game logic plus the collaborator seams
//! (assets, audio) the terminal front-end plugs into.

pub mod app;
pub mod assets;
pub mod audio;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod scene;
pub mod spawner;
