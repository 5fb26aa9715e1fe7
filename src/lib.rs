pub mod compute;
pub mod entities;
pub mod game;
pub mod settings;
pub mod stats;
