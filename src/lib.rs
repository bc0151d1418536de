pub mod collision;
pub mod config;
pub mod constants;
pub mod effects;
pub mod entities;
pub mod game;
pub mod presentation;
pub mod projectiles;
pub mod rendering;
pub mod terminal_io;
pub mod types;
pub mod world;
