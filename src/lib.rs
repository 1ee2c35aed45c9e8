pub mod config;
pub mod systems;
