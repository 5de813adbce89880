pub mod config;
pub mod engine;
pub mod player;
pub mod renderer;
pub mod shader;
pub mod types;
