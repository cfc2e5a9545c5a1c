pub mod app;
pub mod backend;
pub mod config;
pub mod input;
pub mod keybinds;

pub use backend::Backend;
pub use config::Config;
