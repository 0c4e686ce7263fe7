pub mod app;
pub mod debounce;
pub mod input;
pub mod render;
pub mod theme;

pub use app::{RunOptions, run};
