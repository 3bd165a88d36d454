pub mod loader;
pub mod runner;
pub mod script;

pub use loader::{FileLevelLoader, LevelLoader};
pub use runner::{FrameStats, GameRunner};
pub use script::KeyScript;
