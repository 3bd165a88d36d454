pub mod state;

pub use state::{normalize_key, InputEvent, InputProvider, InputState};
