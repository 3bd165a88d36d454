pub mod bounds;
pub mod rng;
pub mod scene;
pub mod time;
