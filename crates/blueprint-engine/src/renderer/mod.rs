pub mod camera;
pub mod snapshot;

pub use camera::{Camera2D, CameraMode};
pub use snapshot::{ViewObject, WorldSnapshot};
