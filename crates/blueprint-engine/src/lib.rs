pub mod api;
pub mod components;
pub mod controller;
pub mod core;
pub mod error;
pub mod input;
pub mod level;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{GameConfig, GameExecutor, SpawnRequest};
pub use api::types::{GameState, GameStatus, ObjectId};
pub use components::animation::AnimationState;
pub use components::event::{ConditionType, Event, EventCondition, EventOutcome, OutcomeType, Params};
pub use components::hitbox::HitBox;
pub use components::object::{GameObject, ObjectKind, PlayerState};
pub use components::sprite::{AnimationData, FrameData, Sprite};
pub use controller::{FlowRequest, GameController, RuleFailure, TickReport};
pub use crate::core::bounds::MapBounds;
pub use crate::core::rng::Rng;
pub use crate::core::scene::Scene;
pub use crate::core::time::FixedTimestep;
pub use error::{EngineError, Result};
pub use input::{InputEvent, InputProvider, InputState};
pub use level::{GameObjectFactory, LevelData};
pub use renderer::camera::{Camera2D, CameraMode};
pub use renderer::snapshot::{ViewObject, WorldSnapshot};
pub use systems::{AnimationHandler, Animator, CollisionHandler, RuleRegistry};
