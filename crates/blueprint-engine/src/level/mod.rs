pub mod data;
pub mod factory;

pub use data::{
    BlueprintData, CameraData, EventData, HitBoxData, LevelData, PlacementData, RuleData,
    SpriteData,
};
pub use factory::{GameObjectFactory, KindConstructor};
