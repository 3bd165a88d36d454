//! Serializable level description, loaded from JSON.
//!
//! This is plain data. Nothing here is validated beyond what serde checks;
//! [`GameObjectFactory`](crate::level::GameObjectFactory) and the controller
//! reject bad references when the level is built.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::components::event::{Event, EventCondition, EventOutcome, Params};
use crate::components::sprite::{AnimationData, FrameData};
use crate::core::bounds::MapBounds;
use crate::error::Result;

/// A complete level: bounds, blueprints and where instances of them start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bounds: MapBounds,
    #[serde(default)]
    pub blueprints: Vec<BlueprintData>,
    #[serde(default)]
    pub objects: Vec<PlacementData>,
    #[serde(default)]
    pub camera: Option<CameraData>,
}

impl LevelData {
    /// Parse a level from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A reusable object template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintData {
    pub id: u32,
    /// Object variant name, resolved by the factory (e.g. "player").
    #[serde(default = "default_kind")]
    pub kind: String,
    pub group: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub velocity_x: f64,
    #[serde(default)]
    pub velocity_y: f64,
    /// Degrees.
    #[serde(default)]
    pub rotation: f64,
    pub hitbox: HitBoxData,
    pub sprite: SpriteData,
    #[serde(default)]
    pub events: Vec<EventData>,
    #[serde(default)]
    pub string_vars: HashMap<String, String>,
    #[serde(default)]
    pub double_vars: HashMap<String, f64>,
    /// Variables shown on the HUD. Only meaningful for players.
    #[serde(default)]
    pub displayed: Vec<String>,
}

fn default_kind() -> String {
    "entity".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitBoxData {
    pub width: f64,
    pub height: f64,
    /// Sprite draw offset relative to the hitbox origin.
    #[serde(default)]
    pub sprite_dx: f64,
    #[serde(default)]
    pub sprite_dy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    #[serde(default)]
    pub name: String,
    /// Sprite sheet image path; opaque to the engine.
    #[serde(default)]
    pub file: String,
    pub base_frame: String,
    pub frames: Vec<FrameData>,
    #[serde(default)]
    pub animations: Vec<AnimationData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    /// Free-form label used in logs, e.g. "input" or "physics".
    #[serde(default)]
    pub kind: Option<String>,
    /// AND of OR-groups.
    pub conditions: Vec<Vec<RuleData>>,
    #[serde(default)]
    pub outcomes: Vec<RuleData>,
}

impl EventData {
    pub fn to_event(&self) -> Event {
        let groups = self
            .conditions
            .iter()
            .map(|group| group.iter().map(RuleData::to_condition).collect())
            .collect();
        let outcomes = self.outcomes.iter().map(RuleData::to_outcome).collect();
        let event = Event::with_groups(groups, outcomes);
        match &self.kind {
            Some(label) => event.labelled(label.clone()),
            None => event,
        }
    }
}

/// One condition or outcome as written in level data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleData {
    pub kind: String,
    #[serde(default)]
    pub string_params: HashMap<String, String>,
    #[serde(default)]
    pub double_params: HashMap<String, f64>,
}

impl RuleData {
    fn params(&self) -> Params {
        Params::new(self.string_params.clone(), self.double_params.clone())
    }

    /// Unknown tags become `Custom` and fail at evaluation, not here.
    pub fn to_condition(&self) -> EventCondition {
        let mut condition = EventCondition::new(self.kind.parse().unwrap_or_else(|e| match e {}));
        condition.params = self.params();
        condition
    }

    pub fn to_outcome(&self) -> EventOutcome {
        let mut outcome = EventOutcome::new(self.kind.parse().unwrap_or_else(|e| match e {}));
        outcome.params = self.params();
        outcome
    }
}

/// An instance of a blueprint placed in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementData {
    pub blueprint: u32,
    /// Pins the object's id; a fresh v4 id is generated when absent.
    #[serde(default)]
    pub uuid: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub layer: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraData {
    /// "fixed", "tracker" or "auto_scroll".
    pub kind: String,
    #[serde(default)]
    pub string_params: HashMap<String, String>,
    #[serde(default)]
    pub double_params: HashMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::event::{ConditionType, OutcomeType};

    const LEVEL: &str = r#"{
        "name": "intro",
        "bounds": { "min_x": 0, "min_y": 0, "max_x": 400, "max_y": 300 },
        "blueprints": [{
            "id": 1,
            "kind": "player",
            "group": "player",
            "hitbox": { "width": 16, "height": 24, "sprite_dx": -2 },
            "sprite": {
                "base_frame": "idle",
                "frames": [{ "name": "idle", "width": 16, "height": 24 }],
                "animations": [{ "name": "wave", "frame_len": 3, "frames": ["idle"] }]
            },
            "events": [{
                "kind": "input",
                "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "W" } }]],
                "outcomes": [{ "kind": "JUMP", "double_params": { "strength": -8 } }]
            }],
            "double_vars": { "score": 0 },
            "displayed": ["score"]
        }],
        "objects": [{ "blueprint": 1, "x": 10, "y": 20 }],
        "camera": { "kind": "tracker", "string_params": { "target": "player" } }
    }"#;

    #[test]
    fn parse_full_level() {
        let level = LevelData::from_json(LEVEL).unwrap();
        assert_eq!(level.name, "intro");
        assert_eq!(level.bounds.max_x, 400.0);
        let bp = &level.blueprints[0];
        assert_eq!(bp.kind, "player");
        assert_eq!(bp.hitbox.sprite_dx, -2.0);
        assert_eq!(bp.hitbox.sprite_dy, 0.0);
        assert_eq!(bp.sprite.animations[0].frame_len, 3);
        assert_eq!(level.objects[0].layer, 0);
        assert!(level.objects[0].uuid.is_none());
        assert_eq!(level.camera.as_ref().unwrap().kind, "tracker");
    }

    #[test]
    fn events_convert_to_rules() {
        let level = LevelData::from_json(LEVEL).unwrap();
        let event = level.blueprints[0].events[0].to_event();
        assert_eq!(event.label(), Some("input"));
        let condition = &event.condition_groups()[0][0];
        assert_eq!(condition.kind, ConditionType::KeyPressed);
        assert_eq!(condition.params.string("key"), Some("W"));
        assert_eq!(event.outcomes()[0].kind, OutcomeType::Jump);
        assert_eq!(event.outcomes()[0].params.double("strength"), Some(-8.0));
    }

    #[test]
    fn unknown_rule_tags_survive_parsing() {
        let rule = RuleData {
            kind: "levitate".into(),
            ..Default::default()
        };
        assert_eq!(rule.to_outcome().kind, OutcomeType::Custom("LEVITATE".into()));
    }

    #[test]
    fn kind_defaults_to_entity() {
        let json = r#"{
            "id": 4, "group": "coin",
            "hitbox": { "width": 8, "height": 8 },
            "sprite": { "base_frame": "c", "frames": [{ "name": "c" }] }
        }"#;
        let bp: BlueprintData = serde_json::from_str(json).unwrap();
        assert_eq!(bp.kind, "entity");
        assert!(bp.events.is_empty());
    }

    #[test]
    fn malformed_level_is_load_error() {
        let err = LevelData::from_json(r#"{ "blueprints": 3 }"#).unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn round_trips_through_json() {
        let level = LevelData::from_json(LEVEL).unwrap();
        let again = LevelData::from_json(&level.to_json().unwrap()).unwrap();
        assert_eq!(level, again);
    }
}
