use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use glam::DVec2;

use crate::api::types::ObjectId;
use crate::components::event::Event;
use crate::components::hitbox::HitBox;
use crate::components::object::{GameObject, ObjectKind, PlayerState};
use crate::components::sprite::Sprite;
use crate::error::{EngineError, Result};
use crate::level::data::{BlueprintData, PlacementData};

/// Builds the variant state for a blueprint of a given kind.
pub type KindConstructor = fn(&BlueprintData) -> ObjectKind;

/// Registry of validated blueprint prototypes, keyed by blueprint id.
///
/// Blueprints are checked once when loaded; every instance is a clone of its
/// prototype with a fresh id and position, sharing the prototype's event list.
#[derive(Clone)]
pub struct GameObjectFactory {
    kinds: HashMap<String, KindConstructor>,
    prototypes: HashMap<u32, GameObject>,
}

impl GameObjectFactory {
    /// Factory with the built-in `entity`, `player` and `enemy` kinds.
    pub fn new() -> Self {
        let mut kinds: HashMap<String, KindConstructor> = HashMap::new();
        kinds.insert("entity".into(), |_| ObjectKind::Entity);
        kinds.insert("player".into(), |bp| {
            ObjectKind::Player(PlayerState::new(bp.displayed.clone()))
        });
        kinds.insert("enemy".into(), |_| ObjectKind::Enemy);
        Self {
            kinds,
            prototypes: HashMap::new(),
        }
    }

    /// Map another kind name onto one of the object variants.
    pub fn register_kind(&mut self, name: &str, constructor: KindConstructor) {
        self.kinds.insert(name.to_ascii_lowercase(), constructor);
    }

    /// Validate and install `blueprints`, replacing any loaded before.
    /// Nothing changes if any blueprint is rejected.
    pub fn load(&mut self, blueprints: &[BlueprintData]) -> Result<()> {
        let mut prototypes = HashMap::with_capacity(blueprints.len());
        for blueprint in blueprints {
            let prototype = self.prototype(blueprint)?;
            if prototypes.insert(blueprint.id, prototype).is_some() {
                return Err(EngineError::configuration(format!(
                    "duplicate blueprint id {}",
                    blueprint.id
                )));
            }
        }
        log::debug!("loaded {} blueprints", prototypes.len());
        self.prototypes = prototypes;
        Ok(())
    }

    pub fn contains(&self, blueprint: u32) -> bool {
        self.prototypes.contains_key(&blueprint)
    }

    pub fn blueprint_count(&self) -> usize {
        self.prototypes.len()
    }

    /// Instantiate a blueprint with its hitbox origin at `position`.
    pub fn create(
        &self,
        blueprint: u32,
        id: ObjectId,
        position: DVec2,
        layer: i32,
    ) -> Result<GameObject> {
        let prototype = self.prototypes.get(&blueprint).ok_or_else(|| {
            EngineError::configuration(format!("unknown blueprint id {blueprint}"))
        })?;
        let mut object = prototype.clone();
        object.id = id;
        object.layer = layer;
        object.set_position(position);
        Ok(object)
    }

    /// Instantiate every placement in order. Pinned ids must parse and be unique.
    pub fn build_placements(&self, placements: &[PlacementData]) -> Result<Vec<GameObject>> {
        let mut seen = HashSet::with_capacity(placements.len());
        let mut objects = Vec::with_capacity(placements.len());
        for (index, placement) in placements.iter().enumerate() {
            let id = match &placement.uuid {
                Some(raw) => ObjectId::parse(raw).ok_or_else(|| {
                    EngineError::configuration(format!("placement {index}: invalid uuid '{raw}'"))
                })?,
                None => ObjectId::new_v4(),
            };
            if !seen.insert(id) {
                return Err(EngineError::configuration(format!(
                    "placement {index}: duplicate uuid {id}"
                )));
            }
            let object = self
                .create(
                    placement.blueprint,
                    id,
                    DVec2::new(placement.x, placement.y),
                    placement.layer,
                )
                .map_err(|e| EngineError::configuration(format!("placement {index}: {e}")))?;
            objects.push(object);
        }
        Ok(objects)
    }

    fn prototype(&self, bp: &BlueprintData) -> Result<GameObject> {
        let fail = |what: String| {
            EngineError::configuration(format!("blueprint {} ('{}'): {what}", bp.id, bp.name))
        };

        let constructor = self
            .kinds
            .get(&bp.kind.to_ascii_lowercase())
            .ok_or_else(|| fail(format!("unknown object kind '{}'", bp.kind)))?;

        let hitbox = HitBox::new(0.0, 0.0, bp.hitbox.width, bp.hitbox.height)
            .map_err(|e| fail(e.to_string()))?;

        let sprite = Sprite::new(
            bp.sprite.frames.iter().cloned(),
            bp.sprite.animations.iter().cloned(),
            &bp.sprite.base_frame,
        )
        .and_then(|sprite| sprite.validate_animations().map(|()| sprite))
        .map_err(|e| fail(e.to_string()))?
        .with_offset(DVec2::new(bp.hitbox.sprite_dx, bp.hitbox.sprite_dy))
        .with_rotation(bp.rotation);

        let events: Arc<[Event]> = bp.events.iter().map(|e| e.to_event()).collect();

        let mut object = GameObject::new(ObjectId::nil(), bp.group.clone(), hitbox, sprite)
            .with_kind(constructor(bp))
            .with_name(bp.name.clone())
            .with_blueprint(bp.id)
            .with_velocity(DVec2::new(bp.velocity_x, bp.velocity_y))
            .with_events(events);
        object.double_vars = bp.double_vars.clone();
        object.string_vars = bp.string_vars.clone();
        Ok(object)
    }
}

impl fmt::Debug for GameObjectFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&String> = self.kinds.keys().collect();
        kinds.sort();
        let mut blueprints: Vec<&u32> = self.prototypes.keys().collect();
        blueprints.sort();
        f.debug_struct("GameObjectFactory")
            .field("kinds", &kinds)
            .field("blueprints", &blueprints)
            .finish()
    }
}

impl Default for GameObjectFactory {
    fn default() -> Self {
        Self::new()
    }
}
