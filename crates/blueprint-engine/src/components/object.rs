use std::collections::HashMap;
use std::sync::Arc;

use glam::DVec2;

use crate::api::types::ObjectId;
use crate::components::event::Event;
use crate::components::hitbox::HitBox;
use crate::components::sprite::Sprite;
use crate::error::{EngineError, Result};

/// Player-only state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    power_ups: Vec<String>,
    /// Names of numeric variables shown on the HUD.
    displayed: Vec<String>,
}

impl PlayerState {
    pub fn new(displayed: Vec<String>) -> Self {
        Self {
            power_ups: Vec::new(),
            displayed,
        }
    }

    pub fn power_ups(&self) -> &[String] {
        &self.power_ups
    }

    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }
}

/// Which variant of game object this is. Shared fields live on [`GameObject`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ObjectKind {
    #[default]
    Entity,
    Player(PlayerState),
    Enemy,
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Entity => "entity",
            ObjectKind::Player(_) => "player",
            ObjectKind::Enemy => "enemy",
        }
    }
}

/// Fat game object. One struct for every variant, with the variant in `kind`.
#[derive(Debug, Clone)]
pub struct GameObject {
    pub(crate) id: ObjectId,
    pub(crate) blueprint_id: u32,
    pub(crate) name: String,
    /// Collision/type group, e.g. "player", "coin", "wall".
    pub(crate) group: String,
    pub(crate) layer: i32,
    pub(crate) kind: ObjectKind,
    pub(crate) hitbox: HitBox,
    pub(crate) velocity: DVec2,
    pub(crate) sprite: Sprite,
    pub(crate) events: Arc<[Event]>,
    pub(crate) string_vars: HashMap<String, String>,
    pub(crate) double_vars: HashMap<String, f64>,
    pub(crate) grounded: bool,
}

impl GameObject {
    /// Create an entity with no events or variables.
    pub fn new(id: ObjectId, group: impl Into<String>, hitbox: HitBox, sprite: Sprite) -> Self {
        Self {
            id,
            blueprint_id: 0,
            name: String::new(),
            group: group.into(),
            layer: 0,
            kind: ObjectKind::Entity,
            hitbox,
            velocity: DVec2::ZERO,
            sprite,
            events: Arc::from(Vec::new()),
            string_vars: HashMap::new(),
            double_vars: HashMap::new(),
            grounded: true,
        }
    }

    // -- Builder pattern --

    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_blueprint(mut self, blueprint_id: u32) -> Self {
        self.blueprint_id = blueprint_id;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_events(mut self, events: impl Into<Arc<[Event]>>) -> Self {
        self.events = events.into();
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: f64) -> Self {
        self.double_vars.insert(name.into(), value);
        self
    }

    pub fn with_string_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.string_vars.insert(name.into(), value.into());
        self
    }

    // -- Identity --

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn blueprint_id(&self) -> u32 {
        self.blueprint_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ObjectKind::Player(_))
    }

    // -- Motion --

    /// Top-left corner of the hitbox.
    pub fn position(&self) -> DVec2 {
        self.hitbox.origin()
    }

    pub fn set_position(&mut self, position: DVec2) {
        self.hitbox.set_origin(position);
    }

    pub fn translate(&mut self, delta: DVec2) {
        self.hitbox.set_origin(self.hitbox.origin() + delta);
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    pub fn hitbox(&self) -> &HitBox {
        &self.hitbox
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    // -- Presentation --

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    // -- Rules --

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Shared handle to the event list, so callers can iterate while mutating the object.
    pub fn events_handle(&self) -> Arc<[Event]> {
        Arc::clone(&self.events)
    }

    // -- Variables --

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.double_vars.get(name).copied()
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: f64) {
        self.double_vars.insert(name.into(), value);
    }

    pub fn variables(&self) -> &HashMap<String, f64> {
        &self.double_vars
    }

    pub fn string_variable(&self, name: &str) -> Option<&str> {
        self.string_vars.get(name).map(String::as_str)
    }

    pub fn set_string_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.string_vars.insert(name.into(), value.into());
    }

    pub fn string_variables(&self) -> &HashMap<String, String> {
        &self.string_vars
    }

    // -- Player capabilities --

    pub fn power_ups(&self) -> &[String] {
        match &self.kind {
            ObjectKind::Player(player) => player.power_ups(),
            _ => &[],
        }
    }

    pub fn add_power_up(&mut self, power_up: impl Into<String>) -> Result<()> {
        match &mut self.kind {
            ObjectKind::Player(player) => {
                player.power_ups.push(power_up.into());
                Ok(())
            }
            other => Err(EngineError::InvalidArgument(format!(
                "power-ups only apply to players, object {} is an {}",
                self.id,
                other.name()
            ))),
        }
    }

    /// Displayed stats with their current values, in declaration order.
    /// Names without a matching variable are skipped. Empty for non-players.
    pub fn displayed_stats(&self) -> Vec<(String, f64)> {
        let ObjectKind::Player(player) = &self.kind else {
            return Vec::new();
        };
        player
            .displayed
            .iter()
            .filter_map(|name| self.variable(name).map(|value| (name.clone(), value)))
            .collect()
    }

    /// Numeric variables a player has but does not display, sorted by name.
    pub fn hidden_stats(&self) -> Vec<String> {
        let ObjectKind::Player(player) = &self.kind else {
            return Vec::new();
        };
        let mut hidden: Vec<String> = self
            .double_vars
            .keys()
            .filter(|name| !player.displayed.contains(name))
            .cloned()
            .collect();
        hidden.sort();
        hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::FrameData;

    fn object(kind: ObjectKind) -> GameObject {
        GameObject::new(
            ObjectId::new_v4(),
            "hero",
            HitBox::new(10.0, 20.0, 8.0, 8.0).unwrap(),
            Sprite::single(FrameData::new("base", 0, 0, 8, 8)),
        )
        .with_kind(kind)
    }

    #[test]
    fn position_is_hitbox_origin() {
        let mut obj = object(ObjectKind::Entity);
        assert_eq!(obj.position(), DVec2::new(10.0, 20.0));
        obj.translate(DVec2::new(1.0, -2.0));
        assert_eq!(obj.hitbox().origin(), DVec2::new(11.0, 18.0));
    }

    #[test]
    fn power_ups_require_player() {
        let mut player = object(ObjectKind::Player(PlayerState::default()));
        player.add_power_up("double_jump").unwrap();
        assert_eq!(player.power_ups(), ["double_jump".to_string()]);

        let mut enemy = object(ObjectKind::Enemy);
        assert!(matches!(
            enemy.add_power_up("shield"),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(enemy.power_ups().is_empty());
    }

    #[test]
    fn stats_split_by_displayed_list() {
        let player = object(ObjectKind::Player(PlayerState::new(vec![
            "score".into(),
            "lives".into(),
            "missing".into(),
        ])))
        .with_variable("score", 3.0)
        .with_variable("lives", 2.0)
        .with_variable("speed", 4.0)
        .with_variable("armor", 1.0);

        assert_eq!(
            player.displayed_stats(),
            vec![("score".to_string(), 3.0), ("lives".to_string(), 2.0)]
        );
        assert_eq!(player.hidden_stats(), vec!["armor".to_string(), "speed".to_string()]);
    }

    #[test]
    fn non_players_have_no_stats() {
        let entity = object(ObjectKind::Entity).with_variable("score", 1.0);
        assert!(entity.displayed_stats().is_empty());
        assert!(entity.hidden_stats().is_empty());
    }
}
