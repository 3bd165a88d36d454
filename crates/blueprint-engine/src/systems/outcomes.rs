//! Outcome execution: the state changes applied when an event fires.
//!
//! Outcomes mutate the object they belong to directly. Anything touching the
//! wider world (spawning, destroying, level flow) goes through [`GameExecutor`]
//! and takes effect at the tick boundary.

use glam::DVec2;

use crate::api::game::{GameConfig, GameExecutor, SpawnRequest};
use crate::components::event::{EventOutcome, OutcomeType, Params};
use crate::components::hitbox::HitBox;
use crate::components::object::GameObject;
use crate::core::rng::Rng;
use crate::error::{EngineError, Result};
use crate::input::InputProvider;
use crate::systems::animation::Animator;
use crate::systems::collision::CollisionHandler;
use crate::systems::rules::RuleRegistry;

/// How far a snapped object sinks into the surface it rests on, so the resting
/// contact still registers as a collision on the next tick.
pub const REST_OVERLAP: f64 = 1.0;

const DEFAULT_DASH_SPEED: f64 = 3.0;

/// Mutable collaborators an outcome may touch besides its own object.
pub struct OutcomeContext<'a> {
    pub game: &'a mut dyn GameExecutor,
    pub animations: &'a mut dyn Animator,
    pub rng: &'a mut Rng,
}

/// Applies outcomes. Read-only world state is borrowed for the whole tick.
pub struct OutcomeExecutor<'a> {
    collisions: &'a CollisionHandler,
    input: &'a dyn InputProvider,
    rules: &'a RuleRegistry,
    config: &'a GameConfig,
}

impl<'a> OutcomeExecutor<'a> {
    pub fn new(
        collisions: &'a CollisionHandler,
        input: &'a dyn InputProvider,
        rules: &'a RuleRegistry,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            collisions,
            input,
            rules,
            config,
        }
    }

    pub fn apply_outcome(
        &self,
        outcome: &EventOutcome,
        object: &mut GameObject,
        ctx: &mut OutcomeContext<'_>,
    ) -> Result<()> {
        let params = &outcome.params;
        let tag = outcome.kind.as_str();
        match &outcome.kind {
            OutcomeType::Move => self.move_by(params, object),
            OutcomeType::MoveLeft => {
                let amount = params.double_or("amount", self.config.default_move_amount);
                object.translate(DVec2::new(-amount, 0.0));
            }
            OutcomeType::MoveRight => {
                let amount = params.double_or("amount", self.config.default_move_amount);
                object.translate(DVec2::new(amount, 0.0));
            }
            OutcomeType::SetVelocity => set_velocity(params, object),
            OutcomeType::Jump => {
                let strength = params
                    .double("strength")
                    .or_else(|| params.double("amount"))
                    .ok_or_else(|| EngineError::missing(tag, "strength"))?;
                object.velocity.y = strength;
                object.grounded = false;
            }
            OutcomeType::ApplyVelocity => self.apply_velocity(object, ctx),
            OutcomeType::ApplyGravity => {
                if self.collisions.collisions(object.id).is_empty() {
                    object.grounded = false;
                }
                if !object.grounded {
                    object.velocity.y += params.double_or("amount", self.config.default_gravity);
                }
            }
            OutcomeType::IncrementVariable => {
                let name = params.require_string(tag, "variable")?;
                let delta = params.require_double(tag, "delta")?;
                let value = object
                    .variable(name)
                    .ok_or_else(|| EngineError::VariableNotFound(name.to_string()))?;
                object.set_variable(name, value + delta);
            }
            OutcomeType::SetVariable => {
                let name = params.require_string(tag, "variable")?;
                let value = params.require_double(tag, "value")?;
                object.set_variable(name, value);
            }
            OutcomeType::SetStringVariable => {
                let name = params.require_string(tag, "variable")?;
                let value = params.string("value").unwrap_or_default();
                object.set_string_variable(name, value);
            }
            OutcomeType::Destroy => ctx.game.destroy_game_object(object.id),
            OutcomeType::AddObject => {
                let offset = DVec2::new(
                    params.double_or("offset_x", 0.0),
                    params.double_or("offset_y", 0.0),
                );
                let request = spawn_request(tag, params, object.position() + offset)?;
                ctx.game.add_game_object(request)?;
            }
            OutcomeType::SpawnAtPoint => {
                let at = DVec2::new(
                    params.require_double(tag, "x")?,
                    params.require_double(tag, "y")?,
                );
                ctx.game.add_game_object(spawn_request(tag, params, at)?)?;
            }
            OutcomeType::ChangeObject => {
                let mut request = spawn_request(tag, params, object.position())?;
                request.layer = request.layer.or(Some(object.layer));
                request.id = Some(object.id);
                ctx.game.add_game_object(request)?;
                ctx.game.destroy_game_object(object.id);
            }
            OutcomeType::SetAnimation => {
                let name = params.require_string(tag, "animation")?;
                ctx.animations.add_to_animations(object, name);
            }
            OutcomeType::ClearAndPlayAnimation => {
                let name = params.require_string(tag, "animation")?;
                ctx.animations.clear_and_add_to_animation_list(object, name);
            }
            OutcomeType::StopAnimations => ctx.animations.go_to_base_image(object),
            OutcomeType::SetBaseFrame => {
                let frame = params.require_string(tag, "frame")?;
                ctx.animations.set_base_image(object, frame)?;
            }
            OutcomeType::TeleportToPoint => {
                let mut position = object.position();
                if let Some(x) = params.double("x") {
                    position.x = x;
                }
                if let Some(y) = params.double("y") {
                    position.y = y;
                }
                object.set_position(position);
            }
            OutcomeType::TeleportToRandomPoint => teleport_random(params, object, ctx.rng),
            OutcomeType::Dash => self.dash(params, object),
            OutcomeType::Patrol => self.patrol(params, object, ctx),
            OutcomeType::WallCollide => {
                let group = surface_group(params, "wall");
                self.wall_collide(object, group);
            }
            OutcomeType::PlatformPassThrough => {
                let group = surface_group(params, "platform");
                self.platform_pass_through(object, group);
            }
            OutcomeType::Flip => object.sprite.flipped = !object.sprite.flipped,
            OutcomeType::SetFlip => {
                object.sprite.flipped = params.require_double(tag, "flipped")? != 0.0;
            }
            OutcomeType::AddPowerUp => {
                let power_up = params.require_string(tag, "power_up")?;
                object.add_power_up(power_up)?;
            }
            OutcomeType::LoseGame => ctx.game.end_game(false),
            OutcomeType::WinGame => ctx.game.end_game(true),
            OutcomeType::RestartLevel => ctx.game.restart_level(),
            OutcomeType::SelectLevel => {
                let level = params.require_string(tag, "level")?;
                ctx.game.select_level(level);
            }
            OutcomeType::Custom(name) => match self.rules.outcome(name) {
                Some(apply) => apply(object, params)?,
                None => return Err(EngineError::UnsupportedOutcome(name.clone())),
            },
        }
        Ok(())
    }

    fn move_by(&self, params: &Params, object: &mut GameObject) {
        let delta = match (params.double("dx"), params.double("dy")) {
            (None, None) => {
                let amount = params.double_or("amount", self.config.default_move_amount);
                let angle = params.double_or("angle", 0.0).to_radians();
                DVec2::new(amount * angle.cos(), amount * angle.sin())
            }
            (dx, dy) => DVec2::new(dx.unwrap_or(0.0), dy.unwrap_or(0.0)),
        };
        object.translate(delta);
        set_velocity(params, object);
    }

    fn apply_velocity(&self, object: &mut GameObject, ctx: &OutcomeContext<'_>) {
        object.translate(object.velocity);
        if !self.config.floor_snap {
            return;
        }
        let bounds = ctx.game.map_bounds();
        let size = object.hitbox.size();
        let mut position = object.position();
        position.x = position.x.clamp(bounds.min_x, (bounds.max_x - size.x).max(bounds.min_x));
        if position.y < bounds.min_y {
            position.y = bounds.min_y;
            object.velocity.y = object.velocity.y.max(0.0);
        }
        if position.y + size.y >= bounds.max_y {
            position.y = bounds.max_y - size.y;
            object.velocity.y = object.velocity.y.min(0.0);
            object.grounded = true;
        }
        object.set_position(position);
    }

    fn dash(&self, params: &Params, object: &mut GameObject) {
        let Some(target) = self.input.mouse_position() else {
            return;
        };
        let speed = params.double_or("amount", DEFAULT_DASH_SPEED);
        let direction = (target - object.position()).normalize_or_zero();
        if direction != DVec2::ZERO {
            object.velocity = direction * speed;
        }
    }

    fn patrol(&self, params: &Params, object: &mut GameObject, ctx: &OutcomeContext<'_>) {
        let speed = params
            .double_or("amount", self.config.default_move_amount)
            .abs();
        let bounds = ctx.game.map_bounds();
        let hitbox = object.hitbox;
        if object.velocity.x == 0.0 {
            object.velocity.x = speed;
        }
        if hitbox.x() <= bounds.min_x && object.velocity.x < 0.0 {
            object.velocity.x = speed;
        } else if hitbox.right() >= bounds.max_x && object.velocity.x > 0.0 {
            object.velocity.x = -speed;
        }
    }

    fn wall_collide(&self, object: &mut GameObject, group: &str) {
        for contact in self.collisions.collisions(object.id) {
            if contact.group != group {
                continue;
            }
            if !snap_onto(object, &contact.hitbox) {
                separate(object, &contact.hitbox);
            }
        }
    }

    fn platform_pass_through(&self, object: &mut GameObject, group: &str) {
        for contact in self.collisions.collisions(object.id) {
            if contact.group == group {
                snap_onto(object, &contact.hitbox);
            }
        }
    }
}

fn set_velocity(params: &Params, object: &mut GameObject) {
    if let Some(vx) = params.double("vx") {
        object.velocity.x = vx;
    }
    if let Some(vy) = params.double("vy") {
        object.velocity.y = vy;
    }
}

fn spawn_request(tag: &str, params: &Params, position: DVec2) -> Result<SpawnRequest> {
    let blueprint = params
        .double("blueprint")
        .or_else(|| params.double("blueprintId"))
        .ok_or_else(|| EngineError::missing(tag, "blueprint"))?;
    if blueprint < 0.0 || !blueprint.is_finite() {
        return Err(EngineError::InvalidArgument(format!(
            "{tag}: blueprint id must be a non-negative number, got {blueprint}"
        )));
    }
    Ok(SpawnRequest {
        blueprint: blueprint.ceil() as u32,
        position,
        layer: params.double("layer").map(|layer| layer.ceil() as i32),
        id: None,
    })
}

fn surface_group<'p>(params: &'p Params, default: &'p str) -> &'p str {
    params
        .string("group")
        .or_else(|| params.string("type"))
        .unwrap_or(default)
}

fn teleport_random(params: &Params, object: &mut GameObject, rng: &mut Rng) {
    let bound = |snake: &str, camel: &str, fallback: f64| {
        params
            .double(snake)
            .or_else(|| params.double(camel))
            .unwrap_or(fallback) as i64
    };
    let x_min = bound("x_min", "xMin", 0.0);
    let x_max = bound("x_max", "xMax", x_min as f64);
    let y_min = bound("y_min", "yMin", 0.0);
    let y_max = bound("y_max", "yMax", y_min as f64);
    let x = rng.next_int_inclusive(x_min, x_max);
    let y = rng.next_int_inclusive(y_min, y_max);
    object.set_position(DVec2::new(x as f64, y as f64));
}

/// Land on top of `surface` when falling into it from above.
fn snap_onto(object: &mut GameObject, surface: &HitBox) -> bool {
    let hitbox = object.hitbox;
    let falling = object.velocity.y >= 0.0;
    let crossing_top = hitbox.bottom() >= surface.y() && hitbox.y() < surface.y();
    let above = hitbox.right() > surface.x() && hitbox.x() < surface.right();
    if !(falling && crossing_top && above) {
        return false;
    }
    object.set_position(DVec2::new(hitbox.x(), surface.y() - hitbox.height() + REST_OVERLAP));
    object.velocity.y = 0.0;
    object.grounded = true;
    true
}

/// Push `object` out of `surface` along the axis of least penetration.
fn separate(object: &mut GameObject, surface: &HitBox) {
    let hitbox = object.hitbox;
    if !hitbox.overlaps(surface) {
        return;
    }
    let overlap = hitbox.overlap_extent(surface);
    let mut position = hitbox.origin();
    if overlap.y <= overlap.x {
        if hitbox.y() < surface.y() {
            position.y -= overlap.y;
        } else {
            position.y += overlap.y;
        }
        object.velocity.y = 0.0;
    } else {
        if hitbox.x() < surface.x() {
            position.x -= overlap.x;
        } else {
            position.x += overlap.x;
        }
        object.velocity.x = 0.0;
    }
    object.set_position(position);
}
