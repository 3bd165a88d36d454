//! Condition evaluation. Pure predicates over one object and the tick's world view.

use crate::components::event::{ConditionType, EventCondition};
use crate::components::object::GameObject;
use crate::error::{EngineError, Result};
use crate::input::InputProvider;
use crate::systems::collision::CollisionHandler;
use crate::systems::rules::RuleRegistry;

/// Half-width of the band in which `EQUAL_VARIABLE_THRESHOLD` holds.
pub const EQUAL_CUSHION: f64 = 0.05;

pub struct ConditionChecker<'a> {
    input: &'a dyn InputProvider,
    collisions: &'a CollisionHandler,
    rules: &'a RuleRegistry,
}

impl<'a> ConditionChecker<'a> {
    pub fn new(
        input: &'a dyn InputProvider,
        collisions: &'a CollisionHandler,
        rules: &'a RuleRegistry,
    ) -> Self {
        Self {
            input,
            collisions,
            rules,
        }
    }

    pub fn check_condition(&self, condition: &EventCondition, object: &GameObject) -> Result<bool> {
        let params = &condition.params;
        let tag = condition.kind.as_str();
        match &condition.kind {
            ConditionType::True => Ok(true),
            ConditionType::KeyPressed => {
                Ok(self.input.is_key_pressed(params.require_string(tag, "key")?))
            }
            ConditionType::KeyReleased => {
                Ok(self.input.is_key_released(params.require_string(tag, "key")?))
            }
            ConditionType::CollidedWithGroup => {
                let group = params.require_string(tag, "group")?;
                Ok(self.collisions.collides_with_group(object.id(), group))
            }
            ConditionType::LessThanVariableThreshold => {
                let (value, threshold) = variable_and_threshold(tag, condition, object)?;
                Ok(value < threshold)
            }
            ConditionType::GreaterThanVariableThreshold => {
                let (value, threshold) = variable_and_threshold(tag, condition, object)?;
                Ok(value > threshold)
            }
            ConditionType::EqualVariableThreshold => {
                let (value, threshold) = variable_and_threshold(tag, condition, object)?;
                Ok((value - threshold).abs() <= EQUAL_CUSHION)
            }
            ConditionType::AtOrBeyondX => {
                let x = params.require_double(tag, "x")?.trunc();
                Ok(object.position().x >= x)
            }
            ConditionType::AtOrBeyondY => {
                let y = params.require_double(tag, "y")?.trunc();
                Ok(object.position().y >= y)
            }
            ConditionType::IsGrounded => Ok(object.grounded()),
            ConditionType::Custom(name) => match self.rules.condition(name) {
                Some(check) => check(object, params),
                None => Err(EngineError::UnsupportedCondition(name.clone())),
            },
        }
    }
}

fn variable_and_threshold(
    tag: &str,
    condition: &EventCondition,
    object: &GameObject,
) -> Result<(f64, f64)> {
    let name = condition.params.require_string(tag, "variable")?;
    let threshold = condition.params.require_double(tag, "threshold")?;
    let value = object
        .variable(name)
        .ok_or_else(|| EngineError::VariableNotFound(name.to_string()))?;
    Ok((value, threshold))
}
