//! Event rules attached to game objects.
//!
//! An [`Event`] pairs condition groups with an ordered list of outcomes. The event
//! fires when every group has at least one condition that holds; a plain
//! single-condition event is one group holding one condition.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, Result};

/// Named string and numeric parameters carried by a condition or outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    strings: HashMap<String, String>,
    doubles: HashMap<String, f64>,
}

impl Params {
    pub fn new(strings: HashMap<String, String>, doubles: HashMap<String, f64>) -> Self {
        Self { strings, doubles }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    pub fn double(&self, name: &str) -> Option<f64> {
        self.doubles.get(name).copied()
    }

    pub fn double_or(&self, name: &str, default: f64) -> f64 {
        self.double(name).unwrap_or(default)
    }

    pub fn require_string(&self, rule: &str, name: &str) -> Result<&str> {
        self.string(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| EngineError::missing(rule, name))
    }

    pub fn require_double(&self, rule: &str, name: &str) -> Result<f64> {
        self.double(name)
            .ok_or_else(|| EngineError::missing(rule, name))
    }

    pub fn insert_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(name.into(), value.into());
    }

    pub fn insert_double(&mut self, name: impl Into<String>, value: f64) {
        self.doubles.insert(name.into(), value);
    }
}

macro_rules! rule_kinds {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $tag:literal $(| $alias:literal)*),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
            /// A tag with no built-in meaning, resolved through the rule registry.
            Custom(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $tag,)*
                    Self::Custom(name) => name,
                }
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            /// Never fails: unknown tags become `Custom` and are rejected at evaluation.
            fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
                let tag = value.trim().to_ascii_uppercase();
                let known = match tag.as_str() {
                    $($tag $(| $alias)* => Some(Self::$variant),)*
                    _ => None,
                };
                Ok(known.unwrap_or_else(|| Self::Custom(tag)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

rule_kinds! {
    /// Condition tags understood by the condition checker.
    ConditionType {
        True => "TRUE",
        KeyPressed => "KEY_PRESSED",
        KeyReleased => "KEY_RELEASED",
        CollidedWithGroup => "COLLIDED_WITH_GROUP",
        LessThanVariableThreshold => "LESS_THAN_VARIABLE_THRESHOLD",
        GreaterThanVariableThreshold => "GREATER_THAN_VARIABLE_THRESHOLD" | "GREATER_VARIABLE_THRESHOLD",
        EqualVariableThreshold => "EQUAL_VARIABLE_THRESHOLD",
        AtOrBeyondX => "AT_OR_BEYOND_X",
        AtOrBeyondY => "AT_OR_BEYOND_Y",
        IsGrounded => "IS_GROUNDED",
    }
}

rule_kinds! {
    /// Outcome tags understood by the outcome executor.
    OutcomeType {
        Move => "MOVE",
        MoveLeft => "MOVE_LEFT",
        MoveRight => "MOVE_RIGHT",
        SetVelocity => "SET_VELOCITY",
        Jump => "JUMP",
        ApplyVelocity => "APPLY_VELOCITY",
        ApplyGravity => "APPLY_GRAVITY",
        IncrementVariable => "INCREMENT_VARIABLE" | "CHANGE_VAR",
        SetVariable => "SET_VARIABLE" | "SET_VAR",
        SetStringVariable => "SET_STRING_VARIABLE",
        Destroy => "DESTROY" | "DESTROY_OBJECT",
        AddObject => "ADD_OBJECT" | "SPAWN_ON_OBJECT",
        SpawnAtPoint => "SPAWN_AT_POINT" | "SPAWN_NEW_OBJECT",
        ChangeObject => "CHANGE_OBJECT",
        SetAnimation => "SET_ANIMATION" | "ADD_ANIMATION",
        ClearAndPlayAnimation => "CLEAR_AND_PLAY_ANIMATION",
        StopAnimations => "STOP_ANIMATIONS" | "STOP_OBJECT_ANIMATIONS",
        SetBaseFrame => "SET_BASE_FRAME",
        TeleportToPoint => "TELEPORT_TO_POINT",
        TeleportToRandomPoint => "TELEPORT_TO_RANDOM_POINT",
        Dash => "DASH",
        Patrol => "PATROL",
        WallCollide => "WALL_COLLIDE",
        PlatformPassThrough => "PLATFORM_PASS_THROUGH" | "PLATFORM_PASS_THROUGH_BEHAVIOR",
        Flip => "FLIP",
        SetFlip => "SET_FLIP",
        AddPowerUp => "ADD_POWER_UP",
        LoseGame => "LOSE_GAME",
        WinGame => "WIN_GAME",
        RestartLevel => "RESTART_LEVEL",
        SelectLevel => "SELECT_LEVEL",
    }
}

/// A predicate tag plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCondition {
    pub kind: ConditionType,
    pub params: Params,
}

impl EventCondition {
    pub fn new(kind: ConditionType) -> Self {
        Self {
            kind,
            params: Params::default(),
        }
    }

    pub fn with_string(mut self, name: &str, value: &str) -> Self {
        self.params.insert_string(name, value);
        self
    }

    pub fn with_double(mut self, name: &str, value: f64) -> Self {
        self.params.insert_double(name, value);
        self
    }
}

/// A state-changing action tag plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub kind: OutcomeType,
    pub params: Params,
}

impl EventOutcome {
    pub fn new(kind: OutcomeType) -> Self {
        Self {
            kind,
            params: Params::default(),
        }
    }

    pub fn with_string(mut self, name: &str, value: &str) -> Self {
        self.params.insert_string(name, value);
        self
    }

    pub fn with_double(mut self, name: &str, value: f64) -> Self {
        self.params.insert_double(name, value);
        self
    }
}

/// A (conditions, outcomes) rule owned by one game object. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    label: Option<String>,
    condition_groups: Vec<Vec<EventCondition>>,
    outcomes: Vec<EventOutcome>,
}

impl Event {
    pub fn new(condition: EventCondition, outcomes: Vec<EventOutcome>) -> Self {
        Self::with_groups(vec![vec![condition]], outcomes)
    }

    /// AND of OR-groups: every group needs at least one condition that holds.
    pub fn with_groups(groups: Vec<Vec<EventCondition>>, outcomes: Vec<EventOutcome>) -> Self {
        Self {
            label: None,
            condition_groups: groups,
            outcomes,
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn condition_groups(&self) -> &[Vec<EventCondition>] {
        &self.condition_groups
    }

    pub fn outcomes(&self) -> &[EventOutcome] {
        &self.outcomes
    }
}
