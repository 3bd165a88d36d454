//! Host-registered condition and outcome handlers.
//!
//! Rule tags with no built-in meaning parse as `Custom(name)` and are looked up
//! here by name at evaluation time.

use std::collections::HashMap;
use std::fmt;

use crate::components::event::Params;
use crate::components::object::GameObject;
use crate::error::Result;

pub type ConditionFn = Box<dyn Fn(&GameObject, &Params) -> Result<bool> + Send + Sync>;
pub type OutcomeFn = Box<dyn Fn(&mut GameObject, &Params) -> Result<()> + Send + Sync>;

#[derive(Default)]
pub struct RuleRegistry {
    conditions: HashMap<String, ConditionFn>,
    outcomes: HashMap<String, OutcomeFn>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_condition<F>(&mut self, name: &str, condition: F)
    where
        F: Fn(&GameObject, &Params) -> Result<bool> + Send + Sync + 'static,
    {
        self.conditions
            .insert(name.trim().to_ascii_uppercase(), Box::new(condition));
    }

    pub fn register_outcome<F>(&mut self, name: &str, outcome: F)
    where
        F: Fn(&mut GameObject, &Params) -> Result<()> + Send + Sync + 'static,
    {
        self.outcomes
            .insert(name.trim().to_ascii_uppercase(), Box::new(outcome));
    }

    pub fn condition(&self, name: &str) -> Option<&ConditionFn> {
        self.conditions.get(&name.trim().to_ascii_uppercase())
    }

    pub fn outcome(&self, name: &str) -> Option<&OutcomeFn> {
        self.outcomes.get(&name.trim().to_ascii_uppercase())
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut conditions: Vec<&String> = self.conditions.keys().collect();
        let mut outcomes: Vec<&String> = self.outcomes.keys().collect();
        conditions.sort();
        outcomes.sort();
        f.debug_struct("RuleRegistry")
            .field("conditions", &conditions)
            .field("outcomes", &outcomes)
            .finish()
    }
}
