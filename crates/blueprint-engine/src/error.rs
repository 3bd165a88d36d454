//! Engine error taxonomy.
//!
//! Load-time problems surface as [`EngineError::Configuration`] and abort the load.
//! Rule failures (`UnsupportedCondition`, `UnsupportedOutcome`, `VariableNotFound`,
//! `FrameNotFound`, `MissingParameter`) are fatal to a single event evaluation only;
//! the controller logs them and keeps ticking.

use thiserror::Error;

use crate::api::types::ObjectId;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed level or blueprint data.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A condition tag with no evaluator.
    #[error("unsupported condition '{0}'")]
    UnsupportedCondition(String),

    /// An outcome tag with no executor.
    #[error("unsupported outcome '{0}'")]
    UnsupportedOutcome(String),

    /// A rule referenced a variable the object never initialised.
    #[error("variable '{0}' not found")]
    VariableNotFound(String),

    /// A sprite frame name is absent from the sprite's frame map.
    #[error("frame '{0}' not found")]
    FrameNotFound(String),

    /// A value violates a construction-time invariant.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A rule is missing one of its required parameters.
    #[error("{rule} is missing parameter '{name}'")]
    MissingParameter { rule: String, name: String },

    #[error("no object with id {0}")]
    ObjectNotFound(ObjectId),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn missing(rule: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            rule: rule.into(),
            name: name.into(),
        }
    }

    /// True for errors that abort a level load rather than a single rule.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Json(_))
    }
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = EngineError::VariableNotFound("score".into());
        assert_eq!(err.to_string(), "variable 'score' not found");

        let err = EngineError::missing("JUMP", "strength");
        assert_eq!(err.to_string(), "JUMP is missing parameter 'strength'");
    }

    #[test]
    fn json_errors_are_load_errors() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.is_load_error());
        assert!(!EngineError::UnsupportedOutcome("X".into()).is_load_error());
    }
}
