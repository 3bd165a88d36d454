pub mod animation;
pub mod collision;
pub mod conditions;
pub mod events;
pub mod outcomes;
pub mod rules;

pub use animation::{AnimationHandler, Animator};
pub use collision::{CollisionHandler, Contact};
pub use conditions::ConditionChecker;
pub use events::EventHandler;
pub use outcomes::{OutcomeContext, OutcomeExecutor};
pub use rules::RuleRegistry;
