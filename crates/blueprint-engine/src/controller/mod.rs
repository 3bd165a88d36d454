pub mod commands;
pub mod game_controller;

pub use commands::{FlowRequest, TickCommands};
pub use game_controller::{GameController, RuleFailure, TickReport};
