//! Structural changes requested by outcomes, applied at the tick boundary.

use crate::api::game::{GameExecutor, SpawnRequest};
use crate::api::types::ObjectId;
use crate::components::object::GameObject;
use crate::core::bounds::MapBounds;
use crate::error::{EngineError, Result};
use crate::level::factory::GameObjectFactory;

/// Session-level request raised by an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowRequest {
    EndGame { won: bool },
    Restart,
    SelectLevel(String),
}

/// Everything a tick asked for that could not happen mid-tick.
#[derive(Debug, Default)]
pub struct TickCommands {
    pub destroyed: Vec<ObjectId>,
    pub spawned: Vec<(ObjectId, SpawnRequest)>,
    /// First request wins; later ones in the same tick are dropped.
    pub flow: Option<FlowRequest>,
}

impl TickCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.destroyed.is_empty() && self.spawned.is_empty() && self.flow.is_none()
    }

    fn request_flow(&mut self, request: FlowRequest) {
        match &self.flow {
            None => self.flow = Some(request),
            Some(pending) => {
                log::debug!("ignoring {request:?}, {pending:?} already requested this tick")
            }
        }
    }
}

/// [`GameExecutor`] handed to the outcomes of one object during a tick.
///
/// `before` and `after` are the live objects on either side of the one being
/// updated, which is borrowed mutably elsewhere.
pub(crate) struct TickExecutor<'a> {
    pub before: &'a [GameObject],
    pub after: &'a [GameObject],
    pub bounds: MapBounds,
    pub factory: &'a GameObjectFactory,
    pub commands: &'a mut TickCommands,
}

impl GameExecutor for TickExecutor<'_> {
    fn destroy_game_object(&mut self, id: ObjectId) {
        if !self.commands.destroyed.contains(&id) {
            self.commands.destroyed.push(id);
        }
    }

    fn add_game_object(&mut self, request: SpawnRequest) -> Result<ObjectId> {
        if !self.factory.contains(request.blueprint) {
            return Err(EngineError::configuration(format!(
                "unknown blueprint id {}",
                request.blueprint
            )));
        }
        let id = match request.id {
            Some(id) if self.commands.spawned.iter().any(|(queued, _)| *queued == id) => {
                return Err(EngineError::InvalidArgument(format!(
                    "object {id} is already being replaced this tick"
                )));
            }
            Some(id) => id,
            None => ObjectId::new_v4(),
        };
        self.commands.spawned.push((id, request));
        Ok(id)
    }

    fn map_bounds(&self) -> MapBounds {
        self.bounds
    }

    fn game_object(&self, id: ObjectId) -> Result<&GameObject> {
        self.before
            .iter()
            .chain(self.after)
            .find(|object| object.id() == id)
            .ok_or(EngineError::ObjectNotFound(id))
    }

    fn end_game(&mut self, won: bool) {
        self.commands.request_flow(FlowRequest::EndGame { won });
    }

    fn restart_level(&mut self) {
        self.commands.request_flow(FlowRequest::Restart);
    }

    fn select_level(&mut self, level: &str) {
        self.commands
            .request_flow(FlowRequest::SelectLevel(level.to_string()));
    }
}
