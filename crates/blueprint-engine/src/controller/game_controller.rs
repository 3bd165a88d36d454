use std::sync::Arc;

use glam::DVec2;

use crate::api::game::GameConfig;
use crate::api::types::{GameState, GameStatus, ObjectId};
use crate::components::object::GameObject;
use crate::controller::commands::{FlowRequest, TickCommands, TickExecutor};
use crate::core::bounds::MapBounds;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::error::{EngineError, Result};
use crate::input::InputProvider;
use crate::level::data::LevelData;
use crate::level::factory::{GameObjectFactory, KindConstructor};
use crate::renderer::camera::Camera2D;
use crate::renderer::snapshot::WorldSnapshot;
use crate::systems::animation::AnimationHandler;
use crate::systems::collision::CollisionHandler;
use crate::systems::conditions::ConditionChecker;
use crate::systems::events::EventHandler;
use crate::systems::outcomes::{OutcomeContext, OutcomeExecutor};
use crate::systems::rules::RuleRegistry;

/// An event that failed while a tick was running.
#[derive(Debug)]
pub struct RuleFailure {
    pub object: ObjectId,
    /// Index into the object's event list.
    pub event: usize,
    pub error: EngineError,
}

/// What happened during one call to [`GameController::tick`].
#[derive(Debug, Default)]
pub struct TickReport {
    /// Tick number after this call.
    pub tick: u64,
    /// False when the controller was not running and nothing advanced.
    pub ran: bool,
    /// Events whose conditions held and whose outcomes all applied.
    pub fired: usize,
    pub failures: Vec<RuleFailure>,
    pub destroyed: Vec<ObjectId>,
    pub spawned: Vec<ObjectId>,
    pub flow: Option<FlowRequest>,
}

/// Everything derived from a level, built off to the side before it replaces the
/// running world.
struct LoadedWorld {
    factory: GameObjectFactory,
    scene: Scene,
    bounds: MapBounds,
    camera: Camera2D,
}

/// Owns the live objects and drives the tick loop.
///
/// The object set only changes between ticks: destroys and spawns requested by
/// outcomes are queued and applied once every object has been processed.
pub struct GameController {
    config: GameConfig,
    level: Option<Arc<LevelData>>,
    factory: GameObjectFactory,
    scene: Scene,
    bounds: MapBounds,
    camera: Camera2D,
    collisions: CollisionHandler,
    animations: AnimationHandler,
    rules: RuleRegistry,
    rng: Rng,
    state: GameState,
    status: GameStatus,
    tick: u64,
    pending_level: Option<String>,
    snapshot: Arc<WorldSnapshot>,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        let bounds = MapBounds::default();
        let viewport = DVec2::new(config.view_width, config.view_height);
        Self {
            factory: GameObjectFactory::new(),
            scene: Scene::new(),
            camera: Camera2D::fixed(bounds, viewport),
            bounds,
            collisions: CollisionHandler::new(),
            animations: AnimationHandler::new(config.max_animation_skips),
            rules: RuleRegistry::new(),
            rng: Rng::new(config.seed),
            state: GameState::Stopped,
            status: GameStatus::Playing,
            tick: 0,
            pending_level: None,
            snapshot: Arc::new(WorldSnapshot::default()),
            level: None,
            config,
        }
    }

    /// Replace the running level with `level`.
    ///
    /// Everything is validated and built before the swap, so on error the
    /// previous level keeps running untouched. A successful load leaves the
    /// controller stopped until [`play`](Self::play).
    pub fn load_level(&mut self, level: LevelData) -> Result<()> {
        let world = self.build_world(&level)?;
        log::info!(
            "loaded level '{}' ({} objects, {} blueprints)",
            level.name,
            world.scene.len(),
            world.factory.blueprint_count()
        );
        self.level = Some(Arc::new(level));
        self.install(world);
        self.state = GameState::Stopped;
        Ok(())
    }

    pub fn load_level_json(&mut self, json: &str) -> Result<()> {
        self.load_level(LevelData::from_json(json)?)
    }

    pub fn play(&mut self) {
        if self.level.is_none() {
            log::warn!("play requested with no level loaded");
            return;
        }
        if self.status != GameStatus::Playing {
            log::debug!("play ignored, game already ended ({:?})", self.status);
            return;
        }
        self.state = GameState::Running;
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
        }
    }

    /// Stop and rebuild the current level from the data it was loaded from.
    pub fn restart(&mut self) -> Result<()> {
        self.state = GameState::Stopped;
        self.reload()
    }

    /// Register a blueprint kind for levels loaded from now on.
    pub fn register_kind(&mut self, name: &str, constructor: KindConstructor) {
        self.factory.register_kind(name, constructor);
    }

    /// Custom condition and outcome handlers.
    pub fn rules_mut(&mut self) -> &mut RuleRegistry {
        &mut self.rules
    }

    /// Run one tick if the controller is running.
    ///
    /// Rule failures are logged and collected in the report; they never stop
    /// the loop. Released keys are cleared from `input` whether or not the tick ran.
    pub fn tick(&mut self, input: &mut dyn InputProvider) -> TickReport {
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };
        if self.state != GameState::Running {
            input.clear_released();
            return report;
        }

        self.collisions.update_collisions(self.scene.iter());

        let mut commands = TickCommands::new();
        self.run_events(&*input, &mut commands, &mut report);
        self.reconcile(&mut commands, &mut report);
        if let Some(flow) = commands.flow.take() {
            self.apply_flow(&flow);
            report.flow = Some(flow);
        }

        self.animations.tick_animations(self.scene.iter_mut());
        let target = self
            .camera
            .tracked()
            .and_then(|id| self.scene.get(id))
            .map(|object| object.hitbox().center());
        self.camera.update(target, self.config.fixed_dt);

        self.tick += 1;
        report.tick = self.tick;
        report.ran = true;
        self.publish();
        input.clear_released();
        report
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.scene.get(id)
    }

    /// Live objects in processing order.
    pub fn objects(&self) -> &[GameObject] {
        self.scene.as_slice()
    }

    /// The most recently published view of the world.
    pub fn snapshot(&self) -> Arc<WorldSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Level path requested by a SELECT_LEVEL outcome, if any. Cleared on read.
    pub fn take_level_request(&mut self) -> Option<String> {
        self.pending_level.take()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn level(&self) -> Option<&LevelData> {
        self.level.as_deref()
    }

    fn build_world(&self, level: &LevelData) -> Result<LoadedWorld> {
        level.bounds.validate()?;
        let mut factory = self.factory.clone();
        factory.load(&level.blueprints)?;
        let objects = factory.build_placements(&level.objects)?;
        let viewport = DVec2::new(self.config.view_width, self.config.view_height);
        let camera = match &level.camera {
            Some(data) => Camera2D::from_data(data, level.bounds, viewport, &objects)?,
            None => Camera2D::fixed(level.bounds, viewport),
        };
        Ok(LoadedWorld {
            factory,
            scene: objects.into_iter().collect(),
            bounds: level.bounds,
            camera,
        })
    }

    fn install(&mut self, world: LoadedWorld) {
        self.factory = world.factory;
        self.scene = world.scene;
        self.bounds = world.bounds;
        self.camera = world.camera;
        self.collisions.clear();
        self.animations.clear();
        self.rng = Rng::new(self.config.seed);
        self.status = GameStatus::Playing;
        self.publish();
    }

    fn reload(&mut self) -> Result<()> {
        let level = self
            .level
            .clone()
            .ok_or_else(|| EngineError::configuration("no level loaded"))?;
        let world = self.build_world(&level)?;
        self.install(world);
        Ok(())
    }

    fn run_events(
        &mut self,
        input: &dyn InputProvider,
        commands: &mut TickCommands,
        report: &mut TickReport,
    ) {
        let checker = ConditionChecker::new(input, &self.collisions, &self.rules);
        let executor = OutcomeExecutor::new(&self.collisions, input, &self.rules, &self.config);
        let handler = EventHandler::new(checker, executor);

        let objects = self.scene.as_mut_slice();
        for index in 0..objects.len() {
            let (before, rest) = objects.split_at_mut(index);
            let Some((object, after)) = rest.split_first_mut() else {
                break;
            };
            let events = object.events_handle();
            if events.is_empty() {
                continue;
            }
            let mut game = TickExecutor {
                before,
                after,
                bounds: self.bounds,
                factory: &self.factory,
                commands: &mut *commands,
            };
            let mut ctx = OutcomeContext {
                game: &mut game,
                animations: &mut self.animations,
                rng: &mut self.rng,
            };
            for (event_index, event) in events.iter().enumerate() {
                match handler.handle_event(event, object, &mut ctx) {
                    Ok(true) => report.fired += 1,
                    Ok(false) => {}
                    Err(error) => {
                        log::warn!(
                            "object {} ({}) event {}{}: {error}",
                            object.id(),
                            object.group(),
                            event_index,
                            event.label().map(|l| format!(" [{l}]")).unwrap_or_default()
                        );
                        report.failures.push(RuleFailure {
                            object: object.id(),
                            event: event_index,
                            error,
                        });
                    }
                }
            }
        }
    }

    fn reconcile(&mut self, commands: &mut TickCommands, report: &mut TickReport) {
        for id in commands.destroyed.drain(..) {
            if let Some(object) = self.scene.despawn(id) {
                self.animations.evict(id);
                log::debug!("destroyed {} ({})", id, object.group());
                report.destroyed.push(id);
            }
        }
        for (id, request) in commands.spawned.drain(..) {
            if self.scene.contains(id) {
                log::warn!("spawn of blueprint {} skipped, {id} is still live", request.blueprint);
                continue;
            }
            let layer = request.layer.unwrap_or(0);
            match self
                .factory
                .create(request.blueprint, id, request.position, layer)
            {
                Ok(object) => {
                    log::debug!("spawned {} ({}) at {}", id, object.group(), request.position);
                    self.scene.spawn(object);
                    report.spawned.push(id);
                }
                Err(error) => log::warn!("spawn of blueprint {} failed: {error}", request.blueprint),
            }
        }
    }

    fn apply_flow(&mut self, flow: &FlowRequest) {
        match flow {
            FlowRequest::EndGame { won } => {
                self.status = if *won {
                    GameStatus::Won
                } else {
                    GameStatus::Lost
                };
                self.state = GameState::Stopped;
                log::info!("game over: {:?} after {} ticks", self.status, self.tick + 1);
            }
            FlowRequest::Restart => {
                log::info!("restarting level");
                if let Err(error) = self.reload() {
                    log::warn!("restart failed: {error}");
                }
            }
            FlowRequest::SelectLevel(path) => {
                log::info!("level '{path}' requested");
                self.pending_level = Some(path.clone());
            }
        }
    }

    fn publish(&mut self) {
        self.snapshot = Arc::new(WorldSnapshot::capture(
            self.tick,
            self.scene.iter(),
            &self.camera,
            self.status,
        ));
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::object::ObjectKind;
    use crate::input::{InputEvent, InputState};
    use crate::systems::animation::Animator;

    const PLAYER: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    const WALL: &str = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";

    const LEVEL: &str = r#"{
        "name": "test",
        "bounds": { "min_x": 0, "min_y": 0, "max_x": 400, "max_y": 300 },
        "blueprints": [
            {
                "id": 1, "kind": "player", "group": "player",
                "hitbox": { "width": 10, "height": 10 },
                "sprite": {
                    "base_frame": "idle",
                    "frames": [{ "name": "idle" }, { "name": "run1" }, { "name": "run2" }],
                    "animations": [{ "name": "run", "frame_len": 1, "frames": ["run1", "run2"] }]
                },
                "events": [
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "RIGHT" } }]],
                      "outcomes": [{ "kind": "MOVE_RIGHT", "double_params": { "amount": 2 } }] },
                    { "conditions": [[{ "kind": "COLLIDED_WITH_GROUP", "string_params": { "group": "coin" } }]],
                      "outcomes": [{ "kind": "INCREMENT_VARIABLE",
                                     "string_params": { "variable": "score" },
                                     "double_params": { "delta": 1 } }] },
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "A" } }]],
                      "outcomes": [{ "kind": "CLEAR_AND_PLAY_ANIMATION", "string_params": { "animation": "run" } }] },
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "B" } }]],
                      "outcomes": [{ "kind": "ADD_OBJECT",
                                     "double_params": { "blueprint": 2, "offset_x": 100, "layer": -1 } }] },
                    { "kind": "broken",
                      "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "X" } }]],
                      "outcomes": [{ "kind": "LEVITATE" }] },
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "X" } }]],
                      "outcomes": [{ "kind": "SET_VARIABLE",
                                     "string_params": { "variable": "score" },
                                     "double_params": { "value": 50 } }] },
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "R" } }]],
                      "outcomes": [{ "kind": "RESTART_LEVEL" }] },
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "W" } }]],
                      "outcomes": [{ "kind": "WIN_GAME" }] },
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "L" } }]],
                      "outcomes": [{ "kind": "SELECT_LEVEL", "string_params": { "level": "two.json" } }] },
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "C" } }]],
                      "outcomes": [{ "kind": "CHANGE_OBJECT", "double_params": { "blueprint": 99 } }] },
                    { "conditions": [[{ "kind": "KEY_PRESSED", "string_params": { "key": "P" } }]],
                      "outcomes": [{ "kind": "CHANGE_OBJECT", "double_params": { "blueprint": 1 } }] }
                ],
                "double_vars": { "score": 0 },
                "displayed": ["score"]
            },
            {
                "id": 2, "group": "coin",
                "hitbox": { "width": 4, "height": 4 },
                "sprite": { "base_frame": "c", "frames": [{ "name": "c" }] },
                "events": [
                    { "conditions": [[{ "kind": "COLLIDED_WITH_GROUP", "string_params": { "group": "player" } }]],
                      "outcomes": [{ "kind": "DESTROY" }] }
                ]
            },
            {
                "id": 3, "group": "wall",
                "hitbox": { "width": 50, "height": 10 },
                "sprite": { "base_frame": "w", "frames": [{ "name": "w" }] },
                "double_vars": { "hp": 3 }
            }
        ],
        "objects": [
            { "blueprint": 1, "uuid": "67e55044-10b1-426f-9247-bb680e5fe0c8", "x": 10, "y": 10, "layer": 1 },
            { "blueprint": 2, "x": 15, "y": 12 },
            { "blueprint": 3, "uuid": "1b4e28ba-2fa1-11d2-883f-0016d3cca427", "x": 200, "y": 200 }
        ],
        "camera": { "kind": "tracker", "string_params": { "target": "player" } }
    }"#;

    fn id(raw: &str) -> ObjectId {
        ObjectId::parse(raw).unwrap()
    }

    fn running() -> GameController {
        let mut controller = GameController::default();
        controller.load_level_json(LEVEL).unwrap();
        controller.play();
        controller
    }

    fn held(keys: &[&str]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.push(InputEvent::KeyDown { key: key.to_string() });
        }
        input.update();
        input
    }

    fn score(controller: &GameController) -> f64 {
        controller.object(id(PLAYER)).unwrap().variable("score").unwrap()
    }

    #[test]
    fn load_leaves_controller_stopped() {
        let mut controller = GameController::default();
        controller.load_level_json(LEVEL).unwrap();
        assert_eq!(controller.state(), GameState::Stopped);
        assert_eq!(controller.objects().len(), 3);
        assert_eq!(controller.snapshot().len(), 3);

        let report = controller.tick(&mut held(&["RIGHT"]));
        assert!(!report.ran);
        assert_eq!(controller.tick_count(), 0);
    }

    #[test]
    fn key_press_moves_player() {
        let mut controller = running();
        let report = controller.tick(&mut held(&["RIGHT"]));
        assert!(report.ran);
        assert_eq!(report.tick, 1);
        let player = controller.object(id(PLAYER)).unwrap();
        assert_eq!(player.position(), DVec2::new(12.0, 10.0));
    }

    #[test]
    fn destroyed_object_survives_its_tick_then_disappears() {
        let mut controller = running();
        let coin = controller.objects()[1].id();

        let report = controller.tick(&mut held(&[]));
        // Both sides of the overlap saw each other, whatever the processing order.
        assert_eq!(score(&controller), 1.0);
        assert_eq!(report.destroyed, vec![coin]);
        assert!(controller.object(coin).is_none());
        assert!(!controller.snapshot().contains(coin));

        controller.tick(&mut held(&[]));
        assert_eq!(score(&controller), 1.0);
    }

    #[test]
    fn objects_without_events_are_unchanged() {
        let mut controller = running();
        let before = controller.object(id(WALL)).unwrap().clone();
        for _ in 0..5 {
            controller.tick(&mut held(&["RIGHT", "A"]));
        }
        let after = controller.object(id(WALL)).unwrap();
        assert_eq!(after.position(), before.position());
        assert_eq!(after.velocity(), before.velocity());
        assert_eq!(after.variables(), before.variables());
        assert_eq!(after.sprite().current_frame(), before.sprite().current_frame());
    }

    #[test]
    fn failing_event_is_isolated() {
        let mut controller = running();
        let report = controller.tick(&mut held(&["X"]));
        assert_eq!(report.failures.len(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.object, id(PLAYER));
        assert_eq!(failure.event, 4);
        assert!(matches!(&failure.error, EngineError::UnsupportedOutcome(tag) if tag == "LEVITATE"));
        // The next event still ran.
        assert_eq!(score(&controller), 50.0);
        assert_eq!(controller.state(), GameState::Running);
    }

    #[test]
    fn failed_load_keeps_running_level() {
        let mut controller = running();
        controller.tick(&mut held(&["RIGHT"]));
        let bad = LEVEL.replace(r#""blueprint": 3,"#, r#""blueprint": 9,"#);
        let err = controller.load_level_json(&bad).unwrap_err();
        assert!(err.is_load_error());
        assert_eq!(controller.state(), GameState::Running);
        assert_eq!(controller.level().unwrap().name, "test");
        let player = controller.object(id(PLAYER)).unwrap();
        assert_eq!(player.position(), DVec2::new(12.0, 10.0));
    }

    #[test]
    fn pause_holds_the_world() {
        let mut controller = running();
        controller.pause();
        assert_eq!(controller.state(), GameState::Paused);
        controller.tick(&mut held(&["RIGHT"]));
        assert_eq!(controller.tick_count(), 0);
        assert_eq!(
            controller.object(id(PLAYER)).unwrap().position(),
            DVec2::new(10.0, 10.0)
        );
        controller.play();
        controller.tick(&mut held(&["RIGHT"]));
        assert_eq!(controller.tick_count(), 1);
    }

    #[test]
    fn win_stops_the_loop() {
        let mut controller = running();
        let report = controller.tick(&mut held(&["W"]));
        assert_eq!(report.flow, Some(FlowRequest::EndGame { won: true }));
        assert_eq!(controller.status(), GameStatus::Won);
        assert_eq!(controller.state(), GameState::Stopped);
        assert_eq!(controller.snapshot().status, GameStatus::Won);

        controller.play();
        assert_eq!(controller.state(), GameState::Stopped);
    }

    #[test]
    fn restart_outcome_reloads_and_keeps_running() {
        let mut controller = running();
        for _ in 0..3 {
            controller.tick(&mut held(&["RIGHT"]));
        }
        controller.tick(&mut held(&["R"]));
        assert_eq!(controller.state(), GameState::Running);
        assert_eq!(
            controller.object(id(PLAYER)).unwrap().position(),
            DVec2::new(10.0, 10.0)
        );
        assert_eq!(controller.objects().len(), 3);
    }

    #[test]
    fn restart_api_stops_and_resets() {
        let mut controller = running();
        controller.tick(&mut held(&["RIGHT"]));
        controller.restart().unwrap();
        assert_eq!(controller.state(), GameState::Stopped);
        assert_eq!(score(&controller), 0.0);
        assert_eq!(
            controller.object(id(PLAYER)).unwrap().position(),
            DVec2::new(10.0, 10.0)
        );
    }

    #[test]
    fn select_level_is_handed_to_host() {
        let mut controller = running();
        controller.tick(&mut held(&["L"]));
        assert_eq!(controller.take_level_request().as_deref(), Some("two.json"));
        assert_eq!(controller.take_level_request(), None);
        assert_eq!(controller.state(), GameState::Running);
    }

    #[test]
    fn spawned_objects_join_at_tick_end() {
        let mut controller = running();
        let report = controller.tick(&mut held(&["B"]));
        assert_eq!(report.spawned.len(), 1);
        let coin = controller.object(report.spawned[0]).unwrap();
        assert_eq!(coin.group(), "coin");
        assert_eq!(coin.position(), DVec2::new(110.0, 10.0));
        // Layer -1 sorts first in the snapshot.
        assert_eq!(controller.snapshot().objects[0].id, report.spawned[0]);
    }

    #[test]
    fn change_to_unknown_blueprint_keeps_object() {
        let mut controller = running();
        let report = controller.tick(&mut held(&["C"]));
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.is_load_error());
        assert!(report.destroyed.iter().all(|gone| *gone != id(PLAYER)));
        assert!(report.spawned.is_empty());
        assert!(controller.object(id(PLAYER)).is_some());
        assert_eq!(controller.objects().len(), 2);
    }

    #[test]
    fn changed_object_keeps_its_id_and_camera() {
        let mut controller = GameController::new(GameConfig {
            view_width: 100.0,
            view_height: 100.0,
            ..GameConfig::default()
        });
        controller.load_level_json(LEVEL).unwrap();
        controller.play();
        for _ in 0..40 {
            controller.tick(&mut held(&["RIGHT"]));
        }
        assert_eq!(score(&controller), 1.0);

        let report = controller.tick(&mut held(&["P"]));
        assert!(report.failures.is_empty());
        assert!(report.destroyed.contains(&id(PLAYER)));
        assert_eq!(report.spawned, vec![id(PLAYER)]);
        let player = controller.object(id(PLAYER)).unwrap();
        // A fresh object from the blueprint, in the old one's place.
        assert_eq!(score(&controller), 0.0);
        assert_eq!(player.position(), DVec2::new(90.0, 10.0));
        assert_eq!(player.layer(), 1);
        assert_eq!(controller.camera().tracked(), Some(id(PLAYER)));

        for _ in 0..10 {
            controller.tick(&mut held(&["RIGHT"]));
        }
        let player = controller.object(id(PLAYER)).unwrap();
        assert_eq!(player.position(), DVec2::new(110.0, 10.0));
        assert_eq!(controller.camera().center.x, player.hitbox().center().x);
    }

    #[test]
    fn animation_advances_and_reaches_snapshot() {
        let mut controller = running();
        controller.tick(&mut held(&["A"]));
        let view = controller.snapshot();
        assert_eq!(view.get(id(PLAYER)).unwrap().frame.name, "run1");
        controller.tick(&mut held(&[]));
        assert_eq!(controller.snapshot().get(id(PLAYER)).unwrap().frame.name, "run2");
        // The earlier snapshot is untouched.
        assert_eq!(view.get(id(PLAYER)).unwrap().frame.name, "run1");
    }

    #[test]
    fn destroyed_objects_leave_no_animation_state() {
        let mut controller = running();
        let coin = controller.objects()[1].id();
        let object = controller.scene.get(coin).unwrap();
        controller.animations.add_to_animations(object, "spin");
        assert!(controller.animations.state(coin).is_some());
        controller.tick(&mut held(&[]));
        assert!(controller.animations.state(coin).is_none());
    }

    #[test]
    fn tracker_camera_follows_player() {
        let mut controller = GameController::new(GameConfig {
            view_width: 100.0,
            view_height: 100.0,
            ..GameConfig::default()
        });
        controller.load_level_json(LEVEL).unwrap();
        controller.play();
        // Clamped to the left edge at first.
        assert_eq!(controller.camera().center.x, 50.0);
        for _ in 0..50 {
            controller.tick(&mut held(&["RIGHT"]));
        }
        let player = controller.object(id(PLAYER)).unwrap();
        assert_eq!(controller.camera().center.x, player.hitbox().center().x);
        assert_eq!(controller.snapshot().camera_center, controller.camera().center);
    }

    #[test]
    fn custom_kinds_registered_before_load() {
        let mut controller = GameController::default();
        controller.register_kind("coin_kind", |_| ObjectKind::Enemy);
        let level = LEVEL.replace(r#""id": 2, "group""#, r#""id": 2, "kind": "coin_kind", "group""#);
        controller.load_level_json(&level).unwrap();
        assert_eq!(controller.objects()[1].kind(), &ObjectKind::Enemy);
    }
}
