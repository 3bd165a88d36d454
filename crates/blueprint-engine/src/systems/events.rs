//! Event dispatch: check an event's conditions, then run its outcomes in order.

use crate::components::event::Event;
use crate::components::object::GameObject;
use crate::error::Result;
use crate::systems::conditions::ConditionChecker;
use crate::systems::outcomes::{OutcomeContext, OutcomeExecutor};

pub struct EventHandler<'a> {
    checker: ConditionChecker<'a>,
    executor: OutcomeExecutor<'a>,
}

impl<'a> EventHandler<'a> {
    pub fn new(checker: ConditionChecker<'a>, executor: OutcomeExecutor<'a>) -> Self {
        Self { checker, executor }
    }

    /// AND across groups, OR within a group. Stops at the first group that fails.
    /// An event with no groups never fires.
    pub fn is_triggered(&self, event: &Event, object: &GameObject) -> Result<bool> {
        let groups = event.condition_groups();
        if groups.is_empty() {
            return Ok(false);
        }
        for group in groups {
            let mut any = false;
            for condition in group {
                if self.checker.check_condition(condition, object)? {
                    any = true;
                    break;
                }
            }
            if !any {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Apply the event's outcomes if it triggers. Returns whether it fired.
    ///
    /// The first failing outcome aborts the rest of this event; outcomes already
    /// applied stay applied.
    pub fn handle_event(
        &self,
        event: &Event,
        object: &mut GameObject,
        ctx: &mut OutcomeContext<'_>,
    ) -> Result<bool> {
        if !self.is_triggered(event, object)? {
            return Ok(false);
        }
        for outcome in event.outcomes() {
            self.executor.apply_outcome(outcome, object, ctx)?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::{GameConfig, GameExecutor, SpawnRequest};
    use crate::api::types::ObjectId;
    use crate::components::event::{ConditionType, EventCondition, EventOutcome, OutcomeType};
    use crate::components::hitbox::HitBox;
    use crate::components::sprite::{FrameData, Sprite};
    use crate::core::bounds::MapBounds;
    use crate::core::rng::Rng;
    use crate::error::EngineError;
    use crate::input::{InputEvent, InputState};
    use crate::systems::animation::AnimationHandler;
    use crate::systems::collision::CollisionHandler;
    use crate::systems::rules::RuleRegistry;

    struct NoGame;

    impl GameExecutor for NoGame {
        fn destroy_game_object(&mut self, _id: ObjectId) {}

        fn add_game_object(&mut self, _request: SpawnRequest) -> Result<ObjectId> {
            Ok(ObjectId::new_v4())
        }

        fn map_bounds(&self) -> MapBounds {
            MapBounds::default()
        }

        fn game_object(&self, id: ObjectId) -> Result<&GameObject> {
            Err(EngineError::ObjectNotFound(id))
        }

        fn end_game(&mut self, _won: bool) {}

        fn restart_level(&mut self) {}

        fn select_level(&mut self, _level: &str) {}
    }

    fn key(key: &str) -> EventCondition {
        EventCondition::new(ConditionType::KeyPressed).with_string("key", key)
    }

    fn bump(delta: f64) -> EventOutcome {
        EventOutcome::new(OutcomeType::IncrementVariable)
            .with_string("variable", "score")
            .with_double("delta", delta)
    }

    fn run(event: &Event, pressed: &[&str], object: &mut GameObject) -> Result<bool> {
        let mut input = InputState::new();
        for k in pressed {
            input.push(InputEvent::KeyDown { key: k.to_string() });
        }
        input.update();
        let collisions = CollisionHandler::new();
        let rules = RuleRegistry::new();
        let config = GameConfig::default();
        let handler = EventHandler::new(
            ConditionChecker::new(&input, &collisions, &rules),
            OutcomeExecutor::new(&collisions, &input, &rules, &config),
        );
        let mut game = NoGame;
        let mut animations = AnimationHandler::default();
        let mut rng = Rng::new(1);
        let mut ctx = OutcomeContext {
            game: &mut game,
            animations: &mut animations,
            rng: &mut rng,
        };
        handler.handle_event(event, object, &mut ctx)
    }

    fn scorer() -> GameObject {
        GameObject::new(
            ObjectId::new_v4(),
            "player",
            HitBox::new(0.0, 0.0, 1.0, 1.0).unwrap(),
            Sprite::single(FrameData::new("f", 0, 0, 1, 1)),
        )
        .with_variable("score", 0.0)
    }

    #[test]
    fn groups_are_and_of_or() {
        let event = Event::with_groups(
            vec![vec![key("A"), key("B")], vec![key("C")]],
            vec![bump(1.0)],
        );
        let mut obj = scorer();
        assert!(!run(&event, &["A"], &mut obj).unwrap());
        assert!(run(&event, &["B", "C"], &mut obj).unwrap());
        assert_eq!(obj.variable("score"), Some(1.0));
    }

    #[test]
    fn outcomes_apply_in_order() {
        let set = EventOutcome::new(OutcomeType::SetVariable)
            .with_string("variable", "score")
            .with_double("value", 10.0);
        let event = Event::new(
            EventCondition::new(ConditionType::True),
            vec![bump(5.0), set, bump(1.0)],
        );
        let mut obj = scorer();
        run(&event, &[], &mut obj).unwrap();
        assert_eq!(obj.variable("score"), Some(11.0));
    }

    #[test]
    fn failing_outcome_stops_the_event() {
        let event = Event::new(
            EventCondition::new(ConditionType::True),
            vec![bump(2.0), EventOutcome::new("NOPE".parse().unwrap()), bump(100.0)],
        );
        let mut obj = scorer();
        let err = run(&event, &[], &mut obj).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedOutcome(_)));
        assert_eq!(obj.variable("score"), Some(2.0));
    }

    #[test]
    fn event_without_conditions_never_fires() {
        let event = Event::with_groups(Vec::new(), vec![bump(1.0)]);
        let mut obj = scorer();
        assert!(!run(&event, &[], &mut obj).unwrap());
    }
}
