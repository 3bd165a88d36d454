use std::sync::Arc;

use anyhow::{Context, Result};
use blueprint_engine::{
    FixedTimestep, GameConfig, GameController, InputEvent, InputState, TickReport, WorldSnapshot,
};

use crate::loader::LevelLoader;

/// Totals for one call to [`GameRunner::frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub ticks: u32,
    pub fired: usize,
    pub failures: usize,
}

/// Drives a [`GameController`] from host time and host input.
///
/// Level switches requested by the game are serviced between ticks, never
/// inside one.
pub struct GameRunner<L: LevelLoader> {
    controller: GameController,
    loader: L,
    input: InputState,
    timestep: FixedTimestep,
}

impl<L: LevelLoader> GameRunner<L> {
    pub fn new(config: GameConfig, loader: L) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame);
        Self {
            controller: GameController::new(config),
            loader,
            input: InputState::new(),
            timestep,
        }
    }

    /// Load `path` through the loader and start playing it.
    /// A failed load leaves the current level in place.
    pub fn load(&mut self, path: &str) -> Result<()> {
        let level = self.loader.load(path)?;
        self.controller
            .load_level(level)
            .with_context(|| format!("level {path} rejected"))?;
        self.timestep.reset();
        self.controller.play();
        Ok(())
    }

    /// Push an input event; it is applied before the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advance by `dt` seconds of host time, running as many whole ticks as fit.
    pub fn frame(&mut self, dt: f64) -> FrameStats {
        let steps = self.timestep.accumulate(dt);
        let mut stats = FrameStats::default();
        for _ in 0..steps {
            let report = self.step();
            if report.ran {
                stats.ticks += 1;
            }
            stats.fired += report.fired;
            stats.failures += report.failures.len();
        }
        stats
    }

    /// Run exactly one tick, then service any level request it raised.
    pub fn step(&mut self) -> TickReport {
        self.input.update();
        let report = self.controller.tick(&mut self.input);
        if let Some(path) = self.controller.take_level_request() {
            match self.load(&path) {
                Ok(()) => log::info!("switched to level {path}"),
                Err(error) => log::warn!("could not switch to level {path}: {error:#}"),
            }
        }
        report
    }

    pub fn snapshot(&self) -> Arc<WorldSnapshot> {
        self.controller.snapshot()
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GameController {
        &mut self.controller
    }

    /// Interpolation factor between the last two ticks.
    pub fn alpha(&self) -> f64 {
        self.timestep.alpha()
    }
}
