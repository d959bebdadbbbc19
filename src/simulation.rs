//! Simulation context and the per-frame loop.
//!
//! [`Simulation`] owns everything the animation mutates: the field, the
//! pointer, the viewport and the random source. Input and ticks are applied
//! to it one after another from a single thread.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::field::ParticleField;
use crate::pointer::PointerState;
use crate::scheduler::FrameScheduler;
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// Raw input, already translated by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    Click,
    Resized { width: f32, height: f32 },
}

/// Counts from one [`Simulation::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub repelled: usize,
    pub bounced: usize,
    pub respawned: usize,
    pub connections: usize,
    pub pointer_expired: bool,
}

pub struct Simulation {
    config: SimulationConfig,
    viewport: Viewport,
    pointer: PointerState,
    field: ParticleField,
    rng: StdRng,
    frame: u64,
}

impl Simulation {
    /// Build a context seeded from system entropy and populate the field.
    ///
    /// Errors: `Error::InvalidConfig` if `config` fails validation.
    pub fn new(config: SimulationConfig, viewport: Viewport) -> Result<Self> {
        Self::with_rng(config, viewport, StdRng::from_entropy())
    }

    /// Same as [`Simulation::new`] but reproducible for a given `seed`.
    pub fn with_seed(config: SimulationConfig, viewport: Viewport, seed: u64) -> Result<Self> {
        Self::with_rng(config, viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, viewport: Viewport, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let mut sim = Self {
            config,
            viewport,
            pointer: PointerState::default(),
            field: ParticleField::new(),
            rng,
            frame: 0,
        };
        sim.reinitialize();
        Ok(sim)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn reinitialize(&mut self) {
        self.field.initialize(
            self.config.particle_count,
            &self.viewport,
            &self.config,
            &mut self.rng,
        );
        log::info!(
            "initialized {} particles in {}x{} viewport",
            self.field.len(),
            self.viewport.width(),
            self.viewport.height()
        );
    }

    /// Run one frame: clear, update and draw particles, draw connections,
    /// request the next frame, then expire a stale pointer.
    pub fn tick<S, F>(&mut self, now_ms: f64, surface: &mut S, scheduler: &mut F) -> FrameStats
    where
        S: DrawSurface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        surface.clear(self.config.background);

        let step = self.field.update_and_draw(
            &self.pointer,
            &self.viewport,
            &self.config,
            &mut self.rng,
            surface,
        );
        let connections = self
            .field
            .connect(self.config.connect_distance, surface, &self.config);

        scheduler.schedule_next();

        let pointer_expired = self
            .pointer
            .expire(now_ms, self.config.pointer_idle_timeout_ms);

        self.frame += 1;
        let stats = FrameStats {
            frame: self.frame,
            repelled: step.repelled,
            bounced: step.bounced,
            respawned: step.respawned,
            connections,
            pointer_expired,
        };
        log::trace!("{stats:?}");
        stats
    }

    /// Apply one input event at `now_ms` on the loop's clock.
    ///
    /// Errors: `Error::InvalidViewport` for a degenerate resize; the previous
    /// viewport and particles are kept in that case.
    pub fn handle(&mut self, event: InputEvent, now_ms: f64) -> Result<()> {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer.record_move(x, y, now_ms);
            }
            InputEvent::Click => self.click(),
            InputEvent::Resized { width, height } => self.resize(width, height)?,
        }
        Ok(())
    }

    /// Relocate one particle near the pointer: drop a random particle, then
    /// spawn one at the pointer (or the viewport center when
    /// the pointer position is unknown).
    pub fn click(&mut self) {
        let removed = self.field.remove_random(&mut self.rng);
        let target = self.pointer.position.unwrap_or_else(|| self.viewport.center());
        let spawned = self
            .field
            .spawn_near(target.x, target.y, &self.config, &mut self.rng);
        log::debug!(
            "click: removed {:?}, spawned at ({:.1}, {:.1})",
            removed.map(|p| p.position),
            spawned.position.x,
            spawned.position.y
        );
    }

    /// Adopt a new viewport size and rebuild the whole field.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.viewport = Viewport::new(width, height)?;
        self.reinitialize();
        Ok(())
    }
}
