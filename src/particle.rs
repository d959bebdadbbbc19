use cgmath::{InnerSpace, Vector2, vec2};
use rand::Rng;

use crate::config::SimulationConfig;
use crate::pointer::PointerState;
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// One dot of the constellation.
///
/// `mass` and `radius` are private so that the radius always stays
/// `mass * radius_scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    mass: f32,
    radius: f32,
}

/// What happened to a particle during one [`Particle::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub repelled: bool,
    pub bounced: bool,
    pub respawned: bool,
}

impl Particle {
    /// Fresh particle at a uniformly random spot inside the viewport, at rest.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport, config: &SimulationConfig) -> Self {
        let position = vec2(
            rng.gen_range(0.0..viewport.width()),
            rng.gen_range(0.0..viewport.height()),
        );
        Self::at(position, rng, config)
    }

    /// Fresh particle at `position`, at rest, with a random mass.
    pub fn at<R: Rng + ?Sized>(position: Vector2<f32>, rng: &mut R, config: &SimulationConfig) -> Self {
        let mass = rng.gen_range(config.mass_min..config.mass_max);
        Self {
            position,
            velocity: vec2(0.0, 0.0),
            mass,
            radius: mass * config.radius_scale,
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Advance one animation frame (unit timestep).
    ///
    /// Drift, then pointer repulsion (which overwrites the drifted velocity),
    /// damping, Euler integration, edge bounce and finally respawn when the
    /// particle got more than `respawn_margin` outside the viewport.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        pointer: &PointerState,
        viewport: &Viewport,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        let idle_force = config.idle_drift / self.mass;
        self.velocity.x += rng.gen_range(-0.5f32..0.5) * idle_force;
        self.velocity.y += rng.gen_range(-0.5f32..0.5) * idle_force;

        if let Some(repulsor) = pointer.repulsor() {
            let offset = self.position - repulsor;
            let distance = offset.magnitude();
            if distance < config.mouse_radius {
                // atan2 keeps a particle sitting exactly on the pointer moving (+x)
                let angle = offset.y.atan2(offset.x);
                let force = (config.mouse_radius - distance) / config.mouse_radius;
                let repel = force * config.max_repulsion / self.mass;
                self.velocity = vec2(angle.cos(), angle.sin()) * repel;
                outcome.repelled = true;
            }
        }

        self.velocity *= config.drift_damping;
        self.position += self.velocity;

        macro_rules! bounce {
            ($coord:expr, $vel:expr, $limit:expr) => {
                if $coord <= 0.0 || $coord >= $limit {
                    $vel *= config.bounce_restitution;
                    outcome.bounced = true;
                }
            };
        }

        bounce!(self.position.x, self.velocity.x, viewport.width());
        bounce!(self.position.y, self.velocity.y, viewport.height());

        if viewport.escaped(self.position, config.respawn_margin) {
            *self = Self::spawn(rng, viewport, config);
            outcome.respawned = true;
        }

        outcome
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, config: &SimulationConfig) {
        surface.fill_circle(self.position, self.radius, config.particle_color);
    }
}
