use cgmath::{MetricSpace, vec2};
use rand::Rng;
use rayon::prelude::*;

use crate::config::SimulationConfig;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::surface::{DrawSurface, Segment};
use crate::viewport::Viewport;

/// All live particles. Order carries no meaning.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

/// Aggregate of one update pass over the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldStep {
    pub repelled: usize,
    pub bounced: usize,
    pub respawned: usize,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every particle with `count` fresh ones spread over `viewport`.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        viewport: &Viewport,
        config: &SimulationConfig,
        rng: &mut R,
    ) {
        self.particles = (0..count)
            .map(|_| Particle::spawn(rng, viewport, config))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Mutable access for hosts and tests that place particles by hand.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Update every particle, drawing each one right after it moved.
    pub fn update_and_draw<R, S>(
        &mut self,
        pointer: &PointerState,
        viewport: &Viewport,
        config: &SimulationConfig,
        rng: &mut R,
        surface: &mut S,
    ) -> FieldStep
    where
        R: Rng + ?Sized,
        S: DrawSurface + ?Sized,
    {
        let mut step = FieldStep::default();
        for particle in &mut self.particles {
            let outcome = particle.update(pointer, viewport, config, rng);
            step.repelled += outcome.repelled as usize;
            step.bounced += outcome.bounced as usize;
            step.respawned += outcome.respawned as usize;
            particle.draw(surface, config);
        }
        step
    }

    /// Segments between every unordered pair closer than `threshold`.
    ///
    /// Pairs are listed as (a, b) with a < b, in index order.
    pub fn connections(&self, threshold: f32) -> Vec<Segment> {
        let particles = &self.particles;
        (0..particles.len())
            .into_par_iter()
            .flat_map_iter(|a| {
                let pa = particles[a].position;
                particles[a + 1..].iter().filter_map(move |pb| {
                    (pa.distance(pb.position) < threshold).then(|| [pa, pb.position])
                })
            })
            .collect()
    }

    /// Draw all connections as one batched stroke.
    pub fn connect<S: DrawSurface + ?Sized>(
        &self,
        threshold: f32,
        surface: &mut S,
        config: &SimulationConfig,
    ) -> usize {
        let segments = self.connections(threshold);
        surface.stroke_segments(&segments, config.line_width, config.line_color);
        segments.len()
    }

    /// Append a fresh particle jittered around (x, y) by up to half of
    /// `spawn_jitter` per axis.
    pub fn spawn_near<R: Rng + ?Sized>(
        &mut self,
        x: f32,
        y: f32,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> &Particle {
        let position = vec2(
            x + rng.gen_range(-0.5f32..0.5) * config.spawn_jitter,
            y + rng.gen_range(-0.5f32..0.5) * config.spawn_jitter,
        );
        let particle = Particle::at(position, rng, config);
        self.particles.push(particle);
        &self.particles[self.particles.len() - 1]
    }

    /// Remove one particle at a uniformly random index; `None` on an empty field.
    pub fn remove_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Particle> {
        if self.particles.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.particles.len());
        Some(self.particles.swap_remove(index))
    }
}
