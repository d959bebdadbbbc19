//! Tunables for the animation.
//!
//! The constants mirror the defaults of [`SimulationConfig`]; they are fixed
//! at initialization and never adjusted while the loop runs.

use crate::error::{Error, Result};
use crate::surface::Rgba;

pub const NUM_PARTICLES: usize = 80;
pub const MASS_MIN: f32 = 0.5;
pub const MASS_MAX: f32 = 3.0;
/// radius = mass * RADIUS_SCALE
pub const RADIUS_SCALE: f32 = 1.5;
/// Numerator of the idle drift force; divided by mass.
pub const IDLE_DRIFT: f32 = 0.02;
pub const MOUSE_RADIUS: f32 = 80.0;
pub const MAX_REPULSION: f32 = 2.5;
pub const DRIFT_DAMPING: f32 = 0.995;
/// Velocity factor applied to a component on an edge hit.
pub const BOUNCE_RESTITUTION: f32 = -0.7;
pub const RESPAWN_MARGIN: f32 = 200.0;
pub const CONNECT_DISTANCE: f32 = 100.0;
/// Full width of the click-spawn jitter box (±half per axis).
pub const SPAWN_JITTER: f32 = 30.0;
pub const POINTER_IDLE_TIMEOUT_MS: f64 = 100.0;

#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub particle_count: usize,
    pub mass_min: f32,
    pub mass_max: f32,
    pub radius_scale: f32,
    pub idle_drift: f32,
    pub mouse_radius: f32,
    pub max_repulsion: f32,
    pub drift_damping: f32,
    pub bounce_restitution: f32,
    pub respawn_margin: f32,
    pub connect_distance: f32,
    pub spawn_jitter: f32,
    pub pointer_idle_timeout_ms: f64,
    pub particle_color: Rgba,
    pub line_color: Rgba,
    pub line_width: f32,
    pub background: Rgba,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: NUM_PARTICLES,
            mass_min: MASS_MIN,
            mass_max: MASS_MAX,
            radius_scale: RADIUS_SCALE,
            idle_drift: IDLE_DRIFT,
            mouse_radius: MOUSE_RADIUS,
            max_repulsion: MAX_REPULSION,
            drift_damping: DRIFT_DAMPING,
            bounce_restitution: BOUNCE_RESTITUTION,
            respawn_margin: RESPAWN_MARGIN,
            connect_distance: CONNECT_DISTANCE,
            spawn_jitter: SPAWN_JITTER,
            pointer_idle_timeout_ms: POINTER_IDLE_TIMEOUT_MS,
            particle_color: Rgba::white(0.7),
            line_color: Rgba::white(0.08),
            line_width: 1.5,
            background: Rgba::new(8, 10, 18, 255),
        }
    }
}

impl SimulationConfig {
    /// Check every tunable is usable.
    ///
    /// Errors: `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("mass_min", self.mass_min),
            ("mass_max", self.mass_max),
            ("radius_scale", self.radius_scale),
            ("mouse_radius", self.mouse_radius),
            ("connect_distance", self.connect_distance),
            ("line_width", self.line_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }

        let non_negative = [
            ("idle_drift", self.idle_drift),
            ("max_repulsion", self.max_repulsion),
            ("respawn_margin", self.respawn_margin),
            ("spawn_jitter", self.spawn_jitter),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }

        if self.mass_min >= self.mass_max {
            return Err(Error::InvalidConfig(format!(
                "mass_min ({}) must be below mass_max ({})",
                self.mass_min, self.mass_max
            )));
        }
        if !(self.drift_damping > 0.0 && self.drift_damping <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "drift_damping must be in (0, 1], got {}",
                self.drift_damping
            )));
        }
        if !self.bounce_restitution.is_finite() {
            return Err(Error::InvalidConfig("bounce_restitution must be finite".into()));
        }
        if !self.pointer_idle_timeout_ms.is_finite() || self.pointer_idle_timeout_ms < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "pointer_idle_timeout_ms must be finite and >= 0, got {}",
                self.pointer_idle_timeout_ms
            )));
        }
        Ok(())
    }
}
