//! Constellation background animation.
//!
//! Particles drift, flee a moving pointer, bounce off the viewport edges and
//! get linked by faint lines when close to each other. The crate holds the
//! whole simulation; drawing and frame scheduling go through the
//! [`DrawSurface`] and [`FrameScheduler`] traits so any host can drive it.

pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod pointer;
pub mod scheduler;
pub mod simulation;
pub mod surface;
pub mod viewport;

pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use field::{FieldStep, ParticleField};
pub use particle::{Particle, StepOutcome};
pub use pointer::PointerState;
pub use scheduler::{FrameScheduler, SteppedScheduler};
pub use simulation::{FrameStats, InputEvent, Simulation};
pub use surface::{DrawCommand, DrawSurface, FrameRecorder, Rgba, Segment};
pub use viewport::Viewport;
