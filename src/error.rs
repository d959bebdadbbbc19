use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition failures around the simulation.
///
/// The simulation itself is total; these only surface while setting it up
/// or when the host hands over something unusable.
#[derive(Debug, Error)]
pub enum Error {
    /// Viewport with a zero, negative or non-finite dimension.
    #[error("invalid viewport {width}x{height}: both dimensions must be finite and > 0")]
    InvalidViewport { width: f32, height: f32 },

    /// A tunable outside its allowed range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The window host failed to start or crashed.
    #[error("host error: {0}")]
    Host(String),
}
