use thiserror::Error;

/// Errors surfaced by the particle subsystem.
#[derive(Debug, Error)]
pub enum ParticleError {
    /// Indexed access past the end of an object set.
    #[error("index {index} out of bounds for set of size {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// No live object carries this id.
    #[error("no object with id {0}")]
    UnknownEntity(u32),

    /// The configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration parsed but holds values the simulation cannot run with.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ParticleError>;
