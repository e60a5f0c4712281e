use thiserror::Error;

/// Why a minefield could not be created.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid field dimensions or mine count")]
    InvalidParameter,
    #[error("Not enough memory to create minefield")]
    OutOfMemory,
    /// Not returned by field creation, which reports oversized dimensions as
    /// `InvalidParameter`.
    #[error("Minefield too large, at most {max_width}x{max_height} cells are supported", max_width = crate::MAX_WIDTH, max_height = crate::MAX_HEIGHT)]
    ResourceLimitExceeded,
}

pub type Result<T> = core::result::Result<T, GameError>;
