//! Minefield engine for a single-player mine clearing game.
//!
//! [`Minefield`] owns the grid and the game state machine. Callers create a
//! field from a [`Difficulty`], feed it [`Minefield::reveal`] and
//! [`Minefield::toggle_flag`] commands and read the cells back for drawing.

pub use cell::*;
pub use clock::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod clock;
mod config;
mod engine;
mod error;
mod generator;
mod types;

/// Result of [`Minefield::toggle_flag`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether the field changed and has to be redrawn.
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of [`Minefield::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether the field changed and has to be redrawn.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    /// Whether this reveal ended the game.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}
