use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Preset used to size a field. `Custom` carries its own dimensions so a new
/// game can be started with the same settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Custom {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner => GameConfig::new_unchecked(9, 9, 10),
            Intermediate => GameConfig::new_unchecked(16, 16, 40),
            Expert => GameConfig::new_unchecked(30, 16, 99),
            Custom {
                width,
                height,
                mines,
            } => GameConfig::new_unchecked(width, height, mines),
        }
    }

    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
            Custom { .. } => "custom",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Custom {
                width,
                height,
                mines,
            } => write!(f, "custom {width}x{height} with {mines} mines"),
            preset => f.write_str(preset.name()),
        }
    }
}

/// Only the fixed presets parse, custom fields need explicit dimensions.
impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::InvalidParameter)
    }
}

/// Resolved dimensions and mine count of a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(width, height, mines).validate()
    }

    /// Rejects empty or oversized fields and mine counts that leave no safe
    /// cell. Every failure is `InvalidParameter`.
    pub fn validate(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidParameter);
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(GameError::InvalidParameter);
        }
        // at least one mine and one safe cell
        if self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidParameter);
        }
        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}
