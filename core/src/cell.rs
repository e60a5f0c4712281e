use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One grid position. `neighbor_mines` is only meaningful once mines have
/// been placed and is always zero for mined cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub state: CellState,
    pub has_mine: bool,
    pub neighbor_mines: u8,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self.state, CellState::Hidden | CellState::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }
}

/// What a cell should look like on screen, combining its own state with the
/// outcome of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// A mine uncovered after the game was lost.
    Mine,
    /// The mine that ended the game.
    Blast,
    /// A flag placed on a cell without a mine, shown after a loss.
    WrongFlag,
}

impl CellView {
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            Mine => false,
            Blast => false,
            WrongFlag => true,
        }
    }
}
