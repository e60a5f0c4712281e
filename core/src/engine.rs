use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Overall status of a minefield. `Won` and `Lost` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

/// A single game, from creation until the first mine or the last safe cell.
///
/// Mines are placed lazily on the first reveal, which is never a mine. The
/// cells live in one row-major buffer addressed by `y * width + x`.
#[derive(Clone, Debug)]
pub struct Minefield<C: Clock = MonotonicClock> {
    cells: Array2<Cell>,
    config: GameConfig,
    difficulty: Difficulty,
    state: GameState,
    flagged_cells: CellCount,
    revealed_cells: CellCount,
    first_click: bool,
    start_time: Option<Tick>,
    end_time: Option<Tick>,
    blast: Option<Coord2>,
    seed: Option<u64>,
    clock: C,
}

impl Minefield {
    /// Creates a field sized by `difficulty`.
    pub fn new(difficulty: Difficulty) -> Result<Self> {
        Self::with_clock(difficulty, MonotonicClock::new())
    }

    /// Creates a field with explicit dimensions.
    pub fn custom(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::new(Difficulty::Custom {
            width,
            height,
            mines,
        })
    }
}

impl<C: Clock> Minefield<C> {
    pub fn with_clock(difficulty: Difficulty, clock: C) -> Result<Self> {
        let config = difficulty.config().validate()?;
        let cells = allocate_cells(config)?;
        log::debug!(
            "New {} field: {}x{} with {} mines",
            difficulty.name(),
            config.width,
            config.height,
            config.mines
        );

        Ok(Self {
            cells,
            config,
            difficulty,
            state: GameState::Playing,
            flagged_cells: 0,
            revealed_cells: 0,
            first_click: true,
            start_time: None,
            end_time: None,
            blast: None,
            seed: None,
            clock,
        })
    }

    /// Fixes the seed used to place mines on the first reveal. Has no effect
    /// once mines are down.
    pub fn with_seed(mut self, seed: u64) -> Self {
        if self.first_click {
            self.seed = Some(seed);
        }
        self
    }

    /// Starts over with the same difficulty and clock.
    pub fn new_game(&self) -> Result<Self>
    where
        C: Clone,
    {
        Self::with_clock(self.difficulty, self.clock.clone())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn flagged_cells(&self) -> CellCount {
        self.flagged_cells
    }

    /// Safe cells uncovered so far.
    pub fn revealed_cells(&self) -> CellCount {
        self.revealed_cells
    }

    /// True until the first successful reveal places the mines.
    pub fn is_first_click(&self) -> bool {
        self.first_click
    }

    pub fn start_time(&self) -> Option<Tick> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Tick> {
        self.end_time
    }

    /// The mine that ended the game, only set after a loss.
    pub fn blast(&self) -> Option<Coord2> {
        self.blast
    }

    /// Seed the mines were placed with, `None` before the first reveal unless
    /// one was fixed up front.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.config.mines) - i64::from(self.flagged_cells)
    }

    /// Time since the first reveal, frozen once the game ended.
    pub fn elapsed_millis(&self) -> Tick {
        match self.start_time {
            Some(start) => self
                .end_time
                .unwrap_or_else(|| self.clock.now())
                .saturating_sub(start),
            None => 0,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_millis() / 1_000
    }

    /// Whether a running timer display has to be refreshed periodically.
    pub fn needs_tick(&self) -> bool {
        self.state.is_playing() && !self.first_click
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        x < self.config.width && y < self.config.height
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        if self.contains(coords) {
            Some(self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    /// Iterates the grid one row (constant `y`) at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells
            .as_slice()
            .into_iter()
            .flat_map(move |cells| cells.chunks(self.config.width.into()))
    }

    /// How the renderer should draw the cell at `coords`.
    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        let cell = self.cell(coords)?;
        let lost = matches!(self.state, GameState::Lost);

        Some(match cell.state {
            _ if lost && self.blast == Some(coords) => CellView::Blast,
            CellState::Hidden | CellState::Revealed if lost && cell.has_mine => CellView::Mine,
            CellState::Flagged if lost && !cell.has_mine => CellView::WrongFlag,
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed => CellView::Revealed(cell.neighbor_mines),
        })
    }

    /// Uncovers the cell at `coords`, flooding outwards from cells without
    /// adjacent mines.
    ///
    /// Does nothing outside the field, after the game ended, or on a cell that
    /// is not hidden. The first successful call places the mines around it.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.contains(coords) || !self.state.is_playing() {
            return RevealOutcome::NoChange;
        }
        if self.cells[coords.to_nd_index()].state != CellState::Hidden {
            return RevealOutcome::NoChange;
        }

        if self.first_click {
            self.start(coords);
        }

        // the blast cell is shown but not counted, the counter tracks safe cells
        if self.cells[coords.to_nd_index()].has_mine {
            self.cells[coords.to_nd_index()].state = CellState::Revealed;
            self.blast = Some(coords);
            self.end_game(GameState::Lost);
            return RevealOutcome::HitMine;
        }

        self.flood_reveal(coords);

        if self.revealed_cells == self.config.safe_cells() {
            self.end_game(GameState::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flags a hidden cell or unflags a flagged one. Flags are not limited by
    /// the mine count.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.contains(coords) || !self.state.is_playing() {
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        match cell.state {
            CellState::Hidden => {
                cell.state = CellState::Flagged;
                self.flagged_cells += 1;
                MarkOutcome::Changed
            }
            CellState::Flagged => {
                cell.state = CellState::Hidden;
                self.flagged_cells = self.flagged_cells.saturating_sub(1);
                MarkOutcome::Changed
            }
            CellState::Revealed => MarkOutcome::NoChange,
        }
    }

    fn start(&mut self, safe: Coord2) {
        let now = self.clock.now();
        let seed = *self.seed.get_or_insert_with(|| derive_seed(now));
        self.first_click = false;
        self.start_time = Some(now);

        place_mines(&mut self.cells, self.config, safe, seed);
        count_neighbors(&mut self.cells);
        log::debug!("Started at {} with seed {:#018x}, safe cell {:?}", now, seed, safe);
    }

    /// Reveals `origin` and every cell connected to it through zero-count
    /// cells, using a work-list instead of recursion. Mines and flags are
    /// never touched. A cell leaves `Hidden` before its neighbors are queued,
    /// so each cell is revealed at most once.
    fn flood_reveal(&mut self, origin: Coord2) {
        let mut to_visit = Vec::from([origin]);

        while let Some(coords) = to_visit.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if cell.state != CellState::Hidden || cell.has_mine {
                continue;
            }

            cell.state = CellState::Revealed;
            let neighbor_mines = cell.neighbor_mines;
            self.revealed_cells += 1;
            log::trace!("Revealed {:?}, adjacent mines: {}", coords, neighbor_mines);

            if neighbor_mines == 0 {
                to_visit.extend(self.cells.neighbors_of(coords).filter(|&pos| {
                    let neighbor = self.cells[pos.to_nd_index()];
                    neighbor.state == CellState::Hidden && !neighbor.has_mine
                }));
            }
        }
    }

    fn end_game(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }

        let now = self.clock.now();
        self.state = state;
        self.end_time = Some(now);
        log::debug!(
            "Game {:?} at {} after {} ms, {} cells revealed",
            state,
            now,
            self.elapsed_millis(),
            self.revealed_cells
        );
    }
}

/// Reserves the cell buffer up front so an oversized request surfaces as an
/// error instead of an abort.
fn allocate_cells(config: GameConfig) -> Result<Array2<Cell>> {
    let len = config.total_cells() as usize;
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| GameError::OutOfMemory)?;
    cells.resize(len, Cell::default());

    Array2::from_shape_vec((config.height.into(), config.width.into()), cells)
        .map_err(|_| GameError::InvalidParameter)
}

#[cfg(test)]
impl<C: Clock> Minefield<C> {
    /// Lays out mines by hand, as if the first reveal had already happened at
    /// a cell that is not listed.
    pub(crate) fn place_fixed_mines(&mut self, mines: &[Coord2]) {
        for &coords in mines {
            self.cells[coords.to_nd_index()].has_mine = true;
        }
        count_neighbors(&mut self.cells);
        self.first_click = false;
        self.start_time = Some(self.clock.now());
    }
}
