use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::*;

/// How many random picks per cell are allowed before placement gives up.
const ATTEMPTS_PER_CELL: CellCount = 10;

/// Turns a clock reading into a well mixed 64-bit seed (splitmix64 finalizer),
/// so readings a few milliseconds apart still give unrelated layouts.
pub const fn derive_seed(tick: Tick) -> u64 {
    let mut z = tick.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Scatters `config.mines` mines over `grid`, never on `exclude`.
///
/// Picks uniformly random positions and skips the ones already taken, bounded
/// by an attempt budget of ten picks per cell. Should the budget run out on a
/// very dense field, the remaining mines go to free cells in scan order.
/// Returns how many mines were placed.
pub fn place_mines(
    grid: &mut Array2<Cell>,
    config: GameConfig,
    exclude: Coord2,
    seed: u64,
) -> CellCount {
    let mut rng = SmallRng::seed_from_u64(seed);
    let max_attempts = config.total_cells().saturating_mul(ATTEMPTS_PER_CELL);
    let mut placed: CellCount = 0;
    let mut attempts: CellCount = 0;

    while placed < config.mines && attempts < max_attempts {
        let coords: Coord2 = (
            rng.random_range(0..config.width),
            rng.random_range(0..config.height),
        );
        attempts += 1;

        if coords == exclude {
            continue;
        }

        let cell = &mut grid[coords.to_nd_index()];
        if !cell.has_mine {
            cell.has_mine = true;
            placed += 1;
        }
    }

    if placed < config.mines {
        log::warn!(
            "Placed {} of {} mines before running out of {} attempts, filling the rest in order",
            placed,
            config.mines,
            max_attempts
        );
        placed += fill_remaining(grid, config, exclude, &mut rng, config.mines - placed);
    } else {
        log::trace!("Placed {} mines in {} attempts", placed, attempts);
    }
    placed
}

/// Walks the grid from a random offset, mining free cells until `missing`
/// more mines are down or the walk wraps around.
fn fill_remaining(
    grid: &mut Array2<Cell>,
    config: GameConfig,
    exclude: Coord2,
    rng: &mut SmallRng,
    missing: CellCount,
) -> CellCount {
    let total = config.total_cells() as usize;
    let skip = index_of(config.size(), exclude);
    let start = rng.random_range(0..total);
    let Some(cells) = grid.as_slice_mut() else {
        return 0;
    };

    let mut placed = 0;
    for offset in 0..total {
        if placed == missing {
            break;
        }
        let index = (start + offset) % total;
        if index == skip || cells[index].has_mine {
            continue;
        }
        cells[index].has_mine = true;
        placed += 1;
    }
    placed
}

/// Stores the number of adjacent mines in every non-mine cell.
pub fn count_neighbors(grid: &mut Array2<Cell>) {
    let (rows, columns) = grid.dim();
    for y in 0..rows {
        for x in 0..columns {
            let count = if grid[[y, x]].has_mine {
                0
            } else {
                grid.neighbors_of((x as Coord, y as Coord))
                    .filter(|&pos| grid[pos.to_nd_index()].has_mine)
                    .count()
            };
            grid[[y, x]].neighbor_mines = count as u8;
        }
    }
}
