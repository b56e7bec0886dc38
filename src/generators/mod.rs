pub mod cellular_automata;
pub mod dfs;
pub mod drunkards_walk;
pub mod kruskal;
pub mod searchformer;
pub mod wilson;

use crate::config::GeneratorType;
use crate::error::RunError;
use crate::parameters::GeneratorParams;
use crate::prng::Lcg32;
use crate::types::{Grid, MazeSpec};

/// Picks distinct start/goal cells by indexing into a pre-scanned floor
/// list, looping the goal draw until it differs from start. Used by
/// generators whose wording says "draw index ... repeatedly until"
/// (drunkards_walk, cellular_automata).
pub fn pick_start_goal_by_index(
    rng: &mut Lcg32,
    floors: &[(usize, usize)],
) -> ((usize, usize), (usize, usize)) {
    let start_idx = rng.rand_int(floors.len());
    let mut goal_idx = rng.rand_int(floors.len());
    while goal_idx == start_idx {
        goal_idx = rng.rand_int(floors.len());
    }
    (floors[start_idx], floors[goal_idx])
}

/// Draws `(x, y)` coordinates directly, rejecting until a passage cell is
/// found. Used by generators whose wording says "rejection sampling
/// passage cells" (dfs, kruskal, wilson).
pub fn pick_coords_by_rejection(rng: &mut Lcg32, grid: &Grid) -> (usize, usize) {
    loop {
        let x = rng.rand_int(grid.cols);
        let y = rng.rand_int(grid.rows);
        if grid.is_passage(x, y) {
            return (x, y);
        }
    }
}

pub fn generate_maze(
    generator: GeneratorType,
    rng: &mut Lcg32,
    rows: usize,
    cols: usize,
    params: &GeneratorParams,
) -> Result<MazeSpec, RunError> {
    match generator {
        GeneratorType::Dfs => Ok(dfs::generate(rng, rows, cols)),
        GeneratorType::Kruskal => Ok(kruskal::generate(rng, rows, cols)),
        GeneratorType::Wilson => Ok(wilson::generate(rng, rows, cols)),
        GeneratorType::Searchformer => Ok(searchformer::generate(rng, rows, cols)),
        GeneratorType::DrunkardsWalk => drunkards_walk::generate(rng, rows, cols, params),
        GeneratorType::CellularAutomata => cellular_automata::generate(rng, rows, cols, params),
    }
}
