//! Random-walk cave carving toward a target coverage fraction.

use crate::error::RunError;
use crate::generators::pick_start_goal_by_index;
use crate::parameters::GeneratorParams;
use crate::prng::Lcg32;
use crate::types::{Grid, MazeSpec};

const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub fn generate(
    rng: &mut Lcg32,
    rows: usize,
    cols: usize,
    params: &GeneratorParams,
) -> Result<MazeSpec, RunError> {
    let coverage = params.get("coverage", 0.5);
    let total = rows * cols;
    let target = ((total as f64 * coverage) as usize).clamp(2, total);

    let mut grid = Grid::walls(rows, cols);
    let mut x = rng.rand_int(cols);
    let mut y = rng.rand_int(rows);
    grid.set_passage(x, y, true);
    let mut carved = 1usize;

    let mut valid_dirs = Vec::with_capacity(4);

    while carved < target {
        valid_dirs.clear();
        for &(dx, dy) in &DIRECTIONS {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx >= 0 && nx < cols as i32 && ny >= 0 && ny < rows as i32 {
                valid_dirs.push((dx, dy));
            }
        }

        let (dx, dy) = valid_dirs[rng.rand_int(valid_dirs.len())];
        x = (x as i32 + dx) as usize;
        y = (y as i32 + dy) as usize;

        if !grid.is_passage(x, y) {
            grid.set_passage(x, y, true);
            carved += 1;
        }
    }

    let floors = grid.passages();
    if floors.len() < 2 {
        return Err(RunError::Generator {
            start: 0,
            end: 0,
            message: format!(
                "drunkards_walk carved only {} passage cell(s), need at least 2",
                floors.len()
            ),
        });
    }

    let (start, goal) = pick_start_goal_by_index(rng, &floors);
    Ok(MazeSpec { grid, start, goal })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carves_at_least_the_requested_coverage() {
        let params = GeneratorParams::from_pairs(vec![("coverage".into(), "0.75".into())]).unwrap();
        let mut rng = Lcg32::new(7);
        let spec = generate(&mut rng, 6, 6, &params).unwrap();
        assert!(spec.grid.passages().len() >= 27);
    }

    #[test]
    fn is_deterministic_for_a_fixed_seed() {
        let params = GeneratorParams::new();
        let spec_a = generate(&mut Lcg32::new(42), 10, 10, &params).unwrap();
        let spec_b = generate(&mut Lcg32::new(42), 10, 10, &params).unwrap();
        assert_eq!(spec_a, spec_b);
    }
}
