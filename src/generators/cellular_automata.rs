//! Cellular-automaton cave smoothing: seed a random wall/passage split, then
//! apply birth/survival rules over several passes. No connectivity check in
//! this headless path; the caller is responsible for choosing parameters
//! that keep mazes solvable in practice.

use crate::error::RunError;
use crate::generators::pick_start_goal_by_index;
use crate::parameters::GeneratorParams;
use crate::prng::Lcg32;
use crate::types::{Grid, MazeSpec};

/// Out-of-grid neighbors count as alive (wall).
fn alive_neighbors(grid: &Grid, x: usize, y: usize) -> u32 {
    let mut count = 0;
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if !grid.in_bounds(nx, ny) || !grid.is_passage(nx as usize, ny as usize) {
                count += 1;
            }
        }
    }
    count
}

pub fn generate(
    rng: &mut Lcg32,
    rows: usize,
    cols: usize,
    params: &GeneratorParams,
) -> Result<MazeSpec, RunError> {
    let fill_probability = params.get("fillProbability", 0.45);
    let survival_threshold = params.get("survivalThreshold", 4.0) as u32;
    let birth_threshold = params.get("birthThreshold", 5.0) as u32;
    let iterations = params.get("iterations", 3.0) as u32;

    let mut grid = Grid::walls(rows, cols);
    for y in 0..rows {
        for x in 0..cols {
            let is_wall = rng.next_f64() < fill_probability;
            grid.set_passage(x, y, !is_wall);
        }
    }

    for _ in 0..iterations {
        let mut next = grid.clone();
        for y in 0..rows {
            for x in 0..cols {
                let alive_n = alive_neighbors(&grid, x, y);
                let currently_wall = !grid.is_passage(x, y);
                let new_is_wall = if currently_wall {
                    alive_n >= survival_threshold
                } else {
                    alive_n > birth_threshold
                };
                next.set_passage(x, y, !new_is_wall);
            }
        }
        grid = next;
    }

    let floors = grid.passages();
    if floors.len() < 2 {
        return Err(RunError::Generator {
            start: 0,
            end: 0,
            message: format!(
                "cellular_automata produced only {} passage cell(s), need at least 2",
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
    fn produces_distinct_start_and_goal() {
        let params = GeneratorParams::new();
        let mut rng = Lcg32::new(9);
        let spec = generate(&mut rng, 20, 20, &params).unwrap();
        assert_ne!(spec.start, spec.goal);
        assert!(spec.grid.is_passage(spec.start.0, spec.start.1));
        assert!(spec.grid.is_passage(spec.goal.0, spec.goal.1));
    }

    #[test]
    fn is_deterministic_for_a_fixed_seed() {
        let params = GeneratorParams::new();
        let spec_a = generate(&mut Lcg32::new(42), 15, 15, &params).unwrap();
        let spec_b = generate(&mut Lcg32::new(42), 15, 15, &params).unwrap();
        assert_eq!(spec_a, spec_b);
    }
}
