//! Wilson's algorithm (loop-erased random walk) over parity-offset rooms.

use std::collections::{HashMap, HashSet};

use crate::generators::pick_coords_by_rejection;
use crate::prng::Lcg32;
use crate::types::{Grid, MazeSpec};

const DIRECTIONS: [(i32, i32); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

pub fn generate(rng: &mut Lcg32, rows: usize, cols: usize) -> MazeSpec {
    let mut grid = Grid::walls(rows, cols);
    let offset = if rng.coin() { 0 } else { 1 };

    let mut rooms = Vec::new();
    for y in (offset..rows).step_by(2) {
        for x in (offset..cols).step_by(2) {
            rooms.push((x, y));
        }
    }

    let mut in_maze: HashSet<(usize, usize)> = HashSet::new();
    let first = rooms[rng.rand_int(rooms.len())];
    grid.set_passage(first.0, first.1, true);
    in_maze.insert(first);

    while in_maze.len() < rooms.len() {
        let root = loop {
            let candidate = rooms[rng.rand_int(rooms.len())];
            if !in_maze.contains(&candidate) {
                break candidate;
            }
        };

        let mut path = vec![root];
        let mut index_map: HashMap<(usize, usize), usize> = HashMap::new();
        index_map.insert(root, 0);

        loop {
            let (cx, cy) = *path.last().expect("walk always has a current cell");
            let (dx, dy) = DIRECTIONS[rng.rand_int(DIRECTIONS.len())];
            let nx = cx as i64 + dx as i64;
            let ny = cy as i64 + dy as i64;
            if !grid.in_bounds(nx, ny) {
                continue;
            }
            let next = (nx as usize, ny as usize);

            if in_maze.contains(&next) {
                path.push(next);
                break;
            }

            if let Some(&idx) = index_map.get(&next) {
                path.truncate(idx + 1);
                index_map.clear();
                for (j, &pos) in path.iter().enumerate() {
                    index_map.insert(pos, j);
                }
            } else {
                index_map.insert(next, path.len());
                path.push(next);
            }
        }

        for i in 0..path.len() {
            let (cx, cy) = path[i];
            if in_maze.insert((cx, cy)) {
                grid.set_passage(cx, cy, true);
            }
            if i > 0 {
                let (px, py) = path[i - 1];
                grid.set_passage((px + cx) / 2, (py + cy) / 2, true);
            }
        }
    }

    let start = pick_coords_by_rejection(rng, &grid);
    let mut goal = pick_coords_by_rejection(rng, &grid);
    if goal == start {
        goal = pick_coords_by_rejection(rng, &grid);
    }

    MazeSpec { grid, start, goal }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carves_every_room() {
        let mut rng = Lcg32::new(3);
        let spec = generate(&mut rng, 8, 8);
        assert!(spec.grid.is_passage(spec.start.0, spec.start.1));
        assert!(spec.grid.is_passage(spec.goal.0, spec.goal.1));
    }

    #[test]
    fn is_deterministic_for_a_fixed_seed() {
        let spec_a = generate(&mut Lcg32::new(42), 9, 9);
        let spec_b = generate(&mut Lcg32::new(42), 9, 9);
        assert_eq!(spec_a, spec_b);
    }
}
