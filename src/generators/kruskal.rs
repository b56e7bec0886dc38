//! Randomized Kruskal's algorithm over parity-offset rooms.

use crate::generators::pick_coords_by_rejection;
use crate::prng::Lcg32;
use crate::types::{Grid, MazeSpec};

/// Union-find with path compression and union-by-rank. The rank heuristic
/// only affects tree depth, never which edges end up unioned, so it can't
/// change the carved maze.
struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size as u32).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> u32 {
        if self.parent[x] != x as u32 {
            self.parent[x] = self.find(self.parent[x] as usize);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x) as usize;
        let root_y = self.find(y) as usize;
        if root_x == root_y {
            return false;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y as u32,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x as u32,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x as u32;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

#[derive(Clone, Copy)]
struct Edge {
    room1: u32,
    room2: u32,
    wall: (usize, usize),
}

pub fn generate(rng: &mut Lcg32, rows: usize, cols: usize) -> MazeSpec {
    let mut grid = Grid::walls(rows, cols);
    let offset = if rng.coin() { 0 } else { 1 };

    let room_rows = (rows - offset + 1) / 2;
    let room_cols = (cols - offset + 1) / 2;
    let num_rooms = room_rows * room_cols;

    let mut edges = Vec::with_capacity(num_rooms * 2);
    let mut room_id = 0u32;
    for room_y in 0..room_rows {
        for room_x in 0..room_cols {
            let x = offset + room_x * 2;
            let y = offset + room_y * 2;
            grid.set_passage(x, y, true);

            if room_x + 1 < room_cols {
                edges.push(Edge {
                    room1: room_id,
                    room2: room_id + 1,
                    wall: (x + 1, y),
                });
            }
            if room_y + 1 < room_rows {
                edges.push(Edge {
                    room1: room_id,
                    room2: room_id + room_cols as u32,
                    wall: (x, y + 1),
                });
            }
            room_id += 1;
        }
    }

    rng.shuffle(&mut edges);

    let mut uf = UnionFind::new(num_rooms);
    for edge in edges {
        if uf.union(edge.room1 as usize, edge.room2 as usize) {
            grid.set_passage(edge.wall.0, edge.wall.1, true);
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
    fn every_room_is_a_passage() {
        let mut rng = Lcg32::new(5);
        let spec = generate(&mut rng, 10, 10);
        assert!(spec.grid.is_passage(spec.start.0, spec.start.1));
        assert!(spec.grid.is_passage(spec.goal.0, spec.goal.1));
    }

    #[test]
    fn is_deterministic_for_a_fixed_seed() {
        let spec_a = generate(&mut Lcg32::new(42), 12, 12);
        let spec_b = generate(&mut Lcg32::new(42), 12, 12);
        assert_eq!(spec_a, spec_b);
    }
}
