//! Synchronous A* with an observable reasoning trace. The open set is a
//! plain vector of coordinates, scanned linearly on every pop against a
//! separate `f_score` matrix: ties are broken by *smallest index in the
//! open set*, a guarantee a binary heap cannot reproduce because its
//! internal tie order differs.

use crate::types::{MazeSpec, ReasoningEvent, Solution};

const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[inline]
fn manhattan(x1: usize, y1: usize, x2: usize, y2: usize) -> u32 {
    (x1 as i64 - x2 as i64).unsigned_abs() as u32 + (y1 as i64 - y2 as i64).unsigned_abs() as u32
}

/// Runs A* from `spec.start` to `spec.goal` over `spec.grid`, with the
/// canonical Manhattan heuristic. Returns an empty plan if no path exists.
pub fn solve(spec: &MazeSpec) -> Solution {
    let rows = spec.rows();
    let cols = spec.cols();
    let total = rows * cols;
    let idx = |x: usize, y: usize| y * cols + x;

    let mut g_score = vec![u32::MAX; total];
    let mut f_score = vec![u32::MAX; total];
    let mut came_from = vec![u32::MAX; total];
    let mut closed = vec![false; total];
    let mut in_open = vec![false; total];
    let mut reasoning = Vec::with_capacity(total);

    // Open set: coordinates in insertion order; scores live in f_score/g_score.
    let mut open: Vec<(usize, usize)> = Vec::with_capacity(total);

    let (sx, sy) = spec.start;
    let (gx, gy) = spec.goal;
    let start_idx = idx(sx, sy);
    g_score[start_idx] = 0;
    f_score[start_idx] = manhattan(sx, sy, gx, gy);
    open.push((sx, sy));
    in_open[start_idx] = true;

    loop {
        if open.is_empty() {
            break;
        }

        // Smallest f_score wins; ties go to the smallest index (first match).
        let mut best = 0;
        for i in 1..open.len() {
            let (bx, by) = open[best];
            let (cx, cy) = open[i];
            if f_score[idx(cx, cy)] < f_score[idx(bx, by)] {
                best = i;
            }
        }
        let (x, y) = open.remove(best);
        let current_idx = idx(x, y);
        in_open[current_idx] = false;
        let g = g_score[current_idx];
        let h = manhattan(x, y, gx, gy);

        reasoning.push(ReasoningEvent::Close {
            x: x as u32,
            y: y as u32,
            g,
            h,
        });

        if x == gx && y == gy {
            break;
        }

        closed[current_idx] = true;

        for &(dx, dy) in &DIRECTIONS {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || ny < 0 || nx as usize >= cols || ny as usize >= rows {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if !spec.grid.is_passage(nx, ny) {
                continue;
            }
            let neighbor_idx = idx(nx, ny);
            if closed[neighbor_idx] {
                continue;
            }

            let tentative = g + 1;
            if tentative < g_score[neighbor_idx] {
                came_from[neighbor_idx] = current_idx as u32;
                g_score[neighbor_idx] = tentative;
                let nh = manhattan(nx, ny, gx, gy);
                f_score[neighbor_idx] = tentative + nh;

                reasoning.push(ReasoningEvent::Create {
                    x: nx as u32,
                    y: ny as u32,
                    g: tentative,
                    h: nh,
                });

                if !in_open[neighbor_idx] {
                    open.push((nx, ny));
                    in_open[neighbor_idx] = true;
                }
            }
        }
    }

    let plan = reconstruct_path(&came_from, cols, spec.start, spec.goal);
    Solution { reasoning, plan }
}

fn reconstruct_path(
    came_from: &[u32],
    cols: usize,
    start: (usize, usize),
    goal: (usize, usize),
) -> Vec<(usize, usize)> {
    let idx = |x: usize, y: usize| y * cols + x;
    let start_idx = idx(start.0, start.1);
    let goal_idx = idx(goal.0, goal.1);

    if goal_idx != start_idx && came_from[goal_idx] == u32::MAX {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = goal_idx;
    while current != start_idx {
        path.push((current % cols, current / cols));
        let prev = came_from[current];
        if prev == u32::MAX {
            return Vec::new();
        }
        current = prev as usize;
    }
    path.push(start);
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grid;

    fn open_grid(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::walls(rows, cols);
        for y in 0..rows {
            for x in 0..cols {
                grid.set_passage(x, y, true);
            }
        }
        grid
    }

    #[test]
    fn finds_shortest_path_on_open_grid() {
        let spec = MazeSpec {
            grid: open_grid(5, 5),
            start: (0, 0),
            goal: (4, 4),
        };
        let solution = solve(&spec);
        assert_eq!(solution.plan.first(), Some(&(0, 0)));
        assert_eq!(solution.plan.last(), Some(&(4, 4)));
        assert_eq!(solution.plan.len(), 9); // Manhattan distance + 1
    }

    #[test]
    fn reasoning_starts_at_start_and_ends_at_goal() {
        let spec = MazeSpec {
            grid: open_grid(4, 4),
            start: (0, 0),
            goal: (3, 3),
        };
        let solution = solve(&spec);
        match solution.reasoning.first() {
            Some(ReasoningEvent::Close { x, y, .. }) => assert_eq!((*x, *y), (0, 0)),
            _ => panic!("expected a close event first"),
        }
        match solution
            .reasoning
            .iter()
            .rev()
            .find(|e| matches!(e, ReasoningEvent::Close { .. }))
        {
            Some(ReasoningEvent::Close { x, y, .. }) => assert_eq!((*x, *y), (3, 3)),
            _ => panic!("expected a close event for the goal"),
        }
    }

    #[test]
    fn no_path_yields_empty_plan() {
        let mut grid = Grid::walls(3, 3);
        grid.set_passage(0, 0, true);
        grid.set_passage(2, 2, true);
        let spec = MazeSpec {
            grid,
            start: (0, 0),
            goal: (2, 2),
        };
        let solution = solve(&spec);
        assert!(solution.plan.is_empty());
    }
}
