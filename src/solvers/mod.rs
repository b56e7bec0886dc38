pub mod astar;

use crate::config::SolverType;
use crate::types::{MazeSpec, Solution};

pub fn solve_maze(solver: SolverType, spec: &MazeSpec) -> Solution {
    match solver {
        SolverType::AStar => astar::solve(spec),
    }
}
