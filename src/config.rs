//! Typed configuration assembled once from CLI input and validated before
//! the orchestrator starts. Every field here is immutable for the run
//! except `batch_size`, which the dispatcher may grow at runtime.

use std::fmt;

use clap::ValueEnum;

use crate::error::RunError;
use crate::parameters::GeneratorParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Mode {
    Train,
    Test,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Train => write!(f, "train"),
            Mode::Test => write!(f, "test"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum GeneratorType {
    Dfs,
    Kruskal,
    Wilson,
    Searchformer,
    DrunkardsWalk,
    CellularAutomata,
}

impl GeneratorType {
    pub const ALL: [GeneratorType; 6] = [
        GeneratorType::Dfs,
        GeneratorType::Kruskal,
        GeneratorType::Wilson,
        GeneratorType::Searchformer,
        GeneratorType::DrunkardsWalk,
        GeneratorType::CellularAutomata,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeneratorType::Dfs => "dfs",
            GeneratorType::Kruskal => "kruskal",
            GeneratorType::Wilson => "wilson",
            GeneratorType::Searchformer => "searchformer",
            GeneratorType::DrunkardsWalk => "drunkards_walk",
            GeneratorType::CellularAutomata => "cellular_automata",
        }
    }

    /// Parses a generator name, returning the sorted list of valid names in
    /// the error message when it doesn't match one.
    pub fn parse(name: &str) -> Result<Self, RunError> {
        GeneratorType::ALL
            .into_iter()
            .find(|g| g.name() == name)
            .ok_or_else(|| RunError::Config(format!(
                "unknown generator '{}'; available: {}",
                name,
                sorted_names(&GeneratorType::ALL.map(GeneratorType::name)),
            )))
    }
}

impl fmt::Display for GeneratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum SolverType {
    #[value(name = "astar")]
    AStar,
}

impl SolverType {
    pub const ALL: [SolverType; 1] = [SolverType::AStar];

    pub fn name(self) -> &'static str {
        match self {
            SolverType::AStar => "astar",
        }
    }

    pub fn parse(name: &str) -> Result<Self, RunError> {
        SolverType::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| RunError::Config(format!(
                "unknown solver '{}'; available: {}",
                name,
                sorted_names(&SolverType::ALL.map(SolverType::name)),
            )))
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn sorted_names(names: &[&str]) -> String {
    let mut sorted: Vec<&str> = names.to_vec();
    sorted.sort_unstable();
    sorted.join(", ")
}

/// Default knobs for the orchestrator, overridable from the CLI.
pub const DEFAULT_BATCH_SIZE: usize = 500;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 2000;
pub const DEFAULT_PRODUCER_BUFFER: usize = 9;

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub rows: usize,
    pub cols: usize,
    pub mode: Mode,
    pub seed: u64,
    pub count: u64,
    pub generator: GeneratorType,
    pub solver: SolverType,
    pub batch_size: usize,
    pub max_batch_size: usize,
    pub producer_buffer: usize,
    pub workers: usize,
    pub generator_params: GeneratorParams,
}

impl PipelineConfig {
    /// Validates everything that can be decided before generation starts.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.rows * self.cols < 2 {
            return Err(RunError::Config(format!(
                "a {}x{} grid cannot admit two distinct passage cells",
                self.rows, self.cols
            )));
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(RunError::Config("rows and cols must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(RunError::Config("batch-size must be positive".into()));
        }
        if self.max_batch_size < self.batch_size {
            return Err(RunError::Config(
                "max batch size cannot be smaller than the initial batch size".into(),
            ));
        }
        Ok(())
    }

    /// Effective solver-worker count: `max(1, min(count, requested))`,
    /// capped to 2 for small runs.
    pub fn resolved_worker_count(&self) -> usize {
        let requested = self.workers.max(1);
        let capped = if self.count < 100 {
            requested.min(2)
        } else {
            requested
        };
        capped.max(1).min(self.count.max(1) as usize)
    }
}
