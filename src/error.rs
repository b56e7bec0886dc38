//! The closed set of fatal error kinds a run can produce. Everything that
//! can go wrong is represented here and propagated with `?`; nothing in
//! non-test code signals failure by panicking.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    /// Bad CLI input or a configuration that can never succeed, caught
    /// before any generation starts.
    #[error("configuration error: {0}")]
    Config(String),

    /// A generator algorithm could not satisfy its contract for the given
    /// instance range.
    #[error("generator error for examples {start}..{end}: {message}")]
    Generator {
        start: u64,
        end: u64,
        message: String,
    },

    /// The solver failed to find a plan for a maze the pipeline expects to
    /// be solvable.
    #[error("solver error at example {index}: {message}")]
    Solver { index: u64, message: String },

    /// A worker thread or channel failed unexpectedly.
    #[error("transport error: {0}")]
    Transport(String),
}

pub type RunResult<T> = Result<T, RunError>;
