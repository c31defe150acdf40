//! Perfect-maze generation and replayable DFS solving.
//!
//! Two independent, composable components:
//!
//! - [`Generator`] carves a perfect maze (exactly one simple path between any
//!   two rooms) via randomized recursive backtracking on an odd-coordinate
//!   lattice.
//! - [`Solver`] traverses a maze depth-first from the top-left to the
//!   bottom-right corner. [`Solver::trace`] emits an append-only log of
//!   [`Step`]s, each carrying the call stack, the open branches, and a full
//!   grid snapshot, so any consumer can replay or scrub the traversal at its
//!   own pace. [`Solver::solve`] is the log-free variant returning just a
//!   [`DfsResult`], with an optional observer hook for progressive rendering.
//!
//! Data flows one direction: generator → grid → solver → step log →
//! consumer. The crate knows nothing about rendering or playback timing; a
//! player is simply a cursor over the immutable step sequence, and
//! [`Stats::derive`] recomputes the running counters at any index.
//!
//! ```
//! use maze_core::{Action, Generator, Solver, Stats};
//!
//! let maze = Generator::with_seed(7).generate(15, 15);
//! let solver = Solver::new();
//!
//! let steps = solver.trace(&maze);
//! assert_eq!(steps.last().unwrap().action, Action::Solution);
//!
//! let result = solver.solve(&maze);
//! let stats = Stats::derive(&steps, steps.len() - 1);
//! assert_eq!(stats.backtrack_count, result.backtrack_count);
//! ```

mod grid;

pub mod generator;
pub mod solver;

pub use generator::{Generator, GeneratorConfig};
pub use grid::{Cell, Grid, Position};
pub use solver::{Action, DfsResult, Solver, Stats, Step};
