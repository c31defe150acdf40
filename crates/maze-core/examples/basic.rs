//! Basic example of using the maze engine

use maze_core::{Action, Generator, Solver, Stats};

fn main() {
    // Generate a maze
    println!("Generating a 15x15 maze...\n");
    let mut generator = Generator::new();
    let maze = generator.generate(15, 15);
    println!("{}\n", maze);

    // Solve it
    let solver = Solver::new();
    let result = solver.solve(&maze);
    println!("Solved: {}", result.found);
    println!("Path length: {}", result.solution.len());
    println!("Cells visited: {}", result.visited_cells.len());
    println!("Backtracks: {}\n", result.backtrack_count);

    // Trace it step by step
    let steps = solver.trace(&maze);
    println!("Trace has {} steps", steps.len());
    let decisions = steps
        .iter()
        .filter(|s| s.action == Action::Decision)
        .count();
    println!("Decision points: {}", decisions);

    // Replay the first half of the trace and inspect the running stats
    let midpoint = steps.len() / 2;
    let stats = Stats::derive(&steps, midpoint);
    println!(
        "At step {}: depth {}, visited {}, backtracks {}",
        midpoint, stats.path_length, stats.cells_visited, stats.backtrack_count
    );

    // Show the final snapshot of the solve, with the accepted path marked
    let mut final_grid = None;
    solver.solve_with_observer(&maze, |grid, stats| {
        if stats.solution_found {
            final_grid = Some(grid.clone());
        }
    });
    if let Some(grid) = final_grid {
        println!("\nSolution:\n{}", grid);
    }
}
