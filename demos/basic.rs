//! Basic example of using the N-Queens engine

use queens_core::{spawn, SearchEvent, Solver};
use std::sync::mpsc;

fn main() {
    // Solve synchronously
    println!("Solving N = 6...\n");
    let mut solver = Solver::new(6).expect("6 is a valid size");
    let solutions = solver.run();

    println!("Found {} solutions", solutions.len());
    println!("\nFirst solution:");
    println!("{}", solutions[0]);

    // Read a stored solution back by index
    if let Some(last) = solver.solution(solver.solution_count() - 1) {
        println!("Last solution:");
        println!("{}", last);
    }

    // Run on a worker thread and watch the step events
    println!("--- Watching the search for N = 4 ---\n");
    let (tx, rx) = mpsc::channel();
    let solver = Solver::new(4).expect("4 is a valid size").with_events(tx);
    let handle = spawn(solver);

    let mut steps = 0;
    for event in rx {
        match event {
            SearchEvent::Step { row, col, placed } => {
                steps += 1;
                let verb = if placed { "placed" } else { "removed" };
                println!("step {:>3}: {} ({}, {})", steps, verb, row, col);
            }
            SearchEvent::Complete(solutions) => {
                println!("\nSearch complete: {} solutions", solutions.len());
                break;
            }
        }
    }
    handle.join();
}
