//! Solve every puzzle in a puzzle file and report the outcomes.
//!
//! ```text
//! solve [solution] [--json] [--file <path>] [puzzle ids...]
//! ```
//!
//! With ids given, only those puzzles run. `solution` prints the full move
//! replay for every solved puzzle, not only for better-than-declared ones.

use std::fs;
use std::process;

use herding::display;
use herding::parser;
use herding::search::{self, SolutionSummary};

struct Args {
    show_solutions: bool,
    json: bool,
    file: String,
    whitelist: Vec<String>,
}

fn parse_args() -> Option<Args> {
    let mut args = Args {
        show_solutions: false,
        json: false,
        file: "puzzles.txt".to_string(),
        whitelist: Vec::new(),
    };

    let mut it = std::env::args().skip(1).peekable();
    if it.peek().map(String::as_str) == Some("solution") {
        args.show_solutions = true;
        it.next();
    }
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--file" => args.file = it.next()?,
            _ => args.whitelist.push(arg),
        }
    }
    Some(args)
}

fn puzzle_id(no: &str) -> &str {
    no.trim_start_matches('#').trim()
}

fn main() {
    let Some(args) = parse_args() else {
        eprintln!("usage: solve [solution] [--json] [--file <path>] [puzzle ids...]");
        process::exit(2);
    };

    let input = match fs::read_to_string(&args.file) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("cannot read {}: {err}", args.file);
            process::exit(1);
        }
    };
    let parsed = parser::parse_puzzles(&input);
    for err in &parsed.errors {
        eprintln!("parsing error: {err}");
    }
    let puzzles = parsed.puzzles;

    let mut summaries = Vec::new();
    for puzzle in &puzzles {
        if !args.whitelist.is_empty()
            && !args.whitelist.iter().any(|w| w == puzzle_id(&puzzle.no))
        {
            continue;
        }

        let solution = search::solve_puzzle(puzzle);

        if args.json {
            summaries.push(SolutionSummary::new(puzzle, solution.as_ref()));
            continue;
        }

        match &solution {
            Some(solution) => {
                let better_found = solution.steps < puzzle.optimal;
                let verdict = if better_found {
                    format!("expected {}", puzzle.optimal)
                } else if puzzle.fixed {
                    "OK (fixed)".to_string()
                } else {
                    "OK".to_string()
                };
                println!("{}: solved in {}, {verdict}", puzzle.no, solution.steps);
                if better_found || args.show_solutions {
                    println!("  steps: {}", solution.actions.join(", "));
                }
                if args.show_solutions {
                    print!(
                        "{}",
                        display::render_solution(&puzzle.board, &solution.roster, &solution.terminal)
                    );
                }
            }
            None => println!("{}: NOT solved", puzzle.no),
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&summaries) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("{err}");
                process::exit(1);
            }
        }
    } else {
        println!("DONE");
    }
}
