//! CLI entry point: compiles one or more Presburger formulas to automata
//! and reports satisfiability and sample solutions, in single-formula
//! (stdin) or batch (--file) mode.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use presburger_automata::{build_automaton, enumerate_solutions};

#[derive(Parser, Debug)]
#[command(name = "presburger", about = "Decide Presburger arithmetic formulas via finite automata")]
struct Cli {
    /// Read newline-separated formulas from this file instead of stdin.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Number of sample solutions to print for each satisfiable formula.
    #[arg(short = 'k', long, default_value_t = 3)]
    solutions: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let input = match &cli.file {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("failed to read {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).expect("failed to read stdin");
            buf
        }
    };

    let formulas: Vec<&str> = if cli.file.is_some() {
        input.lines().filter(|l| !l.trim().is_empty()).collect()
    } else {
        vec![input.trim()]
    };

    let mut any_failed = false;
    for formula in formulas {
        match build_automaton(formula) {
            Ok((automaton, order)) => {
                let satisfiable = !automaton.finals.is_empty();
                println!("formula: {}", formula);
                println!("  satisfiable: {}", satisfiable);
                if satisfiable {
                    let solutions = enumerate_solutions(&automaton, cli.solutions, &order, None);
                    for s in solutions {
                        let rendered: Vec<String> =
                            order.iter().map(|v| format!("{}={}", v, s.var_ints.get(v).unwrap_or(&0))).collect();
                        println!("  solution: {}", rendered.join(", "));
                    }
                }
            }
            Err(e) => {
                any_failed = true;
                eprintln!("error building automaton for '{}': {}", formula, e);
            }
        }
    }

    if any_failed {
        std::process::exit(1);
    }
}
