//! Game Graph Solver
//!
//! Builds the symmetry-reduced graph of a reference game and solves it from
//! the initial position.
//!
//! Usage:
//!   cargo run --release --bin solve_game -- --game reversi4
//!   cargo run --release --bin solve_game -- --game reversi6 --playouts 1000 --no-solve
//!
//! Set `RUST_LOG=debug` to watch nodes being created.

use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use game_graph::games::reversi::{Reversi4, Reversi6};
use game_graph::games::tictactoe::TicTacToe;
use game_graph::graph::{
    random_playouts, solve_with_callback, Game, Graph, GraphConfig, GraphError, PlayoutReport,
    SolveReport,
};

#[derive(Serialize)]
struct RunSummary {
    game: String,
    config: GraphConfig,
    playouts: Option<PlayoutReport>,
    solve: Option<SolveReport>,
}

struct Options {
    game: String,
    config: GraphConfig,
    playouts: usize,
    seed: u64,
    solve: bool,
    output: Option<String>,
}

fn print_help() {
    println!("Game Graph Solver");
    println!();
    println!("Usage: solve_game [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -g, --game <NAME>       Game to solve: tictactoe, reversi4, reversi6 (default: tictactoe)");
    println!("  -c, --config <FILE>     Graph configuration JSON file");
    println!("  -p, --playouts <N>      Play N random matches before solving");
    println!("  -s, --seed <N>          Seed for random playouts (default: 0)");
    println!("      --no-solve          Skip the full solve");
    println!("  -o, --output <FILE>     Write a JSON summary to FILE");
    println!("  -h, --help              Show this help");
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn run<G: Game>(game: G, options: &Options) -> Result<RunSummary, GraphError> {
    let mut graph = Graph::with_config(game, options.config.clone());
    println!("Game: {}", graph.game().name());

    let playouts = if options.playouts > 0 {
        let report = random_playouts(&mut graph, options.playouts, options.seed)?;
        println!(
            "Playouts: {} | White wins: {} | Black wins: {} | Draws: {} | Avg length: {:.1}",
            report.playouts, report.white_wins, report.black_wins, report.draws, report.average_length
        );
        Some(report)
    } else {
        None
    };

    let solve = if options.solve {
        let pb = create_spinner();
        let interval = options.config.log_interval;
        let report = solve_with_callback(&mut graph, interval, |stats| {
            pb.set_message(format!(
                "{} nodes ({} normal, {} transformation), {} edges",
                stats.total_nodes(),
                stats.normal_nodes,
                stats.transformation_nodes,
                stats.edges
            ));
        });
        pb.finish_and_clear();
        let report = report?;

        println!("Result: {:?}", report.root_result);
        println!(
            "Nodes: {} ({} normal, {} transformation) in {} categories",
            report.nodes,
            report.stats.normal_nodes,
            report.stats.transformation_nodes,
            report.stats.categories
        );
        println!(
            "Time: {:.2}s ({:.0} nodes/s)",
            report.elapsed_seconds, report.nodes_per_second
        );
        println!(
            "Propagation: {} waves, {} recomputations, largest wave {}",
            report.stats.propagation_waves, report.stats.nodes_recomputed, report.stats.largest_wave
        );
        Some(report)
    } else {
        None
    };

    Ok(RunSummary {
        game: graph.game().name().to_string(),
        config: options.config.clone(),
        playouts,
        solve,
    })
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mut options = Options {
        game: "tictactoe".to_string(),
        config: GraphConfig::default(),
        playouts: 0,
        seed: 0,
        solve: true,
        output: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--game" | "-g" => {
                i += 1;
                if i < args.len() {
                    options.game = args[i].clone();
                }
            }
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    println!("Loading configuration from: {}", args[i]);
                    match GraphConfig::from_json_file(&args[i]) {
                        Ok(config) => options.config = config,
                        Err(e) => {
                            eprintln!("Error loading config: {}", e);
                            return;
                        }
                    }
                }
            }
            "--playouts" | "-p" => {
                i += 1;
                if i < args.len() {
                    options.playouts = args[i].parse().unwrap_or(0);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    options.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--no-solve" => {
                options.solve = false;
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    options.output = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    println!("=================================================");
    println!("  Game Graph Solver");
    println!("=================================================");
    println!();

    let outcome = match options.game.as_str() {
        "tictactoe" => run(TicTacToe::new(), &options),
        "reversi4" => run(Reversi4::new(), &options),
        "reversi6" => run(Reversi6::new(), &options),
        other => {
            eprintln!("Unknown game: {}", other);
            print_help();
            return;
        }
    };
    let summary = match outcome {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    if let Some(path) = &options.output {
        let written = serde_json::to_string_pretty(&summary)
            .map_err(std::io::Error::from)
            .and_then(|json| File::create(path).and_then(|mut f| f.write_all(json.as_bytes())));
        match written {
            Ok(()) => println!("Saved summary: {}", path),
            Err(e) => eprintln!("Error saving summary: {}", e),
        }
    }
}
