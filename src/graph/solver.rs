//! Drivers that grow a graph through match cursors.
//!
//! - [`solve`] explores depth first until the root result is known.
//! - [`random_playouts`] plays seeded random matches to the end, growing the
//!   graph only along the lines it samples.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::graph::config::GraphStats;
use crate::graph::cursor::GraphMatch;
use crate::graph::error::GraphError;
use crate::graph::game::{Game, Player, Position};
use crate::graph::result::GraphResult;
use crate::graph::store::Graph;

/// Summary of a solver run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    /// Name of the solved game.
    pub game: String,

    /// Result of the initial position when the run stopped.
    pub root_result: GraphResult,

    /// Total number of nodes in the graph.
    pub nodes: usize,

    /// Time spent in this run (in seconds).
    pub elapsed_seconds: f64,

    /// Nodes created per second during this run.
    pub nodes_per_second: f64,

    /// Graph statistics at the end of the run.
    pub stats: GraphStats,
}

/// Outcome counts of a batch of random matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayoutReport {
    /// Number of matches played.
    pub playouts: usize,
    /// Matches won by White.
    pub white_wins: usize,
    /// Matches won by Black.
    pub black_wins: usize,
    /// Drawn matches.
    pub draws: usize,
    /// Mean number of moves per match.
    pub average_length: f64,
    /// Graph size after the last match.
    pub nodes: usize,
}

/// Explore the graph until the result of the initial position is known.
///
/// Moves are tried in order; a position is left as soon as its result is
/// known, so the search never looks further than it has to. The game must
/// be acyclic.
///
/// # Errors
/// Fails only if a cursor rejects a move it listed itself, which means the
/// game breaks the [`Position`] contract.
pub fn solve<G: Game>(graph: &mut Graph<G>) -> Result<SolveReport, GraphError> {
    let interval = graph.config().log_interval;
    solve_with_callback(graph, interval, |stats| {
        log::info!(
            "{:<32}{:<16}{:<16}",
            "exploring graph",
            stats.total_nodes(),
            stats.edges
        );
    })
}

/// Like [`solve`], calling `callback` each time another `callback_interval`
/// nodes have been created.
pub fn solve_with_callback<G, F>(
    graph: &mut Graph<G>,
    callback_interval: usize,
    mut callback: F,
) -> Result<SolveReport, GraphError>
where
    G: Game,
    F: FnMut(&GraphStats),
{
    let start_time = Instant::now();
    let start_size = graph.size();
    let interval = callback_interval.max(1);
    log::info!("{:<32}{:<32}", "solving", graph.game().name());

    {
        let mut cursor = graph.create_match();
        let mut next_report = start_size + interval;
        explore(&mut cursor, &mut |graph: &Graph<G>| {
            let size = graph.size();
            if size >= next_report {
                callback(graph.stats());
                next_report = size + interval;
            }
        })?;
    }

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    let created = graph.size() - start_size;
    let report = SolveReport {
        game: graph.game().name().to_string(),
        root_result: graph.root_result(),
        nodes: graph.size(),
        elapsed_seconds,
        nodes_per_second: if elapsed_seconds > 0.0 {
            created as f64 / elapsed_seconds
        } else {
            0.0
        },
        stats: graph.stats().clone(),
    };
    log::info!(
        "{:<32}{:<16}{:<16}",
        "solved",
        format!("{:?}", report.root_result),
        report.nodes
    );
    Ok(report)
}

fn explore<G, F>(cursor: &mut GraphMatch<'_, G>, progress: &mut F) -> Result<(), GraphError>
where
    G: Game,
    F: FnMut(&Graph<G>),
{
    if cursor.result().is_known() {
        return Ok(());
    }
    for index in 0..cursor.move_count() {
        cursor.play_index(index)?;
        progress(cursor.graph());
        explore(cursor, progress)?;
        cursor.back()?;
        if cursor.result().is_known() {
            break;
        }
    }
    Ok(())
}

/// Play `count` random matches from the initial position with a seeded RNG.
///
/// Every move is drawn uniformly from the legal moves. The same seed always
/// produces the same matches.
pub fn random_playouts<G: Game>(
    graph: &mut Graph<G>,
    count: usize,
    seed: u64,
) -> Result<PlayoutReport, GraphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = PlayoutReport {
        playouts: count,
        ..Default::default()
    };
    let mut total_moves = 0usize;

    for _ in 0..count {
        let mut cursor = graph.create_match();
        while cursor.move_count() > 0 {
            let index = rng.gen_range(0..cursor.move_count());
            cursor.play_index(index)?;
        }
        total_moves += cursor.len();

        match cursor.position().status().winner() {
            Some(Player::White) => report.white_wins += 1,
            Some(Player::Black) => report.black_wins += 1,
            None => report.draws += 1,
        }
    }

    if count > 0 {
        report.average_length = total_moves as f64 / count as f64;
    }
    report.nodes = graph.size();
    log::info!(
        "{:<32}{:<16}{:<16}",
        "random playouts",
        count,
        report.nodes
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::TicTacToe;
    use crate::graph::testing::{Flaw, FlawedGame};
    use crate::graph::GraphConfig;

    #[test]
    fn test_solve_tictactoe() {
        let mut graph = Graph::new(TicTacToe::new());
        let report = solve(&mut graph).unwrap();
        assert_eq!(report.root_result, GraphResult::Draw);
        assert_eq!(report.nodes, graph.size());
        assert_eq!(report.game, "tictactoe");
    }

    #[test]
    fn test_solve_with_callback_reports_progress() {
        let config = GraphConfig::default().with_log_interval(50);
        let mut graph = Graph::with_config(TicTacToe::new(), config);
        let mut calls = 0;
        let mut last_size = 0;
        solve_with_callback(&mut graph, 50, |stats| {
            calls += 1;
            assert!(stats.total_nodes() >= last_size + 50);
            last_size = stats.total_nodes();
        })
        .unwrap();
        assert!(calls > 0);
    }

    #[test]
    fn test_solving_twice_changes_nothing() {
        let mut graph = Graph::new(TicTacToe::new());
        solve(&mut graph).unwrap();
        let size = graph.size();
        let report = solve(&mut graph).unwrap();
        assert_eq!(report.nodes, size);
        assert_eq!(report.root_result, GraphResult::Draw);
    }

    #[test]
    fn test_random_playouts_are_reproducible() {
        let mut first = Graph::new(TicTacToe::new());
        let mut second = Graph::new(TicTacToe::new());

        let a = random_playouts(&mut first, 25, 7).unwrap();
        let b = random_playouts(&mut second, 25, 7).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.white_wins + a.black_wins + a.draws, 25);
        assert!(a.average_length >= 5.0 && a.average_length <= 9.0);
    }

    #[test]
    fn test_playouts_count_drawn_endings() {
        let mut graph = Graph::new(FlawedGame::new(Flaw::None));
        let report = random_playouts(&mut graph, 10, 3).unwrap();
        assert_eq!(report.draws, 10);
        assert_eq!(report.white_wins + report.black_wins, 0);
        assert_eq!(report.average_length, 1.0);
        assert_eq!(solve(&mut graph).unwrap().root_result, GraphResult::Draw);
    }
}
