//! End-to-end tests: solving reference games and checking graph invariants.

use std::collections::HashMap;

use game_graph::games::reversi::Reversi4;
use game_graph::games::tictactoe::TicTacToe;
use game_graph::graph::{
    fold_results, random_playouts, solve, CategoryFunction, Game, Graph, GraphResult, NodeId,
    NodeKind, Position, Transformation,
};

/// Every normal node's result must agree with its children, and every
/// transformation node's with its link.
fn assert_results_consistent<G: Game>(graph: &Graph<G>) {
    for (id, node) in graph.iter() {
        match node.kind() {
            NodeKind::Normal { status, children, .. } => match status.current_player() {
                None => assert!(node.result().is_known(), "final node {} unknown", id),
                Some(mover) => {
                    let folded = fold_results(
                        mover,
                        children.iter().map(|c| match c {
                            Some(child) => graph.node(*child).unwrap().result(),
                            None => GraphResult::Unknown,
                        }),
                    )
                    .unwrap();
                    if !node.result().is_known() {
                        assert_eq!(node.result(), folded, "stale result at {}", id);
                    }
                }
            },
            NodeKind::Transformation {
                transformation,
                linked,
            } => {
                let linked_result = graph.node(*linked).unwrap().result();
                let expected = if transformation.is_player_switching() {
                    linked_result.other()
                } else {
                    linked_result
                };
                assert_eq!(node.result(), expected, "transformation node {}", id);
            }
        }
    }
}

/// No two normal nodes may hold positions related by a transformation.
fn assert_no_duplicate_positions<G: Game>(graph: &Graph<G>) {
    let mut buckets: HashMap<i64, Vec<(NodeId, &G::Position)>> = HashMap::new();
    for (id, node) in graph.iter() {
        if let Some(position) = node.position() {
            let category = graph.game().category_function().category(position);
            buckets.entry(category).or_default().push((id, position));
        }
    }
    for bucket in buckets.values() {
        for (i, (a_id, a)) in bucket.iter().enumerate() {
            for (b_id, b) in &bucket[i + 1..] {
                assert!(
                    a.find_transformation_to(b).is_none(),
                    "nodes {} and {} hold symmetric positions",
                    a_id,
                    b_id
                );
            }
        }
    }
}

/// No position offers more moves than the game's declared maximum.
fn assert_moves_within_bound<G: Game>(graph: &Graph<G>) {
    let bound = graph.game().max_possible_moves();
    let widest = graph.iter().map(|(_, node)| node.child_count()).max();
    assert!(widest.is_some_and(|w| w <= bound));
}

#[test]
fn test_tictactoe_is_a_draw() {
    let mut graph = Graph::new(TicTacToe::new());
    let report = solve(&mut graph).unwrap();

    assert_eq!(report.root_result, GraphResult::Draw);
    assert_eq!(graph.root_result(), GraphResult::Draw);
    assert_moves_within_bound(&graph);
    assert_no_duplicate_positions(&graph);
    assert_results_consistent(&graph);
}

#[test]
fn test_reversi4_is_won_by_black() {
    let mut graph = Graph::new(Reversi4::new());
    let report = solve(&mut graph).unwrap();

    assert_eq!(report.root_result, GraphResult::BlackWins);
    assert!(report.stats.transformation_nodes > 0);
    assert_moves_within_bound(&graph);
    assert_no_duplicate_positions(&graph);
    assert_results_consistent(&graph);
}

#[test]
fn test_known_results_never_change() {
    let mut graph = Graph::new(TicTacToe::new());
    random_playouts(&mut graph, 200, 11).unwrap();

    let known: Vec<(NodeId, GraphResult)> = graph
        .iter()
        .filter(|(_, node)| node.result().is_known())
        .map(|(id, node)| (id, node.result()))
        .collect();
    assert!(!known.is_empty());

    solve(&mut graph).unwrap();
    for (id, result) in known {
        assert_eq!(graph.node(id).unwrap().result(), result);
    }
}

#[test]
fn test_results_only_gain_information() {
    let mut graph = Graph::new(Reversi4::new());
    let mut previous: Vec<GraphResult> = Vec::new();

    for seed in 0..20 {
        random_playouts(&mut graph, 5, seed).unwrap();
        for (id, node) in graph.iter() {
            if let Some(&before) = previous.get(id.index()) {
                assert!(
                    node.result().refines(before),
                    "node {} went from {:?} to {:?}",
                    id,
                    before,
                    node.result()
                );
            }
        }
        previous = graph.iter().map(|(_, node)| node.result()).collect();
    }
    assert_results_consistent(&graph);
}

#[test]
fn test_cursor_agrees_with_graph_along_matches() {
    let mut graph = Graph::new(Reversi4::new());
    solve(&mut graph).unwrap();

    let mut game = graph.create_match();
    let mut depth = 0;
    while game.move_count() > 0 {
        // The canonical position is the tracked position under the
        // accumulated transformation.
        let canonical = game
            .graph()
            .node(game.node())
            .and_then(|n| n.position().cloned())
            .unwrap();
        assert_eq!(game.position().transform(game.transformation()), canonical);

        let index = depth % game.move_count();
        game.play_index(index).unwrap();
        depth += 1;
    }

    let final_status = game.position().status();
    assert_eq!(game.result().as_status(), Some(final_status));
    assert_eq!(game.len(), depth);

    while !game.is_empty() {
        game.back().unwrap();
    }
    assert_eq!(game.result(), GraphResult::BlackWins);
}

#[test]
fn test_player_switching_flips_cursor_result() {
    let mut graph = Graph::new(Reversi4::new());
    solve(&mut graph).unwrap();

    let mut game = graph.create_match();
    for index in 0..game.move_count() {
        game.play_index(index).unwrap();
        for reply in 0..game.move_count() {
            game.play_index(reply).unwrap();
            if game.transformation().is_player_switching() {
                let node_result = game.graph().node(game.node()).unwrap().result();
                assert_eq!(game.result(), node_result.other());
            }
            game.back().unwrap();
        }
        game.back().unwrap();
    }
}

#[test]
fn test_graph_grows_only_through_new_moves() {
    let mut graph = Graph::new(TicTacToe::new());
    {
        let mut game = graph.create_match();
        game.play_index(0).unwrap();
        game.play_index(0).unwrap();
    }
    let size = graph.size();
    let edges = graph.stats().edges;
    {
        let mut game = graph.create_match();
        game.play_index(0).unwrap();
        game.play_index(0).unwrap();
    }
    assert_eq!(graph.size(), size);
    assert_eq!(graph.stats().edges, edges);
}

#[test]
fn test_match_history_replays() {
    let mut graph = Graph::new(Reversi4::new());
    let mut game = graph.create_match();
    let mut step = 0;
    while game.move_count() > 0 {
        game.play_index((step * 3) % game.move_count()).unwrap();
        step += 1;
    }

    let points: Vec<_> = game.points().collect();
    assert_eq!(points.len(), game.len() + 1);
    for pair in points.windows(2) {
        let (position, mv) = pair[0];
        let mv = mv.expect("every earlier point records its move");
        assert!(position.legal_moves().contains(mv));
        assert_eq!(&position.play(mv), pair[1].0);
    }
    assert!(points[points.len() - 1].1.is_none());
}
