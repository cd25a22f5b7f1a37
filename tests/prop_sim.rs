//! Property-based tests for the maze graph, pathfinding and movement.
//!
//! Run with: cargo test --release prop_sim

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use mazebound::{Board, Config, Direction, KeyState, Maze, Vertex, shortest_paths};

/// Random rectangular layouts: a wall border around a field of open
/// cells with pellets, spawn pinned at (1,1).
fn maze_strategy() -> impl Strategy<Value = String> {
    (3usize..10, 3usize..8).prop_flat_map(|(width, height)| {
        proptest::collection::vec(proptest::bool::weighted(0.7), width * height).prop_map(
            move |open| {
                let mut rows = vec![vec!['#'; width + 2]; height + 2];
                for y in 0..height {
                    for x in 0..width {
                        if open[y * width + x] {
                            rows[y + 1][x + 1] = '.';
                        }
                    }
                }
                rows[1][1] = 'S';
                rows.iter()
                    .map(|row| row.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n")
            },
        )
    })
}

fn key_for(index: u8) -> KeyState {
    match index % 5 {
        0 => KeyState::only(Direction::Up),
        1 => KeyState::only(Direction::Down),
        2 => KeyState::only(Direction::Left),
        3 => KeyState::only(Direction::Right),
        _ => KeyState::NONE,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every edge is symmetric and connects 4-adjacent cells only.
    #[test]
    fn prop_graph_symmetric_and_axis_aligned(layout in maze_strategy()) {
        let maze = Maze::parse(&layout).unwrap();
        let graph = maze.graph();

        for y in 0..maze.height() as i32 {
            for x in 0..maze.width() as i32 {
                let vertex = Vertex::new(x, y);
                for neighbor in graph.neighbors(vertex) {
                    prop_assert!(
                        graph.contains_edge(neighbor, vertex),
                        "edge {vertex:?} -> {neighbor:?} has no reverse"
                    );
                    let dx = (neighbor.x - vertex.x).abs();
                    let dy = (neighbor.y - vertex.y).abs();
                    prop_assert_eq!(dx + dy, 1, "non-adjacent edge {:?} -> {:?}", vertex, neighbor);
                }
            }
        }
    }

    /// BFS is deterministic and distances grow by exactly one along
    /// parent links.
    #[test]
    fn prop_bfs_deterministic_and_monotone(
        layout in maze_strategy(),
        tx in 0i32..12,
        ty in 0i32..10,
    ) {
        let maze = Maze::parse(&layout).unwrap();
        let source = maze.player_spawn();
        let target = Vertex::new(tx, ty);

        let first = shortest_paths(maze.graph(), &[source], None, target);
        let second = shortest_paths(maze.graph(), &[source], None, target);

        for y in 0..maze.height() as i32 {
            for x in 0..maze.width() as i32 {
                let vertex = Vertex::new(x, y);
                prop_assert_eq!(first.distance(vertex), second.distance(vertex));
                prop_assert_eq!(first.parent(vertex), second.parent(vertex));

                if let (Some(parent), Some(d)) = (first.parent(vertex), first.distance(vertex)) {
                    let pd = first.distance(parent).unwrap();
                    prop_assert!((d - pd - 1.0).abs() < 1e-6);
                }
            }
        }
    }

    /// The discovered path, when one exists, starts at a source, ends at
    /// the target and only ever steps along edges.
    #[test]
    fn prop_bfs_path_is_walkable(
        layout in maze_strategy(),
        tx in 0i32..12,
        ty in 0i32..10,
    ) {
        let maze = Maze::parse(&layout).unwrap();
        let source = maze.player_spawn();
        let target = Vertex::new(tx, ty);

        let result = shortest_paths(maze.graph(), &[source], None, target);
        if let Some(path) = result.path_to(target) {
            prop_assert_eq!(path[0], source);
            prop_assert_eq!(*path.last().unwrap(), target);
            for pair in path.windows(2) {
                prop_assert!(maze.graph().contains_edge(pair[0], pair[1]));
            }
        }
    }

    /// Under arbitrary key mashing the simulation never panics, the
    /// player stays on the grid lines (one coordinate is always near an
    /// integer) and the pellet counter matches the grid.
    #[test]
    fn prop_board_invariants_under_key_mashing(
        layout in maze_strategy(),
        script in proptest::collection::vec(any::<u8>(), 1..200),
    ) {
        let mut board = Board::from_text(&layout, Config::default()).unwrap();

        for &index in &script {
            board.step(1.0 / 60.0, key_for(index));

            let position = board.player().mover.position;
            let x_offset = (position.x - position.x.round()).abs();
            let y_offset = (position.y - position.y.round()).abs();
            prop_assert!(
                x_offset < 1e-3 || y_offset < 1e-3,
                "player drifted off the grid lines at {position:?}"
            );

            let on_grid: usize = board
                .pellets()
                .iter()
                .flatten()
                .filter(|cell| cell.is_some())
                .count();
            prop_assert_eq!(on_grid, board.pellets_remaining());
        }
    }

    /// Identical layouts and scripts produce identical runs.
    #[test]
    fn prop_runs_are_reproducible(
        layout in maze_strategy(),
        script in proptest::collection::vec(any::<u8>(), 1..100),
    ) {
        let run = |layout: &str| {
            let mut board = Board::from_text(layout, Config::default()).unwrap();
            for &index in &script {
                board.step(1.0 / 60.0, key_for(index));
            }
            let snapshot = board.snapshot();
            (snapshot.score, snapshot.lives, snapshot.pellets_remaining,
             snapshot.player.x.to_bits(), snapshot.player.y.to_bits())
        };

        prop_assert_eq!(run(&layout), run(&layout));
    }
}
