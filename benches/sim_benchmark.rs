//! Benchmarks for the simulation hot paths: pathfinding and the
//! per-tick board step.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use mazebound::{Board, Config, Direction, KeyState, Maze, Vertex, shortest_paths};

/// A full-size level in the classic 21x11 proportions.
const LEVEL: &str = "\
#####################
#S...#.........#...B#
#.##.#.#######.#.##.#
#.#...............#.#
#.#.##.###.###.##.#.#
#F.....#.....#.....F#
#.#.##.###.###.##.#.#
#.#...............#.#
#.##.#.#######.#.##.#
#I...#.........#...C#
#####################";

fn bench_shortest_paths(c: &mut Criterion) {
    let maze = Maze::parse(LEVEL).unwrap();
    let source = maze.player_spawn();
    let target = Vertex::new(19, 9);

    c.bench_function("bfs_across_level", |b| {
        b.iter(|| {
            let result = shortest_paths(
                black_box(maze.graph()),
                black_box(&[source]),
                None,
                black_box(target),
            );
            black_box(result)
        });
    });
}

fn bench_board_tick(c: &mut Criterion) {
    let board = Board::from_text(LEVEL, Config::default()).unwrap();

    c.bench_function("board_single_tick", |b| {
        b.iter(|| {
            let mut board = board.clone();
            board.step(black_box(1.0 / 60.0), KeyState::only(Direction::Right));
            black_box(board)
        });
    });
}

fn bench_board_minute(c: &mut Criterion) {
    let board = Board::from_text(LEVEL, Config::default()).unwrap();

    c.bench_function("board_3600_ticks", |b| {
        b.iter(|| {
            let mut board = board.clone();
            for _ in 0..3600 {
                board.step(1.0 / 60.0, KeyState::only(Direction::Right));
                if board.is_game_over() {
                    break;
                }
            }
            black_box(board)
        });
    });
}

criterion_group!(
    benches,
    bench_shortest_paths,
    bench_board_tick,
    bench_board_minute
);
criterion_main!(benches);
