//! Turn throughput on a default-sized level.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cryptcrawl::{Direction, Game, GameConfig, GameState};

fn fresh_game() -> Game {
    let mut game = Game::new(GameConfig {
        seed: Some(1234),
        ..GameConfig::default()
    });
    // Default config always fits
    let _ = game.start_configured_game();
    game
}

fn bench_handle_turn(c: &mut Criterion) {
    let mut game = fresh_game();
    let mut step = 0usize;

    c.bench_function("handle_turn 50x50 / 20 enemies", |b| {
        b.iter(|| {
            if game.state() != GameState::Playing {
                game = fresh_game();
            }
            let direction = Direction::ALL[step % Direction::ALL.len()];
            step += 1;
            black_box(game.handle_turn(direction))
        })
    });
}

fn bench_start_new_game(c: &mut Criterion) {
    let mut game = fresh_game();
    c.bench_function("start_new_game 50x50", |b| {
        b.iter(|| black_box(game.start_new_game(50, 50, 20, 10).is_ok()))
    });
}

criterion_group!(benches, bench_handle_turn, bench_start_new_game);
criterion_main!(benches);
