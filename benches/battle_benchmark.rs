//! Benchmarks for running complete battles.
//!
//! This benchmarks the full scheduler loop including replay recording.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pcrb::policy::{Chaser, Rester, Turret};
use pcrb::tournament::{PolicyPair, TournamentConfig, run_stats};
use pcrb::{
    Battle, BattleConfig, Contender, DEFAULT_FIRST_START, DEFAULT_SECOND_START, MemorySink,
    run_battle,
};

fn bench_single_battle(c: &mut Criterion) {
    c.bench_function("chaser_vs_turret", |b| {
        b.iter(|| {
            let result = run_battle(
                black_box(BattleConfig::default()),
                Contender::new("Robot A", DEFAULT_FIRST_START, &Chaser),
                Contender::new("Robot B", DEFAULT_SECOND_START, &Turret),
            );
            black_box(result)
        });
    });
}

fn bench_full_length_battle(c: &mut Criterion) {
    // Nobody attacks, so every battle runs to the turn limit
    let config = BattleConfig {
        max_turn: 1000,
        ..BattleConfig::default()
    };

    c.bench_function("rester_1000_turns", |b| {
        b.iter(|| {
            let result = run_battle(
                black_box(config),
                Contender::new("Robot A", DEFAULT_FIRST_START, &Rester),
                Contender::new("Robot B", DEFAULT_SECOND_START, &Rester),
            );
            black_box(result)
        });
    });
}

fn bench_text_log(c: &mut Criterion) {
    c.bench_function("chaser_vs_rester_logged", |b| {
        b.iter(|| {
            let mut sink = MemorySink::new();
            let battle = Battle::new(
                BattleConfig::default(),
                Contender::new("Robot A", DEFAULT_FIRST_START, &Chaser),
                Contender::new("Robot B", DEFAULT_SECOND_START, &Rester),
                &mut sink,
            );
            let result = battle.and_then(Battle::run);
            black_box((result, sink.lines().len()))
        });
    });
}

fn bench_tournament_batch(c: &mut Criterion) {
    let config = TournamentConfig {
        rounds: 100,
        ..TournamentConfig::default()
    };

    c.bench_function("100_rounds_parallel", |b| {
        b.iter(|| {
            let stats = run_stats(black_box(&config), |_| -> PolicyPair {
                (Box::new(Chaser), Box::new(Turret))
            });
            black_box(stats)
        });
    });
}

criterion_group!(
    benches,
    bench_single_battle,
    bench_full_length_battle,
    bench_text_log,
    bench_tournament_batch
);
criterion_main!(benches);
