#![no_main]

//! Full battle fuzzer.
//!
//! Plays a battle with arbitrary grid, starts and raw action tokens, then
//! checks the replay log and the JSON round trip:
//! 1. Setup errors are the only failures besides unknown tokens
//! 2. Every recorded position lies on the grid
//! 3. The replay log validates and survives save/load unchanged

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pcrb::policy::Scripted;
use pcrb::{run_battle, BattleConfig, BattleError, Contender, Position, ReplayLog};

/// Structured input for battle fuzzing.
#[derive(Arbitrary, Debug)]
struct BattleInput {
    /// Grid width and height.
    size: (u8, u8),
    /// Start cells.
    starts: [(u8, u8); 2],
    /// Turn limit.
    max_turn: u8,
    /// Token scripts for each robot; arbitrary strings test the parser.
    scripts: [Vec<String>; 2],
}

fuzz_target!(|input: BattleInput| {
    let config = BattleConfig {
        max_turn: u32::from(input.max_turn),
        x_max: u16::from(input.size.0 % 16),
        y_max: u16::from(input.size.1 % 16),
    };
    let [(ax, ay), (bx, by)] = input.starts;
    let [script_a, script_b] = input.scripts;
    let first = Scripted::from_tokens(script_a);
    let second = Scripted::from_tokens(script_b);

    let result = run_battle(
        config,
        Contender::new("A", Position::new(u16::from(ax % 16), u16::from(ay % 16)), &first),
        Contender::new("B", Position::new(u16::from(bx % 16), u16::from(by % 16)), &second),
    );

    let report = match result {
        Ok(report) => report,
        Err(
            BattleError::EmptyGrid { .. }
            | BattleError::StartOutOfBounds { .. }
            | BattleError::UnknownAction { .. },
        ) => return,
        Err(e) => panic!("unexpected battle error: {e}"),
    };

    assert!(report.turns_played <= config.max_turn);
    for record in report.replay.turns() {
        for robot in &record.robots {
            assert!(robot.position.in_bounds(config.x_max, config.y_max));
            assert!(robot.hp <= 100.0);
        }
    }
    report.replay.validate().expect("engine produced an invalid log");

    let json = report.replay.to_json().expect("serialization failed");
    let loaded = ReplayLog::from_json(&json).expect("log did not load back");
    assert_eq!(loaded, report.replay);
});
