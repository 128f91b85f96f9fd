//! # Physics Benchmark
//!
//! Per-tick cost of the worker phase (steer, contain, integrate) and of the
//! coordinator's ball phase, single-threaded.
//!
//! Run with: `cargo bench --bench physics`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pitch_sim::config::SimConfig;
use pitch_sim::core::vec2::Vec2;
use pitch_sim::game::actor::Side;
use pitch_sim::game::control::ControlRules;
use pitch_sim::game::physics::{self, DragModel};
use pitch_sim::game::world::World;

const DT: f64 = 1.0 / 60.0;

fn bench_team_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("team_step");

    for players in [5usize, 50, 500] {
        let config = SimConfig { players_per_team: players, ..SimConfig::default() };
        let world = World::new(&config);
        let drag = DragModel::from_config(&config);
        let bounds = world.geometry().bounds;
        let handle = world.team_handle(Side::Left);

        group.bench_with_input(BenchmarkId::from_parameter(players), &players, |b, _| {
            b.iter(|| {
                world.publish_steering(&[Vec2::RIGHT, Vec2::ZERO], config.steer_impulse);
                handle.step(&bounds, drag.player, DT, |actor| {
                    black_box(actor.position);
                });
            });
        });
    }

    group.finish();
}

fn bench_containment(c: &mut Criterion) {
    let config = SimConfig::default();
    let world = World::new(&config);
    let bounds = world.geometry().bounds;
    let mut ball = world.ball().clone();

    c.bench_function("contain_and_integrate_ball", |b| {
        b.iter(|| {
            ball.velocity = Vec2::new(900.0, -700.0);
            black_box(physics::contain(&mut ball, &bounds));
            physics::integrate(&mut ball, config.ball_drag, DT);
        });
    });
}

fn bench_ball_phase(c: &mut Criterion) {
    let config = SimConfig { players_per_team: 50, ..SimConfig::default() };
    let mut world = World::new(&config);
    let rules = ControlRules::from_config(&config);
    let drag = DragModel::from_config(&config);
    let pointer = world.geometry().center();

    c.bench_function("ball_phase_100_players", |b| {
        b.iter(|| {
            world.resolve_ball(&[], pointer, &rules, &drag, DT, config.goal_flash_frames);
            black_box(world.take_events());
        });
    });
}

criterion_group!(benches, bench_team_step, bench_containment, bench_ball_phase);
criterion_main!(benches);
