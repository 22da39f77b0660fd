#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter for the horde wave director.
//!
//! Stands in for the host engine: it owns the frame loop, feeds the
//! scheduler a fixed spawn-point table, and applies a crude seeded attrition
//! model so waves actually complete. Useful for soak-testing the director
//! without a game attached.

use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use horde_core::{Command, Event, SpawnPointDescriptor, SpawnPointId};
use horde_system_scheduler::{Config, WaveScheduler};
use horde_world::{self as world, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FRAME: Duration = Duration::from_millis(50);

/// Runs the horde wave director against a simulated session.
#[derive(Debug, Parser)]
#[command(name = "horde", about = "Headless horde wave director")]
struct Args {
    /// Map identifier to load.
    #[arg(long, default_value = "q2dm1")]
    map: String,

    /// Global session seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of simulated human participants.
    #[arg(long, default_value_t = 1)]
    humans: u32,

    /// Wave level to reach before exiting successfully.
    #[arg(long, default_value_t = 3)]
    waves: u32,

    /// Hard cap on simulated frames.
    #[arg(long, default_value_t = 120_000)]
    max_frames: u64,
}

/// Fixed spawn-point table standing in for map entities. Two of the eight
/// points are flying-designated.
fn spawn_points() -> Vec<SpawnPointDescriptor> {
    (0..8)
        .map(|id| SpawnPointDescriptor {
            id: SpawnPointId::new(id),
            flying: id >= 6,
            occupied: false,
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    tracing::info!(map = %args.map, seed = args.seed, humans = args.humans, "session start");

    let mut world = World::new();
    let mut scheduler = WaveScheduler::new(Config::new(args.seed));
    let mut attrition = ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(1));
    let points = spawn_points();

    let mut pending = vec![
        Command::LoadMap {
            map: args.map.clone(),
        },
        Command::SyncHumans { count: args.humans },
    ];

    for _ in 0..args.max_frames {
        let mut events = Vec::new();
        world::apply(&mut world, Command::Tick { dt: FRAME }, &mut events);
        for command in pending.drain(..) {
            world::apply(&mut world, command, &mut events);
        }

        // Attrition model: each live monster has a small per-frame chance of
        // dying to the simulated defenders.
        for entity in query::live_monsters(&world) {
            if attrition.gen_bool(0.02) {
                let death = match query::boss_status(&world, entity) {
                    Some(_) => Command::RecordBossDeath { entity },
                    None => Command::RecordMonsterDeath { entity },
                };
                world::apply(&mut world, death, &mut events);
            }
        }

        for event in &events {
            if let Event::Announced { channel, text } = event {
                println!("[{channel:?}] {}", text.replace('\n', " / "));
            }
        }

        let profile = query::map_profile(&world).clone();
        scheduler.handle(
            &events,
            query::sim_time(&world),
            &profile,
            &points,
            &query::population(&world),
            &query::session(&world),
            &mut pending,
        );

        if scheduler.wave_level() > args.waves {
            let population = query::population(&world);
            println!(
                "reached wave {} after {} spawns ({} killed)",
                scheduler.wave_level(),
                population.total_spawned,
                population.total_killed
            );
            return Ok(());
        }
    }

    bail!("wave {} not reached within {} frames", args.waves + 1, args.max_frames)
}
