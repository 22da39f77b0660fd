use std::time::Duration;

use horde_core::{Command, Event, SpawnPointDescriptor, SpawnPointId, WavePhase};
use horde_system_scheduler::{Config, WaveScheduler};
use horde_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(50);

fn spawn_points() -> Vec<SpawnPointDescriptor> {
    (0..8)
        .map(|id| SpawnPointDescriptor {
            id: SpawnPointId::new(id),
            flying: id >= 6,
            occupied: false,
        })
        .collect()
}

/// Runs one frame: clock tick, pending scheduler commands, cleanup attrition,
/// then the scheduler itself. Returns the frame's events.
fn run_frame(
    world: &mut World,
    scheduler: &mut WaveScheduler,
    pending: &mut Vec<Command>,
    points: &[SpawnPointDescriptor],
) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);
    for command in pending.drain(..) {
        world::apply(world, command, &mut events);
    }
    if scheduler.phase() == WavePhase::Cleanup {
        for entity in query::live_monsters(world).into_iter().take(2) {
            let death = match query::boss_status(world, entity) {
                Some(_) => Command::RecordBossDeath { entity },
                None => Command::RecordMonsterDeath { entity },
            };
            world::apply(world, death, &mut events);
        }
    }
    let profile = query::map_profile(world).clone();
    scheduler.handle(
        &events,
        query::sim_time(world),
        &profile,
        points,
        &query::population(world),
        &query::session(world),
        pending,
    );
    events
}

#[test]
fn full_wave_cycle_on_a_small_map() {
    let mut world = World::new();
    let mut scheduler = WaveScheduler::new(Config::new(0x5eed_cafe));
    let points = spawn_points();
    let mut pending = vec![
        Command::LoadMap {
            map: "q2dm3".to_owned(),
        },
        Command::SyncHumans { count: 1 },
    ];

    let mut wave_one_spawns = 0u32;
    let mut saw_wave_banner = false;
    let mut reached_second_wave = false;

    for frame in 0..2_000 {
        let events = run_frame(&mut world, &mut scheduler, &mut pending, &points);
        for event in &events {
            match event {
                Event::MonsterSpawned { .. } if scheduler.wave_level() <= 1 => {
                    wave_one_spawns += 1;
                }
                Event::Announced { text, .. } if text.starts_with("New Wave Is Here") => {
                    saw_wave_banner = true;
                }
                _ => {}
            }
        }
        assert!(scheduler.remaining_quota() <= 16, "quota overflow");

        // Warmup holds for the first four seconds of the session.
        if frame < 79 {
            assert_eq!(scheduler.phase(), WavePhase::Warmup);
        }
        if scheduler.wave_level() >= 2 && scheduler.phase() == WavePhase::Spawning {
            reached_second_wave = true;
            break;
        }
    }

    assert!(reached_second_wave, "wave 2 never started");
    assert!(saw_wave_banner, "wave completion banner missing");
    // Small map, level 1, one human: base 7 plus increment 6.
    assert_eq!(wave_one_spawns, 13);
}

#[test]
fn cleanup_wipe_rests_and_raises_the_next_level() {
    let mut world = World::new();
    let mut scheduler = WaveScheduler::new(Config::new(0xd1ce));
    let points = spawn_points();
    let mut pending = vec![
        Command::LoadMap {
            map: "q2dm3".to_owned(),
        },
        Command::SyncHumans { count: 1 },
    ];

    let mut saw_cleanup = false;
    let mut saw_rest = false;
    for _ in 0..2_000 {
        let _ = run_frame(&mut world, &mut scheduler, &mut pending, &points);
        match scheduler.phase() {
            WavePhase::Cleanup => saw_cleanup = true,
            WavePhase::Rest => {
                assert!(saw_cleanup, "rest reached without cleanup");
                saw_rest = true;
            }
            _ => {}
        }
        if scheduler.wave_level() >= 2 {
            break;
        }
    }
    assert!(saw_rest, "rest phase never reached");
    assert_eq!(scheduler.wave_level(), 2);
}

#[test]
fn game_reset_returns_the_machine_to_warmup() {
    let mut world = World::new();
    let mut scheduler = WaveScheduler::new(Config::new(0xbeef));
    let points = spawn_points();
    let mut pending = vec![
        Command::LoadMap {
            map: "q2dm3".to_owned(),
        },
        Command::SyncHumans { count: 1 },
    ];

    for _ in 0..200 {
        let _ = run_frame(&mut world, &mut scheduler, &mut pending, &points);
        if scheduler.wave_level() >= 1 {
            break;
        }
    }
    assert!(scheduler.wave_level() >= 1, "first wave never started");

    pending.push(Command::ResetGame);
    let _ = run_frame(&mut world, &mut scheduler, &mut pending, &points);
    assert_eq!(scheduler.phase(), WavePhase::Warmup);
    assert_eq!(scheduler.wave_level(), 0);
    assert_eq!(scheduler.remaining_quota(), 0);
    assert_eq!(query::population(&world).live, 0);
}
