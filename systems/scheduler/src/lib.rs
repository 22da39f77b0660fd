#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! The wave state machine driving the whole horde mode.
//!
//! The scheduler runs once per simulation frame. It owns the
//! `Warmup -> Spawning -> Cleanup -> Rest` cycle and delegates every decision
//! inside a phase to the dedicated sub-systems: the budget planner shapes
//! each wave, the selector fills spawn points, the boss director staffs boss
//! waves, the benefit grantor fires at wave checkpoints, and the advance gate
//! ends cleanup. All randomness flows from one global seed through labeled
//! SHA-256 derivations, so a full session replays bit-identically.

use std::time::Duration;

use horde_core::{
    AnnounceChannel, Command, ConfigToggle, Event, MapProfile, PopulationView, SessionView,
    SimTime, SpawnPointDescriptor, SpawnPointId, WavePhase,
};
use horde_system_advance::WaveAdvanceGate;
use horde_system_benefits::BenefitGrantor;
use horde_system_boss::BossDirector;
use horde_system_budget::{SpawnBudgetPlanner, WavePlan};
use horde_system_selection::MonsterSelector;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

const RNG_STREAM_SCHEDULER: &str = "scheduler";
const RNG_STREAM_SELECTION: &str = "selection";
const RNG_STREAM_BOSS: &str = "boss";
const RNG_STREAM_BENEFITS: &str = "benefits";
const RNG_STREAM_ADVANCE: &str = "advance";

/// First wave level on which boss waves can occur.
const BOSS_MIN_LEVEL: u32 = 10;
/// Boss waves recur every this many levels from [`BOSS_MIN_LEVEL`] on.
const BOSS_CADENCE: u32 = 5;
/// Most monsters materialized in a single frame.
const MAX_BATCH: u32 = 3;
/// Retry delay after a frame in which every spawn point refused.
const SPAWN_RETRY: Duration = Duration::from_millis(500);
/// Interval between cleanup full-wipe checks.
const CLEANUP_RECHECK: Duration = Duration::from_millis(3_000);
/// Bounds for the randomized rest delay, in milliseconds.
const REST_MIN_MS: u64 = 2_200;
const REST_MAX_MS: u64 = 5_000;

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    seed: u64,
    warmup: Duration,
}

impl Config {
    /// Creates a configuration from the global session seed, with the
    /// standard warmup delay.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            warmup: Duration::from_secs(4),
        }
    }

    /// Overrides the warmup delay before the first wave.
    #[must_use]
    pub const fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }
}

/// Pure system owning the wave phase machine and its sub-systems.
#[derive(Debug)]
pub struct WaveScheduler {
    phase: WavePhase,
    level: u32,
    quota: u32,
    plan: Option<WavePlan>,
    next_spawn: SimTime,
    phase_deadline: Option<SimTime>,
    recheck: SimTime,
    boss_attempted: bool,
    warmup: Duration,
    planner: SpawnBudgetPlanner,
    selector: MonsterSelector,
    bosses: BossDirector,
    benefits: BenefitGrantor,
    gate: WaveAdvanceGate,
    rng: ChaCha8Rng,
}

impl WaveScheduler {
    /// Creates a scheduler whose sub-systems draw from labeled derivations
    /// of the configured seed.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            phase: WavePhase::Warmup,
            level: 0,
            quota: 0,
            plan: None,
            next_spawn: SimTime::ZERO,
            phase_deadline: None,
            recheck: SimTime::ZERO,
            boss_attempted: false,
            warmup: config.warmup,
            planner: SpawnBudgetPlanner,
            selector: MonsterSelector::new(derive_labeled_seed(
                config.seed,
                RNG_STREAM_SELECTION,
            )),
            bosses: BossDirector::new(derive_labeled_seed(config.seed, RNG_STREAM_BOSS)),
            benefits: BenefitGrantor::new(derive_labeled_seed(config.seed, RNG_STREAM_BENEFITS)),
            gate: WaveAdvanceGate::new(derive_labeled_seed(config.seed, RNG_STREAM_ADVANCE)),
            rng: ChaCha8Rng::seed_from_u64(derive_labeled_seed(
                config.seed,
                RNG_STREAM_SCHEDULER,
            )),
        }
    }

    /// Current phase of the wave machine.
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Current wave level; zero until the first wave starts.
    #[must_use]
    pub fn wave_level(&self) -> u32 {
        self.level
    }

    /// Monsters still owed by the current wave.
    #[must_use]
    pub fn remaining_quota(&self) -> u32 {
        self.quota
    }

    /// Consumes the frame's events and immutable views to emit the commands
    /// that drive the wave forward.
    pub fn handle(
        &mut self,
        events: &[Event],
        now: SimTime,
        profile: &MapProfile,
        spawn_points: &[SpawnPointDescriptor],
        population: &PopulationView,
        session: &SessionView,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::GameReset => self.reset_all(),
                Event::MapLoaded { .. } => self.restart_for_map(),
                _ => {}
            }
        }
        self.gate.observe(events);

        let phase_before = self.phase;
        match self.phase {
            WavePhase::Warmup => self.run_warmup(now, profile, session, out),
            WavePhase::Spawning => self.run_spawning(now, profile, spawn_points, population, out),
            WavePhase::Cleanup => self.run_cleanup(now, profile, population, session, out),
            WavePhase::Rest => self.run_rest(now, profile, session, out),
        }
        // A wave that just started spawns its first batch in the same frame.
        if self.phase == WavePhase::Spawning && phase_before != WavePhase::Spawning {
            self.run_spawning(now, profile, spawn_points, population, out);
        }
    }

    fn run_warmup(
        &mut self,
        now: SimTime,
        profile: &MapProfile,
        session: &SessionView,
        out: &mut Vec<Command>,
    ) {
        let deadline = *self
            .phase_deadline
            .get_or_insert_with(|| now.advanced_by(self.warmup));
        if now < deadline {
            return;
        }
        let teaser = if self.rng.gen_bool(0.5) { "???" } else { "?????" };
        out.push(Command::Announce {
            channel: AnnounceChannel::Center,
            text: teaser.to_owned(),
        });
        self.start_wave(1, now, profile, session, out);
    }

    fn run_spawning(
        &mut self,
        now: SimTime,
        profile: &MapProfile,
        spawn_points: &[SpawnPointDescriptor],
        population: &PopulationView,
        out: &mut Vec<Command>,
    ) {
        if !self.boss_attempted && is_boss_wave(self.level) {
            self.boss_attempted = true;
            self.try_spawn_boss(profile, out);
        }

        let Some(plan) = self.plan else {
            return;
        };
        let limit = profile.size().monster_limit();
        let mut spawned = 0u32;
        while self.quota > 0
            && now >= self.next_spawn
            && population.live.saturating_add(spawned) < limit
            && spawned < MAX_BATCH
        {
            let Some((point, monster)) = self.pick_from_any_point(spawn_points, now) else {
                self.next_spawn = now.advanced_by(SPAWN_RETRY);
                break;
            };
            out.push(Command::SpawnMonster {
                spawn_point: point,
                monster,
                health_scale: 1.0 + 0.02 * self.level as f32,
                armor_scale: 1.115 * self.level as f32,
                drop: self.selector.pick_drop(self.level),
            });
            let interval_ms = self.rng.gen_range(
                plan.interval_min.as_millis() as u64..=plan.interval_max.as_millis() as u64,
            );
            self.next_spawn = now.advanced_by(Duration::from_millis(interval_ms));
            self.quota -= 1;
            spawned += 1;
        }

        if self.quota == 0 {
            out.push(Command::Announce {
                channel: AnnounceChannel::Typewriter,
                text: format!("New Wave Is Here.\nWave Level: {}", self.level),
            });
            self.phase = WavePhase::Cleanup;
            self.gate.arm(now, population.live);
            self.recheck = now.advanced_by(CLEANUP_RECHECK);
        }
    }

    /// Offers every usable spawn point to the selector in random order.
    fn pick_from_any_point(
        &mut self,
        spawn_points: &[SpawnPointDescriptor],
        now: SimTime,
    ) -> Option<(SpawnPointId, horde_core::MonsterId)> {
        let mut order: Vec<SpawnPointId> = spawn_points.iter().map(|sp| sp.id).collect();
        order.shuffle(&mut self.rng);
        for point in order {
            if let Some(monster) = self.selector.pick(spawn_points, point, self.level, now) {
                return Some((point, monster));
            }
        }
        None
    }

    fn try_spawn_boss(&mut self, profile: &MapProfile, out: &mut Vec<Command>) {
        let Some(origin) = profile.boss_arena() else {
            // The director logs the missing arena; the wave runs boss-less.
            let _ = self.bosses.pick(profile, self.level);
            return;
        };
        let Some(boss) = self.bosses.pick(profile, self.level) else {
            return;
        };
        out.push(Command::Announce {
            channel: AnnounceChannel::Typewriter,
            text: "***** A CHAMPION STROGG HAS SPAWNED *****".to_owned(),
        });
        out.push(Command::SpawnBoss {
            boss,
            origin,
            scale: 1.4,
            health_scale: 1.2_f32.powi(self.level as i32),
            armor_scale: 1.45 * self.level as f32,
        });
    }

    fn run_cleanup(
        &mut self,
        now: SimTime,
        profile: &MapProfile,
        population: &PopulationView,
        session: &SessionView,
        out: &mut Vec<Command>,
    ) {
        if self
            .gate
            .should_advance(now, profile.size(), self.level, session, population)
        {
            if self.level >= 15 {
                out.push(Command::SetToggle {
                    toggle: ConfigToggle::Insane,
                    value: 1,
                });
                out.push(Command::SetToggle {
                    toggle: ConfigToggle::Chaotic,
                    value: 0,
                });
            } else if profile.size() == horde_core::MapSize::Small {
                out.push(Command::SetToggle {
                    toggle: ConfigToggle::Chaotic,
                    value: 2,
                });
            } else {
                out.push(Command::SetToggle {
                    toggle: ConfigToggle::Chaotic,
                    value: 1,
                });
            }
            self.enter_rest(now);
            return;
        }

        if now < self.recheck {
            return;
        }
        if population.live == 0 {
            if session.chaotic > 0 || session.insane {
                out.push(Command::Announce {
                    channel: AnnounceChannel::Center,
                    text: "Harder Wave Controlled, GG".to_owned(),
                });
                out.push(Command::SetToggle {
                    toggle: ConfigToggle::Chaotic,
                    value: 0,
                });
                out.push(Command::SetToggle {
                    toggle: ConfigToggle::Insane,
                    value: 0,
                });
            } else {
                out.push(Command::Announce {
                    channel: AnnounceChannel::Center,
                    text: "Wave Defeated, GG !".to_owned(),
                });
            }
            self.enter_rest(now);
        } else {
            self.recheck = now.advanced_by(CLEANUP_RECHECK);
        }
    }

    fn run_rest(
        &mut self,
        now: SimTime,
        profile: &MapProfile,
        session: &SessionView,
        out: &mut Vec<Command>,
    ) {
        let Some(deadline) = self.phase_deadline else {
            self.enter_rest(now);
            return;
        };
        if now < deadline {
            return;
        }
        if session.insane {
            out.push(Command::Announce {
                channel: AnnounceChannel::Center,
                text: "--STRONGER WAVE COMING--\nSTROGGS STARTING TO PUSH !".to_owned(),
            });
        } else if session.chaotic > 0 {
            out.push(Command::Announce {
                channel: AnnounceChannel::Center,
                text: "STROGGS STARTING TO PUSH !".to_owned(),
            });
        } else {
            out.push(Command::Announce {
                channel: AnnounceChannel::Center,
                text: "Loading Next Wave".to_owned(),
            });
        }
        out.push(Command::PurgeCorpses);
        self.start_wave(self.level + 1, now, profile, session, out);
    }

    fn enter_rest(&mut self, now: SimTime) {
        let delay = Duration::from_millis(self.rng.gen_range(REST_MIN_MS..=REST_MAX_MS));
        self.phase = WavePhase::Rest;
        self.phase_deadline = Some(now.advanced_by(delay));
        self.gate.disarm();
    }

    fn start_wave(
        &mut self,
        level: u32,
        now: SimTime,
        profile: &MapProfile,
        session: &SessionView,
        out: &mut Vec<Command>,
    ) {
        self.level = level;
        self.boss_attempted = false;
        if let Some(benefit) = self.benefits.checkpoint(level) {
            out.push(Command::GrantBenefit { benefit });
        }
        let plan = self.planner.plan(profile.size(), level, session);
        self.quota = plan.quota;
        self.selector.begin_wave(plan.spawn_point_cooldown);
        self.plan = Some(plan);
        self.next_spawn = now;
        self.phase = WavePhase::Spawning;
        self.phase_deadline = None;
        self.gate.disarm();
    }

    /// Full reset: level zero, warmup, every sub-system back to initial state.
    fn reset_all(&mut self) {
        self.restart_for_map();
        self.bosses.reset();
        self.benefits.reset();
        self.gate.reset();
    }

    /// Map change: the machine restarts from warmup, but earned benefits and
    /// the recent-boss ring survive.
    fn restart_for_map(&mut self) {
        self.phase = WavePhase::Warmup;
        self.level = 0;
        self.quota = 0;
        self.plan = None;
        self.next_spawn = SimTime::ZERO;
        self.phase_deadline = None;
        self.recheck = SimTime::ZERO;
        self.boss_attempted = false;
        self.selector.reset();
        self.gate.disarm();
    }
}

const fn is_boss_wave(level: u32) -> bool {
    level >= BOSS_MIN_LEVEL && level % BOSS_CADENCE == 0
}

fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}
