#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weighted monster selection per spawn attempt.
//!
//! The scheduler offers the selector one spawn point at a time. The selector
//! vets the point (occupancy, cooldown), filters the monster catalog down to
//! the entries eligible at the current wave level and point designation, and
//! draws one by weight. Points that repeatedly fail to produce a candidate
//! have their cooldown eroded so they do not starve the wave. Each spawned
//! monster also draws a death-drop item from the item catalog.

use std::collections::HashMap;
use std::time::Duration;

use horde_core::catalog::{self, FLYING_UNLOCK_LEVEL};
use horde_core::weighted::WeightedChoice;
use horde_core::{ItemId, MonsterId, SimTime, SpawnPointDescriptor, SpawnPointId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Weight multiplier applied to flying entries while the sky is contested.
const SKY_PRESSURE_PENALTY: f32 = 0.25;

/// Consecutive failures at one point before its cooldown erodes.
const EROSION_CADENCE: u32 = 3;

/// Cooldowns never erode below this.
const COOLDOWN_MIN: Duration = Duration::from_millis(500);

/// Default per-point cooldown before any wave plan is pushed.
const COOLDOWN_DEFAULT: Duration = Duration::from_millis(2_500);

/// Transient per-point bookkeeping, created lazily on first use.
#[derive(Clone, Copy, Debug)]
struct SpawnPointRecord {
    last_used: Option<SimTime>,
    cooldown: Duration,
    failures: u32,
}

impl SpawnPointRecord {
    const fn fresh(cooldown: Duration) -> Self {
        Self {
            last_used: None,
            cooldown,
            failures: 0,
        }
    }

    fn cooling(&self, now: SimTime) -> bool {
        match self.last_used {
            Some(used) => now.saturating_since(used) < self.cooldown,
            None => false,
        }
    }
}

/// Stateful weighted-random monster picker.
#[derive(Clone, Debug)]
pub struct MonsterSelector {
    rng: ChaCha8Rng,
    records: HashMap<SpawnPointId, SpawnPointRecord>,
    last_spawned: HashMap<MonsterId, SimTime>,
    wave_cooldown: Duration,
}

impl MonsterSelector {
    /// Creates a selector with its own deterministic random stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            records: HashMap::new(),
            last_spawned: HashMap::new(),
            wave_cooldown: COOLDOWN_DEFAULT,
        }
    }

    /// Clears per-point records and adopts the new wave's base cooldown.
    pub fn begin_wave(&mut self, cooldown: Duration) {
        self.records.clear();
        self.wave_cooldown = cooldown.max(COOLDOWN_MIN);
    }

    /// Drops all transient state, keeping the random stream.
    pub fn reset(&mut self) {
        self.records.clear();
        self.last_spawned.clear();
        self.wave_cooldown = COOLDOWN_DEFAULT;
    }

    /// When the given monster type last spawned, if it has this game.
    #[must_use]
    pub fn last_spawned(&self, monster: MonsterId) -> Option<SimTime> {
        self.last_spawned.get(&monster).copied()
    }

    /// Attempts to choose a monster for one spawn point.
    ///
    /// Occupied or cooling points return `None` without touching the failure
    /// counter; only an empty candidate set counts as a failure. Flying
    /// catalog entries are gated on the level unlock and on flying-designated
    /// points, and are de-weighted while another flying point is still inside
    /// its cooldown window.
    pub fn pick(
        &mut self,
        spawn_points: &[SpawnPointDescriptor],
        point: SpawnPointId,
        level: u32,
        now: SimTime,
    ) -> Option<MonsterId> {
        let descriptor = spawn_points.iter().find(|sp| sp.id == point)?;
        if descriptor.occupied {
            return None;
        }
        if self
            .records
            .get(&point)
            .is_some_and(|record| record.cooling(now))
        {
            return None;
        }
        let sky_contested = spawn_points.iter().any(|sp| {
            sp.flying
                && sp.id != point
                && self
                    .records
                    .get(&sp.id)
                    .is_some_and(|record| record.cooling(now))
        });

        let flying_point = descriptor.flying;
        let weights = catalog::MONSTERS.iter().map(|entry| {
            if !entry.window().contains(level) {
                return 0.0;
            }
            if entry.flying() {
                if level < FLYING_UNLOCK_LEVEL || !flying_point {
                    return 0.0;
                }
                if sky_contested {
                    return entry.weight() * SKY_PRESSURE_PENALTY;
                }
                entry.weight()
            } else if flying_point {
                0.0
            } else {
                entry.weight()
            }
        });

        let wave_cooldown = self.wave_cooldown;
        let record = self
            .records
            .entry(point)
            .or_insert_with(|| SpawnPointRecord::fresh(wave_cooldown));
        let Some(choice) = WeightedChoice::from_weights(weights) else {
            record.failures += 1;
            if record.failures % EROSION_CADENCE == 0 {
                record.cooldown = record.cooldown.mul_f64(0.9).max(COOLDOWN_MIN);
            }
            return None;
        };
        let monster = MonsterId::new(choice.sample(&mut self.rng) as u16);
        record.last_used = Some(now);
        record.failures = 0;
        let _ = self.last_spawned.insert(monster, now);
        Some(monster)
    }

    /// Draws the item a freshly spawned monster will release on death, or
    /// `None` when no catalog entry is droppable at the level.
    pub fn pick_drop(&mut self, level: u32) -> Option<ItemId> {
        let weights = catalog::ITEMS
            .iter()
            .map(|spec| catalog::item_drop_weight(spec, level));
        let choice = WeightedChoice::from_weights(weights)?;
        Some(ItemId::new(choice.sample(&mut self.rng) as u16))
    }
}
