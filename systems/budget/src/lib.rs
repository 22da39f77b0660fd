#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawn budget planning for the horde wave director.
//!
//! At every wave boundary the scheduler asks the planner for a [`WavePlan`]:
//! how many monsters the wave owes, how quickly they trickle in, and how long
//! individual spawn points rest between uses. The plan is a pure function of
//! map size, wave level, and session difficulty, so replaying the same inputs
//! always yields the same wave shape.

use std::time::Duration;

use horde_core::{MapSize, SessionView};

/// Hard floor for the spawn interval; pacing never tightens past this.
const INTERVAL_FLOOR: Duration = Duration::from_millis(400);

/// Base cooldown applied to each spawn point after a successful use.
const COOLDOWN_BASE: Duration = Duration::from_millis(2_500);

/// Hard floor for the spawn point cooldown.
const COOLDOWN_FLOOR: Duration = Duration::from_millis(1_000);

/// Wave levels per tightening step; each step shaves 10% off the pacing.
const TIGHTEN_CADENCE: u32 = 3;

/// Immutable pacing and quota plan for one wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavePlan {
    /// Number of monsters this wave owes before cleanup can begin.
    pub quota: u32,
    /// Lower bound of the random delay between consecutive spawns.
    pub interval_min: Duration,
    /// Upper bound of the random delay between consecutive spawns.
    pub interval_max: Duration,
    /// Rest period a spawn point serves after a successful use.
    pub spawn_point_cooldown: Duration,
}

/// Computes the spawn quota and pacing for each wave level.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpawnBudgetPlanner;

impl SpawnBudgetPlanner {
    /// Builds the plan for the given wave level on the given map.
    #[must_use]
    pub fn plan(&self, size: MapSize, level: u32, session: &SessionView) -> WavePlan {
        let tighten_steps = level / TIGHTEN_CADENCE;
        let (interval_min, interval_max) = spawn_interval(session, level, tighten_steps);
        WavePlan {
            quota: self.quota(size, level, session),
            interval_min,
            interval_max,
            spawn_point_cooldown: tighten(COOLDOWN_BASE, tighten_steps).max(COOLDOWN_FLOOR),
        }
    }

    /// Quota formula: per-size base plus a level-tier increment plus a flat
    /// difficulty bonus, with a human-count surge every third level, clamped
    /// to the map's monster ceiling. An operator override skips all of it.
    #[must_use]
    pub fn quota(&self, size: MapSize, level: u32, session: &SessionView) -> u32 {
        if let Some(count) = session.monster_override {
            return count;
        }
        let base = match size {
            MapSize::Small => 6 + level,
            MapSize::Medium => 8 + level,
            MapSize::Large => 27 + 3 * level / 2,
        };
        let increment = tier_increment(size, level);
        let bonus = difficulty_bonus(size, session);
        let mut quota = base + increment + bonus;
        if level > 0 && level % TIGHTEN_CADENCE == 0 {
            quota += surge_per_human(size) * session.humans;
        }
        quota.min(size.monster_limit())
    }
}

/// Level-tier increment folded into every quota.
const fn tier_increment(size: MapSize, level: u32) -> u32 {
    match size {
        MapSize::Small => {
            if level <= 6 {
                6
            } else if level <= 14 {
                8
            } else {
                10
            }
        }
        MapSize::Medium => {
            if level <= 6 {
                6
            } else if level <= 14 {
                9
            } else {
                12
            }
        }
        MapSize::Large => {
            if level <= 6 {
                8
            } else if level <= 14 {
                12
            } else {
                16
            }
        }
    }
}

/// Flat bonus while a harder difficulty tier is active. Insane outranks
/// chaotic when both are set.
const fn difficulty_bonus(size: MapSize, session: &SessionView) -> u32 {
    if session.insane {
        match size {
            MapSize::Small => 5,
            MapSize::Medium => 9,
            MapSize::Large => 16,
        }
    } else if session.chaotic > 0 {
        match size {
            MapSize::Small => 3,
            MapSize::Medium => 6,
            MapSize::Large => 8,
        }
    } else {
        0
    }
}

/// Extra monsters owed per human participant on every third level.
const fn surge_per_human(size: MapSize) -> u32 {
    match size {
        MapSize::Small => 3,
        MapSize::Medium => 5,
        MapSize::Large => 8,
    }
}

/// Base interval range by difficulty tier, then tightened per level step.
/// Chaotic 2 and early insane waves spread spawns out; chaotic 1 and late
/// insane waves compress them.
fn spawn_interval(session: &SessionView, level: u32, tighten_steps: u32) -> (Duration, Duration) {
    let (lo, hi) = if session.chaotic == 2 || (session.insane && level < 20) {
        (Duration::from_millis(700), Duration::from_millis(1_200))
    } else if session.chaotic == 1 || (session.insane && level >= 20) {
        (Duration::from_millis(500), Duration::from_millis(700))
    } else {
        (Duration::from_millis(700), Duration::from_millis(900))
    };
    let lo = tighten(lo, tighten_steps).max(INTERVAL_FLOOR);
    let hi = tighten(hi, tighten_steps).max(lo);
    (lo, hi)
}

/// Shrinks a duration by 10% per step.
fn tighten(duration: Duration, steps: u32) -> Duration {
    let factor = 0.9_f64.powi(steps.min(64) as i32);
    duration.mul_f64(factor)
}
