#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Boss selection with anti-repetition memory.
//!
//! Boss waves draw from the size-class boss catalog (or a per-map override
//! list), restricted to the entries whose level window matches. A bounded
//! ring of recently chosen bosses is filtered out first so players do not
//! face the same champion twice in a row; if that filter empties the pool the
//! ring is cleared and the draw retries, guaranteeing forward progress.

use std::collections::VecDeque;

use horde_core::catalog;
use horde_core::{BossId, MapProfile};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// How many recent bosses are remembered for repetition avoidance.
const RECENT_BOUND: usize = 3;

/// Chooses which boss, if any, a boss wave should field.
#[derive(Clone, Debug)]
pub struct BossDirector {
    rng: ChaCha8Rng,
    recent: VecDeque<BossId>,
}

impl BossDirector {
    /// Creates a director with its own deterministic random stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            recent: VecDeque::with_capacity(RECENT_BOUND),
        }
    }

    /// Forgets the recent-boss ring, keeping the random stream.
    pub fn reset(&mut self) {
        self.recent.clear();
    }

    /// Recently chosen bosses, most recent last.
    #[must_use]
    pub fn recent(&self) -> impl Iterator<Item = BossId> + '_ {
        self.recent.iter().copied()
    }

    /// Picks a boss for the given map and wave level, or `None` when the map
    /// cannot host one.
    pub fn pick(&mut self, profile: &MapProfile, level: u32) -> Option<BossId> {
        if profile.boss_arena().is_none() {
            tracing::warn!(map = profile.name(), "boss wave skipped, no arena origin");
            return None;
        }
        let pool = catalog::boss_override(profile.name())
            .unwrap_or_else(|| catalog::bosses_for(profile.size()));
        let eligible: Vec<BossId> = pool
            .iter()
            .copied()
            .filter(|&id| {
                catalog::boss(id).is_some_and(|spec| spec.window().contains(level))
            })
            .collect();
        if eligible.is_empty() {
            return None;
        }
        let mut candidates: Vec<BossId> = eligible
            .iter()
            .copied()
            .filter(|id| !self.recent.contains(id))
            .collect();
        if candidates.is_empty() {
            self.recent.clear();
            candidates = eligible;
        }
        let choice = candidates[self.rng.gen_range(0..candidates.len())];
        self.remember(choice);
        Some(choice)
    }

    fn remember(&mut self, boss: BossId) {
        self.recent.push_back(boss);
        while self.recent.len() > RECENT_BOUND {
            let _ = self.recent.pop_front();
        }
    }
}
