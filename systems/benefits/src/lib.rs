#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Periodic permanent-perk grants at wave checkpoints.
//!
//! Every fourth wave level is a benefit checkpoint. The grantor filters the
//! benefit catalog by level window, obtained state, and prerequisite chain,
//! then draws one by weight. Ordinary benefits are marked obtained forever;
//! mode-toggle benefits stay in the pool so later checkpoints can flip the
//! mode back and forth. The obtained set only shrinks on a full game reset.

use horde_core::catalog;
use horde_core::weighted::WeightedChoice;
use horde_core::BenefitId;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Wave levels between benefit checkpoints.
const CHECKPOINT_CADENCE: u32 = 4;

/// Draws one permanent gameplay perk at each wave checkpoint.
#[derive(Clone, Debug)]
pub struct BenefitGrantor {
    rng: ChaCha8Rng,
    obtained: u32,
}

impl BenefitGrantor {
    /// Creates a grantor with its own deterministic random stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            obtained: 0,
        }
    }

    /// Clears the obtained set, keeping the random stream.
    pub fn reset(&mut self) {
        self.obtained = 0;
    }

    /// Whether the given benefit has already been granted this game.
    #[must_use]
    pub fn is_obtained(&self, benefit: BenefitId) -> bool {
        self.obtained & (1 << benefit.get()) != 0
    }

    /// Evaluates the checkpoint for the given wave level.
    ///
    /// Off-cadence levels (and level zero) are a silent no-op. Otherwise one
    /// eligible benefit is chosen by weight, or `None` when nothing is
    /// eligible yet.
    pub fn checkpoint(&mut self, level: u32) -> Option<BenefitId> {
        if level == 0 || level % CHECKPOINT_CADENCE != 0 {
            return None;
        }
        let eligible: Vec<BenefitId> = (0..catalog::BENEFITS.len())
            .map(|index| BenefitId::new(index as u16))
            .filter(|&id| self.eligible(id, level))
            .collect();
        let choice = WeightedChoice::from_weights(eligible.iter().map(|&id| {
            catalog::benefit(id).map_or(0.0, |spec| spec.weight())
        }))?;
        let granted = eligible[choice.sample(&mut self.rng)];
        let spec = catalog::benefit(granted)?;
        if !spec.mode_toggle() {
            self.obtained |= 1 << granted.get();
        }
        Some(granted)
    }

    fn eligible(&self, id: BenefitId, level: u32) -> bool {
        let Some(spec) = catalog::benefit(id) else {
            return false;
        };
        if !spec.window().contains(level) {
            return false;
        }
        if self.is_obtained(id) {
            return false;
        }
        match spec.prerequisite() {
            Some(required) => self.is_obtained(required),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BenefitGrantor;
    use horde_core::catalog;
    use horde_core::BenefitId;

    #[test]
    fn off_cadence_levels_grant_nothing() {
        let mut grantor = BenefitGrantor::new(1);
        for level in [0, 1, 2, 3, 5, 6, 7, 9, 13, 42] {
            assert!(grantor.checkpoint(level).is_none(), "level {level}");
        }
    }

    #[test]
    fn early_checkpoints_can_only_grant_vampire() {
        let mut grantor = BenefitGrantor::new(2);
        // At level 4 only the base vampire window has opened.
        let granted = grantor.checkpoint(4).expect("vampire eligible");
        assert_eq!(granted, BenefitId::new(0));
        assert!(grantor.is_obtained(granted));
    }

    #[test]
    fn obtained_benefits_are_never_regranted() {
        let mut grantor = BenefitGrantor::new(3);
        let mut seen = Vec::new();
        // Run checkpoints far past every window; each ordinary benefit may
        // appear at most once.
        for level in (4..400).step_by(4) {
            if let Some(id) = grantor.checkpoint(level) {
                if !catalog::benefit(id).expect("catalog entry").mode_toggle() {
                    assert!(!seen.contains(&id), "{id:?} granted twice");
                    seen.push(id);
                }
            }
        }
        assert!(seen.len() >= 7, "expected the full ordinary set, got {seen:?}");
    }

    #[test]
    fn upgrade_requires_the_base_vampire_first() {
        let mut grantor = BenefitGrantor::new(4);
        // Level 24 opens the upgrade window, but without base vampire the
        // upgrade must stay ineligible.
        assert!(!grantor.eligible(BenefitId::new(1), 24));
        let base = grantor.checkpoint(4).expect("base vampire");
        assert_eq!(base, BenefitId::new(0));
        assert!(grantor.eligible(BenefitId::new(1), 24));
    }

    #[test]
    fn mode_toggle_stays_in_the_pool() {
        let mut grantor = BenefitGrantor::new(5);
        // Pre-obtain everything except the BFG mode toggle.
        for index in 0..8u16 {
            grantor.obtained |= 1 << index;
        }
        let first = grantor.checkpoint(36).expect("only the toggle is left");
        assert_eq!(first, BenefitId::new(8));
        assert!(!grantor.is_obtained(first));
        let second = grantor.checkpoint(40).expect("toggle still eligible");
        assert_eq!(second, BenefitId::new(8));
    }

    #[test]
    fn reset_reopens_the_pool() {
        let mut grantor = BenefitGrantor::new(6);
        let granted = grantor.checkpoint(4).expect("vampire");
        grantor.reset();
        assert!(!grantor.is_obtained(granted));
    }
}
