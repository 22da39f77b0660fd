//! Reusable weighted random choice over a cumulative-weight table.
//!
//! Every weighted draw in the director funnels through this utility: build
//! the table from the eligible entries' weights, draw a uniform value over
//! the total, and binary-search the first entry whose cumulative weight
//! exceeds the draw. Entries with non-positive weight are never selected.

use rand::Rng;

/// Cumulative-weight table prepared for repeated sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedChoice {
    cumulative: Vec<f32>,
}

impl WeightedChoice {
    /// Builds the table from an ordered weight sequence. Returns `None` when
    /// the total weight is not positive, meaning no entry can be selected.
    #[must_use]
    pub fn from_weights<I>(weights: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut cumulative = Vec::new();
        let mut total = 0.0_f32;
        for weight in weights {
            if weight.is_finite() && weight > 0.0 {
                total += weight;
            }
            cumulative.push(total);
        }
        if total <= 0.0 {
            return None;
        }
        Some(Self { cumulative })
    }

    /// Sum of all positive weights in the table.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Number of entries in the table, selectable or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Reports whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Draws one entry index, weighted by the table.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let draw = rng.gen_range(0.0..self.total());
        let index = self.cumulative.partition_point(|&bound| bound <= draw);
        index.min(self.cumulative.len() - 1)
    }
}
