//! Weighted random selection with a no-immediate-repeat rule.
//!
//! Selection is weighted by category: an item's chance is its category
//! weight over the total weight of all active items. The engine remembers
//! the previous winner and resamples when the same item comes up twice in
//! a row, except in degenerate pools where only one outcome is possible.

use crate::models::{Item, ItemId, Pool, RgbColor};
use anyhow::{bail, Result};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Result of a single draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    /// Stable id of the winning item
    pub id: ItemId,
    /// Winning item name
    pub name: String,
    /// Category the winner references
    pub category: String,
    /// Category color (fallback white when the reference dangles)
    pub color: RgbColor,
}

/// Draw engine holding the RNG and the previous winner.
///
/// One engine per session: the repeat rule only spans draws made through
/// the same engine.
#[derive(Debug)]
pub struct DrawEngine {
    rng: StdRng,
    last: Option<ItemId>,
}

impl DrawEngine {
    /// Creates an engine seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            last: None,
        }
    }

    /// Creates an engine with a fixed seed for reproducible sequences.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last: None,
        }
    }

    /// The previous winner, if any draw has completed yet.
    #[must_use]
    pub const fn last_drawn(&self) -> Option<ItemId> {
        self.last
    }

    /// Draws one winner from the pool's active items.
    ///
    /// Degenerate pools short-circuit: a single active item is returned
    /// unconditionally (even at zero weight), and a single item holding
    /// all the weight is returned without the repeat check. The resample
    /// loop therefore only runs when at least two distinct winners are
    /// possible, which guarantees it terminates.
    ///
    /// Never mutates the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no item is active, or if several items are
    /// active but every one of them has zero weight.
    pub fn draw(&mut self, pool: &Pool) -> Result<DrawOutcome> {
        let candidates: Vec<_> = pool.active_items().collect();
        if candidates.is_empty() {
            bail!("No active items to draw from");
        }

        if candidates.len() == 1 {
            return Ok(self.record(pool, candidates[0]));
        }

        let weighted: Vec<_> = candidates
            .iter()
            .copied()
            .filter(|item| pool.item_weight(item) > 0)
            .collect();

        match weighted.len() {
            0 => bail!("All active items have zero weight"),
            1 => return Ok(self.record(pool, weighted[0])),
            _ => {}
        }

        let dist = WeightedIndex::new(weighted.iter().map(|item| pool.item_weight(item)))
            .map_err(|e| anyhow::anyhow!("Failed to build weighted distribution: {e}"))?;

        let mut attempts = 1u32;
        let winner = loop {
            let pick = weighted[dist.sample(&mut self.rng)];
            match self.last {
                Some(last) if pick.id == last => attempts += 1,
                _ => break pick,
            }
        };
        tracing::debug!("selected '{}' after {} sample(s)", winner.name, attempts);

        Ok(self.record(pool, winner))
    }

    fn record(&mut self, pool: &Pool, item: &Item) -> DrawOutcome {
        self.last = Some(item.id);
        DrawOutcome {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            color: pool.item_color(item),
        }
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new()
    }
}
