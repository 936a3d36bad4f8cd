//! Pig batches: cohorts bought together, sharing a purchase price and age.
//!
//! A batch aged 0 days is the current week's pending purchase. There is at
//! most one, and it can be amended or refunded until the turn ends.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::DAYS_PER_WEEK;
use crate::state::SimulationState;

/// Batches are keyed by the week they were bought in. Only one batch can be
/// pending per week, so the key is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BatchId(pub u32);

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch-w{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PigBatch {
    pub id: BatchId,
    pub count: u32,
    /// Price per head paid at purchase.
    pub unit_price: Decimal,
    pub age_days: u32,
}

impl PigBatch {
    pub fn cost(&self) -> Decimal {
        Decimal::from(self.count) * self.unit_price
    }

    pub fn is_pending(&self) -> bool {
        self.age_days == 0
    }
}

pub fn total_pigs(state: &SimulationState) -> u64 {
    state.batches.iter().map(|b| b.count as u64).sum()
}

/// This week's amendable purchase, if any.
pub fn pending_batch(state: &SimulationState) -> Option<&PigBatch> {
    state.batches.iter().find(|b| b.is_pending())
}

/// Ages every batch by one week. Batches are never removed here.
pub fn advance_age(state: &SimulationState) -> SimulationState {
    let mut next = state.clone();
    for batch in next.batches.iter_mut() {
        batch.age_days += DAYS_PER_WEEK;
    }
    next
}
