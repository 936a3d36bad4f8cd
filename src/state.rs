use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::livestock::PigBatch;
use crate::scenario::SimulationParameters;

/// The whole mutable simulation. Every engine operation reads one of these and
/// produces the next; callers replace their copy wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub funds: Decimal,
    pub feed_stock_kg: Decimal,
    /// Kept within the configured feed price bounds.
    pub feed_price_per_kg: Decimal,
    /// 0 is freshly planted, 1 is fully mature.
    pub crop_growth: Decimal,
    pub average_pig_weight_kg: Decimal,
    pub week: u32,
    pub days_elapsed: u32,
    pub pig_price_per_head: Decimal,
    pub batches: Vec<PigBatch>,
}

impl SimulationState {
    pub fn initial(params: &SimulationParameters) -> Self {
        Self {
            funds: params.initial_funds,
            feed_stock_kg: Decimal::ZERO,
            feed_price_per_kg: params.initial_feed_price,
            crop_growth: Decimal::ZERO,
            average_pig_weight_kg: params.initial_pig_weight_kg,
            week: 1,
            days_elapsed: crate::catalog::DAYS_PER_WEEK,
            pig_price_per_head: params.initial_pig_price,
            batches: Vec::new(),
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        reset_session()
    }
}

/// The canonical starting state with default parameters.
pub fn reset_session() -> SimulationState {
    SimulationState::initial(&SimulationParameters::default())
}
