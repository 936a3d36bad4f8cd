//! Weekly turn resolution: feeding, pig growth, crop growth, price drift and
//! the calendar.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::{DAYS_PER_WEEK, ManagerProfile};
use crate::livestock::{advance_age, total_pigs};
use crate::scenario::SimulationParameters;
use crate::state::SimulationState;

pub const FEED_SHORTAGE_WARNING: &str = "Not enough feed! Pig growth reduced.";

/// Resolution of random draws: one ten-thousandth of the range.
const DRAW_STEPS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub state: SimulationState,
    /// Advisory only. A shortage still produces a valid next state.
    pub warning: Option<String>,
    pub feed_needed_kg: Decimal,
    pub feed_consumed_kg: Decimal,
    pub weight_gain_kg: Decimal,
}

impl TurnOutcome {
    pub fn had_shortage(&self) -> bool {
        self.warning.is_some()
    }
}

/// Uniform draw in `[min, max]` without going through floats.
fn uniform_decimal<R: Rng + ?Sized>(rng: &mut R, min: Decimal, max: Decimal) -> Decimal {
    let step = rng.random_range(0..=DRAW_STEPS);
    min + (max - min) * Decimal::from(step) / Decimal::from(DRAW_STEPS)
}

/// Bounded random walk of the feed price.
pub fn next_feed_price<R: Rng + ?Sized>(
    price: Decimal,
    params: &SimulationParameters,
    rng: &mut R,
) -> Decimal {
    let factor = uniform_decimal(rng, params.feed_drift_min, params.feed_drift_max);
    (price * factor)
        .round_dp(2)
        .max(params.feed_price_min)
        .min(params.feed_price_max)
}

/// Fresh pig price, independent of the previous one.
pub fn next_pig_price<R: Rng + ?Sized>(params: &SimulationParameters, rng: &mut R) -> Decimal {
    uniform_decimal(rng, params.pig_price_min, params.pig_price_max).round()
}

/// Advances the simulation by one week. Never fails.
pub fn end_turn<R: Rng + ?Sized>(
    state: &SimulationState,
    manager: &ManagerProfile,
    params: &SimulationParameters,
    rng: &mut R,
) -> TurnOutcome {
    let mut next = state.clone();

    let feed_needed = Decimal::from(total_pigs(state)) * params.feed_per_pig_per_week;
    let full_gain = params.base_weight_gain_kg * manager.pig_multiplier;
    let (feed_consumed, weight_gain, warning) = if state.feed_stock_kg < feed_needed {
        (
            state.feed_stock_kg,
            full_gain * params.shortage_growth_factor,
            Some(FEED_SHORTAGE_WARNING.to_string()),
        )
    } else {
        (feed_needed, full_gain, None)
    };
    next.feed_stock_kg -= feed_consumed;
    next.average_pig_weight_kg += weight_gain;

    next.crop_growth = (state.crop_growth + params.crop_growth_rate * manager.crop_multiplier)
        .min(dec!(1))
        .max(state.crop_growth);

    next.feed_price_per_kg = next_feed_price(state.feed_price_per_kg, params, rng);
    next.pig_price_per_head = next_pig_price(params, rng);

    next.week += 1;
    next.days_elapsed += DAYS_PER_WEEK;

    TurnOutcome {
        state: advance_age(&next),
        warning,
        feed_needed_kg: feed_needed,
        feed_consumed_kg: feed_consumed,
        weight_gain_kg: weight_gain,
    }
}
