//! Read-only figures a view shows next to the grid.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::allocation::AllocationRequest;
use crate::catalog::{CELL_SIZE_M2, CROP_YIELD_KG_PER_UNIT, PIG_SPACE_PER_PIG_M2};
use crate::livestock::total_pigs;
use crate::state::SimulationState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmSummary {
    pub total_land_m2: u64,
    pub unused_units: i64,
    pub total_pigs: u64,
    pub pen_capacity: u64,
    pub corn_kg: u64,
    pub grass_kg: u64,
    pub soy_kg: u64,
    pub funds: Decimal,
    pub feed_stock_kg: Decimal,
    pub feed_price_per_kg: Decimal,
    pub pig_price_per_head: Decimal,
    pub average_pig_weight_kg: Decimal,
    pub crop_growth: Decimal,
    pub week: u32,
    pub day: u32,
}

/// How many pigs `pig_units` of pens hold.
pub fn pen_capacity(pig_units: u32) -> u64 {
    pig_units as u64 * (CELL_SIZE_M2 / PIG_SPACE_PER_PIG_M2)
}

/// Standing yield of `units` at the current growth fraction, in whole kg.
pub fn crop_yield_kg(units: u32, crop_growth: Decimal) -> u64 {
    (Decimal::from(units) * CROP_YIELD_KG_PER_UNIT * crop_growth)
        .round()
        .to_u64()
        .unwrap_or(0)
}

impl FarmSummary {
    pub fn new(state: &SimulationState, land: &AllocationRequest) -> Self {
        Self {
            total_land_m2: land.total as u64 * CELL_SIZE_M2,
            unused_units: land.unused_units(),
            total_pigs: total_pigs(state),
            pen_capacity: pen_capacity(land.pig),
            corn_kg: crop_yield_kg(land.corn, state.crop_growth),
            grass_kg: crop_yield_kg(land.grass, state.crop_growth),
            soy_kg: crop_yield_kg(land.soy, state.crop_growth),
            funds: state.funds,
            feed_stock_kg: state.feed_stock_kg,
            feed_price_per_kg: state.feed_price_per_kg,
            pig_price_per_head: state.pig_price_per_head,
            average_pig_weight_kg: state.average_pig_weight_kg,
            crop_growth: state.crop_growth,
            week: state.week,
            day: state.days_elapsed,
        }
    }

    pub fn is_overcrowded(&self) -> bool {
        self.total_pigs > self.pen_capacity
    }
}

impl fmt::Display for FarmSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Farm Summary")?;
        writeln!(f, "  Total land: {} m² ({} units unused)", self.total_land_m2, self.unused_units)?;
        writeln!(f, "  Total pigs: {} (pen capacity {})", self.total_pigs, self.pen_capacity)?;
        writeln!(
            f,
            "  Corn: {} kg | Grass: {} kg | Soy: {} kg",
            self.corn_kg, self.grass_kg, self.soy_kg
        )?;
        writeln!(f, "  Funds: ${}", self.funds)?;
        writeln!(
            f,
            "  Feed: {} kg | Price: ${}/kg | Pigs: ${}/head",
            self.feed_stock_kg, self.feed_price_per_kg, self.pig_price_per_head
        )?;
        write!(
            f,
            "  Week {} | Day {} | Crop Growth {}% | Pig Weight {} kg",
            self.week,
            self.day,
            (self.crop_growth * Decimal::ONE_HUNDRED).round(),
            self.average_pig_weight_kg.round_dp(1)
        )
    }
}
