//! Funds-for-goods purchases of feed and pigs.
//!
//! Both operations are all-or-nothing: on error the caller keeps the state it
//! passed in.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::livestock::{BatchId, PigBatch, pending_batch};
use crate::state::SimulationState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    #[error("enter a valid amount")]
    InvalidAmount,
    #[error("not enough funds: cost {cost}, available {available}")]
    InsufficientFunds { cost: Decimal, available: Decimal },
}

pub fn buy_feed(state: &SimulationState, amount_kg: Decimal) -> Result<SimulationState, MarketError> {
    if amount_kg <= Decimal::ZERO {
        return Err(MarketError::InvalidAmount);
    }

    let cost = amount_kg
        .checked_mul(state.feed_price_per_kg)
        .ok_or(MarketError::InsufficientFunds {
            cost: Decimal::MAX,
            available: state.funds,
        })?;
    if cost > state.funds {
        return Err(MarketError::InsufficientFunds {
            cost,
            available: state.funds,
        });
    }
    let feed_stock_kg = state
        .feed_stock_kg
        .checked_add(amount_kg)
        .ok_or(MarketError::InvalidAmount)?;

    let mut next = state.clone();
    next.funds -= cost;
    next.feed_stock_kg = feed_stock_kg;
    Ok(next)
}

/// Sets this week's pig purchase to `requested` head.
///
/// A pending purchase is replaced, not added to: it is refunded first and the
/// new order is priced at the current market price. A request of 0 cancels
/// the pending purchase.
pub fn buy_pigs(state: &SimulationState, requested: i64) -> Result<SimulationState, MarketError> {
    let pending = pending_batch(state);

    if requested < 0 {
        return Err(MarketError::InvalidAmount);
    }
    if requested == 0 {
        return match pending {
            Some(batch) => {
                let mut next = state.clone();
                next.funds += batch.cost();
                next.batches.retain(|b| !b.is_pending());
                Ok(next)
            }
            None => Err(MarketError::InvalidAmount),
        };
    }

    let count = u32::try_from(requested).map_err(|_| MarketError::InvalidAmount)?;
    let refund = pending.map(PigBatch::cost).unwrap_or(Decimal::ZERO);
    let available = state.funds.saturating_add(refund);
    let cost = Decimal::from(count)
        .checked_mul(state.pig_price_per_head)
        .ok_or(MarketError::InsufficientFunds {
            cost: Decimal::MAX,
            available,
        })?;
    if cost > available {
        return Err(MarketError::InsufficientFunds { cost, available });
    }

    let mut next = state.clone();
    next.batches.retain(|b| !b.is_pending());
    next.funds = available - cost;
    next.batches.push(PigBatch {
        id: BatchId(state.week),
        count,
        unit_price: state.pig_price_per_head,
        age_days: 0,
    });
    Ok(next)
}
