#[cfg(test)]
mod tests {
    use super::super::livestock::{BatchId, pending_batch, total_pigs};
    use super::super::market::*;
    use super::super::state::reset_session;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_feed_debits_funds() {
        let state = reset_session();
        let next = buy_feed(&state, dec!(100)).unwrap();

        assert_eq!(next.funds, dec!(9500));
        assert_eq!(next.feed_stock_kg, dec!(100));
    }

    #[test]
    fn test_buy_feed_rejects_non_positive_amounts() {
        let state = reset_session();
        assert_eq!(buy_feed(&state, dec!(0)), Err(MarketError::InvalidAmount));
        assert_eq!(buy_feed(&state, dec!(-1)), Err(MarketError::InvalidAmount));
    }

    #[test]
    fn test_buy_feed_insufficient_funds() {
        let state = reset_session();
        let before = state.clone();

        let err = buy_feed(&state, dec!(2000.01)).unwrap_err();
        assert_eq!(
            err,
            MarketError::InsufficientFunds {
                cost: dec!(10000.05),
                available: dec!(10000)
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_buy_feed_huge_amount_is_unaffordable() {
        let state = reset_session();
        let err = buy_feed(&state, Decimal::MAX).unwrap_err();
        assert_eq!(
            err,
            MarketError::InsufficientFunds {
                cost: Decimal::MAX,
                available: dec!(10000)
            }
        );
    }

    #[test]
    fn test_buy_pigs_huge_price_is_unaffordable() {
        let mut state = reset_session();
        state.pig_price_per_head = Decimal::MAX;
        assert!(matches!(
            buy_pigs(&state, 2),
            Err(MarketError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_buy_feed_spends_exactly_all_funds() {
        let state = reset_session();
        let next = buy_feed(&state, dec!(2000)).unwrap();
        assert_eq!(next.funds, dec!(0));
    }

    #[test]
    fn test_buy_pigs_creates_pending_batch() {
        let state = reset_session();
        let next = buy_pigs(&state, 5).unwrap();

        assert_eq!(next.funds, dec!(9250));
        let batch = pending_batch(&next).unwrap();
        assert_eq!(batch.id, BatchId(1));
        assert_eq!(batch.count, 5);
        assert_eq!(batch.unit_price, dec!(150));
        assert_eq!(batch.age_days, 0);
    }

    #[test]
    fn test_buy_pigs_replaces_pending_batch() {
        let state = reset_session();
        let first = buy_pigs(&state, 5).unwrap();
        let second = buy_pigs(&first, 8).unwrap();

        assert_eq!(second.batches.len(), 1);
        assert_eq!(total_pigs(&second), 8);
        assert_eq!(second.funds, dec!(8800));
    }

    #[test]
    fn test_replacement_counts_refund_toward_affordability() {
        let mut state = reset_session();
        state.funds = dec!(1500);
        let bought = buy_pigs(&state, 10).unwrap();
        assert_eq!(bought.funds, dec!(0));

        // 11 head cost 1650, the refund only brings funds back to 1500
        assert!(matches!(
            buy_pigs(&bought, 11),
            Err(MarketError::InsufficientFunds { .. })
        ));
        let smaller = buy_pigs(&bought, 4).unwrap();
        assert_eq!(smaller.funds, dec!(900));
    }

    #[test]
    fn test_cancel_round_trip() {
        let state = reset_session();
        let cancelled = buy_pigs(&buy_pigs(&state, 5).unwrap(), 0).unwrap();
        assert_eq!(cancelled, state);
    }

    #[test]
    fn test_cancel_without_pending_batch_is_invalid() {
        let state = reset_session();
        assert_eq!(buy_pigs(&state, 0), Err(MarketError::InvalidAmount));
        assert_eq!(buy_pigs(&state, -3), Err(MarketError::InvalidAmount));
    }

    #[test]
    fn test_negative_count_with_pending_batch_is_invalid() {
        let state = buy_pigs(&reset_session(), 5).unwrap();
        assert_eq!(buy_pigs(&state, -1), Err(MarketError::InvalidAmount));
    }

    #[test]
    fn test_buy_pigs_insufficient_funds_leaves_state() {
        let state = buy_pigs(&reset_session(), 5).unwrap();
        let before = state.clone();

        let err = buy_pigs(&state, 100).unwrap_err();
        assert_eq!(
            err,
            MarketError::InsufficientFunds {
                cost: dec!(15000),
                available: dec!(10000)
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_aged_batches_are_not_refunded() {
        let mut state = buy_pigs(&reset_session(), 5).unwrap();
        state.batches[0].age_days = 7;
        state.week = 2;

        assert_eq!(buy_pigs(&state, 0), Err(MarketError::InvalidAmount));
        let next = buy_pigs(&state, 2).unwrap();
        assert_eq!(next.batches.len(), 2);
        assert_eq!(total_pigs(&next), 7);
        assert_eq!(pending_batch(&next).map(|b| b.id), Some(BatchId(2)));
    }
}
