//! A running game: the simulation state plus the grid, the hired manager, the
//! random source and the message log.
//!
//! Each method runs one pure engine operation and commits its result, or
//! leaves everything untouched when the operation is rejected.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::path::Path;
use thiserror::Error;

use crate::allocation::{AllocationError, AllocationRequest, Grid, allocate};
use crate::catalog::{ManagerProfile, default_manager, manager_by_key};
use crate::events::{EventLogger, EventType, PurchaseItem};
use crate::export::{grid_to_csv, write_csv};
use crate::livestock::{pending_batch, total_pigs};
use crate::market::{MarketError, buy_feed, buy_pigs};
use crate::scenario::{Action, Scenario, ScenarioError, SimulationParameters};
use crate::state::SimulationState;
use crate::summary::{FarmSummary, pen_capacity};
use crate::turn::{TurnOutcome, end_turn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Market(#[from] MarketError),
    #[error("unknown manager: {0}")]
    UnknownManager(String),
}

pub struct Session {
    params: SimulationParameters,
    state: SimulationState,
    grid: Grid,
    land: AllocationRequest,
    manager: ManagerProfile,
    rng: StdRng,
    logger: EventLogger,
}

impl Session {
    pub fn new(params: SimulationParameters, seed: u64) -> Self {
        let state = SimulationState::initial(&params);
        let land = AllocationRequest {
            total: params.default_total_area,
            ..Default::default()
        };
        Self {
            params,
            state,
            grid: Grid::empty(),
            land,
            manager: default_manager(),
            rng: StdRng::seed_from_u64(seed),
            logger: EventLogger::new(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn land(&self) -> &AllocationRequest {
        &self.land
    }

    pub fn manager(&self) -> &ManagerProfile {
        &self.manager
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn events(&self) -> &EventLogger {
        &self.logger
    }

    /// The message log, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.logger.get_events().iter().map(|e| e.to_string()).collect()
    }

    pub fn summary(&self) -> FarmSummary {
        FarmSummary::new(&self.state, &self.land)
    }

    /// Rebuilds the grid. On over-allocation the previous grid is kept.
    pub fn generate_grid(&mut self, request: AllocationRequest) -> Result<(), SessionError> {
        match allocate(&request) {
            Ok(grid) => {
                info!(
                    "Generated {} cell grid ({} unused)",
                    grid.len(),
                    request.unused_units()
                );
                self.grid = grid;
                self.land = request;
                self.logger.log(
                    self.state.week,
                    EventType::GridGenerated {
                        total: request.total,
                        corn: request.corn,
                        grass: request.grass,
                        soy: request.soy,
                        pig: request.pig,
                    },
                );
                self.check_pen_capacity();
                Ok(())
            }
            Err(err) => {
                warn!("Allocation rejected: {}", err);
                let AllocationError::OverAllocated { requested, total } = &err;
                self.logger.log(
                    self.state.week,
                    EventType::AllocationRejected {
                        requested: *requested,
                        total: *total,
                    },
                );
                Err(err.into())
            }
        }
    }

    pub fn buy_feed(&mut self, amount_kg: Decimal) -> Result<(), SessionError> {
        match buy_feed(&self.state, amount_kg) {
            Ok(next) => {
                let cost = self.state.funds - next.funds;
                debug!("Bought {} kg feed for {}", amount_kg, cost);
                self.state = next;
                self.logger.log(
                    self.state.week,
                    EventType::FeedPurchased {
                        amount_kg,
                        cost,
                        funds_after: self.state.funds,
                    },
                );
                Ok(())
            }
            Err(err) => Err(self.reject(PurchaseItem::Feed, err)),
        }
    }

    /// Sets this week's pig order. 0 cancels it.
    pub fn buy_pigs(&mut self, count: i64) -> Result<(), SessionError> {
        let previous = pending_batch(&self.state).cloned();

        match buy_pigs(&self.state, count) {
            Ok(next) => {
                self.state = next;
                let event = match (pending_batch(&self.state), previous) {
                    (Some(batch), replaced) => EventType::PigsPurchased {
                        count: batch.count,
                        unit_price: batch.unit_price,
                        replaced: replaced.map(|b| b.count),
                    },
                    (None, Some(cancelled)) => EventType::PigPurchaseCancelled {
                        count: cancelled.count,
                        refund: cancelled.cost(),
                    },
                    (None, None) => return Ok(()),
                };
                debug!("Pig order now: {:?}", event);
                self.logger.log(self.state.week, event);
                self.check_pen_capacity();
                Ok(())
            }
            Err(err) => Err(self.reject(PurchaseItem::Pigs, err)),
        }
    }

    pub fn select_manager(&mut self, key: &str) -> Result<(), SessionError> {
        let manager =
            manager_by_key(key).ok_or_else(|| SessionError::UnknownManager(key.to_string()))?;
        info!("Hired manager {}", manager.key);
        self.logger.log(
            self.state.week,
            EventType::ManagerSelected {
                key: manager.key.clone(),
            },
        );
        self.manager = manager;
        Ok(())
    }

    pub fn end_turn(&mut self) -> TurnOutcome {
        let outcome = end_turn(&self.state, &self.manager, &self.params, &mut self.rng);
        let week = self.state.week;

        if outcome.had_shortage() {
            warn!(
                "Week {}: feed shortage, needed {} kg but had {} kg",
                week, outcome.feed_needed_kg, self.state.feed_stock_kg
            );
            self.logger.log(
                week,
                EventType::FeedShortage {
                    needed_kg: outcome.feed_needed_kg,
                    available_kg: self.state.feed_stock_kg,
                },
            );
        }

        self.state = outcome.state.clone();
        info!(
            "Week {} ended: growth {}, weight {} kg, feed price {}",
            week, self.state.crop_growth, self.state.average_pig_weight_kg, self.state.feed_price_per_kg
        );
        self.logger.log(
            week,
            EventType::TurnEnded {
                day: self.state.days_elapsed,
                crop_growth: self.state.crop_growth,
                pig_weight_kg: self.state.average_pig_weight_kg,
                feed_price: self.state.feed_price_per_kg,
                pig_price: self.state.pig_price_per_head,
                feed_consumed_kg: outcome.feed_consumed_kg,
            },
        );

        outcome
    }

    /// Back to the starting farm. The random source and message log carry on.
    pub fn reset(&mut self) {
        info!("Resetting farm");
        self.state = SimulationState::initial(&self.params);
        self.grid = Grid::empty();
        self.land = AllocationRequest {
            total: self.params.default_total_area,
            ..Default::default()
        };
        self.manager = default_manager();
        self.logger.log(self.state.week, EventType::SessionReset);
    }

    pub fn export_csv(&self) -> String {
        grid_to_csv(&self.grid)
    }

    pub fn write_csv(&self, path: &Path) -> std::io::Result<()> {
        write_csv(&self.grid, path)
    }

    pub fn apply(&mut self, action: &Action) -> Result<(), SessionError> {
        debug!("Applying action: {}", action);
        match action {
            Action::Allocate(request) => self.generate_grid(*request),
            Action::BuyFeed { amount_kg } => self.buy_feed(*amount_kg),
            Action::BuyPigs { count } => self.buy_pigs(*count),
            Action::SelectManager { key } => self.select_manager(key),
            Action::EndTurn { count } => {
                for _ in 0..*count {
                    self.end_turn();
                }
                Ok(())
            }
            Action::Reset => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Plays a scenario's script. Rejected actions are logged and skipped.
    pub fn from_scenario(scenario: &Scenario, seed: u64) -> Result<Self, ScenarioError> {
        scenario.validate()?;
        info!("Running scenario '{}' with seed {}", scenario.name, seed);

        let mut session = Self::new(scenario.parameters.clone(), seed);
        for action in &scenario.script {
            if let Err(err) = session.apply(action) {
                warn!("Scenario action '{}' rejected: {}", action, err);
            }
        }
        Ok(session)
    }

    fn reject(&mut self, item: PurchaseItem, err: MarketError) -> SessionError {
        warn!("{:?} purchase rejected: {}", item, err);
        self.logger.log(
            self.state.week,
            EventType::PurchaseRejected {
                item,
                reason: err.to_string(),
            },
        );
        err.into()
    }

    fn check_pen_capacity(&mut self) {
        let pigs = total_pigs(&self.state);
        let capacity = pen_capacity(self.land.pig);
        if pigs > capacity {
            warn!("{} pigs exceed pen capacity of {}", pigs, capacity);
            self.logger
                .log(self.state.week, EventType::PenOvercrowded { pigs, capacity });
        }
    }
}
