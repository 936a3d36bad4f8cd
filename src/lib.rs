pub mod allocation;
pub mod catalog;
pub mod cli;
pub mod events;
pub mod export;
pub mod livestock;
pub mod market;
pub mod query;
pub mod scenario;
pub mod session;
pub mod state;
pub mod summary;
pub mod turn;

pub use allocation::{AllocationError, AllocationRequest, Grid, allocate};
pub use catalog::{LandUse, ManagerProfile};
pub use market::{MarketError, buy_feed, buy_pigs};
pub use session::Session;
pub use state::{SimulationState, reset_session};
pub use turn::{TurnOutcome, end_turn};

#[cfg(test)]
mod market_test;
#[cfg(test)]
mod scenario_test;
