use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub week: u32,
    pub event_type: EventType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventType {
    GridGenerated {
        total: u32,
        corn: u32,
        grass: u32,
        soy: u32,
        pig: u32,
    },
    AllocationRejected {
        requested: u64,
        total: u32,
    },
    FeedPurchased {
        amount_kg: Decimal,
        cost: Decimal,
        funds_after: Decimal,
    },
    PigsPurchased {
        count: u32,
        unit_price: Decimal,
        replaced: Option<u32>,
    },
    PigPurchaseCancelled {
        count: u32,
        refund: Decimal,
    },
    PurchaseRejected {
        item: PurchaseItem,
        reason: String,
    },
    ManagerSelected {
        key: String,
    },
    FeedShortage {
        needed_kg: Decimal,
        available_kg: Decimal,
    },
    PenOvercrowded {
        pigs: u64,
        capacity: u64,
    },
    TurnEnded {
        day: u32,
        crop_growth: Decimal,
        pig_weight_kg: Decimal,
        feed_price: Decimal,
        pig_price: Decimal,
        feed_consumed_kg: Decimal,
    },
    SessionReset,
}

impl EventType {
    /// Short lowercase name used for filtering.
    pub fn name(&self) -> &'static str {
        match self {
            EventType::GridGenerated { .. } => "grid_generated",
            EventType::AllocationRejected { .. } => "allocation_rejected",
            EventType::FeedPurchased { .. } => "feed_purchased",
            EventType::PigsPurchased { .. } => "pigs_purchased",
            EventType::PigPurchaseCancelled { .. } => "pig_purchase_cancelled",
            EventType::PurchaseRejected { .. } => "purchase_rejected",
            EventType::ManagerSelected { .. } => "manager_selected",
            EventType::FeedShortage { .. } => "feed_shortage",
            EventType::PenOvercrowded { .. } => "pen_overcrowded",
            EventType::TurnEnded { .. } => "turn_ended",
            EventType::SessionReset => "session_reset",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            EventType::AllocationRejected { .. }
                | EventType::PurchaseRejected { .. }
                | EventType::FeedShortage { .. }
                | EventType::PenOvercrowded { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseItem {
    Feed,
    Pigs,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Week {}] ", self.week)?;

        match &self.event_type {
            EventType::GridGenerated {
                total,
                corn,
                grass,
                soy,
                pig,
            } => {
                write!(
                    f,
                    "Grid generated: {} units (corn {}, grass {}, soy {}, pig pens {})",
                    total, corn, grass, soy, pig
                )
            }
            EventType::AllocationRejected { requested, total } => {
                write!(
                    f,
                    "Total allocated area ({}) exceeds total land area ({})",
                    requested, total
                )
            }
            EventType::FeedPurchased {
                amount_kg,
                cost,
                funds_after,
            } => {
                write!(
                    f,
                    "Bought {} kg feed for ${} (funds: ${})",
                    amount_kg, cost, funds_after
                )
            }
            EventType::PigsPurchased {
                count,
                unit_price,
                replaced,
            } => match replaced {
                Some(old) => write!(
                    f,
                    "Changed this week's order from {} to {} pigs at ${} each",
                    old, count, unit_price
                ),
                None => write!(f, "Bought {} pigs at ${} each", count, unit_price),
            },
            EventType::PigPurchaseCancelled { count, refund } => {
                write!(f, "Cancelled purchase of {} pigs, refunded ${}", count, refund)
            }
            EventType::PurchaseRejected { item, reason } => {
                write!(f, "{:?} purchase rejected: {}", item, reason)
            }
            EventType::ManagerSelected { key } => write!(f, "Manager {} hired", key),
            EventType::FeedShortage {
                needed_kg,
                available_kg,
            } => {
                write!(
                    f,
                    "Not enough feed! Needed {} kg, had {} kg. Pig growth reduced.",
                    needed_kg, available_kg
                )
            }
            EventType::PenOvercrowded { pigs, capacity } => {
                write!(f, "{} pigs exceed pen capacity of {}", pigs, capacity)
            }
            EventType::TurnEnded {
                day,
                crop_growth,
                pig_weight_kg,
                feed_price,
                pig_price,
                feed_consumed_kg,
            } => {
                write!(
                    f,
                    "Turn ended (day {}): crops {}%, pig weight {} kg, fed {} kg, feed ${}/kg, pigs ${}/head",
                    day,
                    (*crop_growth * Decimal::ONE_HUNDRED).round(),
                    pig_weight_kg.round_dp(1),
                    feed_consumed_kg,
                    feed_price,
                    pig_price
                )
            }
            EventType::SessionReset => write!(f, "Farm reset"),
        }
    }
}

#[derive(Default)]
pub struct EventLogger {
    events: Vec<Event>,
}

impl EventLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, week: u32, event_type: EventType) {
        self.events.push(Event {
            timestamp: Utc::now(),
            week,
            event_type,
        });
    }

    pub fn get_events(&self) -> &[Event] {
        &self.events
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let events: Vec<Event> = serde_json::from_str(&json)?;
        Ok(Self { events })
    }
}
