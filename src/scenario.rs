use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::allocation::AllocationRequest;
use crate::catalog::manager_by_key;

/// Largest farm a scenario may allocate, in land units.
pub const MAX_TOTAL_AREA: u32 = 100_000;
/// Largest number of turns one scenario may play.
pub const MAX_SCRIPTED_TURNS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("unknown manager: {0}")]
    UnknownManager(String),
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}

/// Tunable constants of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub initial_funds: Decimal,
    pub initial_feed_price: Decimal,
    pub initial_pig_weight_kg: Decimal,
    pub initial_pig_price: Decimal,
    pub default_total_area: u32,
    pub feed_per_pig_per_week: Decimal,
    pub base_weight_gain_kg: Decimal,
    /// Share of the normal weight gain when feed runs short.
    pub shortage_growth_factor: Decimal,
    pub crop_growth_rate: Decimal,
    pub feed_price_min: Decimal,
    pub feed_price_max: Decimal,
    pub feed_drift_min: Decimal,
    pub feed_drift_max: Decimal,
    pub pig_price_min: Decimal,
    pub pig_price_max: Decimal,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_funds: dec!(10000),
            initial_feed_price: dec!(5),
            initial_pig_weight_kg: dec!(20),
            initial_pig_price: dec!(150),
            default_total_area: 200,
            feed_per_pig_per_week: dec!(7),
            base_weight_gain_kg: dec!(10),
            shortage_growth_factor: dec!(0.5),
            crop_growth_rate: dec!(0.1),
            feed_price_min: dec!(2),
            feed_price_max: dec!(10),
            feed_drift_min: dec!(0.9),
            feed_drift_max: dec!(1.1),
            pig_price_min: dec!(100),
            pig_price_max: dec!(200),
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let invalid = |msg: &str| Err(ScenarioError::InvalidParameters(msg.to_string()));

        if self.initial_funds < Decimal::ZERO {
            return invalid("initial funds must not be negative");
        }
        if self.feed_price_min <= Decimal::ZERO || self.feed_price_min > self.feed_price_max {
            return invalid("feed price bounds must be positive and ordered");
        }
        if self.initial_feed_price < self.feed_price_min
            || self.initial_feed_price > self.feed_price_max
        {
            return invalid("initial feed price must lie within the feed price bounds");
        }
        if self.feed_drift_min <= Decimal::ZERO || self.feed_drift_min > self.feed_drift_max {
            return invalid("feed drift range must be positive and ordered");
        }
        if self.pig_price_min <= Decimal::ZERO || self.pig_price_min > self.pig_price_max {
            return invalid("pig price range must be positive and ordered");
        }
        if self.initial_pig_price <= Decimal::ZERO || self.initial_pig_weight_kg <= Decimal::ZERO {
            return invalid("initial pig price and weight must be positive");
        }
        if self.feed_per_pig_per_week < Decimal::ZERO
            || self.base_weight_gain_kg < Decimal::ZERO
            || self.crop_growth_rate < Decimal::ZERO
        {
            return invalid("rates must not be negative");
        }
        if self.shortage_growth_factor < Decimal::ZERO || self.shortage_growth_factor > dec!(1) {
            return invalid("shortage growth factor must lie in [0, 1]");
        }
        if self.default_total_area > MAX_TOTAL_AREA {
            return invalid("default total area exceeds the largest farm size");
        }

        Ok(())
    }
}

/// One player action in a scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    Allocate(AllocationRequest),
    BuyFeed { amount_kg: Decimal },
    BuyPigs { count: i64 },
    SelectManager { key: String },
    EndTurn {
        #[serde(default = "one")]
        count: u32,
    },
    Reset,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: SimulationParameters,
    #[serde(default)]
    pub script: Vec<Action>,
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Scenario {
    pub fn new(name: String) -> Self {
        Self {
            name,
            description: String::new(),
            parameters: SimulationParameters::default(),
            script: Vec::new(),
            random_seed: None,
        }
    }

    pub fn push(&mut self, action: Action) {
        self.script.push(action);
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ScenarioError> {
        let contents = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Loads a scenario, as YAML for `.yaml`/`.yml` files and JSON otherwise.
    pub fn load_from_file(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        let scenario: Self = if is_yaml(path) {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.parameters.validate()?;

        for action in &self.script {
            match action {
                Action::SelectManager { key } if manager_by_key(key).is_none() => {
                    return Err(ScenarioError::UnknownManager(key.clone()));
                }
                Action::Allocate(request) if request.total > MAX_TOTAL_AREA => {
                    return Err(ScenarioError::InvalidParameters(format!(
                        "total area {} exceeds the largest farm size of {}",
                        request.total, MAX_TOTAL_AREA
                    )));
                }
                _ => {}
            }
        }
        if self.turns() > MAX_SCRIPTED_TURNS {
            return Err(ScenarioError::InvalidParameters(format!(
                "script plays {} turns, at most {} are allowed",
                self.turns(),
                MAX_SCRIPTED_TURNS
            )));
        }

        Ok(())
    }

    pub fn turns(&self) -> u64 {
        self.script
            .iter()
            .map(|a| match a {
                Action::EndTurn { count } => u64::from(*count),
                _ => 0,
            })
            .sum()
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Allocate(r) => write!(
                f,
                "allocate {} units (corn {}, grass {}, soy {}, pig {})",
                r.total, r.corn, r.grass, r.soy, r.pig
            ),
            Action::BuyFeed { amount_kg } => write!(f, "buy {} kg feed", amount_kg),
            Action::BuyPigs { count } => write!(f, "buy {} pigs", count),
            Action::SelectManager { key } => write!(f, "hire manager {}", key),
            Action::EndTurn { count } => write!(f, "end turn x{}", count),
            Action::Reset => write!(f, "reset"),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenario: {}", self.name)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "\nParameters:")?;
        writeln!(f, "  Starting funds: {}", self.parameters.initial_funds)?;
        writeln!(
            f,
            "  Feed price: {} (bounds {}-{})",
            self.parameters.initial_feed_price,
            self.parameters.feed_price_min,
            self.parameters.feed_price_max
        )?;
        writeln!(
            f,
            "  Pig price range: {}-{}",
            self.parameters.pig_price_min, self.parameters.pig_price_max
        )?;
        writeln!(
            f,
            "  Feed per pig per week: {} kg",
            self.parameters.feed_per_pig_per_week
        )?;

        writeln!(f, "\nScript ({} turns):", self.turns())?;
        for action in &self.script {
            writeln!(f, "  - {}", action)?;
        }

        Ok(())
    }
}

pub fn create_standard_scenarios() -> HashMap<String, Scenario> {
    let mut scenarios = HashMap::new();

    let mut basic = Scenario::new("basic_farm".to_string());
    basic.description = "Mixed crops with a small, well-fed herd".to_string();
    basic.push(Action::Allocate(AllocationRequest::new(200, 50, 30, 20, 10)));
    basic.push(Action::BuyFeed { amount_kg: dec!(400) });
    basic.push(Action::BuyPigs { count: 10 });
    basic.push(Action::EndTurn { count: 4 });
    scenarios.insert("basic".to_string(), basic);

    let mut crops = Scenario::new("crops_only".to_string());
    crops.description = "All land under crops with a crop-focused manager".to_string();
    crops.push(Action::SelectManager {
        key: "VFM1".to_string(),
    });
    crops.push(Action::Allocate(AllocationRequest::new(200, 80, 60, 60, 0)));
    crops.push(Action::EndTurn { count: 10 });
    scenarios.insert("crops".to_string(), crops);

    let mut shortage = Scenario::new("feed_shortage".to_string());
    shortage.description = "A large herd bought without enough feed".to_string();
    shortage.push(Action::SelectManager {
        key: "VM2".to_string(),
    });
    shortage.push(Action::Allocate(AllocationRequest::new(200, 0, 0, 0, 40)));
    shortage.push(Action::BuyPigs { count: 40 });
    shortage.push(Action::BuyFeed { amount_kg: dec!(100) });
    shortage.push(Action::EndTurn { count: 3 });
    scenarios.insert("shortage".to_string(), shortage);

    let mut piggery = Scenario::new("growing_piggery".to_string());
    piggery.description = "Buys a new batch of pigs every week".to_string();
    piggery.push(Action::Allocate(AllocationRequest::new(200, 20, 40, 0, 60)));
    piggery.push(Action::BuyFeed { amount_kg: dec!(600) });
    for _ in 0..4 {
        piggery.push(Action::BuyPigs { count: 8 });
        piggery.push(Action::EndTurn { count: 1 });
    }
    scenarios.insert("piggery".to_string(), piggery);

    scenarios
}
