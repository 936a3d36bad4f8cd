//! Static reference data: land-use types, farm managers and the unit constants
//! shared by the rest of the engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One land unit is 1,000 m².
pub const CELL_SIZE_M2: u64 = 1000;
/// Floor space one pig needs inside a pen.
pub const PIG_SPACE_PER_PIG_M2: u64 = 10;
pub const DAYS_PER_WEEK: u32 = 7;
/// Harvestable kilograms of a fully grown land unit.
pub const CROP_YIELD_KG_PER_UNIT: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandUse {
    #[default]
    Empty,
    Corn,
    Grass,
    Soy,
    PigPen,
}

impl LandUse {
    /// Every land-use type, ordered by cell index.
    pub const ALL: [LandUse; 5] = [
        LandUse::Empty,
        LandUse::Corn,
        LandUse::Grass,
        LandUse::Soy,
        LandUse::PigPen,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LandUse::Empty => "empty",
            LandUse::Corn => "corn",
            LandUse::Grass => "grass",
            LandUse::Soy => "soy",
            LandUse::PigPen => "pig",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LandUse::Empty => "Unused",
            LandUse::Corn => "Corn",
            LandUse::Grass => "Grass",
            LandUse::Soy => "Soy",
            LandUse::PigPen => "Pig Pen",
        }
    }

    /// Cell-type index as stored in a grid.
    pub fn index(&self) -> u8 {
        match self {
            LandUse::Empty => 0,
            LandUse::Corn => 1,
            LandUse::Grass => 2,
            LandUse::Soy => 3,
            LandUse::PigPen => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<LandUse> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn from_key(key: &str) -> Option<LandUse> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

impl fmt::Display for LandUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A farm manager. Multipliers scale crop growth and pig weight gain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerProfile {
    pub key: String,
    pub label: String,
    pub crop_multiplier: Decimal,
    pub pig_multiplier: Decimal,
}

impl ManagerProfile {
    pub fn new(key: &str, crop_multiplier: Decimal, pig_multiplier: Decimal) -> Self {
        Self {
            key: key.to_string(),
            label: key.to_string(),
            crop_multiplier,
            pig_multiplier,
        }
    }
}

/// The hireable managers, in display order.
pub fn managers() -> Vec<ManagerProfile> {
    vec![
        ManagerProfile::new("VM1", dec!(1.2), dec!(1.0)),
        ManagerProfile::new("VM2", dec!(1.0), dec!(1.5)),
        ManagerProfile::new("VFM1", dec!(1.5), dec!(1.2)),
        ManagerProfile::new("VFM2", dec!(1.0), dec!(1.2)),
    ]
}

pub fn manager_by_key(key: &str) -> Option<ManagerProfile> {
    managers()
        .into_iter()
        .find(|m| m.key.eq_ignore_ascii_case(key))
}

/// The manager selected when a session starts.
pub fn default_manager() -> ManagerProfile {
    ManagerProfile::new("VM1", dec!(1.2), dec!(1.0))
}
