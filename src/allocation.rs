//! Turns a land budget into a flat grid of land-use cells.
//!
//! Cells are filled contiguously in a fixed precedence: corn, grass, soy, pig
//! pens, and whatever remains is left empty. Rows and columns only exist for
//! display and export; see [`Grid::cols`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::LandUse;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("total allocated area ({requested}) exceeds total land area ({total})")]
    OverAllocated { requested: u64, total: u32 },
}

/// Requested land areas, in land units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub total: u32,
    #[serde(default)]
    pub corn: u32,
    #[serde(default)]
    pub grass: u32,
    #[serde(default)]
    pub soy: u32,
    #[serde(default)]
    pub pig: u32,
}

impl AllocationRequest {
    pub fn new(total: u32, corn: u32, grass: u32, soy: u32, pig: u32) -> Self {
        Self {
            total,
            corn,
            grass,
            soy,
            pig,
        }
    }

    /// Sum of the per-type areas. Widened so the sum cannot overflow.
    pub fn requested(&self) -> u64 {
        [self.corn, self.grass, self.soy, self.pig]
            .iter()
            .map(|&a| a as u64)
            .sum()
    }

    /// Land left unassigned. Negative when over-allocated.
    pub fn unused_units(&self) -> i64 {
        self.total as i64 - self.requested() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<LandUse>,
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[LandUse] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn count(&self, land_use: LandUse) -> usize {
        self.cells.iter().filter(|&&c| c == land_use).count()
    }

    /// Display width: ceil(sqrt(len)), never less than one.
    pub fn cols(&self) -> usize {
        ceil_sqrt(self.cells.len()).max(1)
    }

    /// 1-based (row, col) of a 0-based cell index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        let cols = self.cols();
        (index / cols + 1, index % cols + 1)
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while root * root < n {
        root += 1;
    }
    root
}

/// Builds the grid for `request`, or rejects it if the areas don't fit.
pub fn allocate(request: &AllocationRequest) -> Result<Grid, AllocationError> {
    let requested = request.requested();
    if requested > request.total as u64 {
        return Err(AllocationError::OverAllocated {
            requested,
            total: request.total,
        });
    }

    let mut cells = vec![LandUse::Empty; request.total as usize];
    let fills = [
        (LandUse::Corn, request.corn),
        (LandUse::Grass, request.grass),
        (LandUse::Soy, request.soy),
        (LandUse::PigPen, request.pig),
    ];

    let mut idx = 0;
    for (land_use, area) in fills {
        let end = idx + area as usize;
        cells[idx..end].fill(land_use);
        idx = end;
    }

    Ok(Grid { cells })
}
