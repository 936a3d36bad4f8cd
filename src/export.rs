//! CSV rendering of a grid. No simulation logic lives here.

use std::path::Path;

use crate::allocation::Grid;
use crate::catalog::CELL_SIZE_M2;

pub const CSV_HEADER: &str = "index,row,col,type,label";

/// One header line, then one line per cell with 1-based index, row and col.
pub fn grid_to_csv(grid: &Grid) -> String {
    let mut rows = Vec::with_capacity(grid.len() + 1);
    rows.push(CSV_HEADER.to_string());

    for (i, cell) in grid.cells().iter().enumerate() {
        let (row, col) = grid.position(i);
        rows.push(format!("{},{},{},{},{}", i + 1, row, col, cell.key(), cell.label()));
    }

    rows.join("\n")
}

/// File name describing the exported land, e.g. `terrain_map_200000m2_cells_200.csv`.
pub fn default_file_name(grid: &Grid) -> String {
    format!(
        "terrain_map_{}m2_cells_{}.csv",
        grid.len() as u64 * CELL_SIZE_M2,
        grid.len()
    )
}

pub fn write_csv(grid: &Grid, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, grid_to_csv(grid))
}
