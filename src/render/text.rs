//! Textual grid dump.

use crate::grid::CityGrid;

/// One line per grid row, cells as space-separated state codes.
pub fn render_text(grid: &CityGrid) -> String {
    grid.cells()
        .map(|row| row.iter().map(|s| s.code().to_string()).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
