//! Table grid sizing: column widths and row heights for the striped grid.
//!
//! Widths are auto-sized to content: each column claims the width of its
//! widest cell (single-line estimate, plus padding), floored at a minimum,
//! and the whole set is scaled down proportionally when it exceeds the
//! available width. Rows grow to the tallest wrapped cell. The drawing
//! loop lives in the engine; everything here is pure arithmetic so the
//! sizing is testable without a PDF in sight.

use crate::manuscript::TableBlock;

use super::wrap;

/// Font size used for all table cell text, in points.
pub const CELL_FONT_SIZE: f32 = 9.0;
/// Line height of wrapped cell text, mm.
pub const CELL_LINE_HEIGHT: f32 = 4.2;
/// Horizontal padding inside a cell, mm (each side).
pub const CELL_PAD_X: f32 = 2.0;
/// Vertical padding inside a cell, mm (top and bottom together).
pub const CELL_PAD_Y: f32 = 3.0;
/// No column shrinks below this, mm.
const MIN_COLUMN_WIDTH: f32 = 12.0;

/// Auto-size column widths for `table`, summing to at most `available` mm.
pub fn column_widths(table: &TableBlock, available: f32) -> Vec<f32> {
    let cols = table.column_count();
    if cols == 0 {
        return Vec::new();
    }

    let mut widths = vec![MIN_COLUMN_WIDTH; cols];
    let rows = std::iter::once(&table.head).chain(table.body.iter());
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let want = wrap::text_width(cell, CELL_FONT_SIZE) + 2.0 * CELL_PAD_X;
            if want > widths[i] {
                widths[i] = want;
            }
        }
    }

    let total: f32 = widths.iter().sum();
    if total > available {
        let scale = available / total;
        for w in &mut widths {
            *w = (*w * scale).max(MIN_COLUMN_WIDTH.min(available / cols as f32));
        }
    }
    widths
}

/// Height of one row: tallest wrapped cell plus vertical padding.
pub fn row_height(cells: &[String], widths: &[f32]) -> f32 {
    let mut max_lines = 1usize;
    for (cell, width) in cells.iter().zip(widths) {
        let lines = wrap::wrap(cell, CELL_FONT_SIZE, (width - 2.0 * CELL_PAD_X).max(1.0)).len();
        max_lines = max_lines.max(lines.max(1));
    }
    max_lines as f32 * CELL_LINE_HEIGHT + CELL_PAD_Y
}
