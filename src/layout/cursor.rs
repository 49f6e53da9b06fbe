//! The flow cursor: (column, y) state for multi-column body text.
//!
//! Body text flows left column, right column, next page. The dual overflow
//! check runs strictly in that order: a full column first moves the cursor
//! to the next column at the *column-start* y (not the previous column's
//! ending y), and only a full final column starts a new page. The cursor
//! only tracks position; the engine reacts to [`FlowStep::PageBreak`] by
//! actually creating the page and redrawing the masthead.

use crate::config::PageGeometry;

/// What [`FlowCursor::ensure_room`] had to do to make space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    /// The block fits where the cursor already was.
    Stayed,
    /// Moved to the next column on the same page.
    ColumnBreak,
    /// All columns were full; the caller must start a new page.
    PageBreak,
}

/// Mutable layout position threaded through every body drawing operation.
#[derive(Debug, Clone)]
pub struct FlowCursor {
    geometry: PageGeometry,
    col: usize,
    y: f32,
    /// Y where columns begin on the current page. On the first page this is
    /// wherever the front matter ended; after a page break it resets to the
    /// geometry's body top.
    column_top: f32,
}

impl FlowCursor {
    /// Cursor starting at `start_y` in column `start_col` (0 = left).
    pub fn new(geometry: PageGeometry, start_y: f32, start_col: usize) -> Self {
        let col = start_col.min(geometry_cols(&geometry) - 1);
        Self {
            geometry,
            col,
            y: start_y,
            column_top: start_y,
        }
    }

    /// X origin of the current column.
    pub fn x(&self) -> f32 {
        self.geometry.column_x(self.col)
    }

    /// Current vertical position (top of the next block).
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Current column index.
    pub fn column(&self) -> usize {
        self.col
    }

    /// Width available to the current column.
    pub fn width(&self) -> f32 {
        self.geometry.column_width()
    }

    /// Make room for a block `height` mm tall, breaking column-then-page.
    ///
    /// On [`FlowStep::PageBreak`] the cursor has already moved to column 0
    /// at the body top of the page the caller is about to create.
    pub fn ensure_room(&mut self, height: f32) -> FlowStep {
        if self.y + height <= self.geometry.bottom_limit() {
            return FlowStep::Stayed;
        }
        if self.col + 1 < geometry_cols(&self.geometry) {
            self.col += 1;
            self.y = self.column_top;
            FlowStep::ColumnBreak
        } else {
            self.col = 0;
            self.column_top = self.geometry.body_top();
            self.y = self.column_top;
            FlowStep::PageBreak
        }
    }

    /// Move past a block that was just drawn.
    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }
}

fn geometry_cols(geometry: &PageGeometry) -> usize {
    geometry.columns.count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnMode;

    fn geometry(columns: ColumnMode) -> PageGeometry {
        PageGeometry {
            columns,
            ..PageGeometry::default()
        }
    }

    #[test]
    fn fits_without_breaking() {
        let mut c = FlowCursor::new(geometry(ColumnMode::Double), 100.0, 0);
        assert_eq!(c.ensure_room(10.0), FlowStep::Stayed);
        c.advance(10.0);
        assert_eq!(c.y(), 110.0);
        assert_eq!(c.column(), 0);
    }

    #[test]
    fn left_overflow_moves_to_right_column_at_column_start() {
        let g = geometry(ColumnMode::Double);
        let start = 120.0;
        let mut c = FlowCursor::new(g.clone(), start, 0);
        // Fill the left column.
        while c.ensure_room(5.0) == FlowStep::Stayed {
            c.advance(5.0);
        }
        // First break is a column break, back to the shared start y — not
        // the left column's ending y.
        assert_eq!(c.column(), 1);
        assert_eq!(c.y(), start);
        assert_eq!(c.x(), g.column_x(1));
    }

    #[test]
    fn right_overflow_starts_a_new_page_at_body_top() {
        let g = geometry(ColumnMode::Double);
        let mut c = FlowCursor::new(g.clone(), g.bottom_limit() - 4.0, 1);
        assert_eq!(c.ensure_room(5.0), FlowStep::PageBreak);
        assert_eq!(c.column(), 0);
        assert_eq!(c.y(), g.body_top());
    }

    #[test]
    fn single_column_overflow_always_pages() {
        let g = geometry(ColumnMode::Single);
        let mut c = FlowCursor::new(g.clone(), g.bottom_limit() - 4.0, 0);
        assert_eq!(c.ensure_room(5.0), FlowStep::PageBreak);
        assert_eq!(c.column(), 0);
    }

    #[test]
    fn page_count_matches_capacity_arithmetic() {
        // Flowing N equal lines from the body top must produce exactly
        // ceil(N / lines_per_page) pages, lines_per_page = per-column
        // capacity x column count.
        let g = geometry(ColumnMode::Double);
        let line_h = 4.5_f32;
        let per_column = ((g.bottom_limit() - g.body_top()) / line_h).floor() as usize;
        let per_page = per_column * 2;

        for n in [1, per_page, per_page + 1, 3 * per_page - 7] {
            let mut c = FlowCursor::new(g.clone(), g.body_top(), 0);
            let mut pages = 1usize;
            let mut placed = 0usize;
            for _ in 0..n {
                if c.ensure_room(line_h) == FlowStep::PageBreak {
                    pages += 1;
                }
                c.advance(line_h);
                placed += 1;
            }
            assert_eq!(placed, n);
            assert_eq!(pages, n.div_ceil(per_page), "n = {n}");
        }
    }

    #[test]
    fn later_pages_use_full_column_height() {
        // A first page whose columns start low still resets to body_top
        // after the page break.
        let g = geometry(ColumnMode::Double);
        let mut c = FlowCursor::new(g.clone(), g.bottom_limit() - 1.0, 0);
        assert_eq!(c.ensure_room(5.0), FlowStep::ColumnBreak);
        assert_eq!(c.ensure_room(5.0), FlowStep::PageBreak);
        // Next column break on the new page returns to body_top, not to the
        // old cramped start.
        while c.ensure_room(5.0) == FlowStep::Stayed {
            c.advance(5.0);
        }
        assert_eq!(c.y(), g.body_top());
    }
}
