use std::fmt;

use log::info;

use crate::chooser::Chooser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TablePosition {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for TablePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "R{} C{}", self.row, self.col)
    }
}

/// Facts about the surrounding bomb that shift the clue rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeworkCounts {
    pub other_components: usize,
    pub batteries: usize,
    pub indicators: usize,
}

/// The rectangle of four clues: one randomly sampled corner plus one shifted
/// by the edgework. Rows and columns are sorted so north < south and
/// west < east.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCoordinates {
    pub initial: TablePosition,
    pub row_north: usize,
    pub row_south: usize,
    pub col_west: usize,
    pub col_east: usize,
}

impl TableCoordinates {
    pub fn sample<C: Chooser>(
        rows: usize,
        columns: usize,
        counts: &EdgeworkCounts,
        chooser: &mut C,
        log_prefix: &str,
    ) -> TableCoordinates {
        assert!(rows >= 2 && columns >= 2, "table too small for a rectangle");

        let initial = TablePosition {
            row: chooser.index(rows),
            col: chooser.index(columns),
        };
        info!(
            "{} Initial regex row is {}, initial regex column is {}.",
            log_prefix, initial.row, initial.col
        );

        TableCoordinates::derive(initial, rows, columns, counts, log_prefix)
    }

    pub fn derive(
        initial: TablePosition,
        rows: usize,
        columns: usize,
        counts: &EdgeworkCounts,
        log_prefix: &str,
    ) -> TableCoordinates {
        // PatternTable guarantees at least two rows and two columns
        assert!(rows >= 2 && columns >= 2, "table too small for a rectangle");
        let row_offset = counts.other_components % (rows - 1) + 1;
        let final_row = (initial.row + row_offset) % rows;
        info!(
            "{} Bomb has {} non-needy modules, so regex row offset is {} mod {} + 1 = {}. \
             Final row is ({} + {}) mod {} = {}.",
            log_prefix,
            counts.other_components,
            counts.other_components,
            rows - 1,
            row_offset,
            initial.row,
            row_offset,
            rows,
            final_row
        );

        let edgework = counts.batteries + counts.indicators;
        let col_offset = edgework % (columns - 1) + 1;
        let final_col = (initial.col + col_offset) % columns;
        info!(
            "{} Bomb has {} batteries and {} indicators, so regex column offset is \
             ({} + {}) mod {} + 1 = {}. Final column is ({} + {}) mod {} = {}.",
            log_prefix,
            counts.batteries,
            counts.indicators,
            counts.batteries,
            counts.indicators,
            columns - 1,
            col_offset,
            initial.col,
            col_offset,
            columns,
            final_col
        );

        TableCoordinates {
            initial,
            row_north: initial.row.min(final_row),
            row_south: initial.row.max(final_row),
            col_west: initial.col.min(final_col),
            col_east: initial.col.max(final_col),
        }
    }

    /// Clue positions in NW, NE, SE, SW order.
    pub fn positions(&self) -> [TablePosition; 4] {
        [
            TablePosition {
                row: self.row_north,
                col: self.col_west,
            },
            TablePosition {
                row: self.row_north,
                col: self.col_east,
            },
            TablePosition {
                row: self.row_south,
                col: self.col_east,
            },
            TablePosition {
                row: self.row_south,
                col: self.col_west,
            },
        ]
    }

    pub fn initial_label(&self) -> String {
        self.initial.to_string()
    }
}
