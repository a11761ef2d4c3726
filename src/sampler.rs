use std::ops::Range;

use crate::{error::InterpolationError, strategy::Strategy};

/// Width of the border that is never reconstructed. Every tap lies at most
/// this far from the pixel being reconstructed.
pub const BORDER: u32 = 2;

/// A `(row, col)` position in the field.
pub type Position = (u32, u32);

/// Four ordered tap positions feeding one kernel evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taps(pub [Position; 4]);

/// Tap geometry of one strategy at one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footprint {
    Single(Taps),
    /// Two row-wise tap sets whose kernel results are averaged.
    Paired(Taps, Taps),
}

// (row, col) offsets relative to the field pixel just below the missing one.
const VERTICAL: [(i32, i32); 4] = [(-2, 0), (-1, 0), (0, 0), (1, 0)];
const LEFT: [(i32, i32); 4] = [(-2, -2), (-1, -1), (0, 1), (1, 2)];
const RIGHT: [(i32, i32); 4] = [(-2, 2), (-1, 1), (0, -1), (1, -2)];
// the missing column itself is skipped
const HORIZONTAL_ABOVE: [(i32, i32); 4] = [(-1, -2), (-1, -1), (-1, 1), (-1, 2)];
const HORIZONTAL_BELOW: [(i32, i32); 4] = [(0, -2), (0, -1), (0, 1), (0, 2)];

/// Derives tap positions for a field of the given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSampler {
    rows: u32,
    cols: u32,
}

impl PositionSampler {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Rows that can be reconstructed. Empty for fields with fewer than 5 rows.
    pub fn interior_rows(&self) -> Range<u32> {
        BORDER..self.rows.saturating_sub(BORDER).max(BORDER)
    }

    /// Columns that can be reconstructed. Empty for fields with fewer than 5 columns.
    pub fn interior_cols(&self) -> Range<u32> {
        BORDER..self.cols.saturating_sub(BORDER).max(BORDER)
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.interior_rows().contains(&row) && self.interior_cols().contains(&col)
    }

    /// Tap footprint of `strategy` for the pixel reconstructed at `(row, col)`.
    pub fn footprint(
        &self,
        strategy: Strategy,
        row: u32,
        col: u32,
    ) -> Result<Footprint, InterpolationError> {
        if !self.contains(row, col) {
            return Err(InterpolationError::OutOfInterior {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let footprint = match strategy {
            Strategy::Left => Footprint::Single(offset(row, col, &LEFT)),
            Strategy::Right => Footprint::Single(offset(row, col, &RIGHT)),
            Strategy::Vertical => Footprint::Single(offset(row, col, &VERTICAL)),
            Strategy::Horizontal => Footprint::Paired(
                offset(row, col, &HORIZONTAL_ABOVE),
                offset(row, col, &HORIZONTAL_BELOW),
            ),
        };
        Ok(footprint)
    }
}

/// Only valid for interior positions, where no offset leaves the field.
fn offset(row: u32, col: u32, offsets: &[(i32, i32); 4]) -> Taps {
    let shift = |(dr, dc): (i32, i32)| ((row as i32 + dr) as u32, (col as i32 + dc) as u32);
    Taps([
        shift(offsets[0]),
        shift(offsets[1]),
        shift(offsets[2]),
        shift(offsets[3]),
    ])
}
