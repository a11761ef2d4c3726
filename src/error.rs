use std::fmt;

/// Rejected input for a frame pair. Fatal to that pair only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    /// The field and the progressive frame do not describe the same picture:
    /// widths differ or the field is not exactly half as tall.
    DimensionMismatch {
        field: (u32, u32),
        frame: (u32, u32),
    },
    /// A progressive frame with an odd number of rows cannot be split into two fields.
    OddFrameHeight { height: u32 },
    /// A tap footprint was requested for a position inside the 2-pixel border.
    OutOfInterior {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { field, frame } => write!(
                f,
                "field is {}x{} but frame is {}x{} (expected frame {}x{})",
                field.0,
                field.1,
                frame.0,
                frame.1,
                field.0,
                field.1 * 2
            ),
            Self::OddFrameHeight { height } => {
                write!(f, "frame height {} is odd, cannot split into fields", height)
            }
            Self::OutOfInterior {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "position (row {}, col {}) lies outside the interior of a {}x{} field",
                row, col, cols, rows
            ),
        }
    }
}

impl std::error::Error for InterpolationError {}
