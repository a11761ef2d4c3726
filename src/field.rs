use std::{fmt, str::FromStr};

use anyhow::{anyhow, Error};
use image::RgbImage;

use crate::error::InterpolationError;

/// Which scanlines of a progressive frame a field keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Rows 1, 3, 5, ... of the frame. The even rows are reconstructed.
    Odd,
    /// Rows 0, 2, 4, ... of the frame. The odd rows are reconstructed.
    Even,
}

impl Default for Field {
    fn default() -> Self {
        Self::Odd
    }
}

impl Field {
    /// Frame row stored at field row `row`.
    pub fn kept_row(self, row: u32) -> u32 {
        match self {
            Self::Odd => 2 * row + 1,
            Self::Even => 2 * row,
        }
    }

    /// Frame row that lies halfway between field rows `row - 1` and `row`.
    /// This is the row a reconstruction at field row `row` is scored against.
    /// `row` must be at least 1.
    pub fn withheld_row(self, row: u32) -> u32 {
        match self {
            Self::Odd => 2 * row,
            Self::Even => 2 * row - 1,
        }
    }

    /// Decimates a progressive frame by dropping every other scanline.
    pub fn extract(self, frame: &RgbImage) -> Result<RgbImage, InterpolationError> {
        let (width, height) = frame.dimensions();
        if height % 2 != 0 {
            return Err(InterpolationError::OddFrameHeight { height });
        }
        Ok(RgbImage::from_fn(width, height / 2, |x, y| {
            *frame.get_pixel(x, self.kept_row(y))
        }))
    }
}

/// Checks that `field` belongs to `frame`: same width and exactly half the height.
pub fn check_pair(field: &RgbImage, frame: &RgbImage) -> Result<(), InterpolationError> {
    let (field_width, field_height) = field.dimensions();
    let (frame_width, frame_height) = frame.dimensions();
    if field_width != frame_width || field_height * 2 != frame_height {
        return Err(InterpolationError::DimensionMismatch {
            field: field.dimensions(),
            frame: frame.dimensions(),
        });
    }
    Ok(())
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Odd => f.write_str("odd"),
            Self::Even => f.write_str("even"),
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "odd" => Ok(Self::Odd),
            "even" => Ok(Self::Even),
            other => Err(anyhow!("unknown field {:?}, expected odd or even", other)),
        }
    }
}
