mod result_frame;

use image::RgbImage;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    cubic::{self, NeighborSet},
    distance,
    error::InterpolationError,
    field::{self, Field},
    sample::{self, Sample3, Sample4},
    sampler::{Footprint, PositionSampler, Taps},
    strategy::{Candidates, PerStrategy, Scores, Strategy},
};

pub use self::result_frame::ResultFrame;

/// Everything computed for a single reconstructed pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelEvaluation {
    pub candidates: Candidates,
    pub scores: Scores,
    pub best: Strategy,
}

/// Reconstructs the withheld rows of a field with every strategy and scores
/// each reconstruction against the progressive frame.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator {
    field: Field,
    factor: f32,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new(Field::default())
    }
}

impl Interpolator {
    /// Midpoint between the two known rows.
    pub const MIDPOINT: f32 = 0.5;

    pub fn new(field: Field) -> Self {
        Self {
            field,
            factor: Self::MIDPOINT,
        }
    }

    /// Overrides the interpolation factor. Only scores against the withheld
    /// row are meaningful at [`Interpolator::MIDPOINT`].
    pub fn with_factor(mut self, factor: f32) -> Self {
        self.factor = factor;
        self
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Sweeps every interior pixel of `reduced` and scores it against `frame`.
    ///
    /// `reduced` must be the field of `frame`: same width, half the height.
    /// Rows are evaluated in parallel; the result does not depend on scheduling.
    pub fn interpolate_frame(
        &self,
        reduced: &RgbImage,
        frame: &RgbImage,
    ) -> Result<ResultFrame, InterpolationError> {
        field::check_pair(reduced, frame)?;
        let (width, height) = reduced.dimensions();
        let sampler = PositionSampler::new(height, width);
        let weights = cubic::weights(self.factor);

        let rows = sampler
            .interior_rows()
            .into_par_iter()
            .map(|row| {
                sampler
                    .interior_cols()
                    .map(|col| self.evaluate(&sampler, &weights, reduced, frame, row, col))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = ResultFrame::new(width, height);
        for (row, evaluations) in sampler.interior_rows().zip(rows) {
            for (col, evaluation) in sampler.interior_cols().zip(evaluations) {
                result.record(row, col, &evaluation);
            }
        }
        log::trace!(
            "swept {}x{} field, interior rows {:?}, cols {:?}",
            width,
            height,
            sampler.interior_rows(),
            sampler.interior_cols()
        );
        Ok(result)
    }

    /// Evaluates a single pixel. Fails for mismatched images or positions in the border.
    pub fn evaluate_pixel(
        &self,
        reduced: &RgbImage,
        frame: &RgbImage,
        row: u32,
        col: u32,
    ) -> Result<PixelEvaluation, InterpolationError> {
        field::check_pair(reduced, frame)?;
        let (width, height) = reduced.dimensions();
        let sampler = PositionSampler::new(height, width);
        self.evaluate(
            &sampler,
            &cubic::weights(self.factor),
            reduced,
            frame,
            row,
            col,
        )
    }

    fn evaluate(
        &self,
        sampler: &PositionSampler,
        weights: &Sample4,
        reduced: &RgbImage,
        frame: &RgbImage,
        row: u32,
        col: u32,
    ) -> Result<PixelEvaluation, InterpolationError> {
        let candidate = |strategy| -> Result<Sample3, InterpolationError> {
            let footprint = sampler.footprint(strategy, row, col)?;
            Ok(reconstruct(weights, reduced, &footprint))
        };
        let candidates: Candidates = PerStrategy {
            left: candidate(Strategy::Left)?,
            right: candidate(Strategy::Right)?,
            vertical: candidate(Strategy::Vertical)?,
            horizontal: candidate(Strategy::Horizontal)?,
        };

        let ground_truth = sample::from_rgb8(frame.get_pixel(col, self.field.withheld_row(row)));
        let scores: Scores =
            PerStrategy::from_fn(|strategy| distance::euclidean(*candidates.get(strategy), ground_truth));
        let best = select(&scores, row, col);

        Ok(PixelEvaluation {
            candidates,
            scores,
            best,
        })
    }
}

/// Picks the winning strategy, falling back to vertical when a score is not finite.
fn select(scores: &Scores, row: u32, col: u32) -> Strategy {
    scores.best().unwrap_or_else(|| {
        log::warn!(
            "non-finite score at (row {}, col {}): {:?}, falling back to {}",
            row,
            col,
            scores,
            Strategy::Vertical
        );
        Strategy::Vertical
    })
}

fn reconstruct(weights: &Sample4, reduced: &RgbImage, footprint: &Footprint) -> Sample3 {
    match footprint {
        Footprint::Single(taps) => cubic::blend(weights, &gather(reduced, taps)),
        Footprint::Paired(above, below) => {
            (cubic::blend(weights, &gather(reduced, above))
                + cubic::blend(weights, &gather(reduced, below)))
                / 2.0
        }
    }
}

fn gather(reduced: &RgbImage, taps: &Taps) -> NeighborSet {
    let at = |(row, col): (u32, u32)| sample::from_rgb8(reduced.get_pixel(col, row));
    NeighborSet::new(at(taps.0[0]), at(taps.0[1]), at(taps.0[2]), at(taps.0[3]))
}
