use image::{GrayImage, Luma, RgbImage};

use crate::{
    interpolator::PixelEvaluation,
    sample,
    strategy::{PerStrategy, Strategy},
};

/// Output of one frame sweep: one image per strategy, the per-pixel best
/// image and the label map. All images have the size of the field.
/// Pixels in the border stay black and carry label 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultFrame {
    strategies: PerStrategy<RgbImage>,
    best: RgbImage,
    labels: GrayImage,
}

impl ResultFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            strategies: PerStrategy::from_fn(|_| RgbImage::new(width, height)),
            best: RgbImage::new(width, height),
            labels: GrayImage::new(width, height),
        }
    }

    /// `(width, height)` of every image in the frame.
    pub fn dimensions(&self) -> (u32, u32) {
        self.best.dimensions()
    }

    pub fn image(&self, strategy: Strategy) -> &RgbImage {
        self.strategies.get(strategy)
    }

    pub fn best(&self) -> &RgbImage {
        &self.best
    }

    pub fn labels(&self) -> &GrayImage {
        &self.labels
    }

    /// Writes the quantized candidates of one pixel and copies the winner into the best image.
    pub fn record(&mut self, row: u32, col: u32, evaluation: &PixelEvaluation) {
        for strategy in Strategy::ALL.iter().copied() {
            let pixel = sample::to_rgb8(*evaluation.candidates.get(strategy));
            self.strategies.get_mut(strategy).put_pixel(col, row, pixel);
        }
        let winner = *self.strategies.get(evaluation.best).get_pixel(col, row);
        self.best.put_pixel(col, row, winner);
        self.labels
            .put_pixel(col, row, Luma([evaluation.best.label()]));
    }

    /// How many pixels each strategy won.
    pub fn win_counts(&self) -> PerStrategy<usize> {
        let mut counts = PerStrategy::default();
        for pixel in self.labels.pixels() {
            if let Some(strategy) = Strategy::ALL
                .iter()
                .copied()
                .find(|strategy| strategy.label() == pixel[0])
            {
                *counts.get_mut(strategy) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;
    use image::Rgb;

    use super::*;
    use crate::strategy::Candidates;

    fn evaluation(best: Strategy) -> PixelEvaluation {
        let candidates: Candidates = PerStrategy {
            left: Vector3::new(-3.0, 10.2, 300.0),
            right: Vector3::new(20.0, 20.0, 20.0),
            vertical: Vector3::new(30.5, 30.4, 30.6),
            horizontal: Vector3::new(40.0, 41.0, 42.0),
        };
        PixelEvaluation {
            candidates,
            scores: PerStrategy::default(),
            best,
        }
    }

    #[test]
    fn record_quantizes_and_copies_winner() {
        let mut frame = ResultFrame::new(4, 3);
        frame.record(1, 2, &evaluation(Strategy::Vertical));

        assert_eq!(*frame.image(Strategy::Left).get_pixel(2, 1), Rgb([0, 10, 255]));
        assert_eq!(*frame.image(Strategy::Vertical).get_pixel(2, 1), Rgb([31, 30, 31]));
        assert_eq!(*frame.best().get_pixel(2, 1), Rgb([31, 30, 31]));
        assert_eq!(frame.labels().get_pixel(2, 1)[0], Strategy::Vertical.label());
        // untouched pixels stay empty
        assert_eq!(*frame.best().get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(frame.labels().get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn win_counts_ignore_unevaluated_pixels() {
        let mut frame = ResultFrame::new(5, 5);
        frame.record(2, 2, &evaluation(Strategy::Horizontal));
        frame.record(2, 3, &evaluation(Strategy::Horizontal));
        frame.record(3, 2, &evaluation(Strategy::Left));
        let counts = frame.win_counts();
        assert_eq!(counts.horizontal, 2);
        assert_eq!(counts.left, 1);
        assert_eq!(counts.right + counts.vertical, 0);
    }
}
