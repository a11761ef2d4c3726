//! Builds labeled training data for a learned deinterlacer.
//!
//! Each withheld scanline of a field is reconstructed four ways with a cubic
//! convolution kernel (left diagonal, right diagonal, vertical, and the
//! average of two horizontal kernels). Every reconstruction is scored against
//! the progressive frame by Euclidean RGB distance, and the closest one is
//! recorded per pixel.
//!
//! ```
//! use deinterlace_labels::{field::Field, interpolator::Interpolator};
//! use image::{Rgb, RgbImage};
//!
//! let frame = RgbImage::from_pixel(16, 16, Rgb([128, 128, 128]));
//! let reduced = Field::Odd.extract(&frame).unwrap();
//! let result = Interpolator::new(Field::Odd)
//!     .interpolate_frame(&reduced, &frame)
//!     .unwrap();
//! assert_eq!(result.best().get_pixel(4, 4), &Rgb([128, 128, 128]));
//! ```

pub mod cubic;
pub mod distance;
pub mod error;
pub mod export;
pub mod field;
pub mod interpolator;
pub mod sample;
pub mod sampler;
pub mod strategy;
