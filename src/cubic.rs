use cgmath::{Matrix4, Vector4};

use crate::sample::{Sample3, Sample4};

/// Catmull-Rom basis, written row by row.
///
/// `cgmath` reads nested arrays as columns, so `Matrix4::from(CUBIC_BASIS)`
/// is the transpose of this table. That is exactly what is needed to turn
/// the row-vector product `t · B` into `Bᵀ * t`.
#[rustfmt::skip]
const CUBIC_BASIS: [[f32; 4]; 4] = [
    [ 0.0,  2.0,  0.0,  0.0],
    [-1.0,  0.0,  1.0,  0.0],
    [ 2.0, -5.0,  4.0, -1.0],
    [-1.0,  3.0, -3.0,  1.0],
];

/// Four ordered taps feeding one kernel evaluation. The reconstructed value
/// lies between `b` and `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborSet {
    pub a: Sample3,
    pub b: Sample3,
    pub c: Sample3,
    pub d: Sample3,
}

impl NeighborSet {
    pub fn new(a: Sample3, b: Sample3, c: Sample3, d: Sample3) -> Self {
        Self { a, b, c, d }
    }
}

/// Kernel weights for the interpolation factor `t`:
/// `(0.5, 0.5t, 0.5t², 0.5t³) · B`.
pub fn weights(t: f32) -> Sample4 {
    let t2 = t * t;
    let powers = Vector4::new(0.5, 0.5 * t, 0.5 * t2, 0.5 * t2 * t);
    Matrix4::from(CUBIC_BASIS) * powers
}

/// Applies precomputed weights to the taps, channel by channel.
pub fn blend(weights: &Sample4, taps: &NeighborSet) -> Sample3 {
    taps.a * weights.x + taps.b * weights.y + taps.c * weights.z + taps.d * weights.w
}

/// Cubic convolution of `taps` at `t`.
pub fn cubic(taps: &NeighborSet, t: f32) -> Sample3 {
    blend(&weights(t), taps)
}
