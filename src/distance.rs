use cgmath::InnerSpace;

use crate::sample::Sample3;

/// Euclidean distance across the three color channels between an
/// interpolated sample and the ground truth.
pub fn euclidean(interpolated: Sample3, ground_truth: Sample3) -> f32 {
    (ground_truth - interpolated).magnitude()
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;

    #[test]
    fn identical_samples_have_zero_distance() {
        for value in &[0.0, 1.0, 127.5, 255.0] {
            let x = Vector3::new(*value, 255.0 - value, value / 2.0);
            assert_eq!(euclidean(x, x), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let x = Vector3::new(12.0, 200.0, 33.0);
        let y = Vector3::new(250.0, 0.0, 31.5);
        assert_eq!(euclidean(x, y), euclidean(y, x));
    }

    #[test]
    fn pythagorean_triple() {
        let x = Vector3::new(0.0, 0.0, 0.0);
        let y = Vector3::new(3.0, 4.0, 12.0);
        assert_eq!(euclidean(x, y), 13.0);
    }

    #[test]
    fn full_range_diagonal() {
        let black = Vector3::new(0.0, 0.0, 0.0);
        let white = Vector3::new(255.0, 255.0, 255.0);
        let expected = (3.0f32 * 255.0 * 255.0).sqrt();
        assert!((euclidean(black, white) - expected).abs() < 1e-3);
    }
}
