use cgmath::{Vector3, Vector4};
use image::Rgb;

/// One color sample, channels in native 8-bit scale (0.0 to 255.0).
pub type Sample3 = Vector3<f32>;
/// Homogeneous interpolation weights.
pub type Sample4 = Vector4<f32>;

const CHANNEL_MIN: f32 = 0.0;
const CHANNEL_MAX: f32 = 255.0;

/// Reads an 8-bit pixel without rescaling.
pub fn from_rgb8(pixel: &Rgb<u8>) -> Sample3 {
    Vector3::new(pixel[0] as f32, pixel[1] as f32, pixel[2] as f32)
}

/// Clamps every channel into [0; 255].
pub fn clamp(sample: Sample3) -> Sample3 {
    Vector3::new(
        sample.x.clamp(CHANNEL_MIN, CHANNEL_MAX),
        sample.y.clamp(CHANNEL_MIN, CHANNEL_MAX),
        sample.z.clamp(CHANNEL_MIN, CHANNEL_MAX),
    )
}

/// Rounds to the nearest integer and clamps into the 8-bit range.
pub fn to_rgb8(sample: Sample3) -> Rgb<u8> {
    let rounded = clamp(Vector3::new(
        sample.x.round(),
        sample.y.round(),
        sample.z.round(),
    ));
    Rgb([rounded.x as u8, rounded.y as u8, rounded.z as u8])
}
