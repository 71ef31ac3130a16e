//! Upload bytes → model input tensor.

use image::imageops::FilterType;

use crate::error::DecodeError;

/// RGB pixels scaled to `[0, 1]`, row-major HWC (`y`, `x`, channel).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ImageTensor {
    pub const CHANNELS: usize = 3;

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `[height, width, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, Self::CHANNELS]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Decode `bytes` (any format the `image` crate recognises), resize to
/// `size`×`size` with nearest-neighbour sampling and scale intensities by 1/255.
pub fn load_image(bytes: &[u8], size: u32) -> Result<ImageTensor, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError("empty upload".to_string()));
    }

    let decoded = image::load_from_memory(bytes).map_err(|e| DecodeError(e.to_string()))?;
    let rgb = decoded
        .resize_exact(size, size, FilterType::Nearest)
        .to_rgb8();

    let data = rgb
        .pixels()
        .flat_map(|p| p.0)
        .map(|c| f32::from(c) / 255.0)
        .collect();

    Ok(ImageTensor {
        width: size,
        height: size,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(color));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn resizes_to_square_and_scales_to_unit_range() {
        let tensor = load_image(&png(64, 32, [255, 0, 51]), 224).unwrap();

        assert_eq!(tensor.shape(), [224, 224, 3]);
        assert_eq!(tensor.as_slice().len(), 224 * 224 * 3);
        assert_eq!(&tensor.as_slice()[..3], &[1.0, 0.0, 0.2]);
        assert!(tensor.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn grayscale_input_becomes_three_channels() {
        let gray = image::GrayImage::from_pixel(10, 10, image::Luma([128]));
        let mut out = Cursor::new(Vec::new());
        gray.write_to(&mut out, ImageFormat::Png).unwrap();

        let tensor = load_image(&out.into_inner(), 8).unwrap();
        assert_eq!(tensor.shape(), [8, 8, 3]);
        let px = &tensor.as_slice()[..3];
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn corrupt_and_empty_input_fail_to_decode() {
        assert!(load_image(b"definitely not an image", 224).is_err());
        assert_eq!(
            load_image(&[], 224).unwrap_err(),
            DecodeError("empty upload".to_string())
        );
    }
}
