//! Image preprocessing: decode arbitrary image bytes and normalize them into
//! the fixed-shape tensor the classifier consumes.

pub mod tensor;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::config::{IMAGE_CHANNELS, IMAGE_SIZE};
use crate::error::Result;

pub use tensor::ImageTensor;

/// Decodes image bytes (PNG/JPEG/BMP/GIF) and normalizes them.
pub fn normalize(bytes: &[u8]) -> Result<ImageTensor> {
    let img = image::load_from_memory(bytes)?;
    Ok(normalize_image(&img))
}

/// Resizes to 224×224, converts to RGB, and scales channels to [0, 1].
///
/// Any colour mode is accepted: grayscale is replicated across channels and
/// alpha is dropped. Output layout is HWC, i.e. `R,G,B,R,G,B,...` row by row.
pub fn normalize_image(img: &DynamicImage) -> ImageTensor {
    let resized = img.resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Lanczos3);
    let rgb = resized.to_rgb8();
    let data = rgb
        .pixels()
        .flat_map(|p| p.0.iter().map(|&c| c as f64 / 255.0))
        .collect();
    ImageTensor::new(data, [1, IMAGE_SIZE as usize, IMAGE_SIZE as usize, IMAGE_CHANNELS])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::{GrayImage, ImageOutputFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png).unwrap();
        buf
    }

    #[test]
    fn test_shape_is_fixed() {
        for (w, h) in [(1, 1), (100, 37), (640, 480)] {
            let bytes = encode_png(DynamicImage::new_rgb8(w, h));
            let tensor = normalize(&bytes).unwrap();
            assert_eq!(tensor.shape(), [1, 224, 224, 3]);
            assert_eq!(tensor.data().len(), 224 * 224 * 3);
        }
    }

    #[test]
    fn test_values_in_unit_range() {
        let img = RgbImage::from_fn(50, 50, |x, y| Rgb([(x * 5) as u8, (y * 5) as u8, 255]));
        let tensor = normalize(&encode_png(DynamicImage::ImageRgb8(img))).unwrap();
        assert!(tensor.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_solid_colour_is_scaled_by_255() {
        let img = RgbImage::from_pixel(10, 10, Rgb([255, 0, 51]));
        let tensor = normalize(&encode_png(DynamicImage::ImageRgb8(img))).unwrap();
        let first = &tensor.data()[..3];
        assert!((first[0] - 1.0).abs() < 1e-9);
        assert!(first[1].abs() < 1e-9);
        assert!((first[2] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_grayscale_is_expanded_to_rgb() {
        let img = GrayImage::from_pixel(30, 20, Luma([102]));
        let tensor = normalize(&encode_png(DynamicImage::ImageLuma8(img))).unwrap();
        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        let px = &tensor.data()[..3];
        assert!((px[0] - 0.4).abs() < 1e-9);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn test_rgba_alpha_is_dropped() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([0, 255, 0, 10]));
        let tensor = normalize(&encode_png(DynamicImage::ImageRgba8(img))).unwrap();
        let px = &tensor.data()[..3];
        assert!(px[0].abs() < 1e-9);
        assert!((px[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = normalize(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
