//! # Codec
//!
//! Boundary between the `image` crate and [`PixelBuffer`]. Decoding yields a
//! buffer of pixel tuples plus the mode needed to rebuild the image; encoding
//! reverses it without touching sample values.
//!
//! ## Supported Modes
//!
//! | Mode | Channels | Bits |
//! |------|----------|------|
//! | L | 1 | 8 |
//! | LA | 2 | 8 |
//! | RGB | 3 | 8 |
//! | RGBA | 4 | 8 |
//! | L16 | 1 | 16 |
//! | LA16 | 2 | 16 |
//! | RGB16 | 3 | 16 |
//! | RGBA16 | 4 | 16 |
//!
//! Floating point images are rejected rather than converted.

use image::{DynamicImage, ImageBuffer, ImageReader, Luma, LumaA, Rgb, Rgba};
use log::debug;
use std::fmt;
use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::error::GlitchError;

/// Pixel layout and sample depth of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    L,
    LA,
    Rgb,
    Rgba,
    L16,
    LA16,
    Rgb16,
    Rgba16,
}

impl ImageMode {
    /// Samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            ImageMode::L | ImageMode::L16 => 1,
            ImageMode::LA | ImageMode::LA16 => 2,
            ImageMode::Rgb | ImageMode::Rgb16 => 3,
            ImageMode::Rgba | ImageMode::Rgba16 => 4,
        }
    }

    /// Bits per sample.
    pub fn bit_depth(self) -> u8 {
        match self {
            ImageMode::L | ImageMode::LA | ImageMode::Rgb | ImageMode::Rgba => 8,
            _ => 16,
        }
    }
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageMode::L => "L",
            ImageMode::LA => "LA",
            ImageMode::Rgb => "RGB",
            ImageMode::Rgba => "RGBA",
            ImageMode::L16 => "L16",
            ImageMode::LA16 => "LA16",
            ImageMode::Rgb16 => "RGB16",
            ImageMode::Rgba16 => "RGBA16",
        };
        write!(f, "{}", name)
    }
}

/// Pixel data at its native sample width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    Eight(PixelBuffer<u8>),
    Sixteen(PixelBuffer<u16>),
}

impl Raster {
    pub fn width(&self) -> usize {
        match self {
            Raster::Eight(b) => b.width(),
            Raster::Sixteen(b) => b.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Raster::Eight(b) => b.height(),
            Raster::Sixteen(b) => b.height(),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            Raster::Eight(b) => b.channels(),
            Raster::Sixteen(b) => b.channels(),
        }
    }

    fn bit_depth(&self) -> u8 {
        match self {
            Raster::Eight(_) => 8,
            Raster::Sixteen(_) => 16,
        }
    }
}

/// A decoded image: its mode and its pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    mode: ImageMode,
    raster: Raster,
}

impl DecodedImage {
    /// Pair a mode with a raster. The raster's channel count and sample width
    /// must agree with the mode.
    pub fn new(mode: ImageMode, raster: Raster) -> Result<Self, GlitchError> {
        if raster.channels() != mode.channels() || raster.bit_depth() != mode.bit_depth() {
            return Err(GlitchError::UnsupportedFormat(format!(
                "{}-bit raster with {} channels does not match mode {}",
                raster.bit_depth(),
                raster.channels(),
                mode
            )));
        }
        Ok(Self { mode, raster })
    }

    pub fn mode(&self) -> ImageMode {
        self.mode
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn width(&self) -> usize {
        self.raster.width()
    }

    pub fn height(&self) -> usize {
        self.raster.height()
    }

    /// Split an in-memory image into mode and pixel tuples.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, GlitchError> {
        let width = image.width() as usize;
        let height = image.height() as usize;

        let eight = |channels: usize, samples: Vec<u8>| {
            PixelBuffer::new(width, height, channels, samples).map(Raster::Eight)
        };
        let sixteen = |channels: usize, samples: Vec<u16>| {
            PixelBuffer::new(width, height, channels, samples).map(Raster::Sixteen)
        };

        let (mode, raster) = match image {
            DynamicImage::ImageLuma8(b) => (ImageMode::L, eight(1, b.as_raw().clone())?),
            DynamicImage::ImageLumaA8(b) => (ImageMode::LA, eight(2, b.as_raw().clone())?),
            DynamicImage::ImageRgb8(b) => (ImageMode::Rgb, eight(3, b.as_raw().clone())?),
            DynamicImage::ImageRgba8(b) => (ImageMode::Rgba, eight(4, b.as_raw().clone())?),
            DynamicImage::ImageLuma16(b) => (ImageMode::L16, sixteen(1, b.as_raw().clone())?),
            DynamicImage::ImageLumaA16(b) => (ImageMode::LA16, sixteen(2, b.as_raw().clone())?),
            DynamicImage::ImageRgb16(b) => (ImageMode::Rgb16, sixteen(3, b.as_raw().clone())?),
            DynamicImage::ImageRgba16(b) => (ImageMode::Rgba16, sixteen(4, b.as_raw().clone())?),
            other => {
                return Err(GlitchError::UnsupportedFormat(format!(
                    "{:?} samples are not supported",
                    other.color()
                )));
            }
        };

        Ok(Self { mode, raster })
    }

    /// Read and decode the image at `path`.
    ///
    /// A missing file is [`GlitchError::MissingSource`]; anything that
    /// isn't a readable image is [`GlitchError::UnsupportedFormat`].
    pub fn decode(path: impl AsRef<Path>) -> Result<Self, GlitchError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GlitchError::MissingSource(path.to_path_buf()));
        }

        let unsupported = |e: &dyn fmt::Display| {
            GlitchError::UnsupportedFormat(format!(
                "{}: must be an image file ({})",
                path.display(),
                e
            ))
        };
        let image = ImageReader::open(path)
            .map_err(|e| unsupported(&e))?
            .with_guessed_format()
            .map_err(|e| unsupported(&e))?
            .decode()
            .map_err(|e| unsupported(&e))?;

        let decoded = Self::from_dynamic(&image)?;
        debug!(
            "decoded {} ({}x{} {})",
            path.display(),
            decoded.width(),
            decoded.height(),
            decoded.mode
        );
        Ok(decoded)
    }

    /// Rebuild an image of the original mode from the pixel tuples.
    pub fn encode(self) -> Result<DynamicImage, GlitchError> {
        let width = self.width() as u32;
        let height = self.height() as u32;
        let mode = self.mode;

        let image = match (mode, self.raster) {
            (ImageMode::L, Raster::Eight(b)) => {
                ImageBuffer::<Luma<u8>, _>::from_raw(width, height, b.into_samples())
                    .map(DynamicImage::ImageLuma8)
            }
            (ImageMode::LA, Raster::Eight(b)) => {
                ImageBuffer::<LumaA<u8>, _>::from_raw(width, height, b.into_samples())
                    .map(DynamicImage::ImageLumaA8)
            }
            (ImageMode::Rgb, Raster::Eight(b)) => {
                ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, b.into_samples())
                    .map(DynamicImage::ImageRgb8)
            }
            (ImageMode::Rgba, Raster::Eight(b)) => {
                ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, b.into_samples())
                    .map(DynamicImage::ImageRgba8)
            }
            (ImageMode::L16, Raster::Sixteen(b)) => {
                ImageBuffer::<Luma<u16>, _>::from_raw(width, height, b.into_samples())
                    .map(DynamicImage::ImageLuma16)
            }
            (ImageMode::LA16, Raster::Sixteen(b)) => {
                ImageBuffer::<LumaA<u16>, _>::from_raw(width, height, b.into_samples())
                    .map(DynamicImage::ImageLumaA16)
            }
            (ImageMode::Rgb16, Raster::Sixteen(b)) => {
                ImageBuffer::<Rgb<u16>, _>::from_raw(width, height, b.into_samples())
                    .map(DynamicImage::ImageRgb16)
            }
            (ImageMode::Rgba16, Raster::Sixteen(b)) => {
                ImageBuffer::<Rgba<u16>, _>::from_raw(width, height, b.into_samples())
                    .map(DynamicImage::ImageRgba16)
            }
            _ => None,
        };

        image.ok_or_else(|| {
            GlitchError::Image(format!(
                "Failed to rebuild {}x{} {} image",
                width, height, mode
            ))
        })
    }

    /// Encode and write to `path`; the format follows the file extension.
    pub fn save(self, path: impl AsRef<Path>) -> Result<(), GlitchError> {
        let path = path.as_ref();
        self.encode()?
            .save(path)
            .map_err(|e| GlitchError::Image(format!("Failed to save {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, Rgb32FImage};

    #[test]
    fn test_rgb_round_trip() {
        let img = RgbImage::from_fn(5, 3, |x, y| Rgb([x as u8, y as u8, (x * y) as u8]));
        let dynamic = DynamicImage::ImageRgb8(img.clone());

        let decoded = DecodedImage::from_dynamic(&dynamic).unwrap();
        assert_eq!(decoded.mode(), ImageMode::Rgb);
        assert_eq!((decoded.width(), decoded.height()), (5, 3));
        match decoded.raster() {
            Raster::Eight(b) => {
                assert_eq!(b.channels(), 3);
                assert_eq!(b.pixel(2, 4), &[4, 2, 8]);
            }
            Raster::Sixteen(_) => panic!("expected 8-bit raster"),
        }

        let encoded = decoded.encode().unwrap();
        assert_eq!(encoded.to_rgb8(), img);
    }

    #[test]
    fn test_gray_round_trip() {
        let img = GrayImage::from_fn(4, 4, |x, y| Luma([(x + 4 * y) as u8]));
        let decoded = DecodedImage::from_dynamic(&DynamicImage::ImageLuma8(img.clone())).unwrap();
        assert_eq!(decoded.mode(), ImageMode::L);
        assert_eq!(decoded.raster().channels(), 1);
        assert_eq!(decoded.encode().unwrap().to_luma8(), img);
    }

    #[test]
    fn test_sixteen_bit_kept() {
        let img = ImageBuffer::<Rgba<u16>, Vec<u16>>::from_fn(2, 2, |x, y| {
            Rgba([1000 * x as u16, 1000 * y as u16, 60000, 65535])
        });
        let dynamic = DynamicImage::ImageRgba16(img);
        let decoded = DecodedImage::from_dynamic(&dynamic).unwrap();
        assert_eq!(decoded.mode(), ImageMode::Rgba16);
        assert!(matches!(decoded.raster(), Raster::Sixteen(_)));
        assert_eq!(decoded.encode().unwrap(), dynamic);
    }

    #[test]
    fn test_float_rejected() {
        let dynamic = DynamicImage::ImageRgb32F(Rgb32FImage::new(2, 2));
        assert!(matches!(
            DecodedImage::from_dynamic(&dynamic),
            Err(GlitchError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_mode_raster_mismatch() {
        let raster = Raster::Eight(PixelBuffer::new(1, 1, 3, vec![0u8; 3]).unwrap());
        assert!(DecodedImage::new(ImageMode::Rgba, raster.clone()).is_err());
        assert!(DecodedImage::new(ImageMode::Rgb16, raster.clone()).is_err());
        assert!(DecodedImage::new(ImageMode::Rgb, raster).is_ok());
    }

    #[test]
    fn test_mode_properties() {
        assert_eq!(ImageMode::LA.channels(), 2);
        assert_eq!(ImageMode::LA16.bit_depth(), 16);
        assert_eq!(ImageMode::Rgba.bit_depth(), 8);
        assert_eq!(ImageMode::Rgb16.to_string(), "RGB16");
    }

    #[test]
    fn test_missing_file() {
        let err = DecodedImage::decode("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, GlitchError::MissingSource(_)));
    }
}
