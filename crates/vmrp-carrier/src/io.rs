//! Image persistence and the codec capability probe.
//!
//! Carriers are always written with an explicit PNG encoder at 8 bits per
//! channel, so no LSB is ever re-quantized on save. Without the `png`
//! feature every function here fails with
//! [`CarrierError::CapabilityUnavailable`].

use std::path::Path;

use crate::carrier::Carrier;
use crate::error::{CarrierError, Result};

/// Name of the lossless codec carriers are persisted with.
pub const CODEC_NAME: &str = "png";

/// Returns true when image codec support is compiled in.
pub fn is_available() -> bool {
    cfg!(feature = "png")
}

/// Fail with `CapabilityUnavailable` unless [`is_available`] holds.
pub fn ensure_available() -> Result<()> {
    if is_available() {
        Ok(())
    } else {
        Err(CarrierError::CapabilityUnavailable(CODEC_NAME))
    }
}

impl Carrier {
    /// Open an image file as a carrier. No resizing is applied.
    ///
    /// The format is sniffed from the file contents, so the extension does
    /// not matter.
    pub fn open(path: &Path) -> Result<Self> {
        ensure_available()?;
        #[cfg(feature = "png")]
        {
            let image = image::ImageReader::open(path)?
                .with_guessed_format()?
                .decode()
                .map_err(|err| image_error(path, err))?;
            tracing::debug!(?path, width = image.width(), height = image.height(), "opened carrier");
            Ok(Self::from_image(image))
        }
        #[cfg(not(feature = "png"))]
        {
            let _ = path;
            Err(CarrierError::CapabilityUnavailable(CODEC_NAME))
        }
    }

    /// Decode an in-memory image as a carrier.
    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self> {
        ensure_available()?;
        #[cfg(feature = "png")]
        {
            let image = image::load_from_memory(bytes)
                .map_err(|err| CarrierError::Image(err.to_string()))?;
            Ok(Self::from_image(image))
        }
        #[cfg(not(feature = "png"))]
        {
            let _ = bytes;
            Err(CarrierError::CapabilityUnavailable(CODEC_NAME))
        }
    }

    /// Wrap a decoded image.
    ///
    /// 8-bit RGB and RGBA images are used as-is. Anything else is converted
    /// to 8-bit RGB, or RGBA when it has an alpha channel.
    #[cfg(feature = "png")]
    pub fn from_image(image: image::DynamicImage) -> Self {
        use image::DynamicImage;

        let (width, height) = (image.width(), image.height());
        let (layout, data) = match image {
            DynamicImage::ImageRgb8(buf) => (crate::PixelLayout::Rgb, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (crate::PixelLayout::Rgba, buf.into_raw()),
            other => {
                let color = other.color();
                if color.bytes_per_pixel() > color.channel_count() {
                    tracing::warn!(?color, "reducing carrier to 8 bits per channel");
                } else {
                    tracing::debug!(?color, "converting carrier to RGB");
                }
                if color.has_alpha() {
                    (crate::PixelLayout::Rgba, other.to_rgba8().into_raw())
                } else {
                    (crate::PixelLayout::Rgb, other.to_rgb8().into_raw())
                }
            }
        };

        Self {
            width,
            height,
            layout,
            data,
        }
    }

    /// Encode the carrier as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        ensure_available()?;
        #[cfg(feature = "png")]
        {
            use image::codecs::png::PngEncoder;
            use image::{ExtendedColorType, ImageEncoder};

            let color = match self.layout {
                crate::PixelLayout::Rgb => ExtendedColorType::Rgb8,
                crate::PixelLayout::Rgba => ExtendedColorType::Rgba8,
            };
            let mut out = Vec::new();
            PngEncoder::new(&mut out)
                .write_image(&self.data, self.width, self.height, color)
                .map_err(|err| CarrierError::Image(err.to_string()))?;
            Ok(out)
        }
        #[cfg(not(feature = "png"))]
        {
            Err(CarrierError::CapabilityUnavailable(CODEC_NAME))
        }
    }

    /// Write the carrier to `path` as PNG. Parent directories must exist.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let bytes = self.to_png_bytes()?;
        std::fs::write(path, bytes)?;
        tracing::info!(?path, width = self.width, height = self.height, "wrote carrier");
        Ok(())
    }
}

#[cfg(feature = "png")]
fn image_error(path: &Path, err: image::ImageError) -> CarrierError {
    match err {
        image::ImageError::IoError(io) => CarrierError::Io(io),
        other => CarrierError::Image(format!("{}: {other}", path.display())),
    }
}

#[cfg(all(test, feature = "png"))]
mod tests {
    use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};

    use super::*;
    use crate::PixelLayout;

    fn noisy_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        }))
    }

    #[test]
    fn probe_reports_available() {
        assert!(is_available());
        assert!(ensure_available().is_ok());
    }

    #[test]
    fn png_bytes_roundtrip_is_exact() {
        let carrier = Carrier::from_image(noisy_rgb(19, 11));
        let png = carrier.to_png_bytes().unwrap();
        let back = Carrier::from_image_bytes(&png).unwrap();
        assert_eq!(back, carrier);
    }

    #[test]
    fn rgba_carrier_keeps_alpha_through_save() {
        let image = DynamicImage::ImageRgba8(ImageBuffer::from_fn(4, 4, |x, y| {
            Rgba([x as u8, y as u8, 7, (x * 60 + y) as u8])
        }));
        let mut carrier = Carrier::from_image(image);
        assert_eq!(carrier.layout(), PixelLayout::Rgba);
        carrier.embed(vec![1u8; 48].into_iter()).unwrap();

        let back = Carrier::from_image_bytes(&carrier.to_png_bytes().unwrap()).unwrap();
        assert_eq!(back, carrier);
        assert_eq!(back.as_raw()[3], 0);
        assert_eq!(back.as_raw()[4 * 4 * 4 - 1], 3 * 60 + 3);
    }

    #[test]
    fn grayscale_is_widened_to_rgb() {
        let image = DynamicImage::ImageLuma8(ImageBuffer::from_fn(3, 2, |x, _| Luma([x as u8 * 50])));
        let carrier = Carrier::from_image(image);
        assert_eq!(carrier.layout(), PixelLayout::Rgb);
        assert_eq!(&carrier.as_raw()[3..6], &[50, 50, 50]);
    }

    #[test]
    fn save_and_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carrier.png");
        let carrier = Carrier::from_image(noisy_rgb(8, 8));
        carrier.save_png(&path).unwrap();
        assert_eq!(Carrier::open(&path).unwrap(), carrier);
    }

    #[test]
    fn open_sniffs_format_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let carrier = Carrier::from_image(noisy_rgb(6, 5));
        for name in ["carrier", "carrier.bin", "carrier.jpg"] {
            let path = dir.path().join(name);
            carrier.save_png(&path).unwrap();
            assert_eq!(Carrier::open(&path).unwrap(), carrier, "{name}");
        }
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Carrier::open(&dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, CarrierError::Io(_)));
    }

    #[test]
    fn garbage_bytes_are_image_error() {
        let err = Carrier::from_image_bytes(b"definitely not a png").unwrap_err();
        assert!(matches!(err, CarrierError::Image(_)));
    }
}
