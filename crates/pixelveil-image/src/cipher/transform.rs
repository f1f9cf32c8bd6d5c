// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel cipher — reversible per-pixel obfuscation: channel swap, additive
// offset, and multiplicative scale, parameterized by an integer key.
// Operates on in-memory images using the `image` crate.

use image::{DynamicImage, ImageBuffer, ImageFormat, Pixel};
use pixelveil_core::error::PixelveilError;
use pixelveil_core::Operation;
use tracing::{debug, info, instrument};

/// Reversible pixel-arithmetic cipher operating on a single in-memory image.
///
/// Transforms are non-aliasing: each consumes `self` and returns a new
/// `PixelCipher` wrapping the transformed image, so an input buffer is never
/// silently shared with its output.
///
/// ```ignore
/// let encoded = PixelCipher::open("photo.png")?.encode(Operation::Add, 50)?;
/// encoded.save("encrypted_image.png")?;
/// let decoded = encoded.decode(Operation::Add, 50)?;
/// ```
///
/// Clamping to the 8-bit range happens after every arithmetic step, so `Add`
/// and `Multiply` are lossy at the boundaries: a sample that saturates on the
/// forward pass does not come back exactly. `Swap` is lossless and its own
/// inverse.
#[derive(Debug)]
pub struct PixelCipher {
    /// The current working image.
    image: DynamicImage,
}

impl PixelCipher {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, PixelveilError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            PixelveilError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(
            width = img.width(),
            height = img.height(),
            "Image loaded"
        );
        Ok(Self { image: img })
    }

    /// Create a cipher from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, PixelveilError> {
        let img = image::load_from_memory(data).map_err(|err| {
            PixelveilError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Number of channels per pixel in the decoded image (1-4).
    pub fn channel_count(&self) -> u8 {
        self.image.color().channel_count()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the cipher and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transforms (consume self, return new Self) ----------------------------

    /// Apply the forward operation to every pixel.
    ///
    /// `Swap` exchanges channels 0 and 1 and ignores the key; `Add` and
    /// `Multiply` apply the key to every sample of every pixel, with the
    /// result clamped to [0, 255]. Arithmetic runs in `i64` intermediates,
    /// so out-of-range results clamp instead of wrapping.
    #[instrument(skip(self), fields(operation = %operation, key))]
    pub fn encode(self, operation: Operation, key: i32) -> Result<Self, PixelveilError> {
        info!(
            width = self.image.width(),
            height = self.image.height(),
            "Encoding image"
        );
        let image = match operation {
            Operation::Swap => swap_channels(self.image)?,
            Operation::Add => {
                map_samples(self.image, |v| clamp_u8(i64::from(v) + i64::from(key)))
            }
            Operation::Multiply => {
                map_samples(self.image, |v| clamp_u8(i64::from(v) * i64::from(key)))
            }
        };
        Ok(Self { image })
    }

    /// Reverse the forward operation.
    ///
    /// `Swap` is its own inverse. `Add` subtracts the key; `Multiply` divides
    /// every sample by it (integer division), failing with `DivisionByZero`
    /// for a zero key before any pixel is touched. Samples that clamped or
    /// truncated on the forward pass come back approximate, not exact.
    #[instrument(skip(self), fields(operation = %operation, key))]
    pub fn decode(self, operation: Operation, key: i32) -> Result<Self, PixelveilError> {
        info!(
            width = self.image.width(),
            height = self.image.height(),
            "Decoding image"
        );
        let image = match operation {
            Operation::Swap => swap_channels(self.image)?,
            Operation::Add => {
                map_samples(self.image, |v| clamp_u8(i64::from(v) - i64::from(key)))
            }
            Operation::Multiply => {
                if key == 0 {
                    return Err(PixelveilError::DivisionByZero);
                }
                map_samples(self.image, |v| clamp_u8(i64::from(v) / i64::from(key)))
            }
        };
        Ok(Self { image })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PixelveilError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image.write_to(&mut cursor, ImageFormat::Png).map_err(|err| {
            PixelveilError::ImageError(format!("PNG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), PixelveilError> {
        self.image.save(path.as_ref()).map_err(|err| {
            PixelveilError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}

// -- Sample-level helpers -----------------------------------------------------

/// Clamp a wide intermediate back into the 8-bit sample range.
fn clamp_u8(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

/// Apply `f` to every 8-bit sample of every pixel, preserving the channel
/// layout of the decoded image. Sample depths other than 8 bits are
/// normalised to 8-bit RGBA first.
fn map_samples(image: DynamicImage, f: impl Fn(u8) -> u8) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(map_buffer(buf, f)),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(map_buffer(buf, f)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(map_buffer(buf, f)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(map_buffer(buf, f)),
        other => DynamicImage::ImageRgba8(map_buffer(other.to_rgba8(), f)),
    }
}

/// Map a sample-wise function over an owned 8-bit buffer.
fn map_buffer<P>(mut buf: ImageBuffer<P, Vec<u8>>, f: impl Fn(u8) -> u8) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    for sample in buf.iter_mut() {
        *sample = f(*sample);
    }
    buf
}

/// Exchange channel 0 and channel 1 of every pixel, leaving any further
/// channels untouched. Self-inverse. The channel count is checked before any
/// pixel is modified.
fn swap_channels(image: DynamicImage) -> Result<DynamicImage, PixelveilError> {
    let channels = image.color().channel_count();
    if channels < 2 {
        return Err(PixelveilError::InvalidShape(channels));
    }
    Ok(match image {
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(swap_buffer(buf)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(swap_buffer(buf)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(swap_buffer(buf)),
        other => DynamicImage::ImageRgba8(swap_buffer(other.to_rgba8())),
    })
}

/// Swap the first two channels of every pixel in an owned 8-bit buffer.
fn swap_buffer<P>(mut buf: ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    for pixel in buf.pixels_mut() {
        pixel.channels_mut().swap(0, 1);
    }
    buf
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::{
        GrayAlphaImage, GrayImage, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage,
    };

    fn rgb_fixture() -> DynamicImage {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.put_pixel(1, 0, Rgb([200, 100, 0]));
        img.put_pixel(0, 1, Rgb([255, 0, 128]));
        img.put_pixel(1, 1, Rgb([1, 2, 3]));
        DynamicImage::ImageRgb8(img)
    }

    /// Swapping twice returns the original buffer bit-for-bit, whatever the
    /// key.
    #[test]
    fn swap_is_an_involution() {
        let original = rgb_fixture();
        let twice = PixelCipher::from_dynamic(original.clone())
            .encode(Operation::Swap, 99)
            .unwrap()
            .encode(Operation::Swap, -7)
            .unwrap()
            .into_dynamic();
        assert_eq!(twice.as_bytes(), original.as_bytes());
    }

    #[test]
    fn swap_exchanges_first_two_channels_only() {
        let encoded = PixelCipher::from_dynamic(rgb_fixture())
            .encode(Operation::Swap, 0)
            .unwrap()
            .into_dynamic();
        assert_eq!(encoded.as_rgb8().unwrap().get_pixel(0, 0), &Rgb([20, 10, 30]));
        assert_eq!(encoded.as_rgb8().unwrap().get_pixel(0, 1), &Rgb([0, 255, 128]));
    }

    #[test]
    fn swap_on_two_channel_images_swaps_luma_and_alpha() {
        let img = GrayAlphaImage::from_pixel(1, 1, LumaA([7, 200]));
        let encoded = PixelCipher::from_dynamic(DynamicImage::ImageLumaA8(img))
            .encode(Operation::Swap, 0)
            .unwrap();
        assert_eq!(
            encoded.as_dynamic().as_luma_alpha8().unwrap().get_pixel(0, 0),
            &LumaA([200, 7])
        );
    }

    /// Swap on a single-channel image is rejected before any pixel is
    /// touched.
    #[test]
    fn swap_rejects_single_channel_images() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([42])));
        let err = PixelCipher::from_dynamic(gray)
            .encode(Operation::Swap, 1)
            .unwrap_err();
        assert!(matches!(err, PixelveilError::InvalidShape(1)));
    }

    /// 2x2 RGB image, add with key 50: forward shifts every channel up by
    /// 50, inverse restores the original exactly (no sample clamps).
    #[test]
    fn add_round_trips_a_small_rgb_image() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.put_pixel(1, 0, Rgb([40, 50, 60]));
        img.put_pixel(0, 1, Rgb([70, 80, 90]));
        img.put_pixel(1, 1, Rgb([100, 110, 120]));
        let original = DynamicImage::ImageRgb8(img);

        let encoded = PixelCipher::from_dynamic(original.clone())
            .encode(Operation::Add, 50)
            .unwrap();
        assert_eq!(
            encoded.as_dynamic().as_rgb8().unwrap().get_pixel(0, 0),
            &Rgb([60, 70, 80])
        );

        let decoded = encoded.decode(Operation::Add, 50).unwrap();
        assert_eq!(decoded.as_dynamic().as_bytes(), original.as_bytes());
    }

    /// Samples that would leave [0, 255] clamp to the boundary instead of
    /// wrapping.
    #[test]
    fn add_clamps_at_both_boundaries() {
        let img = RgbImage::from_pixel(1, 1, Rgb([250, 3, 128]));
        let encoded = PixelCipher::from_dynamic(DynamicImage::ImageRgb8(img))
            .encode(Operation::Add, 50)
            .unwrap();
        assert_eq!(
            encoded.as_dynamic().as_rgb8().unwrap().get_pixel(0, 0),
            &Rgb([255, 53, 178])
        );

        let img = RgbImage::from_pixel(1, 1, Rgb([5, 60, 0]));
        let encoded = PixelCipher::from_dynamic(DynamicImage::ImageRgb8(img))
            .encode(Operation::Add, -50)
            .unwrap();
        assert_eq!(
            encoded.as_dynamic().as_rgb8().unwrap().get_pixel(0, 0),
            &Rgb([0, 10, 0])
        );
    }

    /// Add applies to every channel, alpha included.
    #[test]
    fn add_touches_the_alpha_channel() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 100]));
        let encoded = PixelCipher::from_dynamic(DynamicImage::ImageRgba8(img))
            .encode(Operation::Add, 5)
            .unwrap();
        assert_eq!(
            encoded.as_dynamic().as_rgba8().unwrap().get_pixel(0, 0),
            &Rgba([15, 25, 35, 105])
        );
    }

    #[test]
    fn multiply_round_trips_when_division_is_exact() {
        let img = RgbImage::from_pixel(1, 1, Rgb([5, 7, 36]));
        let original = DynamicImage::ImageRgb8(img);
        let decoded = PixelCipher::from_dynamic(original.clone())
            .encode(Operation::Multiply, 7)
            .unwrap()
            .decode(Operation::Multiply, 7)
            .unwrap();
        assert_eq!(decoded.as_dynamic().as_bytes(), original.as_bytes());
    }

    /// Forward clamping loses information: 100 * 3 saturates at 255, and the
    /// inverse divides the clamped value back to 85, not 100.
    #[test]
    fn multiply_clamp_loss_is_not_recovered() {
        let img = RgbImage::from_pixel(1, 1, Rgb([100, 5, 0]));
        let encoded = PixelCipher::from_dynamic(DynamicImage::ImageRgb8(img))
            .encode(Operation::Multiply, 3)
            .unwrap();
        assert_eq!(
            encoded.as_dynamic().as_rgb8().unwrap().get_pixel(0, 0),
            &Rgb([255, 15, 0])
        );

        let decoded = encoded.decode(Operation::Multiply, 3).unwrap();
        assert_eq!(
            decoded.as_dynamic().as_rgb8().unwrap().get_pixel(0, 0),
            &Rgb([85, 5, 0])
        );
    }

    #[test]
    fn decode_multiply_with_zero_key_fails() {
        let err = PixelCipher::from_dynamic(rgb_fixture())
            .decode(Operation::Multiply, 0)
            .unwrap_err();
        assert!(matches!(err, PixelveilError::DivisionByZero));
    }

    /// Saving a transformed image and reopening it preserves the samples.
    #[test]
    fn save_and_reopen_preserves_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encoded.png");

        let encoded = PixelCipher::from_dynamic(rgb_fixture())
            .encode(Operation::Add, 17)
            .unwrap();
        let expected = encoded.as_dynamic().as_bytes().to_vec();
        encoded.save(&path).unwrap();

        let reopened = PixelCipher::open(&path).unwrap();
        assert_eq!(reopened.as_dynamic().as_bytes(), expected.as_slice());
    }

    #[test]
    fn png_bytes_round_trip() {
        let encoded = PixelCipher::from_dynamic(rgb_fixture())
            .encode(Operation::Multiply, 2)
            .unwrap();
        let png = encoded.to_png_bytes().unwrap();
        let reopened = PixelCipher::from_bytes(&png).unwrap();
        assert_eq!(
            reopened.as_dynamic().as_bytes(),
            encoded.as_dynamic().as_bytes()
        );
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        let err = PixelCipher::from_bytes(&[0x00, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, PixelveilError::ImageError(_)));
    }

    #[test]
    fn accessors_reflect_the_decoded_layout() {
        let cipher = PixelCipher::from_dynamic(rgb_fixture());
        assert_eq!((cipher.width(), cipher.height()), (2, 2));
        assert_eq!(cipher.channel_count(), 3);

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([0])));
        assert_eq!(PixelCipher::from_dynamic(gray).channel_count(), 1);
    }
}
