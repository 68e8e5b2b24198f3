//! File level flows on top of [`StegoPipeline`] and the [`raw`](crate::raw) container.

use std::path::Path;

use log::info;

use crate::error::{Result, StegoError};
use crate::options::CodecOptions;
use crate::payload::{Payload, LENGTH_HEADER_BITS};
use crate::pipeline::StegoPipeline;
use crate::raw;

/// Hides `message` in the image at `cover` and saves the result to `output`.
///
/// Nothing is written when the message would not be recovered bit for bit.
pub fn hide(cover: &Path, output: &Path, message: &[u8], options: CodecOptions) -> Result<()> {
    let image = raw::load(cover)?;
    let secret = StegoPipeline::with_options(options).hide(image, &Payload::new(message))?;

    raw::save(output, &secret)?;
    info!("Hid {} bytes in {output:?}", message.len());

    Ok(())
}

/// Recovers a message written by [`hide`].
pub fn unveil(secret: &Path, options: CodecOptions) -> Result<Vec<u8>> {
    let image = raw::load(secret)?;
    let payload = StegoPipeline::with_options(options).unveil(&image)?;

    Ok(payload.into_bytes())
}

/// Dumps `length` bytes from the start of the carrier, no length header is interpreted.
pub fn unveil_raw(secret: &Path, length: usize, options: CodecOptions) -> Result<Vec<u8>> {
    let image = raw::load(secret)?;
    let bit_count = length.checked_mul(8).ok_or(StegoError::PayloadTooLarge {
        required: usize::MAX,
        available: 0,
    })?;
    let payload = StegoPipeline::with_options(options).extract(&image, bit_count)?;

    Ok(payload.into_bytes())
}

/// Number of message bytes [`hide`] accepts for the image at `cover`.
pub fn capacity(cover: &Path, options: CodecOptions) -> Result<usize> {
    let image = raw::load(cover)?;
    let bits = StegoPipeline::with_options(options).capacity(&image)?;

    Ok(bits.saturating_sub(LENGTH_HEADER_BITS) / 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Image;
    use tempfile::TempDir;

    fn write_cover(dir: &TempDir, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.path().join("cover.raw");
        let image = Image::from_fn(width, height, 3, |row, col, channel| {
            let value = match channel {
                0 => 60 + (col * 5 + row * 3) % 120,
                1 => 80 + (col * 2 + row * 7) % 100,
                _ => 70 + (col * 4 + row * 4) % 110,
            };
            value as u8
        })
        .unwrap();
        raw::save(&path, &image).unwrap();
        path
    }

    #[test]
    fn should_hide_and_unveil_through_files() {
        let dir = TempDir::new().unwrap();
        let cover = write_cover(&dir, 64, 64);
        let output = dir.path().join("output_image.raw");

        hide(&cover, &output, b"Hello World!", CodecOptions::default()).unwrap();
        let message = unveil(&output, CodecOptions::default()).unwrap();

        assert_eq!(message, b"Hello World!");
    }

    #[test]
    fn should_report_capacity_without_the_header() {
        let dir = TempDir::new().unwrap();
        let cover = write_cover(&dir, 16, 16);

        assert_eq!(capacity(&cover, CodecOptions::default()).unwrap(), 28);
    }

    #[test]
    fn should_not_write_output_when_verification_fails() {
        let dir = TempDir::new().unwrap();
        let cover = dir.path().join("white.raw");
        raw::save(&cover, &Image::new(16, 16, 3, vec![255; 768]).unwrap()).unwrap();
        let output = dir.path().join("output_image.raw");

        let result = hide(&cover, &output, b"A", CodecOptions::default());

        assert!(matches!(result, Err(StegoError::VerificationFailed { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn should_not_write_output_when_the_message_does_not_fit() {
        let dir = TempDir::new().unwrap();
        let cover = write_cover(&dir, 16, 16);
        let output = dir.path().join("output_image.raw");

        let result = hide(&cover, &output, &[0x42; 29], CodecOptions::default());

        assert!(matches!(result, Err(StegoError::PayloadTooLarge { .. })));
        assert!(!output.exists());
    }
}
