//! Embedding and extraction pipeline.
//!
//! ```text
//! embed:   Loaded -> ColorConverted -> Transformed -> Encoded -> InverseTransformed -> ColorRestored
//! extract: Loaded -> ColorConverted -> Transformed -> Decoded
//! ```
//!
//! Payload bits go into the luma coefficients of the blocks in row-major block
//! order, and in row-major coefficient order within a block. One global bit
//! cursor runs across all blocks, so block `n` carries bits `64n..64n+64`.
//! Blocks past the end of the payload are not touched at all.
//!
//! Any failure aborts the whole run, a failed embed never yields a partially
//! modified image. The embedded bits are read back before the image is returned.

use std::fmt;

use log::{debug, trace, warn};

use crate::block::{read_block, write_block, BlockLayout};
use crate::codec::ParityCodec;
use crate::color::{self, LUMA};
use crate::error::{Result, StegoError};
use crate::image::Image;
use crate::options::CodecOptions;
use crate::payload::{parse_length_header, Payload, LENGTH_HEADER_BITS};
use crate::transform::{forward_quantized, inverse_quantized};

/// Stages a single image passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loaded,
    ColorConverted,
    Transformed,
    Encoded,
    InverseTransformed,
    ColorRestored,
    Saved,
    Decoded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Default)]
pub struct StegoPipeline {
    options: CodecOptions,
    codec: ParityCodec,
}

impl StegoPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self {
            options,
            codec: ParityCodec::new(),
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Number of payload bits the image can carry.
    pub fn capacity(&self, image: &Image) -> Result<usize> {
        color::ensure_color_channels(image)?;
        Ok(BlockLayout::of(image)?.capacity_bits())
    }

    /// Hides the bits of `payload`, starting at the first coefficient of the first block.
    ///
    /// The result is decoded again before it is returned. Blocks that clip at
    /// black or white can lose parity flips on the write back, such an embed
    /// fails with `VerificationFailed`.
    pub fn embed(&self, mut image: Image, payload: &Payload) -> Result<Image> {
        let layout = self.validate(&image, payload.bit_len())?;
        let bits = payload.bits()?;
        debug!(
            "{}: {}x{} image, {} payload bits, {} blocks",
            Stage::Loaded,
            image.width(),
            image.height(),
            bits.len(),
            layout.block_count()
        );

        let mut ycbcr = image.clone();
        color::to_luma_chroma(&mut ycbcr)?;
        let original = ycbcr.clone();
        debug!("{}", Stage::ColorConverted);

        let step = self.options.quantization_step;
        let mut encoded_blocks = 0;
        for block in 0..layout.block_count() {
            let range = layout.bit_range(block, bits.len());
            if range.is_empty() {
                break;
            }

            let pos = layout.position(block);
            let mut coefficients = forward_quantized(&read_block(&ycbcr, LUMA, pos)?, step)?;
            self.codec.embed(&mut coefficients, &bits[range.clone()])?;
            let samples = inverse_quantized(&coefficients, step)?;
            write_block(&mut ycbcr, LUMA, pos, &samples)?;

            trace!("block {block} at {pos:?} carries bits {range:?}");
            encoded_blocks += 1;
        }
        debug!(
            "{} -> {} -> {}: {encoded_blocks} blocks",
            Stage::Transformed,
            Stage::Encoded,
            Stage::InverseTransformed
        );

        let restored = restore_changed_pixels(&mut image, &ycbcr, &original)?;
        debug!("{}: {restored} pixels rewritten", Stage::ColorRestored);

        let mismatched_bits = self
            .extract_bits(&image, bits.len())?
            .iter()
            .zip(&bits)
            .filter(|(read, written)| read != written)
            .count();
        if mismatched_bits > 0 {
            warn!("{mismatched_bits} of {} bits would not be recovered", bits.len());
            return Err(StegoError::VerificationFailed { mismatched_bits });
        }

        Ok(image)
    }

    /// Reads back `bit_count` bits in the order [`embed`](Self::embed) wrote them.
    pub fn extract_bits(&self, image: &Image, bit_count: usize) -> Result<Vec<bool>> {
        let layout = self.validate(image, bit_count)?;

        let mut ycbcr = image.clone();
        color::to_luma_chroma(&mut ycbcr)?;
        debug!("{}", Stage::ColorConverted);

        let step = self.options.quantization_step;
        let mut bits = Vec::with_capacity(bit_count);
        for block in 0..layout.block_count() {
            let range = layout.bit_range(block, bit_count);
            if range.is_empty() {
                break;
            }

            let pos = layout.position(block);
            let coefficients = forward_quantized(&read_block(&ycbcr, LUMA, pos)?, step)?;
            bits.extend(self.codec.extract(&coefficients, range.len())?);
        }
        debug!("{}: {} bits", Stage::Decoded, bits.len());

        Ok(bits)
    }

    /// Reads back a payload of `bit_count` bits.
    pub fn extract(&self, image: &Image, bit_count: usize) -> Result<Payload> {
        Payload::from_bits(&self.extract_bits(image, bit_count)?)
    }

    /// Hides `payload` behind a length header, see [`unveil`](Self::unveil).
    pub fn hide(&self, image: Image, payload: &Payload) -> Result<Image> {
        self.embed(image, &payload.framed()?)
    }

    /// Reads a payload written by [`hide`](Self::hide).
    pub fn unveil(&self, image: &Image) -> Result<Payload> {
        let capacity = self.capacity(image)?;
        if capacity < LENGTH_HEADER_BITS {
            return Err(StegoError::NoSecretData);
        }

        let header = self.extract(image, LENGTH_HEADER_BITS)?;
        let len = parse_length_header(header.as_bytes())?;
        let total_bits = len
            .checked_mul(8)
            .and_then(|bits| bits.checked_add(LENGTH_HEADER_BITS))
            .filter(|&bits| bits <= capacity)
            .ok_or(StegoError::NoSecretData)?;
        debug!("length header announces {len} bytes");

        let framed = self.extract(image, total_bits)?.into_bytes();
        Ok(Payload::new(&framed[LENGTH_HEADER_BITS / 8..]))
    }

    fn validate(&self, image: &Image, bit_count: usize) -> Result<BlockLayout> {
        self.check_input(image, bit_count).map_err(|e| {
            warn!("Rejecting {}x{} image: {e}", image.width(), image.height());
            e
        })
    }

    fn check_input(&self, image: &Image, bit_count: usize) -> Result<BlockLayout> {
        self.options.validate()?;
        color::ensure_color_channels(image)?;
        let layout = BlockLayout::of(image)?;

        if bit_count > layout.capacity_bits() {
            return Err(StegoError::PayloadTooLarge {
                required: bit_count,
                available: layout.capacity_bits(),
            });
        }

        Ok(layout)
    }
}

/// Writes RGB back for every pixel whose luma changed, all other pixels keep
/// their original bytes. Returns the number of rewritten pixels.
fn restore_changed_pixels(image: &mut Image, ycbcr: &Image, original: &Image) -> Result<usize> {
    let mut restored = 0;
    for row in 0..image.height() as usize {
        for col in 0..image.width() as usize {
            let luma = ycbcr.sample(row, col, LUMA)?;
            if luma == original.sample(row, col, LUMA)? {
                continue;
            }

            let pixel = ycbcr.pixel(row, col)?;
            let rgb = color::restore_rgb([pixel[0], pixel[1], pixel[2]]);
            image.pixel_mut(row, col)?[..3].copy_from_slice(&rgb);
            restored += 1;
        }
    }

    Ok(restored)
}
