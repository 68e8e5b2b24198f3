//! Partitioning of an image plane into transform blocks.

use std::ops::Range;

use crate::error::{Result, StegoError};
use crate::image::Image;
use crate::transform::{BLOCK_LEN, BLOCK_SIZE};

/// Position of a block, in blocks (not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPosition {
    pub row: usize,
    pub col: usize,
}

/// Row-major grid of 8x8 blocks covering a whole image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    blocks_wide: usize,
    blocks_tall: usize,
}

impl BlockLayout {
    /// Fails with `InvalidImage` unless both dimensions are multiples of the block size.
    pub fn of(image: &Image) -> Result<Self> {
        let (width, height) = image.dimensions();
        let (width, height) = (width as usize, height as usize);
        if width % BLOCK_SIZE != 0 || height % BLOCK_SIZE != 0 {
            return Err(StegoError::invalid_image(format!(
                "dimensions {width}x{height} are not multiples of {BLOCK_SIZE}"
            )));
        }

        Ok(Self {
            blocks_wide: width / BLOCK_SIZE,
            blocks_tall: height / BLOCK_SIZE,
        })
    }

    pub fn blocks_wide(&self) -> usize {
        self.blocks_wide
    }

    pub fn blocks_tall(&self) -> usize {
        self.blocks_tall
    }

    pub fn block_count(&self) -> usize {
        self.blocks_wide * self.blocks_tall
    }

    /// One bit per coefficient of every block.
    pub fn capacity_bits(&self) -> usize {
        self.block_count() * BLOCK_LEN
    }

    pub fn position(&self, block: usize) -> BlockPosition {
        BlockPosition {
            row: block / self.blocks_wide,
            col: block % self.blocks_wide,
        }
    }

    /// Slice of the payload bit stream carried by `block`, empty once the
    /// payload is exhausted. Depends on the block index only.
    pub fn bit_range(&self, block: usize, total_bits: usize) -> Range<usize> {
        let start = (block * BLOCK_LEN).min(total_bits);
        let end = ((block + 1) * BLOCK_LEN).min(total_bits);
        start..end
    }
}

/// Copies one block of `channel` into row-major samples.
pub fn read_block(image: &Image, channel: usize, pos: BlockPosition) -> Result<[i32; BLOCK_LEN]> {
    let mut samples = [0i32; BLOCK_LEN];
    for i in 0..BLOCK_SIZE {
        for j in 0..BLOCK_SIZE {
            let row = pos.row * BLOCK_SIZE + i;
            let col = pos.col * BLOCK_SIZE + j;
            samples[i * BLOCK_SIZE + j] = image.sample(row, col, channel)? as i32;
        }
    }

    Ok(samples)
}

/// Writes row-major samples back into one block of `channel`, clamped to 0..=255.
pub fn write_block(
    image: &mut Image,
    channel: usize,
    pos: BlockPosition,
    samples: &[i32],
) -> Result<()> {
    if samples.len() != BLOCK_LEN {
        return Err(StegoError::InvalidBlockSize {
            expected: BLOCK_LEN,
            actual: samples.len(),
        });
    }

    for i in 0..BLOCK_SIZE {
        for j in 0..BLOCK_SIZE {
            let row = pos.row * BLOCK_SIZE + i;
            let col = pos.col * BLOCK_SIZE + j;
            let value = samples[i * BLOCK_SIZE + j].clamp(0, 255) as u8;
            image.set_sample(row, col, channel, value)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, 3, |row, col, channel| {
            (row * 3 + col + channel as u32) as u8
        })
        .unwrap()
    }

    #[test]
    fn should_count_blocks_row_major() {
        let layout = BlockLayout::of(&image(24, 16)).unwrap();

        assert_eq!(layout.blocks_wide(), 3);
        assert_eq!(layout.blocks_tall(), 2);
        assert_eq!(layout.block_count(), 6);
        assert_eq!(layout.capacity_bits(), 384);
        assert_eq!(layout.position(0), BlockPosition { row: 0, col: 0 });
        assert_eq!(layout.position(2), BlockPosition { row: 0, col: 2 });
        assert_eq!(layout.position(4), BlockPosition { row: 1, col: 1 });
    }

    #[test]
    fn should_reject_misaligned_dimensions() {
        assert!(matches!(
            BlockLayout::of(&image(18, 16)),
            Err(StegoError::InvalidImage { .. })
        ));
        assert!(BlockLayout::of(&image(16, 12)).is_err());
    }

    #[test]
    fn bit_ranges_do_not_restart_per_block() {
        let layout = BlockLayout::of(&image(16, 16)).unwrap();

        assert_eq!(layout.bit_range(0, 100), 0..64);
        assert_eq!(layout.bit_range(1, 100), 64..100);
        assert!(layout.bit_range(2, 100).is_empty());
        assert_eq!(layout.bit_range(0, 8), 0..8);
    }

    #[test]
    fn should_read_only_the_addressed_window() {
        let img = image(16, 16);
        let samples = read_block(&img, 1, BlockPosition { row: 1, col: 1 }).unwrap();

        // row 8, col 8, channel 1
        assert_eq!(samples[0], 8 * 3 + 8 + 1);
        // row 15, col 15, channel 1
        assert_eq!(samples[63], 15 * 3 + 15 + 1);
        assert!(read_block(&img, 0, BlockPosition { row: 2, col: 0 }).is_err());
    }

    #[test]
    fn should_write_clamped_samples_into_the_window() {
        let mut img = image(16, 8);
        let original = img.clone();
        let mut samples = [300i32; BLOCK_LEN];
        samples[1] = -5;

        write_block(&mut img, 0, BlockPosition { row: 0, col: 1 }, &samples).unwrap();

        assert_eq!(img.sample(0, 8, 0).unwrap(), 255);
        assert_eq!(img.sample(0, 9, 0).unwrap(), 0);
        assert_eq!(img.sample(0, 7, 0).unwrap(), original.sample(0, 7, 0).unwrap());
        assert_eq!(img.sample(0, 8, 1).unwrap(), original.sample(0, 8, 1).unwrap());
        assert!(write_block(&mut img, 0, BlockPosition { row: 0, col: 0 }, &samples[..10]).is_err());
    }
}
