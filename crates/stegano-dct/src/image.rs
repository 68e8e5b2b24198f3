//! Owned, bounds-checked pixel storage.
//!
//! [`Image`] keeps raw interleaved samples together with its geometry. All
//! per-sample access goes through `(row, col, channel)` and is checked against
//! the dimensions, there is no way to address memory outside of the buffer.

use crate::error::{Result, StegoError};

/// Raw interleaved pixel data, e.g. `R,G,B[,A]` per pixel in row-major order.
///
/// Invariant: `pixels.len() == width * height * channels`, the channel order
/// never changes during the lifetime of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

impl Image {
    /// Wraps a pixel buffer after checking it against the given geometry.
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<Self> {
        if pixels.is_empty() {
            return Err(StegoError::NullData);
        }
        if channels == 0 {
            return Err(StegoError::invalid_image("an image needs at least one channel"));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize))
            .ok_or_else(|| {
                StegoError::invalid_image(format!(
                    "dimensions {width}x{height}x{channels} overflow the address space"
                ))
            })?;
        if pixels.len() != expected {
            return Err(StegoError::invalid_image(format!(
                "expected {expected} bytes for {width}x{height}x{channels} but got {}",
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Builds an image by asking `f(row, col, channel)` for every sample.
    pub fn from_fn<F>(width: u32, height: u32, channels: u8, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32, u8) -> u8,
    {
        let mut pixels =
            Vec::with_capacity(width as usize * height as usize * channels as usize);
        for row in 0..height {
            for col in 0..width {
                for channel in 0..channels {
                    pixels.push(f(row, col, channel));
                }
            }
        }

        Self::new(width, height, channels, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the raw samples, the length is fixed.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Returns one sample.
    pub fn sample(&self, row: usize, col: usize, channel: usize) -> Result<u8> {
        let idx = self.index(row, col, channel)?;
        Ok(self.pixels[idx])
    }

    /// Overwrites one sample.
    pub fn set_sample(&mut self, row: usize, col: usize, channel: usize, value: u8) -> Result<()> {
        let idx = self.index(row, col, channel)?;
        self.pixels[idx] = value;
        Ok(())
    }

    /// All channels of the pixel at `(row, col)`.
    pub fn pixel(&self, row: usize, col: usize) -> Result<&[u8]> {
        let start = self.index(row, col, 0)?;
        Ok(&self.pixels[start..start + self.channels as usize])
    }

    pub fn pixel_mut(&mut self, row: usize, col: usize) -> Result<&mut [u8]> {
        let start = self.index(row, col, 0)?;
        let end = start + self.channels as usize;
        Ok(&mut self.pixels[start..end])
    }

    fn index(&self, row: usize, col: usize, channel: usize) -> Result<usize> {
        if row >= self.height as usize || col >= self.width as usize || channel >= self.channels as usize {
            return Err(StegoError::invalid_image(format!(
                "sample ({row}, {col}, {channel}) is outside of {}x{}x{}",
                self.width, self.height, self.channels
            )));
        }

        Ok((row * self.width as usize + col) * self.channels as usize + channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_an_empty_buffer() {
        assert!(matches!(
            Image::new(0, 0, 3, vec![]),
            Err(StegoError::NullData)
        ));
        assert!(matches!(
            Image::new(2, 2, 3, vec![]),
            Err(StegoError::NullData)
        ));
    }

    #[test]
    fn should_reject_a_buffer_that_does_not_match_the_dimensions() {
        let result = Image::new(2, 2, 3, vec![0; 11]);

        assert!(matches!(result, Err(StegoError::InvalidImage { .. })));
    }

    #[test]
    fn should_reject_zero_channels() {
        let result = Image::new(1, 1, 0, vec![0]);

        assert!(matches!(result, Err(StegoError::InvalidImage { .. })));
    }

    #[test]
    fn should_address_samples_interleaved_in_row_major_order() {
        let img = Image::from_fn(3, 2, 3, |row, col, channel| {
            (row * 100 + col * 10 + channel as u32) as u8
        })
        .unwrap();

        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.sample(1, 2, 0).unwrap(), 120);
        assert_eq!(img.sample(0, 1, 2).unwrap(), 12);
        assert_eq!(img.pixel(1, 0).unwrap(), &[100, 101, 102]);
        assert_eq!(&img.pixels()[..6], &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn should_write_a_single_sample() {
        let mut img = Image::new(2, 2, 3, vec![0; 12]).unwrap();
        img.set_sample(1, 1, 2, 42).unwrap();
        img.pixel_mut(0, 1).unwrap()[0] = 7;

        assert_eq!(img.pixels()[11], 42);
        assert_eq!(img.pixels()[3], 7);
        assert_eq!(img.pixels().iter().filter(|&&v| v != 0).count(), 2);
    }

    #[test]
    fn should_reject_access_outside_of_the_bounds() {
        let mut img = Image::new(2, 2, 3, vec![0; 12]).unwrap();

        assert!(img.sample(2, 0, 0).is_err());
        assert!(img.sample(0, 2, 0).is_err());
        assert!(img.sample(0, 0, 3).is_err());
        assert!(img.set_sample(5, 5, 0, 1).is_err());
        assert!(img.pixel(0, 2).is_err());
    }
}
