//! RGB <-> YCbCr conversion with 8 bit fixed point results.
//!
//! Forward results are truncated, inverse results are clamped and truncated.
//! Both directions therefore lose a little on every pass, a round trip is not
//! exact (up to 3 per channel).

use std::sync::OnceLock;

use crate::error::{Result, StegoError};
use crate::image::Image;

/// Channel index of the luma (Y) plane after conversion.
pub const LUMA: usize = 0;

/// Largest per channel deviation `to_rgb(to_luma_chroma(x))` shows for 8 bit input.
pub const MAX_ROUND_TRIP_ERROR: u8 = 3;

/// Per channel corrections tried by [`restore_rgb`], closest first.
static CORRECTIONS: OnceLock<Vec<[i16; 3]>> = OnceLock::new();

const CORRECTION_RANGE: i16 = 3;

/// Converts all pixels of an RGB(A) image to YCbCr in place, alpha is left as is.
pub fn to_luma_chroma(image: &mut Image) -> Result<()> {
    convert(image, rgb_to_ycbcr)
}

/// Converts all pixels of a YCbCr image back to RGB in place.
pub fn to_rgb(image: &mut Image) -> Result<()> {
    convert(image, ycbcr_to_rgb)
}

/// Fails with `InvalidImage` when there are no chroma channels to convert.
pub fn ensure_color_channels(image: &Image) -> Result<()> {
    if image.channels() < 3 {
        return Err(StegoError::invalid_image(format!(
            "color conversion needs at least 3 channels, got {}",
            image.channels()
        )));
    }

    Ok(())
}

fn convert(image: &mut Image, f: fn([u8; 3]) -> [u8; 3]) -> Result<()> {
    ensure_color_channels(image)?;

    let channels = image.channels() as usize;
    for pixel in image.pixels_mut().chunks_exact_mut(channels) {
        let converted = f([pixel[0], pixel[1], pixel[2]]);
        pixel[..3].copy_from_slice(&converted);
    }

    Ok(())
}

pub fn rgb_to_ycbcr([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (r, g, b) = (r as f64, g as f64, b as f64);

    [
        (0.299 * r + 0.587 * g + 0.114 * b) as u8,
        (128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b) as u8,
        (128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b) as u8,
    ]
}

pub fn ycbcr_to_rgb([y, cb, cr]: [u8; 3]) -> [u8; 3] {
    let y = y as f64;
    let cb = cb as f64 - 128.0;
    let cr = cr as f64 - 128.0;

    [
        clamp_to_u8(y + 1.402 * cr),
        clamp_to_u8(y - 0.344136 * cb - 0.714136 * cr),
        clamp_to_u8(y + 1.772 * cb),
    ]
}

/// Luma of a single RGB pixel, same arithmetic as [`rgb_to_ycbcr`].
pub fn luma_of([r, g, b]: [u8; 3]) -> u8 {
    rgb_to_ycbcr([r, g, b])[LUMA]
}

/// Inverse conversion that keeps the luma stable.
///
/// The plain inverse followed by a forward conversion often lands one or two
/// luma steps below the input. This nudges the RGB result by the smallest
/// correction whose luma matches `y` exactly, and falls back to the plain
/// inverse if none of the corrections reaches it (e.g. at the range limits).
pub fn restore_rgb(ycbcr: [u8; 3]) -> [u8; 3] {
    let rgb = ycbcr_to_rgb(ycbcr);
    let target = ycbcr[LUMA];
    if luma_of(rgb) == target {
        return rgb;
    }

    corrections()
        .iter()
        .filter_map(|delta| shift(rgb, delta))
        .find(|candidate| luma_of(*candidate) == target)
        .unwrap_or(rgb)
}

fn clamp_to_u8(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

fn shift(rgb: [u8; 3], delta: &[i16; 3]) -> Option<[u8; 3]> {
    let mut out = [0u8; 3];
    for ((o, &c), &d) in out.iter_mut().zip(rgb.iter()).zip(delta.iter()) {
        *o = u8::try_from(c as i16 + d).ok()?;
    }
    Some(out)
}

fn corrections() -> &'static [[i16; 3]] {
    CORRECTIONS.get_or_init(|| {
        let range = -CORRECTION_RANGE..=CORRECTION_RANGE;
        let mut deltas = Vec::new();
        for r in range.clone() {
            for g in range.clone() {
                for b in range.clone() {
                    deltas.push([r, g, b]);
                }
            }
        }
        deltas.sort_by_key(|d| {
            let l1: i16 = d.iter().map(|c| c.abs()).sum();
            let linf = d.iter().map(|c| c.abs()).max().unwrap_or(0);
            (l1, linf, *d)
        });
        deltas
    })
}
