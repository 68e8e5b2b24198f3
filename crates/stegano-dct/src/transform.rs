//! Orthonormal 8x8 DCT-II and its inverse.
//!
//! Blocks are stored in natural (row-major) order. A coefficient index is
//! `v * 8 + u`, `v` being the vertical and `u` the horizontal frequency. The
//! scale factors are `1/sqrt(8)` for frequency 0 and `sqrt(2/8)` otherwise, so
//! the transform preserves energy and `idct_block(dct_block(x)) == x` up to
//! floating point error.

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::error::{Result, StegoError};

/// Edge length of a transform block.
pub const BLOCK_SIZE: usize = 8;

/// Number of samples (and coefficients) in a block.
pub const BLOCK_LEN: usize = BLOCK_SIZE * BLOCK_SIZE;

/// `COSINE[u][x] = cos((2x + 1) * u * PI / 16)`
static COSINE: OnceLock<[[f64; BLOCK_SIZE]; BLOCK_SIZE]> = OnceLock::new();

/// `NORM[0] = 1/sqrt(8)`, `NORM[u > 0] = sqrt(2/8)`
static NORM: OnceLock<[f64; BLOCK_SIZE]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; BLOCK_SIZE]; BLOCK_SIZE] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];
        for (u, row) in table.iter_mut().enumerate() {
            for (x, value) in row.iter_mut().enumerate() {
                *value = ((2 * x + 1) * u) as f64 * PI / (2 * BLOCK_SIZE) as f64;
                *value = value.cos();
            }
        }
        table
    })
}

fn norm_table() -> &'static [f64; BLOCK_SIZE] {
    NORM.get_or_init(|| {
        let n = BLOCK_SIZE as f64;
        let mut norm = [(2.0 / n).sqrt(); BLOCK_SIZE];
        norm[0] = 1.0 / n.sqrt();
        norm
    })
}

fn check_len(actual: usize) -> Result<()> {
    if actual != BLOCK_LEN {
        return Err(StegoError::InvalidBlockSize {
            expected: BLOCK_LEN,
            actual,
        });
    }
    Ok(())
}

/// Forward DCT of 64 samples.
pub fn dct_block(samples: &[f64]) -> Result<[f64; BLOCK_LEN]> {
    check_len(samples.len())?;
    let cos = cosine_table();
    let c = norm_table();

    // rows
    let mut temp = [0.0f64; BLOCK_LEN];
    for row in 0..BLOCK_SIZE {
        for u in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for x in 0..BLOCK_SIZE {
                sum += samples[row * BLOCK_SIZE + x] * cos[u][x];
            }
            temp[row * BLOCK_SIZE + u] = c[u] * sum;
        }
    }

    // columns
    let mut coefficients = [0.0f64; BLOCK_LEN];
    for col in 0..BLOCK_SIZE {
        for v in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for y in 0..BLOCK_SIZE {
                sum += temp[y * BLOCK_SIZE + col] * cos[v][y];
            }
            coefficients[v * BLOCK_SIZE + col] = c[v] * sum;
        }
    }

    Ok(coefficients)
}

/// Inverse DCT of 64 coefficients, the adjoint of [`dct_block`].
pub fn idct_block(coefficients: &[f64]) -> Result<[f64; BLOCK_LEN]> {
    check_len(coefficients.len())?;
    let cos = cosine_table();
    let c = norm_table();

    // columns
    let mut temp = [0.0f64; BLOCK_LEN];
    for col in 0..BLOCK_SIZE {
        for y in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for v in 0..BLOCK_SIZE {
                sum += c[v] * coefficients[v * BLOCK_SIZE + col] * cos[v][y];
            }
            temp[y * BLOCK_SIZE + col] = sum;
        }
    }

    // rows
    let mut samples = [0.0f64; BLOCK_LEN];
    for row in 0..BLOCK_SIZE {
        for x in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for u in 0..BLOCK_SIZE {
                sum += c[u] * temp[row * BLOCK_SIZE + u] * cos[u][x];
            }
            samples[row * BLOCK_SIZE + x] = sum;
        }
    }

    Ok(samples)
}

/// Forward DCT rounded to integer coefficients.
pub fn forward(samples: &[i32]) -> Result<[i32; BLOCK_LEN]> {
    forward_quantized(samples, 1)
}

/// Inverse DCT of integer coefficients, rounded to integer samples (not clamped).
pub fn inverse(coefficients: &[i32]) -> Result<[i32; BLOCK_LEN]> {
    inverse_quantized(coefficients, 1)
}

/// Forward DCT, every coefficient divided by `step` and rounded.
pub fn forward_quantized(samples: &[i32], step: u16) -> Result<[i32; BLOCK_LEN]> {
    check_len(samples.len())?;
    let step = check_step(step)?;

    let mut input = [0.0f64; BLOCK_LEN];
    for (i, s) in input.iter_mut().zip(samples) {
        *i = *s as f64;
    }

    let coefficients = dct_block(&input)?;
    let mut quantized = [0i32; BLOCK_LEN];
    for (q, c) in quantized.iter_mut().zip(coefficients.iter()) {
        *q = (c / step).round() as i32;
    }

    Ok(quantized)
}

/// Dequantizes with `step`, applies the inverse DCT and rounds the samples.
pub fn inverse_quantized(coefficients: &[i32], step: u16) -> Result<[i32; BLOCK_LEN]> {
    check_len(coefficients.len())?;
    let step = check_step(step)?;

    let mut input = [0.0f64; BLOCK_LEN];
    for (i, c) in input.iter_mut().zip(coefficients) {
        *i = (*c as f64) * step;
    }

    let samples = idct_block(&input)?;
    let mut rounded = [0i32; BLOCK_LEN];
    for (r, s) in rounded.iter_mut().zip(samples.iter()) {
        *r = s.round() as i32;
    }

    Ok(rounded)
}

fn check_step(step: u16) -> Result<f64> {
    if step == 0 {
        return Err(StegoError::InvalidQuantizationStep);
    }
    Ok(step as f64)
}
