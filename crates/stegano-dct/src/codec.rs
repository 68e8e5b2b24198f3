//! Parity codec - carries one payload bit per coefficient.
//!
//! A bit is stored as the parity of a coefficient (`c mod 2`, negative values
//! included). Embedding moves a coefficient by at most one, independent of its
//! magnitude.

use crate::error::{Result, StegoError};

/// Embeds bits into, and extracts bits from, a sequence of integer coefficients.
///
/// The i-th bit always maps to the i-th coefficient, so extraction only needs
/// the same coefficient order and the number of bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParityCodec;

impl ParityCodec {
    pub fn new() -> Self {
        ParityCodec
    }

    /// Adjusts `coefficients[i]` so that its parity equals `bits[i]`.
    ///
    /// An odd coefficient carrying a `0` is decremented, an even one carrying a `1`
    /// is incremented, all others are left untouched. Coefficients past
    /// `bits.len()` are never modified.
    pub fn embed(&self, coefficients: &mut [i32], bits: &[bool]) -> Result<()> {
        if bits.len() > coefficients.len() {
            return Err(StegoError::PayloadTooLarge {
                required: bits.len(),
                available: coefficients.len(),
            });
        }

        for (c, &bit) in coefficients.iter_mut().zip(bits) {
            match (bit, is_odd(*c)) {
                (false, true) => *c -= 1,
                (true, false) => *c += 1,
                _ => {}
            }
        }

        Ok(())
    }

    /// Reads the parity of the first `bit_count` coefficients.
    pub fn extract(&self, coefficients: &[i32], bit_count: usize) -> Result<Vec<bool>> {
        if bit_count > coefficients.len() {
            return Err(StegoError::PayloadTooLarge {
                required: bit_count,
                available: coefficients.len(),
            });
        }

        Ok(coefficients[..bit_count].iter().map(|&c| is_odd(c)).collect())
    }
}

#[inline]
fn is_odd(coefficient: i32) -> bool {
    coefficient.rem_euclid(2) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_test_coefficients(count: usize) -> Vec<i32> {
        let mut rng = fastrand::Rng::with_seed(12345);
        (0..count)
            .map(|i| match i % 64 {
                0 => rng.i32(0..2040),
                _ => rng.i32(-300..=300),
            })
            .collect()
    }

    fn generate_test_bits(count: usize, seed: u64) -> Vec<bool> {
        let mut rng = fastrand::Rng::with_seed(seed);
        (0..count).map(|_| rng.bool()).collect()
    }

    #[test]
    fn should_move_coefficients_by_at_most_one() {
        let mut coeffs = vec![4, 5, 4, 5, -3, -3, -2, -2, 0, 0];
        let bits = [false, false, true, true, false, true, false, true, false, true];

        ParityCodec::new().embed(&mut coeffs, &bits).unwrap();

        assert_eq!(coeffs, vec![4, 4, 5, 5, -4, -3, -2, -1, 0, 1]);
    }

    #[test]
    fn should_leave_coefficients_past_the_payload_untouched() {
        let mut coeffs = generate_test_coefficients(64);
        let original = coeffs.clone();

        ParityCodec::new().embed(&mut coeffs, &[true; 8]).unwrap();

        assert_eq!(&coeffs[8..], &original[8..]);
    }

    #[test]
    fn embedding_twice_changes_nothing() {
        let mut coeffs = generate_test_coefficients(128);
        let bits = generate_test_bits(100, 1);
        let codec = ParityCodec::new();

        codec.embed(&mut coeffs, &bits).unwrap();
        let once = coeffs.clone();
        codec.embed(&mut coeffs, &bits).unwrap();

        assert_eq!(coeffs, once);
    }

    #[test]
    fn extract_reverses_embed() {
        let codec = ParityCodec::new();

        for (count, seed) in [(0, 0), (1, 1), (63, 2), (64, 3), (640, 4)] {
            let mut coeffs = generate_test_coefficients(640);
            let original = coeffs.clone();
            let bits = generate_test_bits(count, seed);

            codec.embed(&mut coeffs, &bits).unwrap();

            assert_eq!(codec.extract(&coeffs, bits.len()).unwrap(), bits);
            for (a, b) in coeffs.iter().zip(original.iter()) {
                assert!((a - b).abs() <= 1);
            }
        }
    }

    #[test]
    fn should_fail_when_there_are_more_bits_than_coefficients() {
        let mut coeffs = generate_test_coefficients(8);
        let original = coeffs.clone();
        let codec = ParityCodec::new();

        let result = codec.embed(&mut coeffs, &[true; 9]);

        assert!(matches!(
            result,
            Err(StegoError::PayloadTooLarge {
                required: 9,
                available: 8
            })
        ));
        assert_eq!(coeffs, original);
        assert!(codec.extract(&coeffs, 9).is_err());
    }
}
