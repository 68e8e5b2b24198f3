use crate::error::{Result, StegoError};

/// Default quantization step applied to luma coefficients before parity embedding.
pub const DEFAULT_QUANTIZATION_STEP: u16 = 4;

/// Codec configuration shared by embedding and extraction.
///
/// Both sides must use identical options, otherwise the extracted bits are noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Every luma coefficient of a block that carries payload bits is divided by this
    /// step and rounded before its parity is adjusted, and multiplied by it again
    /// before the inverse transform.
    ///
    /// `1` is plain integer rounding of the coefficients. Such ±1 changes are finer
    /// than what 8 bit pixels can hold, so most of them are lost when the block is
    /// written back. Larger steps trade image fidelity for recoverability.
    pub quantization_step: u16,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            quantization_step: DEFAULT_QUANTIZATION_STEP,
        }
    }
}

impl CodecOptions {
    pub fn with_quantization_step(mut self, step: u16) -> Self {
        self.quantization_step = step;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.quantization_step == 0 {
            return Err(StegoError::InvalidQuantizationStep);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        let options = CodecOptions::default();

        assert_eq!(options.quantization_step, DEFAULT_QUANTIZATION_STEP);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn zero_step_is_rejected() {
        let options = CodecOptions::default().with_quantization_step(0);

        assert!(matches!(
            options.validate(),
            Err(StegoError::InvalidQuantizationStep)
        ));
    }
}
