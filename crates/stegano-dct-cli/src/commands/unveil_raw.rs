use std::fs;
use std::path::PathBuf;

use clap::Args;
use stegano_dct::{CodecOptions, StegoError};

use crate::CliResult;

/// Unveils raw bytes, no length header is interpreted
#[derive(Args, Debug)]
pub struct UnveilRawArgs {
    /// Source image that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub image: PathBuf,

    /// Number of bytes to read
    #[arg(short = 'l', long = "length", value_name = "bytes", required = true)]
    pub length: usize,

    /// Raw data will be stored as binary file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output_file: PathBuf,
}

impl UnveilRawArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let data = stegano_dct::commands::unveil_raw(&self.image, self.length, options)?;

        fs::write(&self.output_file, data).map_err(|source| StegoError::WriteError { source })
    }
}
