use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use stegano_dct::{CodecOptions, StegoError};

use crate::CliResult;

/// Unveils a message hidden by `hide`
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub image: PathBuf,

    /// Message will be stored in that file instead of printed
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let message = stegano_dct::commands::unveil(&self.image, options)?;

        match self.output_file {
            Some(file) => fs::write(file, &message),
            None => io::stdout().write_all(&message),
        }
        .map_err(|source| StegoError::WriteError { source })
    }
}
