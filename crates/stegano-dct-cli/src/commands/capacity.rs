use std::path::PathBuf;

use clap::Args;
use stegano_dct::CodecOptions;

use crate::CliResult;

/// Prints how many message bytes an image can carry
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Raw cover image
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub image: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let bytes = stegano_dct::commands::capacity(&self.image, options)?;
        println!("{bytes}");

        Ok(())
    }
}
