use std::path::PathBuf;

use clap::Args;
use stegano_dct::CodecOptions;

use crate::cli::ask_for;
use crate::CliResult;

/// Hides a message in a raw image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Raw cover image, used readonly. Prompted for when missing
    #[arg(short = 'i', long = "in", value_name = "cover image")]
    pub cover: Option<PathBuf>,

    /// Text message that will be hidden. Prompted for when missing
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        default_value = "output_image.raw"
    )]
    pub write_to_file: PathBuf,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let cover = match self.cover {
            Some(cover) => cover,
            None => ask_for("Cover image")?.into(),
        };
        let message = match self.message {
            Some(message) => message,
            None => ask_for("Secret message")?,
        };

        stegano_dct::commands::hide(&cover, &self.write_to_file, message.as_bytes(), options)
    }
}
