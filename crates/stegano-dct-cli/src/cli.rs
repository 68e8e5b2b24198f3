use clap::{Parser, Subcommand};
use dialoguer::Input;
use stegano_dct::{StegoError, DEFAULT_QUANTIZATION_STEP};

use crate::commands::*;
use crate::CliResult;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Experimental: quantization step applied to the DCT coefficients
    #[arg(long = "x-quantization-step", global = true, default_value_t = DEFAULT_QUANTIZATION_STEP)]
    pub quantization_step: u16,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    UnveilRaw(unveil_raw::UnveilRawArgs),
    Capacity(capacity::CapacityArgs),
}

/// Prompts on the terminal until a non empty line is entered.
pub fn ask_for(prompt: &str) -> CliResult<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|dialoguer::Error::IO(e)| StegoError::ReadError { source: e })
}
