use clap::Parser;
use log::debug;
use stegano_dct::{CodecOptions, StegoError};

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, StegoError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let options = CodecOptions::default().with_quantization_step(args.quantization_step);
    debug!("Running {:?} with {:?}", args.command, options);

    match args.command {
        Commands::Hide(cmd) => cmd.run(options),
        Commands::Unveil(cmd) => cmd.run(options),
        Commands::UnveilRaw(cmd) => cmd.run(options),
        Commands::Capacity(cmd) => cmd.run(options),
    }
}
