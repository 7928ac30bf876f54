// CLI binary entry point for id3lens

use anyhow::Result;
use clap::Parser;

use cli::commands::{command_extract, command_show};
use cli::{Commands, Config, OutputFormatter};

mod cli;

fn main() -> Result<()> {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.loglevel.to_level_filter())
        .parse_default_env()
        .format_timestamp_secs()
        .try_init()?;

    let formatter = OutputFormatter::new(config.quiet);

    match &config.command {
        Commands::Show(args) => command_show(args, &formatter),
        Commands::Extract(args) => command_extract(args, &formatter),
    }
}
