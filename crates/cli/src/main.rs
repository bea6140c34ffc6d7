//! CLI entry point for hashring.

use clap::Parser;
use hashring_cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.init_logging();
    let result = config.run()?;
    print!("{}", result);
    Ok(())
}
