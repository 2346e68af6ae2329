//! quire - markdown blog content pipeline.

use anyhow::Result;
use clap::Parser;
use quire::{
    build::{build_site, scan_site},
    cli::{Cli, Commands},
    config::SiteConfig,
    log, logger,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build => build_site(&config).map(|_| ()),
        Commands::Scan => scan_site(&config).map(|_| ()),
        Commands::Check => {
            if config.config_path.as_os_str().is_empty() {
                log!("check"; "no config file, defaults are valid");
            } else {
                log!("check"; "{} is valid", config.config_path.display());
            }
            Ok(())
        }
    }
}
