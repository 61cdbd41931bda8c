//! Config command for managing CLI configuration

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::Cli;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// List all config values
    Show,
    /// Initialize default config file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let path = cli.config_path();
    match &args.command {
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Show => {
            println!("Config file: {}", path.display());
            println!();
            for key in Config::keys() {
                let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
                println!("{} = {}", key, value);
            }
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            let config = Config {
                format: Some("text".to_string()),
                log_level: Some("warn".to_string()),
            };
            config.save_to(&path)?;
            println!("Created config file at {}", path.display());
        }
    }
    Ok(())
}
