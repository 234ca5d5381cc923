use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use rfbridge_core::config::{Config, WarnLevel};

use crate::output::print_json;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration as YAML
    Show,
    /// Check the configuration for problems
    Validate,
}

pub fn run(
    config_path: Option<&Path>,
    subcommand: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path).context("failed to load config")?;

    match subcommand {
        ConfigSubcommand::Show => {
            if json {
                print_json(&config)?;
            } else {
                print!("{}", serde_yaml::to_string(&config)?);
            }
            Ok(())
        }
        ConfigSubcommand::Validate => {
            let warnings = config.validate();
            if json {
                print_json(&warnings)?;
            } else if warnings.is_empty() {
                println!("config ok");
            } else {
                for w in &warnings {
                    let level = match w.level {
                        WarnLevel::Warning => "warning",
                        WarnLevel::Error => "error",
                    };
                    println!("{level}: {}", w.message);
                }
            }
            if warnings.iter().any(|w| w.level == WarnLevel::Error) {
                anyhow::bail!("configuration has errors");
            }
            Ok(())
        }
    }
}
