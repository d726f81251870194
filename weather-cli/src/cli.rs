use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, Phase, WeatherProvider, WeatherWidget, config::API_KEY_ENV, provider_from_config,
    render,
};

use crate::terminal;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city, in your terminal")]
pub struct Cli {
    /// Read configuration from this file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit debug diagnostics on stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive widget (the default).
    Run {
        /// City shown on startup; overrides the configured default.
        #[arg(long)]
        city: Option<String>,
    },

    /// Look up one city, print the widget once and exit.
    Show {
        /// City name, e.g. "Dubai" or "New York".
        city: String,
    },

    /// Store the API key and default city.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        match self.command.unwrap_or(Command::Run { city: None }) {
            Command::Run { city } => {
                let city = city.unwrap_or_else(|| config.default_city().to_string());
                let provider = provider_from_config(&config)?;
                terminal::run(provider, WeatherWidget::new(city)).await
            }
            Command::Show { city } => show(&config, city).await,
            Command::Configure => configure(config, self.config.as_deref()),
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

async fn show(config: &Config, city: String) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let mut widget = WeatherWidget::new(city);

    let ticket = widget.mount();
    let outcome = provider.current(&ticket.city).await;
    widget.apply(&ticket, outcome);

    print!("{}", render::view(&widget));

    if widget.phase() == Phase::Failure {
        anyhow::bail!("lookup for '{}' failed", widget.query());
    }
    Ok(())
}

fn configure(mut config: Config, path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("API key prompt was aborted")?;

    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Default city prompt was aborted")?;
    config.set_default_city(city);

    let saved_to = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };

    println!("Saved configuration to {}", saved_to.display());
    if std::env::var_os(API_KEY_ENV).is_some() {
        println!("Note: {API_KEY_ENV} is set and takes precedence over the stored key.");
    }
    Ok(())
}
