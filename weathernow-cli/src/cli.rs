use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::validator::ValueRequiredValidator;
use weathernow_core::{Config, SearchController, provider_from_config};

use crate::{boundary, display};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Current weather conditions by city name")]
pub struct Cli {
    /// Without a subcommand, starts the interactive search session.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API credential.
    Configure,

    /// Show current weather for a city and exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show(&city).await,
            None => {
                let config = Config::load()?;
                boundary::run_guarded(config).await
            }
        }
    }
}

/// Interactive credential setup; overwrites any existing config.
fn configure() -> Result<()> {
    let api_key = inquire::Text::new("OpenWeatherMap API key:")
        .with_validator(ValueRequiredValidator::default())
        .prompt()?;

    let config = Config::new(api_key.trim().to_string());
    config.validate()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// One-shot lookup through the same controller the session uses.
async fn show(city: &str) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut controller = SearchController::new(provider);
    controller.submit(city).await;

    if let Some(record) = controller.last_result() {
        println!("{}", display::weather_card(record));
        return Ok(());
    }

    if let Some(message) = controller.last_error() {
        anyhow::bail!("{message}");
    }

    // Idle: the input was empty or whitespace-only and never left the gate.
    anyhow::bail!("City name must not be empty")
}
