//! Interactive search session: prompt for a city, submit it through the
//! controller, render the resulting state, repeat.

use anyhow::Result;
use inquire::InquireError;
use weathernow_core::{Config, Phase, SearchController, provider_from_config};

use crate::display;

pub async fn run(config: Config) -> Result<()> {
    let provider = provider_from_config(&config)?;
    let mut controller = SearchController::new(provider);

    println!("weathernow — current conditions by city name.");
    println!("Enter a city name to see current conditions. Press Esc to quit.");
    println!();

    loop {
        let input = match inquire::Text::new("City:").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        controller.set_query(&input);

        let city = input.trim();
        if city.is_empty() {
            // Same no-op as the controller's own gate; skip the noise of a
            // rejected submit.
            continue;
        }

        println!("Searching for \"{city}\"...");
        controller.submit(&input).await;

        match controller.phase() {
            Phase::Succeeded => {
                if let Some(record) = controller.last_result() {
                    println!();
                    println!("{}", display::weather_card(record));
                    println!();
                }
            }
            Phase::Failed => {
                if let Some(message) = controller.last_error() {
                    println!();
                    println!("{message}");
                    println!();
                }
            }
            Phase::Idle | Phase::Loading => {}
        }
    }

    Ok(())
}
