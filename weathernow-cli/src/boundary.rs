//! Last-resort crash boundary around the interactive session.
//!
//! Expected failures never reach this module: the client and controller
//! normalize them into state. What lands here is a defect below the
//! boundary, handled by logging it, showing a static recovery message, and
//! offering a full reload of the session. No partial recovery is attempted.

use anyhow::Result;
use tracing::error;
use weathernow_core::Config;

use crate::session;

pub async fn run_guarded(config: Config) -> Result<()> {
    loop {
        let session = tokio::spawn(session::run(config.clone()));

        match session.await {
            Ok(result) => return result,
            Err(join_err) if join_err.is_panic() => {
                error!(error = %join_err, "session panicked");

                eprintln!();
                eprintln!("Oops! Something went wrong.");
                eprintln!("We're sorry for the inconvenience.");
                eprintln!();

                if !offer_reload() {
                    return Ok(());
                }
                // Loop around with a fresh session built from the same config.
            }
            Err(join_err) => return Err(join_err.into()),
        }
    }
}

fn offer_reload() -> bool {
    inquire::Confirm::new("Restart the session?")
        .with_default(true)
        .prompt()
        .unwrap_or(false)
}
