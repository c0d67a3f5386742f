use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Normalized result of a weather lookup: a record or a typed failure,
/// never a raised fault.
pub type LookupOutcome = Result<WeatherRecord, LookupError>;

/// One weather condition entry as reported by the provider.
///
/// The provider may return several; the display layer only reads the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Short group name, e.g. "Clouds".
    pub summary: String,
    /// Human-readable description, e.g. "overcast clouds".
    pub description: String,
    /// Provider icon code, e.g. "04d"; resolved to an image URL at display time.
    pub icon_id: String,
}

/// Current conditions for a location, normalized from the provider payload.
///
/// Temperatures are stored unrounded; rounding happens only at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Never empty; the client rejects payloads without at least one entry.
    pub conditions: Vec<Condition>,
    pub observed_at: DateTime<Utc>,
}

impl WeatherRecord {
    /// The condition entry shown to the user.
    pub fn primary_condition(&self) -> &Condition {
        &self.conditions[0]
    }
}
