//! Human-friendly output formatting for weather records.

use weathernow_core::WeatherRecord;

/// External image host for provider icon codes; the icon itself is fetched
/// by whatever the user opens the URL with.
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

pub fn icon_url(icon_id: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_id}@2x.png")
}

/// Render a record as a text card. Temperatures are rounded here and only
/// here; the record keeps full precision.
pub fn weather_card(record: &WeatherRecord) -> String {
    let condition = record.primary_condition();
    let temperature = record.temperature_c.round();
    let feels_like = record.feels_like_c.round();

    format!(
        "{name}\n\
           Temperature  {temperature:.0}°C  (feels like {feels_like:.0}°C)\n\
           Humidity     {humidity}%\n\
           Wind speed   {wind} m/s\n\
           Conditions   {description}\n\
           Icon         {icon}\n\
           Observed     {observed} UTC",
        name = record.location_name,
        humidity = record.humidity_pct,
        wind = record.wind_speed_mps,
        description = capitalize_first(&condition.description),
        icon = icon_url(&condition.icon_id),
        observed = record.observed_at.format("%Y-%m-%d %H:%M"),
    )
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
