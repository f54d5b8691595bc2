//! SMS body composition.

use police_alert_models::PoliceStation;

/// First line of every alert, followed by a newline.
pub const ALERT_HEADER: &str = "Alert! Nearby police stations:\n";

/// At most this many stations are listed in the SMS body.
pub const MAX_STATIONS_IN_MESSAGE: usize = 3;

/// Builds the alert text: the header, then one `name, address` line per
/// station for the first [`MAX_STATIONS_IN_MESSAGE`] stations.
///
/// A name or address the provider omitted renders as an empty string.
/// With no stations the body is just the header.
#[must_use]
pub fn compose_alert_message(stations: &[PoliceStation]) -> String {
    let lines: Vec<String> = stations
        .iter()
        .take(MAX_STATIONS_IN_MESSAGE)
        .map(station_line)
        .collect();

    format!("{ALERT_HEADER}{}", lines.join("\n"))
}

fn station_line(station: &PoliceStation) -> String {
    format!(
        "{}, {}",
        station.name.as_deref().unwrap_or_default(),
        station.address.as_deref().unwrap_or_default(),
    )
}
