//! OpenWeather One Call API client
//!
//! Retrieves the current temperature at a zone's coordinates. The value
//! feeds the live observation only; a failed fetch never fails the request.
//! `temperature_or_fallback` absorbs every error into the configured
//! fallback temperature and logs it.
//!
//! API Documentation: https://openweathermap.org/api/one-call-3

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::time::Duration;

use crate::config::WeatherConfig;
use crate::logging::{self, Source};
use crate::zones::{ZONE_REGISTRY, Zone, zone_info};

// ============================================================================
// API Response Structures
// ============================================================================

/// Subset of the One Call response we read
#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    pub current: Option<OneCallCurrent>,
}

#[derive(Debug, Deserialize)]
pub struct OneCallCurrent {
    pub dt: Option<i64>,  // Unix seconds, UTC
    pub temp: Option<f64>,  // °C with units=metric
}

/// Temperature used for one request, with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub zone: Zone,
    pub temperature_c: f64,
    pub observed_at: Option<DateTime<Utc>>,
    /// False when the fallback value was substituted
    pub live: bool,
}

impl TemperatureReading {
    /// One-line provenance for request logs
    pub fn provenance(&self) -> String {
        match (self.live, self.observed_at) {
            (true, Some(at)) => format!(
                "{:.1} °C observed {}",
                self.temperature_c,
                at.format("%Y-%m-%d %H:%M UTC")
            ),
            (true, None) => format!("{:.1} °C live, observation time missing", self.temperature_c),
            (false, _) => format!("{:.1} °C fallback", self.temperature_c),
        }
    }
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Fetch the current temperature (°C) at a coordinate
pub fn fetch_current(
    client: &reqwest::blocking::Client,
    base_url: &str,
    api_key: &str,
    latitude: f64,
    longitude: f64,
) -> Result<(f64, Option<DateTime<Utc>>), Box<dyn std::error::Error>> {
    let lat = latitude.to_string();
    let lon = longitude.to_string();

    let response = client
        .get(base_url)
        .query(&[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", api_key),
            ("units", "metric"),
        ])
        .header("Accept", "application/json")
        .send()?;

    if !response.status().is_success() {
        return Err(format!("OpenWeather API error: {}", response.status()).into());
    }

    let text = response.text()?;
    parse_onecall_response(&text)
}

/// Parse a One Call JSON body into (temperature, observation time)
pub fn parse_onecall_response(
    body: &str,
) -> Result<(f64, Option<DateTime<Utc>>), Box<dyn std::error::Error>> {
    let parsed: OneCallResponse = serde_json::from_str(body)?;
    let current = parsed.current.ok_or("Response missing current.temp")?;
    let temp = current.temp.ok_or("Response missing current.temp")?;
    if !temp.is_finite() {
        return Err(format!("Response carried non-finite temperature {}", temp).into());
    }
    let observed_at = current.dt.and_then(|secs| DateTime::from_timestamp(secs, 0));
    Ok((temp, observed_at))
}

/// Picks the zone whose coordinates are used for the fetch
pub fn pick_zone<R: Rng + ?Sized>(rng: &mut R) -> Zone {
    ZONE_REGISTRY
        .choose(rng)
        .map(|info| info.zone)
        .unwrap_or(Zone::Baga)
}

fn try_fetch(
    weather: &WeatherConfig,
    zone: Zone,
) -> Result<(f64, Option<DateTime<Utc>>), Box<dyn std::error::Error>> {
    let api_key = weather.api_key().ok_or("No API key configured")?;
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(weather.timeout_secs))
        .build()?;
    let info = zone_info(zone);
    fetch_current(&client, &weather.base_url, &api_key, info.latitude, info.longitude)
}

/// Fetch the temperature at `zone`, substituting the fallback on any failure
pub fn temperature_or_fallback(weather: &WeatherConfig, zone: Zone) -> TemperatureReading {
    match try_fetch(weather, zone) {
        Ok((temperature_c, observed_at)) => {
            logging::debug(
                Source::Weather,
                Some(zone.name()),
                &format!("current temperature {:.1} °C", temperature_c),
            );
            TemperatureReading {
                zone,
                temperature_c,
                observed_at,
                live: true,
            }
        }
        Err(e) => {
            logging::log_weather_failure(zone.name(), "fetch_current", e.as_ref());
            TemperatureReading {
                zone,
                temperature_c: weather.fallback_temperature_c,
                observed_at: None,
                live: false,
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_onecall_reads_current_temp() {
        let body = r#"{"lat":15.5436,"lon":73.7571,"timezone":"Asia/Kolkata",
                       "current":{"dt":1714564800,"temp":29.4,"humidity":74}}"#;
        let (temp, observed_at) = parse_onecall_response(body).expect("should parse");
        assert_eq!(temp, 29.4);
        assert_eq!(
            observed_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T12:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_parse_onecall_without_current_is_error() {
        let err = parse_onecall_response(r#"{"lat":15.5,"lon":73.7}"#).unwrap_err();
        assert!(err.to_string().contains("missing current.temp"));
    }

    #[test]
    fn test_parse_onecall_without_temp_is_error() {
        assert!(parse_onecall_response(r#"{"current":{"dt":1714564800}}"#).is_err());
    }

    #[test]
    fn test_parse_onecall_rejects_garbage() {
        assert!(parse_onecall_response("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_missing_api_key_falls_back() {
        let weather = WeatherConfig {
            api_key_env: "FISHFINDER_TEST_NO_SUCH_KEY".to_string(),
            fallback_temperature_c: 27.25,
            ..WeatherConfig::default()
        };
        let reading = temperature_or_fallback(&weather, Zone::Colva);
        assert!(!reading.live);
        assert_eq!(reading.temperature_c, 27.25);
        assert_eq!(reading.zone, Zone::Colva);
        assert!(reading.observed_at.is_none());
        assert!(reading.provenance().ends_with("°C fallback"));
    }

    #[test]
    fn test_live_provenance_names_observation_time() {
        let reading = TemperatureReading {
            zone: Zone::Baga,
            temperature_c: 29.4,
            observed_at: DateTime::from_timestamp(1714564800, 0),
            live: true,
        };
        assert_eq!(reading.provenance(), "29.4 °C observed 2024-05-01 12:00 UTC");
    }

    #[test]
    fn test_pick_zone_covers_registry() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(pick_zone(&mut rng));
        }
        assert_eq!(seen.len(), ZONE_REGISTRY.len());
    }
}
