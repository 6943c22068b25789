//! Open-Meteo forecast client: blocking HTTP with a fixed retry policy and
//! an on-disk response cache with a fixed expiry. The rest of the program
//! treats this module as an opaque data source.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use directories::ProjectDirs;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Location;
use crate::error::FetchError;

const BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HOURLY_VARIABLE: &str = "temperature_2m";

const RETRIES: u32 = 5;
const BACKOFF: Duration = Duration::from_millis(200);
const CACHE_EXPIRY: Duration = Duration::from_secs(3600);

#[derive(Deserialize, Debug)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub hourly_units: HourlyUnits,
    pub hourly: Hourly,
}

#[derive(Deserialize, Debug)]
pub struct HourlyUnits {
    #[serde(rename = "temperature_2m")]
    pub temperature: String,
}

#[derive(Deserialize, Debug)]
pub struct Hourly {
    #[serde(rename = "temperature_2m")]
    pub temperature: Vec<f32>,
}

pub struct OpenMeteo {
    http: Client,
    cache: ResponseCache,
}

impl OpenMeteo {
    pub fn new() -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent("meteogram")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            cache: ResponseCache::open(),
        })
    }

    /// Fetch the hourly forecast for one location, serving from the response
    /// cache when a fresh enough copy exists.
    pub fn forecast(&self, location: &Location) -> Result<Forecast, FetchError> {
        let query = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("hourly", HOURLY_VARIABLE.to_string()),
            ("timezone", location.timezone.clone()),
            ("past_days", location.past_days.to_string()),
            ("forecast_days", location.forecast_days.to_string()),
        ];
        let key = format!(
            "forecast_{}_{}_{}_{}.json",
            location.latitude, location.longitude, location.past_days, location.forecast_days
        );

        let body = match self.cache.lookup(&key) {
            Some(body) => {
                debug!(key = %key, "serving forecast from response cache");
                body
            }
            None => {
                let body = self.get_with_retry(&query)?;
                self.cache.store(&key, &body);
                body
            }
        };

        Ok(serde_json::from_str(&body)?)
    }

    fn get_with_retry(&self, query: &[(&str, String)]) -> Result<String, FetchError> {
        let mut backoff = BACKOFF;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get(query) {
                Ok(body) => return Ok(body),
                Err(err) if attempt < RETRIES => {
                    warn!(attempt, error = %err, "forecast request failed, retrying");
                    thread::sleep(backoff);
                    backoff *= 2;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn get(&self, query: &[(&str, String)]) -> Result<String, FetchError> {
        let response = self.http.get(BASE_URL).query(query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text()?)
    }
}

/// Cached raw response bodies, one file per request, aged out by mtime.
/// Cache trouble is never fatal; a miss just means a network round trip.
struct ResponseCache {
    dir: Option<PathBuf>,
    expiry: Duration,
}

impl ResponseCache {
    fn open() -> Self {
        let dir = ProjectDirs::from("dev", "meteogram", "meteogram")
            .map(|dirs| dirs.cache_dir().to_path_buf());
        Self {
            dir,
            expiry: CACHE_EXPIRY,
        }
    }

    #[cfg(test)]
    fn with_dir(dir: PathBuf, expiry: Duration) -> Self {
        Self {
            dir: Some(dir),
            expiry,
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let path = self.dir.as_ref()?.join(key);
        let modified = fs::metadata(&path).ok()?.modified().ok()?;
        if modified.elapsed().ok()? > self.expiry {
            return None;
        }
        fs::read_to_string(&path).ok()
    }

    fn store(&self, key: &str, body: &str) {
        let Some(dir) = self.dir.as_ref() else {
            return;
        };
        let result = fs::create_dir_all(dir).and_then(|()| fs::write(dir.join(key), body));
        if let Err(err) = result {
            debug!(key = %key, error = %err, "could not write response cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "latitude": 34.3434,
        "longitude": -4.44,
        "timezone": "Africa/Casablanca",
        "timezone_abbreviation": "+01",
        "hourly_units": { "time": "iso8601", "temperature_2m": "°C" },
        "hourly": {
            "time": ["2024-03-01T00:00", "2024-03-01T01:00"],
            "temperature_2m": [11.3, 10.8]
        }
    }"#;

    #[test]
    fn forecast_response_deserializes() {
        let forecast: Forecast = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(forecast.timezone, "Africa/Casablanca");
        assert_eq!(forecast.timezone_abbreviation, "+01");
        assert_eq!(forecast.hourly_units.temperature, "°C");
        assert_eq!(forecast.hourly.temperature, vec![11.3, 10.8]);
    }

    #[test]
    fn cache_round_trip_within_expiry() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = ResponseCache::with_dir(tmp.path().to_path_buf(), Duration::from_secs(60));
        assert_eq!(cache.lookup("k.json"), None);
        cache.store("k.json", SAMPLE);
        assert_eq!(cache.lookup("k.json").as_deref(), Some(SAMPLE));
    }

    #[test]
    fn expired_entries_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = ResponseCache::with_dir(tmp.path().to_path_buf(), Duration::ZERO);
        cache.store("k.json", SAMPLE);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.lookup("k.json"), None);
    }
}
