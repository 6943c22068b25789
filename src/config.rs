//! Location and chart configuration. Loaded from a TOML file when one is
//! given, otherwise a built-in two-location default. Everything that could
//! fail mid-render is validated here instead.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::window::WindowPolicy;

/// One charted location: coordinates, fetch range, and display metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Line colour as `#rrggbb`.
    pub color: String,
    /// Timezone mode passed through to Open-Meteo; "auto" resolves from
    /// the coordinates.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub past_days: u32,
    pub forecast_days: u32,
}

fn default_timezone() -> String {
    "auto".to_string()
}

impl Location {
    /// Hours covered by the configured fetch range.
    pub fn fetch_range_hours(&self) -> usize {
        ((self.past_days + self.forecast_days) * 24) as usize
    }

    pub fn rgb(&self) -> Result<(u8, u8, u8), ConfigError> {
        parse_hex_color(&self.color)
            .ok_or_else(|| ConfigError(format!("colour {:?} is not of the form #rrggbb", self.color)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub locations: Vec<Location>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locations: vec![
                Location {
                    name: "Example 1".to_string(),
                    latitude: 34.3434,
                    longitude: -4.44,
                    color: "#2caffe".to_string(),
                    timezone: default_timezone(),
                    past_days: 1,
                    forecast_days: 3,
                },
                Location {
                    name: "Example 2".to_string(),
                    latitude: 2.22,
                    longitude: 11.1111,
                    color: "#ffa808".to_string(),
                    timezone: default_timezone(),
                    past_days: 1,
                    forecast_days: 3,
                },
            ],
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|err| {
                    ConfigError(format!("could not read {}: {err}", path.display()))
                })?;
                toml::from_str(&contents).map_err(|err| {
                    ConfigError(format!("could not parse {}: {err}", path.display()))
                })?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn policy(&self) -> WindowPolicy {
        WindowPolicy::for_locations(self.locations.len())
    }

    /// Fail fast on anything the render pass would otherwise trip over:
    /// malformed coordinates or colours, and window offsets the configured
    /// fetch range cannot contain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locations.is_empty() {
            return Err(ConfigError("at least one location is required".to_string()));
        }
        let policy = self.policy();
        for loc in &self.locations {
            if !(-90.0..=90.0).contains(&loc.latitude) {
                return Err(ConfigError(format!(
                    "{}: latitude {} is outside [-90, 90]",
                    loc.name, loc.latitude
                )));
            }
            if !(-180.0..=180.0).contains(&loc.longitude) {
                return Err(ConfigError(format!(
                    "{}: longitude {} is outside [-180, 180]",
                    loc.name, loc.longitude
                )));
            }
            loc.rgb()?;
            if u64::from(loc.past_days) != policy.history_days() {
                return Err(ConfigError(format!(
                    "{}: window policy expects {} past day(s), configured {}",
                    loc.name,
                    policy.history_days(),
                    loc.past_days
                )));
            }
            let needed = policy.max_offset() + policy.span_hours() + 1;
            if loc.fetch_range_hours() < needed {
                return Err(ConfigError(format!(
                    "{}: window can reach hour {} but only {} hours are fetched",
                    loc.name,
                    needed - 1,
                    loc.fetch_range_hours()
                )));
            }
        }
        Ok(())
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let byte = |range| u8::from_str_radix(&hex[range], 16).ok();
    Some((byte(0..2)?, byte(2..4)?, byte(4..6)?))
}
