use thiserror::Error;

/// Network or API failure while talking to Open-Meteo, after retries are
/// exhausted. Fatal to the render pass; no partial chart is drawn.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to Open-Meteo failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Open-Meteo returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("could not decode forecast response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A series too small (or too flat) to derive a readable axis from.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("insufficient data: {0}")]
pub struct InsufficientDataError(pub &'static str);

/// Invalid configuration, caught at startup rather than mid-render.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("configuration error: {0}")]
pub struct ConfigError(pub String);
