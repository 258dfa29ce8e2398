//! One-shot geolocation.
//!
//! The location is acquired once at startup through a [`GeoProvider`] and the
//! resulting [`LocationSnapshot`] is reused for every memory in the session.
//! Failures never propagate: they become a human-readable label.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::LocationConfig;
use crate::memory::types::{GeoPosition, Location};

pub const LOCATING_LABEL: &str = "Localizando...";
pub const UNAVAILABLE_LABEL: &str = "Localização indisponível";
pub const UNSUPPORTED_LABEL: &str = "Geolocalização não suportada";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("location lookup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("location lookup returned HTTP {0}")]
    Status(u16),
    #[error("location lookup returned no coordinates")]
    MissingCoordinates,
    #[error("coordinates out of range: {lat}, {lng}")]
    OutOfRange { lat: f64, lng: f64 },
}

/// A source of device coordinates.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPosition, GeoError>;
}

/// Coordinates taken verbatim from configuration.
pub struct FixedProvider {
    position: GeoPosition,
}

impl FixedProvider {
    pub fn new(position: GeoPosition) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeoProvider for FixedProvider {
    async fn current_position(&self) -> Result<GeoPosition, GeoError> {
        validate(self.position)
    }
}

/// Approximate coordinates from an IP geolocation endpoint.
///
/// Accepts either `lat`/`lon` or `latitude`/`longitude` in the JSON answer.
pub struct IpLookupProvider {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(alias = "latitude")]
    lat: Option<f64>,
    #[serde(alias = "longitude", alias = "lng")]
    lon: Option<f64>,
}

impl IpLookupProvider {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl GeoProvider for IpLookupProvider {
    async fn current_position(&self) -> Result<GeoPosition, GeoError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }
        let body: IpLookupResponse = response.json().await?;
        match (body.lat, body.lon) {
            (Some(lat), Some(lng)) => validate(GeoPosition { lat, lng }),
            _ => Err(GeoError::MissingCoordinates),
        }
    }
}

fn validate(position: GeoPosition) -> Result<GeoPosition, GeoError> {
    let GeoPosition { lat, lng } = position;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Ok(position)
    } else {
        Err(GeoError::OutOfRange { lat, lng })
    }
}

/// Build the provider named in config. `None` means geolocation is not
/// supported in this environment.
pub fn provider_from_config(config: &LocationConfig) -> Result<Option<Box<dyn GeoProvider>>> {
    match config.provider.as_str() {
        "ip" => Ok(Some(Box::new(IpLookupProvider::new(&config.lookup_url)?))),
        "fixed" => {
            let (Some(lat), Some(lng)) = (config.latitude, config.longitude) else {
                anyhow::bail!("location provider 'fixed' needs latitude and longitude");
            };
            Ok(Some(Box::new(FixedProvider::new(GeoPosition { lat, lng }))))
        }
        "none" => Ok(None),
        other => anyhow::bail!("unknown location provider: {other}. Supported: ip, fixed, none"),
    }
}

/// The session's location, captured once.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSnapshot {
    pub position: Option<GeoPosition>,
    pub label: String,
}

impl LocationSnapshot {
    pub fn located(position: GeoPosition) -> Self {
        Self {
            label: format!("{:.3}, {:.3}", position.lat, position.lng),
            position: Some(position),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            position: None,
            label: UNAVAILABLE_LABEL.into(),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            position: None,
            label: UNSUPPORTED_LABEL.into(),
        }
    }

    /// The record-level location, present only when coordinates exist.
    pub fn to_location(&self) -> Option<Location> {
        self.position.map(|p| Location {
            lat: p.lat,
            lng: p.lng,
            text: self.label.clone(),
        })
    }
}

/// Ask the provider once. Never fails; errors become the unavailable label.
pub async fn locate(provider: Option<&dyn GeoProvider>) -> LocationSnapshot {
    let Some(provider) = provider else {
        tracing::info!("geolocation not supported");
        return LocationSnapshot::unsupported();
    };

    match provider.current_position().await {
        Ok(position) => {
            tracing::info!(lat = position.lat, lng = position.lng, "location acquired");
            LocationSnapshot::located(position)
        }
        Err(e) => {
            tracing::warn!(error = %e, "geolocation failed");
            LocationSnapshot::unavailable()
        }
    }
}
