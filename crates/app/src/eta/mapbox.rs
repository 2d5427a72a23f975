//! Mapbox geocoding and directions ETA provider.
//!
//! Both the delivery address and the restaurant origin are geocoded, then the
//! driving duration between them is turned into whole minutes.

use std::fmt;

use async_trait::async_trait;
use courier::{DeliveryError, address::DeliveryAddress};
use reqwest::{Client, Url};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::EtaService;

/// Public Mapbox API host.
pub const DEFAULT_MAPBOX_BASE_URL: &str = "https://api.mapbox.com";

/// Floor applied to every estimate.
pub const MINIMUM_ETA_MINUTES: u32 = 5;

/// Connection settings for the Mapbox API.
#[derive(Clone)]
pub struct MapboxConfig {
    /// API host, e.g. `"https://api.mapbox.com"`.
    pub base_url: String,

    /// Mapbox access token.
    pub access_token: String,

    /// Address every delivery is routed from.
    pub origin: DeliveryAddress,
}

impl fmt::Debug for MapboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[redacted]")
            .field("origin", &self.origin)
            .finish()
    }
}

/// Longitude/latitude pair as returned by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Coordinates {
    longitude: f64,
    latitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    /// Seconds
    duration: f64,
}

/// ETA provider backed by the Mapbox geocoding and directions APIs.
#[derive(Debug, Clone)]
pub struct MapboxEtaService {
    config: MapboxConfig,
    http: Client,
}

impl MapboxEtaService {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: MapboxConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn geocode(&self, address: &DeliveryAddress) -> Result<Coordinates, DeliveryError> {
        let url = self.endpoint(&[
            "geocoding",
            "v5",
            "mapbox.places",
            &format!("{}.json", address.formatted()),
        ])?;

        let response: GeocodingResponse = self.get_json(url, &[("limit", "1")]).await?;

        let coordinates = first_coordinates(response).ok_or(DeliveryError::InvalidAddress)?;

        debug!(
            address = %address,
            longitude = coordinates.longitude,
            latitude = coordinates.latitude,
            "geocoded address"
        );

        Ok(coordinates)
    }

    async fn driving_minutes(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<u32, DeliveryError> {
        let url = self.endpoint(&[
            "directions",
            "v5",
            "mapbox",
            "driving",
            &format!(
                "{},{};{},{}",
                from.longitude, from.latitude, to.longitude, to.latitude
            ),
        ])?;

        let response: DirectionsResponse = self.get_json(url, &[]).await?;

        let route = response
            .routes
            .first()
            .ok_or_else(|| DeliveryError::Network("No route found".to_string()))?;

        let minutes = eta_from_duration(route.duration);

        debug!(duration_seconds = route.duration, minutes, "driving estimate");

        Ok(minutes)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DeliveryError> {
        endpoint(&self.config.base_url, segments)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, DeliveryError> {
        let response = self
            .http
            .get(url)
            .query(&[("access_token", self.config.access_token.as_str())])
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if !status.is_success() {
            warn!(%status, "mapbox request failed");

            return Err(DeliveryError::Network(format!("HTTP {}", status.as_u16())));
        }

        let body = response.bytes().await.map_err(transport_error)?;

        decode(&body)
    }
}

#[async_trait]
impl EtaService for MapboxEtaService {
    async fn estimate_minutes(&self, address: &DeliveryAddress) -> Result<u32, DeliveryError> {
        if !address.is_valid() {
            return Err(DeliveryError::InvalidAddress);
        }

        let destination = self.geocode(&address.trimmed()).await?;
        let origin = self.geocode(&self.config.origin).await?;

        self.driving_minutes(origin, destination).await
    }
}

/// Whole minutes for a driving duration, rounded up and never below
/// [`MINIMUM_ETA_MINUTES`].
pub fn eta_from_duration(duration_seconds: f64) -> u32 {
    let minutes = (duration_seconds / 60.0).ceil();

    if minutes.is_nan() {
        return MINIMUM_ETA_MINUTES;
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped to the u32 range first"
    )]
    let minutes = minutes.clamp(0.0, f64::from(u32::MAX)) as u32;

    minutes.max(MINIMUM_ETA_MINUTES)
}

fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, DeliveryError> {
    let mut url = Url::parse(base_url)
        .map_err(|error| DeliveryError::Network(format!("invalid Mapbox URL: {error}")))?;

    url.path_segments_mut()
        .map_err(|()| DeliveryError::Network(format!("invalid Mapbox URL: {base_url}")))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

fn first_coordinates(response: GeocodingResponse) -> Option<Coordinates> {
    let feature = response.features.into_iter().next()?;

    match feature.geometry.coordinates.as_slice() {
        [longitude, latitude, ..] => Some(Coordinates {
            longitude: *longitude,
            latitude: *latitude,
        }),
        _ => None,
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DeliveryError> {
    serde_json::from_slice(body).map_err(|error| DeliveryError::Decoding(error.to_string()))
}

fn transport_error(error: reqwest::Error) -> DeliveryError {
    if error.is_decode() {
        DeliveryError::Decoding(error.to_string())
    } else {
        DeliveryError::Network(error.to_string())
    }
}
