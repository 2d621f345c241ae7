use super::types::GeoPlace;
use crate::sdk::config::ServiceConfig;
use crate::sdk::routing::error::{GeocodeError, RouteServiceError};
use crate::sdk::routing::service::{Geocoder, RouteService};
use crate::sdk::routing::types::{Coordinate, RouteRequest, RouteResult};
use crate::sdk::util::rate_limit::Limiter;
use async_trait::async_trait;
use reqwest::Client;

fn build_client(config: &ServiceConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
}

/// Geocoder speaking the Nominatim `/search` protocol.
pub struct HttpGeocoder {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl HttpGeocoder {
    pub fn new(config: &ServiceConfig, limiter: Limiter) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.geocoder_url.clone(),
            limiter,
        })
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<Coordinate>, GeocodeError> {
        self.limiter.until_ready().await;
        let url = format!("{}/search", self.base_url);
        log::debug!("[PROVIDER] Calling remote geocode for \"{}\"", query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to send geocode request. URL: {}\nError: {}", url, e);
                GeocodeError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Geocoder returned non-success status: {}", status);
            return Err(GeocodeError::ServiceUnavailable {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let places: Vec<GeoPlace> = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse geocode response. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            GeocodeError::Network(format!("malformed geocode response: {}", e))
        })?;

        Ok(places
            .into_iter()
            .map(|p| Coordinate::new(p.lat, p.lon))
            .collect())
    }
}

/// Client for the risk-aware route service (`POST /get_routes`).
pub struct HttpRouteService {
    client: Client,
    base_url: String,
}

impl HttpRouteService {
    pub fn new(config: &ServiceConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.route_service_url.clone(),
        })
    }
}

#[async_trait]
impl RouteService for HttpRouteService {
    async fn request_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteServiceError> {
        let url = format!("{}/get_routes", self.base_url);
        log::debug!(
            "[PROVIDER] Calling route service for {} -> {} ({}, hour={}, alpha={})",
            request.origin,
            request.destination,
            request.options.route_type,
            request.options.hour,
            request.options.alpha
        );

        let response = self.client.post(&url).json(request).send().await.map_err(|e| {
            log::error!(
                "Failed to send POST request. URL: {}\nBody: {}\nError: {}",
                url,
                serde_json::to_string_pretty(request).unwrap_or_default(),
                e
            );
            RouteServiceError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        // Business failures come back as 4xx/5xx with a regular envelope,
        // so the body decides before the status does.
        match serde_json::from_str::<RouteResult>(&text) {
            Ok(result) if result.success && !status.is_success() => {
                log::error!("Route service sent a success envelope with status {}", status);
                Err(RouteServiceError::Transport(format!(
                    "HTTP {} with a success envelope",
                    status.as_u16()
                )))
            }
            Ok(result) => Ok(result),
            Err(e) if !status.is_success() => {
                log::error!(
                    "API returned non-success status: {}. Unparseable Body: {}",
                    status,
                    text
                );
                Err(RouteServiceError::Transport(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    e
                )))
            }
            Err(e) => {
                log::error!(
                    "Failed to parse route response. URL: {}\nError: {}. Body: {}",
                    url,
                    e,
                    text
                );
                Err(RouteServiceError::Transport(format!(
                    "malformed route response: {}",
                    e
                )))
            }
        }
    }
}
