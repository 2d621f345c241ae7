use super::error::{GeocodeError, RouteServiceError};
use super::types::{Coordinate, RouteRequest, RouteResult};
use async_trait::async_trait;

/// Free-text place search.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns every candidate the service knows for `query`, in service order.
    async fn search(&self, query: &str) -> Result<Vec<Coordinate>, GeocodeError>;
}

/// Route computation between two resolved points.
#[async_trait]
pub trait RouteService: Send + Sync {
    /// Sends the request and returns the service envelope.
    ///
    /// An `Ok` value may still carry `success: false`; transport and protocol
    /// failures are reported as [`RouteServiceError::Transport`].
    async fn request_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteServiceError>;
}
