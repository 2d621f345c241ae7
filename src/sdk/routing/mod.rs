pub mod cache;
pub mod error;
pub mod geocode;
pub mod provider;
pub mod service;
pub mod types;

pub use cache::GeoCache;
pub use error::{Endpoint, ErrorKind, GeocodeError, RouteError, RouteServiceError};
pub use geocode::CoordinateResolver;
pub use provider::{CachedGeocoder, HttpGeocoder, HttpRouteService};
pub use service::{Geocoder, RouteService};
pub use types::{Coordinate, Route, RouteData, RouteOptions, RouteRequest, RouteResult, RouteType};
