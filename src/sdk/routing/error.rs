use std::fmt;
use thiserror::Error;

/// Failures of a single geocoding lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("place text is empty")]
    EmptyQuery,

    #[error("geocoder returned no results")]
    NotFound,

    #[error("geocoder responded with HTTP {status}")]
    ServiceUnavailable { status: u16 },

    #[error("geocoding request failed: {0}")]
    Network(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        GeocodeError::Network(e.to_string())
    }
}

/// Failures of the route-computation call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteServiceError {
    // The service answered `success: false`
    #[error("{0}")]
    Business(String),

    #[error("route request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for RouteServiceError {
    fn from(e: reqwest::Error) -> Self {
        RouteServiceError::Transport(e.to_string())
    }
}

/// Which endpoint a geocoding failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Origin => "origin",
            Endpoint::Destination => "destination",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputMissing,
    GeocodeNotFound,
    GeocodeServiceUnavailable,
    GeocodeNetworkError,
    RouteServiceBusinessError,
    RouteServiceTransportError,
}

/// Terminal failure of one pipeline run. `Display` is the developer-facing
/// diagnostic; [`RouteError::user_message`] is what the user is shown.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("missing input: {}", missing_fields(.origin_missing, .destination_missing))]
    InputMissing {
        origin_missing: bool,
        destination_missing: bool,
    },

    #[error("no geocoding result for {endpoint} {place:?}")]
    GeocodeNotFound { endpoint: Endpoint, place: String },

    #[error("geocoder unavailable for {endpoint} {place:?}: HTTP {status}")]
    GeocodeServiceUnavailable {
        endpoint: Endpoint,
        place: String,
        status: u16,
    },

    #[error("geocoding {endpoint} {place:?} failed: {detail}")]
    GeocodeNetworkError {
        endpoint: Endpoint,
        place: String,
        detail: String,
    },

    #[error("route service rejected the request: {0}")]
    RouteServiceBusinessError(String),

    #[error("route service unreachable: {0}")]
    RouteServiceTransportError(String),
}

fn missing_fields(origin: &bool, destination: &bool) -> &'static str {
    match (*origin, *destination) {
        (true, true) => "origin and destination",
        (true, false) => "origin",
        _ => "destination",
    }
}

impl RouteError {
    pub fn from_geocode(endpoint: Endpoint, place: &str, err: GeocodeError) -> Self {
        let place = place.to_string();
        match err {
            // The resolver only sees empty text if validation was bypassed
            GeocodeError::EmptyQuery => RouteError::InputMissing {
                origin_missing: endpoint == Endpoint::Origin,
                destination_missing: endpoint == Endpoint::Destination,
            },
            GeocodeError::NotFound => RouteError::GeocodeNotFound { endpoint, place },
            GeocodeError::ServiceUnavailable { status } => RouteError::GeocodeServiceUnavailable {
                endpoint,
                place,
                status,
            },
            GeocodeError::Network(detail) => RouteError::GeocodeNetworkError {
                endpoint,
                place,
                detail,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::InputMissing { .. } => ErrorKind::InputMissing,
            RouteError::GeocodeNotFound { .. } => ErrorKind::GeocodeNotFound,
            RouteError::GeocodeServiceUnavailable { .. } => ErrorKind::GeocodeServiceUnavailable,
            RouteError::GeocodeNetworkError { .. } => ErrorKind::GeocodeNetworkError,
            RouteError::RouteServiceBusinessError(_) => ErrorKind::RouteServiceBusinessError,
            RouteError::RouteServiceTransportError(_) => ErrorKind::RouteServiceTransportError,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            RouteError::InputMissing { .. } => "Please enter both origin and destination".to_string(),
            RouteError::GeocodeNotFound { place, .. } => format!("Location not found: {}", place),
            RouteError::GeocodeServiceUnavailable { .. } => {
                "Location search is unavailable right now, please try again later".to_string()
            }
            RouteError::GeocodeNetworkError { .. } => {
                "Could not reach the location search service".to_string()
            }
            // The service's own message is already meant for users
            RouteError::RouteServiceBusinessError(message) => message.clone(),
            RouteError::RouteServiceTransportError(_) => "Server error while computing the route".to_string(),
        }
    }
}

impl From<RouteServiceError> for RouteError {
    fn from(e: RouteServiceError) -> Self {
        match e {
            RouteServiceError::Business(message) => RouteError::RouteServiceBusinessError(message),
            RouteServiceError::Transport(detail) => RouteError::RouteServiceTransportError(detail),
        }
    }
}
