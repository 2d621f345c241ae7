use super::error::RouteServiceError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alpha used when the caller leaves the weighting blank or types garbage.
pub const DEFAULT_ALPHA: f64 = 0.5;

/// A WGS84 point. On the wire it is always a `[lat, lon]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Routing mode understood by the route service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    Shortest,
    Safest,
    #[default]
    Balanced,
}

impl RouteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Shortest => "shortest",
            RouteType::Safest => "safest",
            RouteType::Balanced => "balanced",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteOptions {
    pub hour: u8,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    pub alpha: f64,
}

impl RouteOptions {
    pub fn new(hour: u8, route_type: RouteType, alpha: f64) -> Self {
        Self {
            hour,
            route_type,
            alpha,
        }
    }

    /// Builds options from raw user input. A missing, unparsable or non-finite
    /// alpha falls back to [`DEFAULT_ALPHA`]; finite values go through as typed.
    pub fn resolve(hour: u8, route_type: RouteType, alpha_input: Option<&str>) -> Self {
        let alpha = alpha_input
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|a| a.is_finite())
            .unwrap_or(DEFAULT_ALPHA);
        Self::new(hour, route_type, alpha)
    }
}

/// Body of the route service POST. Built fresh for every pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    #[serde(flatten)]
    pub options: RouteOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    pub path: Vec<Coordinate>,
    pub eta: f64,
    pub risk: f64,
    pub confidence: f64,
    #[serde(default)]
    pub warning: Option<String>,
}

impl Route {
    /// Origin and destination snapped to the same node.
    pub fn is_degenerate(&self) -> bool {
        self.path.len() <= 1
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteData {
    pub route: Route,
    #[serde(default)]
    pub strategy: Option<RouteType>,
    #[serde(default)]
    pub time_multiplier: Option<f64>,
}

/// Envelope returned by the route service, on success and on failure alike.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteResult {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<RouteData>,
}

impl RouteResult {
    pub fn ok(route: Route) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(RouteData {
                route,
                strategy: None,
                time_multiplier: None,
            }),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            data: None,
        }
    }

    /// Classifies the envelope: `success: false` is a business failure, a
    /// success without a route is a protocol failure.
    pub fn into_data(self) -> Result<RouteData, RouteServiceError> {
        match (self.success, self.data) {
            (false, _) => Err(RouteServiceError::Business(
                self.error
                    .unwrap_or_else(|| "Route service reported a failure".to_string()),
            )),
            (true, Some(data)) => Ok(data),
            (true, None) => Err(RouteServiceError::Transport(
                "success response without route data".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alpha_defaults_when_absent_or_garbage() {
        assert_eq!(RouteOptions::resolve(22, RouteType::Balanced, None).alpha, 0.5);
        assert_eq!(RouteOptions::resolve(22, RouteType::Balanced, Some("")).alpha, 0.5);
        assert_eq!(RouteOptions::resolve(22, RouteType::Balanced, Some("abc")).alpha, 0.5);
        assert_eq!(RouteOptions::resolve(22, RouteType::Balanced, Some("NaN")).alpha, 0.5);
        assert_eq!(RouteOptions::resolve(22, RouteType::Balanced, Some("inf")).alpha, 0.5);
    }

    #[test]
    fn alpha_is_taken_verbatim_when_numeric() {
        let options = RouteOptions::resolve(8, RouteType::Safest, Some(" 0.25 "));
        assert_eq!(options, RouteOptions::new(8, RouteType::Safest, 0.25));
    }

    #[test]
    fn request_serializes_to_flat_wire_shape() {
        let request = RouteRequest {
            origin: Coordinate::new(12.97, 77.59),
            destination: Coordinate::new(12.93, 77.62),
            options: RouteOptions::new(22, RouteType::Balanced, 0.5),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "origin": [12.97, 77.59],
                "destination": [12.93, 77.62],
                "hour": 22,
                "type": "balanced",
                "alpha": 0.5
            })
        );
    }

    #[test]
    fn result_parses_route_with_optional_extras() {
        let body = json!({
            "success": true,
            "data": {
                "route": {
                    "path": [[1.0, 2.0], [1.5, 2.5]],
                    "eta": 4.2,
                    "risk": 0.31,
                    "confidence": 0.76
                },
                "strategy": "safest",
                "time_multiplier": 1.04
            }
        });
        let result: RouteResult = serde_json::from_value(body).unwrap();
        let data = result.data.unwrap();
        assert_eq!(data.route.path[1], Coordinate::new(1.5, 2.5));
        assert_eq!(data.route.warning, None);
        assert_eq!(data.strategy, Some(RouteType::Safest));
        assert!(!data.route.is_degenerate());
    }

    #[test]
    fn envelope_classification() {
        assert_eq!(
            RouteResult::failed("no path").into_data(),
            Err(RouteServiceError::Business("no path".into()))
        );
        let bare: RouteResult = serde_json::from_value(json!({"success": false})).unwrap();
        assert!(matches!(bare.into_data(), Err(RouteServiceError::Business(_))));
        let empty: RouteResult = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(matches!(empty.into_data(), Err(RouteServiceError::Transport(_))));
    }

    #[test]
    fn single_point_path_is_degenerate() {
        let route = Route {
            path: vec![Coordinate::new(1.0, 2.0)],
            eta: 0.0,
            risk: 0.0,
            confidence: 1.0,
            warning: None,
        };
        assert!(route.is_degenerate());
        assert!(Route { path: vec![], ..route }.is_degenerate());
    }
}
