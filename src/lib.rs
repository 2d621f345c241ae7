pub mod sdk;

pub use sdk::config::{ConfigError, ServiceConfig};
pub use sdk::planner::{PlanOutcome, RoutePlanner};
pub use sdk::render::{GeoJsonMap, MapSurface, RiskLevel};
pub use sdk::report::{ConsoleNotifier, Notifier, RecordingNotifier};
pub use sdk::routing::{Coordinate, ErrorKind, GeoCache, RouteError, RouteType};
