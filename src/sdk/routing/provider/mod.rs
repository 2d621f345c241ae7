pub mod cached;
pub mod remote;
pub mod types;

pub use cached::CachedGeocoder;
pub use remote::{HttpGeocoder, HttpRouteService};
