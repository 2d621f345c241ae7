pub mod map;
pub mod renderer;
pub mod risk;

pub use map::{Bounds, GeoJsonMap, LayerId, MapSurface};
pub use renderer::{status_text, RenderState, RiskRenderer};
pub use risk::RiskLevel;
