use super::map::{Bounds, GeoJsonMap, LayerId, MapSurface};
use super::risk::RiskLevel;
use crate::sdk::routing::types::Route;
use std::{fs, io, path::Path};

/// What is currently on screen: at most one route layer plus the status line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderState {
    layer: Option<LayerId>,
    status: String,
}

impl RenderState {
    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Formats the summary shown under the map.
pub fn status_text(eta: f64, risk: f64, confidence: f64, warning: Option<&str>) -> String {
    let mut text = format!(
        "ETA: {} min | Risk: {} | Confidence: {}",
        eta, risk, confidence
    );
    if let Some(warning) = warning {
        text.push_str("\nWarning: ");
        text.push_str(warning);
    }
    text
}

/// Sole owner of the route layer and of the status text.
pub struct RiskRenderer<M> {
    map: M,
    state: RenderState,
}

impl<M: MapSurface> RiskRenderer<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            state: RenderState::default(),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn into_map(self) -> M {
        self.map
    }

    /// Replaces whatever is on screen with `route`.
    ///
    /// Degenerate routes clear the layer and show zeroed figures; the returned
    /// level is `None` for them since nothing was drawn.
    pub fn render(&mut self, route: &Route) -> Option<RiskLevel> {
        self.detach();

        if route.is_degenerate() {
            self.state.status = status_text(0.0, 0.0, 1.0, route.warning.as_deref());
            log::info!("Origin and destination coincide, no route drawn");
            return None;
        }

        let level = RiskLevel::from_risk(route.risk);
        let id = self.map.add_route_layer(&route.path, level.color());
        self.state.layer = Some(id);

        if let Some(bounds) = Bounds::from_path(&route.path) {
            self.map.fit_bounds(bounds);
        }

        self.state.status = status_text(
            route.eta,
            route.risk,
            route.confidence,
            route.warning.as_deref(),
        );
        log::info!(
            "Rendered {}-risk route ({} points, {} min)",
            level,
            route.path.len(),
            route.eta
        );
        Some(level)
    }

    fn detach(&mut self) {
        if let Some(id) = self.state.layer.take() {
            self.map.remove_layer(id);
        }
    }
}

impl RiskRenderer<GeoJsonMap> {
    /// Writes the attached route to `path` as GeoJSON and returns `true`.
    /// With nothing attached, a file left by an earlier run is removed.
    pub fn write_route_file(&self, path: &Path) -> io::Result<bool> {
        if self.state.layer.is_none() {
            match fs::remove_file(path) {
                Ok(()) => log::info!("Removed stale route file {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
            return Ok(false);
        }

        let geojson = serde_json::to_string_pretty(&self.map.to_geojson())?;
        fs::write(path, geojson)?;
        Ok(true)
    }
}
