//! Request/render pipeline: two geocode lookups, one route request, then either
//! a render or an error report.
//!
//! Every invocation takes a generation number when it starts. Results are only
//! committed (rendered or reported) if no newer invocation has started since,
//! so a slow earlier request can never overwrite a later one.

use crate::sdk::config::DEFAULT_HOUR;
use crate::sdk::render::{GeoJsonMap, MapSurface, RenderState, RiskLevel, RiskRenderer};
use crate::sdk::report::{ErrorReporter, Notifier};
use crate::sdk::routing::error::{Endpoint, ErrorKind, RouteError};
use crate::sdk::routing::geocode::CoordinateResolver;
use crate::sdk::routing::service::{Geocoder, RouteService};
use crate::sdk::routing::types::{Route, RouteOptions, RouteRequest, RouteType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

const SAME_PLACE_WARNING: &str = "Origin and destination are the same place";

/// Terminal branch taken by one [`RoutePlanner::compute_route`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    Rendered(RiskLevel),
    Degenerate,
    Failed(ErrorKind),
    /// A newer invocation started before this one finished; its result was dropped.
    Superseded,
}

pub struct RoutePlanner<M = GeoJsonMap> {
    resolver: CoordinateResolver,
    routes: Arc<dyn RouteService>,
    reporter: ErrorReporter,
    renderer: Mutex<RiskRenderer<M>>,
    generation: AtomicU64,
    hour: u8,
}

impl<M: MapSurface> RoutePlanner<M> {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        routes: Arc<dyn RouteService>,
        notifier: Arc<dyn Notifier>,
        map: M,
    ) -> Self {
        Self {
            resolver: CoordinateResolver::new(geocoder),
            routes,
            reporter: ErrorReporter::new(notifier),
            renderer: Mutex::new(RiskRenderer::new(map)),
            generation: AtomicU64::new(0),
            hour: DEFAULT_HOUR,
        }
    }

    /// Hour of day sent with every request.
    pub fn with_hour(mut self, hour: u8) -> Self {
        self.hour = hour;
        self
    }

    pub fn render_state(&self) -> RenderState {
        self.lock_renderer().state().clone()
    }

    pub fn with_renderer<R>(&self, f: impl FnOnce(&RiskRenderer<M>) -> R) -> R {
        f(&self.lock_renderer())
    }

    pub fn into_renderer(self) -> RiskRenderer<M> {
        self.renderer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs the whole pipeline for one user action.
    ///
    /// Steps run strictly in order and the first failure ends the run: blank
    /// input, origin lookup, destination lookup, then the route request.
    pub async fn compute_route(
        &self,
        origin: &str,
        destination: &str,
        route_type: RouteType,
        alpha_input: Option<&str>,
    ) -> PlanOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Pipeline run #{} started", generation);

        match self.run(origin, destination, route_type, alpha_input).await {
            Ok(route) => self.commit_route(generation, &route),
            Err(err) => self.commit_error(generation, &err),
        }
    }

    async fn run(
        &self,
        origin: &str,
        destination: &str,
        route_type: RouteType,
        alpha_input: Option<&str>,
    ) -> Result<Route, RouteError> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(RouteError::InputMissing {
                origin_missing: origin.is_empty(),
                destination_missing: destination.is_empty(),
            });
        }

        let from = self
            .resolver
            .resolve(origin)
            .await
            .map_err(|e| RouteError::from_geocode(Endpoint::Origin, origin, e))?;
        let to = self
            .resolver
            .resolve(destination)
            .await
            .map_err(|e| RouteError::from_geocode(Endpoint::Destination, destination, e))?;

        // The route service refuses identical endpoints, so answer locally.
        if from == to {
            log::info!("\"{}\" and \"{}\" resolve to the same point {}", origin, destination, from);
            return Ok(Route {
                path: vec![from],
                eta: 0.0,
                risk: 0.0,
                confidence: 1.0,
                warning: Some(SAME_PLACE_WARNING.to_string()),
            });
        }

        let request = RouteRequest {
            origin: from,
            destination: to,
            options: RouteOptions::resolve(self.hour, route_type, alpha_input),
        };
        log::info!(
            "Requesting {} route {} -> {} (alpha={})",
            request.options.route_type,
            from,
            to,
            request.options.alpha
        );

        let data = self.routes.request_route(&request).await?.into_data()?;
        log::debug!(
            "Route service strategy={:?} time_multiplier={:?}",
            data.strategy,
            data.time_multiplier
        );
        Ok(data.route)
    }

    fn commit_route(&self, generation: u64, route: &Route) -> PlanOutcome {
        // Check and render under one lock so a newer run cannot interleave.
        let mut renderer = self.lock_renderer();
        if !self.is_current(generation) {
            log::debug!("Dropping route from superseded run #{}", generation);
            return PlanOutcome::Superseded;
        }
        match renderer.render(route) {
            Some(level) => PlanOutcome::Rendered(level),
            None => PlanOutcome::Degenerate,
        }
    }

    fn commit_error(&self, generation: u64, err: &RouteError) -> PlanOutcome {
        if !self.is_current(generation) {
            log::debug!("Dropping failure from superseded run #{}: {}", generation, err);
            return PlanOutcome::Superseded;
        }
        self.reporter.report(err);
        PlanOutcome::Failed(err.kind())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn lock_renderer(&self) -> std::sync::MutexGuard<'_, RiskRenderer<M>> {
        self.renderer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
