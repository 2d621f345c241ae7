#![allow(dead_code)]

use async_trait::async_trait;
use saferoute::sdk::routing::{
    Coordinate, GeocodeError, Geocoder, Route, RouteRequest, RouteResult, RouteService,
    RouteServiceError,
};
use saferoute::{GeoJsonMap, RecordingNotifier, RoutePlanner};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Geocoder answering from a fixed table; unknown places get no results.
#[derive(Default)]
pub struct ScriptedGeocoder {
    answers: HashMap<String, Result<Vec<Coordinate>, GeocodeError>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, place: &str, coord: Coordinate) -> Self {
        self.answers.insert(place.to_string(), Ok(vec![coord]));
        self
    }

    pub fn failing(mut self, place: &str, err: GeocodeError) -> Self {
        self.answers.insert(place.to_string(), Err(err));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<Coordinate>, GeocodeError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.answers.get(query).cloned().unwrap_or(Ok(Vec::new()))
    }
}

type Reply = (Duration, Result<RouteResult, RouteServiceError>);

/// Route service handing out queued replies in call order, each after its delay.
#[derive(Default)]
pub struct ScriptedRouteService {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl ScriptedRouteService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, result: Result<RouteResult, RouteServiceError>) -> Self {
        self.reply_after(Duration::ZERO, result)
    }

    pub fn reply_after(self, delay: Duration, result: Result<RouteResult, RouteServiceError>) -> Self {
        self.replies.lock().unwrap().push_back((delay, result));
        self
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteService for ScriptedRouteService {
    async fn request_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let (delay, result) = next.unwrap_or((
            Duration::ZERO,
            Err(RouteServiceError::Transport("no scripted reply".into())),
        ));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

pub struct Harness {
    pub planner: RoutePlanner<GeoJsonMap>,
    pub geocoder: Arc<ScriptedGeocoder>,
    pub routes: Arc<ScriptedRouteService>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(geocoder: ScriptedGeocoder, routes: ScriptedRouteService) -> Harness {
    let geocoder = Arc::new(geocoder);
    let routes = Arc::new(routes);
    let notifier = Arc::new(RecordingNotifier::new());
    let planner = RoutePlanner::new(
        geocoder.clone(),
        routes.clone(),
        notifier.clone(),
        GeoJsonMap::new(),
    );
    Harness {
        planner,
        geocoder,
        routes,
        notifier,
    }
}

/// A straight `points`-long path heading north-east from Bengaluru.
pub fn route(points: usize, risk: f64, eta: f64, confidence: f64) -> Route {
    Route {
        path: (0..points)
            .map(|i| Coordinate::new(12.97 + i as f64 * 0.005, 77.59 + i as f64 * 0.004))
            .collect(),
        eta,
        risk,
        confidence,
        warning: None,
    }
}
