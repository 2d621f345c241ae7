use super::error::GeocodeError;
use super::service::Geocoder;
use super::types::Coordinate;
use std::sync::Arc;

/// Turns place text into a single coordinate.
///
/// The first candidate is taken as-is. There is no ranking, disambiguation or
/// locale filtering, so an ambiguous name resolves to whatever the geocoder
/// lists first.
#[derive(Clone)]
pub struct CoordinateResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl CoordinateResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, place: &str) -> Result<Coordinate, GeocodeError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        log::debug!("Resolving place \"{}\"", place);
        let candidates = self.geocoder.search(place).await?;
        let coord = candidates.first().copied().ok_or(GeocodeError::NotFound)?;

        log::debug!(
            "Resolved \"{}\" to {} ({} candidate(s))",
            place,
            coord,
            candidates.len()
        );
        Ok(coord)
    }
}
