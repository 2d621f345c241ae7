use crate::sdk::routing::types::Coordinate;
use geo::{coord, BoundingRect, Intersects, LineString, Rect};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use std::collections::BTreeMap;

/// Opaque handle to a layer attached to a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// Lat/lon envelope of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// `None` for an empty path.
    pub fn from_path(path: &[Coordinate]) -> Option<Self> {
        line_string(path).bounding_rect().map(Bounds::from)
    }

    pub fn contains(&self, c: &Coordinate) -> bool {
        Rect::from(*self).intersects(&coord! { x: c.lon, y: c.lat })
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        }
    }
}

impl From<Bounds> for Rect<f64> {
    fn from(b: Bounds) -> Self {
        Rect::new((b.west, b.south), (b.east, b.north))
    }
}

/// x is longitude, y is latitude.
fn line_string(path: &[Coordinate]) -> LineString<f64> {
    path.iter().map(|c| (c.lon, c.lat)).collect::<Vec<_>>().into()
}

/// The map-rendering collaborator: draws polylines and moves the viewport.
pub trait MapSurface: Send {
    fn add_route_layer(&mut self, path: &[Coordinate], color: &str) -> LayerId;

    fn remove_layer(&mut self, id: LayerId);

    fn fit_bounds(&mut self, bounds: Bounds);
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineLayer {
    pub line: LineString<f64>,
    pub color: String,
}

impl PolylineLayer {
    /// The drawn points back in `[lat, lon]` order.
    pub fn path(&self) -> Vec<Coordinate> {
        self.line.coords().map(|c| Coordinate::new(c.y, c.x)).collect()
    }

    fn to_feature(&self, id: LayerId) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("color".to_string(), self.color.clone().into());
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::from(&self.line))),
            id: Some(Id::Number(id.0.into())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// In-memory map that keeps whatever is attached and can dump it as GeoJSON.
#[derive(Debug, Default)]
pub struct GeoJsonMap {
    layers: BTreeMap<LayerId, PolylineLayer>,
    viewport: Option<Bounds>,
    next_id: u64,
}

impl GeoJsonMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &PolylineLayer)> {
        self.layers.iter()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, id: LayerId) -> Option<&PolylineLayer> {
        self.layers.get(&id)
    }

    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    /// One LineString feature per layer; the viewport becomes the collection bbox.
    pub fn to_geojson(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: self
                .viewport
                .map(|b| vec![b.west, b.south, b.east, b.north]),
            features: self
                .layers
                .iter()
                .map(|(id, layer)| layer.to_feature(*id))
                .collect(),
            foreign_members: None,
        }
    }
}

impl MapSurface for GeoJsonMap {
    fn add_route_layer(&mut self, path: &[Coordinate], color: &str) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(
            id,
            PolylineLayer {
                line: line_string(path),
                color: color.to_string(),
            },
        );
        id
    }

    fn remove_layer(&mut self, id: LayerId) {
        if self.layers.remove(&id).is_none() {
            log::warn!("Asked to remove unknown layer {:?}", id);
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bounds_cover_every_point() {
        let path = [
            Coordinate::new(12.97, 77.59),
            Coordinate::new(12.90, 77.65),
            Coordinate::new(13.01, 77.60),
        ];
        let b = Bounds::from_path(&path).unwrap();
        assert_eq!(
            b,
            Bounds {
                south: 12.90,
                west: 77.59,
                north: 13.01,
                east: 77.65
            }
        );
        assert!(path.iter().all(|c| b.contains(c)));
        assert!(!b.contains(&Coordinate::new(13.5, 77.60)));
        assert!(Bounds::from_path(&[]).is_none());
    }

    #[test]
    fn single_point_has_zero_area_bounds() {
        let b = Bounds::from_path(&[Coordinate::new(48.85, 2.35)]).unwrap();
        assert_eq!((b.south, b.north), (48.85, 48.85));
        assert_eq!((b.west, b.east), (2.35, 2.35));
    }

    #[test]
    fn geojson_flips_to_lon_lat() {
        let mut map = GeoJsonMap::new();
        let path = [Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)];
        let id = map.add_route_layer(&path, "red");
        map.fit_bounds(Bounds::from_path(&path).unwrap());
        assert_eq!(map.layer(id).unwrap().path(), path.to_vec());

        let doc = serde_json::to_value(map.to_geojson()).unwrap();
        assert_eq!(doc["type"], "FeatureCollection");
        assert_eq!(doc["features"][0]["id"], json!(id.0));
        assert_eq!(doc["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(
            doc["features"][0]["geometry"]["coordinates"],
            json!([[2.0, 1.0], [4.0, 3.0]])
        );
        assert_eq!(doc["features"][0]["properties"]["color"], "red");
        assert_eq!(doc["bbox"], json!([2.0, 1.0, 4.0, 3.0]));
    }

    #[test]
    fn empty_map_exports_empty_collection() {
        let doc = serde_json::to_value(GeoJsonMap::new().to_geojson()).unwrap();
        assert_eq!(doc["features"], json!([]));
        assert!(doc.get("bbox").map_or(true, |b| b.is_null()));
    }

    #[test]
    fn removed_layers_disappear() {
        let mut map = GeoJsonMap::new();
        let a = map.add_route_layer(&[Coordinate::new(0.0, 0.0)], "green");
        let b = map.add_route_layer(&[Coordinate::new(1.0, 1.0)], "green");
        assert_ne!(a, b);
        map.remove_layer(a);
        assert_eq!(map.layer_count(), 1);
        assert!(map.layer(a).is_none());
    }
}
