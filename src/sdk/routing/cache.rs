use super::types::Coordinate;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, io::Result as IoResult, path::Path};

/// Place text to coordinate, persisted as JSON between runs.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct GeoCache {
    geocodes: HashMap<String, Coordinate>,
}

impl GeoCache {
    /// Loads the cache, or starts empty when the file does not exist yet.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        if path.as_ref().exists() {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
    }

    pub fn get_geocode(&self, place: &str) -> Option<Coordinate> {
        self.geocodes.get(place.trim()).copied()
    }

    pub fn insert_geocode(&mut self, place: &str, coord: Coordinate) {
        self.geocodes.insert(place.trim().to_string(), coord);
    }

    pub fn len(&self) -> usize {
        self.geocodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geocodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_trimmed() {
        let mut cache = GeoCache::default();
        cache.insert_geocode("  Rennes ", Coordinate::new(48.11, -1.68));
        assert_eq!(cache.get_geocode("Rennes"), Some(Coordinate::new(48.11, -1.68)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_file_loads_empty() {
        let path = std::env::temp_dir().join("saferoute-cache-does-not-exist.json");
        let _ = fs::remove_file(&path);
        assert!(GeoCache::load_from_file(&path).unwrap().is_empty());
    }

    #[test]
    fn survives_a_save_and_reload() {
        let path = std::env::temp_dir().join(format!("saferoute-cache-{}.json", std::process::id()));
        let mut cache = GeoCache::default();
        cache.insert_geocode("Lyon", Coordinate::new(45.76, 4.83));
        cache.save_to_file(&path).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["geocodes"]["Lyon"], serde_json::json!([45.76, 4.83]));

        let loaded = GeoCache::load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, cache);
    }
}
