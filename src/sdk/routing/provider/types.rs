use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

// Nominatim-style search hit. Only the position matters to us; the service
// sends it as strings, other geocoders as numbers.
#[serde_as]
#[derive(Deserialize, Debug)]
pub struct GeoPlace {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub lat: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub lon: f64,
}
