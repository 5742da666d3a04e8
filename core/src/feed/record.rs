use serde::{Deserialize, Serialize};

/// One reported earthquake as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub place: String,
    /// Unvalidated; real feeds report negative magnitudes for tiny events.
    pub magnitude: f64,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_km: Option<f64>,
}

impl EventRecord {
    pub fn new(place: impl Into<String>, magnitude: f64, longitude: f64, latitude: f64) -> Self {
        Self {
            place: place.into(),
            magnitude,
            longitude,
            latitude,
            id: None,
            depth_km: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_depth(mut self, depth_km: f64) -> Self {
        self.depth_km = Some(depth_km);
        self
    }

    /// Leaflet-style `[lat, lng]` pair.
    pub fn lat_lng(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}
