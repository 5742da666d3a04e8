use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{ColorBucket, VisualEncoding};
use crate::feed::EventRecord;
use crate::presenter::layers::BaseLayer;
use crate::presenter::legend::Legend;

/// One point marker on the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub event: EventRecord,
    pub encoding: VisualEncoding,
    /// Radius actually drawn; degenerate encodings are lifted to a small
    /// visible point.
    pub render_radius: f64,
}

/// The toggleable layer holding every event marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub name: String,
    pub markers: Vec<Marker>,
}

/// Layer-selection control description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerControl {
    pub base_layers: Vec<String>,
    pub overlays: Vec<String>,
    pub collapsed: bool,
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// `[lat, lng]`.
    pub center: [f64; 2],
    pub zoom: u8,
    pub base_layer: String,
    pub visible_overlays: Vec<String>,
}

/// Everything the renderer needs for one data-fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub view: MapView,
    pub base_layers: Vec<BaseLayer>,
    pub overlay: Overlay,
    pub control: LayerControl,
    pub legend: Legend,
}

impl Scene {
    pub fn marker_count(&self) -> usize {
        self.overlay.markers.len()
    }

    /// Marker count per bucket, every bucket present.
    pub fn bucket_counts(&self) -> BTreeMap<ColorBucket, usize> {
        let mut counts: BTreeMap<ColorBucket, usize> =
            ColorBucket::ALL.iter().map(|&bucket| (bucket, 0)).collect();
        for marker in &self.overlay.markers {
            *counts.entry(marker.encoding.color_bucket).or_default() += 1;
        }
        counts
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
