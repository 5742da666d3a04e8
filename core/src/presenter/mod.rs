//! Scene composition: overlay markers, base layers, layer control and legend.

pub mod layers;
pub mod legend;
pub mod scene;

use serde::{Deserialize, Serialize};

use crate::classify::{Classifier, DEFAULT_RADIUS_SCALE};
use crate::feed::EventRecord;
use crate::telemetry::LogManager;

pub use layers::{AccessToken, BaseLayer, BaseStyle, StyleConfig, TileLayerConfig, TileProviderConfig};
pub use legend::{build_legend, Legend, LegendEntry, LegendPosition, LEGEND_BREAKPOINTS};
pub use scene::{LayerControl, MapView, Marker, Overlay, Scene};

pub const OVERLAY_NAME: &str = "Earthquakes";

/// Explicit configuration for the presenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub tiles: TileProviderConfig,
    /// `[lat, lng]`.
    pub center: [f64; 2],
    pub zoom: u8,
    pub radius_scale: f64,
    /// Drawn radius for markers whose encoded radius is below this.
    pub min_point_radius: f64,
    pub overlay_name: String,
    pub control_collapsed: bool,
    pub legend_position: LegendPosition,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tiles: TileProviderConfig::default(),
            center: [0.0, 0.0],
            zoom: 2,
            radius_scale: DEFAULT_RADIUS_SCALE,
            min_point_radius: 1.0,
            overlay_name: OVERLAY_NAME.to_string(),
            control_collapsed: false,
            legend_position: LegendPosition::BottomRight,
        }
    }
}

/// Turns classified events into a `Scene`. Has no failure mode.
pub struct Presenter {
    config: SceneConfig,
    classifier: Classifier,
    logger: LogManager,
}

impl Presenter {
    pub fn new(config: SceneConfig) -> Self {
        let classifier = Classifier::new(config.radius_scale);
        Self {
            config,
            classifier,
            logger: LogManager::new(),
        }
    }

    pub fn build_scene(&self, events: &[EventRecord]) -> Scene {
        let markers: Vec<Marker> = events.iter().map(|event| self.marker(event)).collect();

        let base_layers = self.config.tiles.base_layers();
        let base_names: Vec<String> = base_layers.iter().map(|layer| layer.name.clone()).collect();
        let overlay_name = self.config.overlay_name.clone();

        let view = MapView {
            center: self.config.center,
            zoom: self.config.zoom,
            base_layer: base_names.first().cloned().unwrap_or_default(),
            visible_overlays: vec![overlay_name.clone()],
        };
        let control = LayerControl {
            base_layers: base_names,
            overlays: vec![overlay_name.clone()],
            collapsed: self.config.control_collapsed,
        };

        let scene = Scene {
            view,
            base_layers,
            overlay: Overlay {
                name: overlay_name,
                markers,
            },
            control,
            legend: build_legend(self.config.legend_position),
        };

        self.logger.record(&format!(
            "Scene built: {} markers, buckets {:?}",
            scene.marker_count(),
            scene.bucket_counts()
        ));
        scene
    }

    fn marker(&self, event: &EventRecord) -> Marker {
        let encoding = self.classifier.classify(event);
        // f64::max drops NaN, so NaN radii also end up at the floor.
        let render_radius = encoding.radius.max(self.config.min_point_radius);
        Marker {
            event: event.clone(),
            encoding,
            render_radius,
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

/// Build a scene with default configuration.
pub fn build_scene(events: &[EventRecord]) -> Scene {
    Presenter::default().build_scene(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ColorBucket;

    fn sample_events() -> Vec<EventRecord> {
        vec![
            EventRecord::new("10km N of Town", 5.2, 10.0, 20.0),
            EventRecord::new("5 km E of Ridge", 1.1, -117.5, 35.7),
            EventRecord::new("Offshore Trench", 6.8, 142.3, 38.1),
        ]
    }

    #[test]
    fn empty_input_still_yields_full_scene() {
        let scene = build_scene(&[]);
        assert!(scene.overlay.markers.is_empty());
        assert_eq!(scene.legend.entries.len(), 4);
        assert_eq!(scene.base_layers.len(), 2);
        assert_eq!(scene.overlay.name, "Earthquakes");
    }

    #[test]
    fn one_marker_per_event_with_place_in_popup() {
        let events = sample_events();
        let scene = build_scene(&events);
        assert_eq!(scene.marker_count(), events.len());
        for (marker, event) in scene.overlay.markers.iter().zip(&events) {
            assert_eq!(&marker.event, event);
            assert!(marker.encoding.popup_text.contains(&event.place));
        }
    }

    #[test]
    fn end_to_end_purple_marker() {
        let scene = build_scene(&[EventRecord::new("10km N of Town", 5.2, 10.0, 20.0)]);
        let marker = &scene.overlay.markers[0];
        assert_eq!(marker.encoding.color_bucket, ColorBucket::Purple);
        assert_eq!(marker.encoding.color_bucket.css_name(), "purple");
        assert!((marker.encoding.radius - 52.0).abs() < 1e-9);
        assert!((marker.render_radius - 52.0).abs() < 1e-9);
        assert!(marker.encoding.popup_text.contains("10km N of Town"));
        assert!(marker.encoding.popup_text.contains("5.2"));
        assert_eq!(marker.event.lat_lng(), [20.0, 10.0]);
    }

    #[test]
    fn negative_magnitude_renders_as_minimal_point() {
        let scene = build_scene(&[EventRecord::new("Quiet Valley", -0.5, 1.0, 2.0)]);
        let marker = &scene.overlay.markers[0];
        assert_eq!(marker.encoding.color_bucket, ColorBucket::Green);
        assert_eq!(marker.encoding.radius, -5.0);
        assert_eq!(marker.render_radius, 1.0);

        let nan = build_scene(&[EventRecord::new("Unknown", f64::NAN, 1.0, 2.0)]);
        assert_eq!(nan.overlay.markers[0].render_radius, 1.0);
    }

    #[test]
    fn place_names_are_escaped_in_popups() {
        let scene = build_scene(&[EventRecord::new("<b>Town</b>", 2.0, 0.0, 0.0)]);
        let popup = &scene.overlay.markers[0].encoding.popup_text;
        assert!(popup.contains("&lt;b&gt;Town&lt;/b&gt;"));
        assert!(!popup.contains("<b>"));
    }

    #[test]
    fn view_and_control_follow_defaults() {
        let scene = build_scene(&sample_events());
        assert_eq!(scene.view.center, [0.0, 0.0]);
        assert_eq!(scene.view.zoom, 2);
        assert_eq!(scene.view.base_layer, "Street Map");
        assert_eq!(scene.view.visible_overlays, vec!["Earthquakes".to_string()]);

        assert!(!scene.control.collapsed);
        assert_eq!(
            scene.control.base_layers,
            vec!["Street Map".to_string(), "Dark Map".to_string()]
        );
        assert_eq!(scene.control.overlays, vec!["Earthquakes".to_string()]);
    }

    #[test]
    fn configured_radius_scale_flows_into_markers() {
        let presenter = Presenter::new(SceneConfig {
            radius_scale: crate::classify::AREA_RADIUS_SCALE,
            ..Default::default()
        });
        let scene = presenter.build_scene(&[EventRecord::new("x", 1.5, 0.0, 0.0)]);
        assert_eq!(scene.overlay.markers[0].encoding.radius, 3000.0);
    }

    #[test]
    fn bucket_counts_cover_every_bucket() {
        let scene = build_scene(&sample_events());
        let counts = scene.bucket_counts();
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[&ColorBucket::Green], 1);
        assert_eq!(counts[&ColorBucket::Blue], 0);
        assert_eq!(counts[&ColorBucket::Purple], 1);
        assert_eq!(counts[&ColorBucket::Red], 1);
    }

    #[test]
    fn scene_serializes_for_hand_off() {
        let scene = build_scene(&sample_events());
        let json: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        assert_eq!(json["overlay"]["markers"].as_array().unwrap().len(), 3);
        assert_eq!(json["overlay"]["markers"][0]["encoding"]["color_bucket"], "purple");
        assert_eq!(json["legend"]["position"], "bottomright");
        assert_eq!(json["base_layers"][0]["style"], "light");
    }
}
