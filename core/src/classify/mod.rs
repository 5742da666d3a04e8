//! Magnitude classification: marker radius, color bucket and popup text.
//!
//! Everything here is total over `f64`. Negative, zero and very large
//! magnitudes all produce an encoding; deciding how a degenerate radius is
//! drawn is the presenter's job.

pub mod bucket;
pub mod popup;

use serde::{Deserialize, Serialize};

use crate::feed::EventRecord;

pub use bucket::{ColorBucket, BUCKET_THRESHOLDS};
pub use popup::{escape_html, popup_text};

/// Pixel radius per unit of magnitude used by the live marker path.
pub const DEFAULT_RADIUS_SCALE: f64 = 10.0;

/// Alternate sizing factor that was defined next to the marker code but never
/// wired in. It reads like a meter-based circle radius rather than a pixel
/// radius; selectable through configuration, not the default.
pub const AREA_RADIUS_SCALE: f64 = 2000.0;

/// Derived, immutable rendering attributes for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEncoding {
    pub radius: f64,
    pub color_bucket: ColorBucket,
    pub popup_text: String,
}

/// Stateless apart from the radius factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    radius_scale: f64,
}

impl Classifier {
    pub fn new(radius_scale: f64) -> Self {
        Self { radius_scale }
    }

    #[cfg(test)]
    pub fn radius_scale(&self) -> f64 {
        self.radius_scale
    }

    pub fn classify(&self, event: &EventRecord) -> VisualEncoding {
        VisualEncoding {
            radius: self.radius_for(event.magnitude),
            color_bucket: ColorBucket::for_magnitude(event.magnitude),
            popup_text: popup_text(&event.place, event.magnitude),
        }
    }

    pub fn radius_for(&self, magnitude: f64) -> f64 {
        magnitude * self.radius_scale
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_SCALE)
    }
}

/// Classify with the default radius scale.
pub fn classify(event: &EventRecord) -> VisualEncoding {
    Classifier::default().classify(event)
}
