//! Core pipeline for the earthquake feed map.
//!
//! Raw feed records flow one way through the crate: the feed schema turns a
//! GeoJSON payload into `EventRecord`s, the classifier derives a visual
//! encoding per record, and the presenter composes the overlay, base layers
//! and legend into a `Scene` for whatever render surface the caller owns.

pub mod classify;
pub mod feed;
pub mod prelude;
pub mod presenter;
pub mod telemetry;

pub use classify::{Classifier, ColorBucket, VisualEncoding};
pub use feed::EventRecord;
pub use prelude::{EventSource, RenderSurface, SourceError, SourceResult};
pub use presenter::{Presenter, Scene, SceneConfig};
