//! Feed-side data model and schema validation.
//!
//! Sources in the driver fetch raw bytes; everything that decides whether
//! those bytes are a usable event feed lives here so every source rejects
//! the same shapes with the same error.

pub mod geojson;
pub mod record;

pub use geojson::parse_feed;
pub use record::EventRecord;
