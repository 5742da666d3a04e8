use crate::feed::EventRecord;
use crate::presenter::Scene;

/// Failure while obtaining events from a feed.
///
/// Both kinds end the current rendering cycle; nothing retries.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("feed unreachable: {0}")]
    Unreachable(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure while handing a composed scene to a render surface.
#[derive(thiserror::Error, Debug)]
pub enum SurfaceError {
    #[error("render surface unavailable: {0}")]
    Unavailable(String),
    #[error("scene export failed: {0}")]
    Export(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Anything that can deliver a batch of event records.
pub trait EventSource {
    fn fetch_events(&self) -> SourceResult<Vec<EventRecord>>;

    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;
}

/// Anything that accepts a composed scene for display.
pub trait RenderSurface {
    fn present(&self, scene: &Scene) -> SurfaceResult<()>;
}
