use anyhow::Context;
use quakecore::classify::{AREA_RADIUS_SCALE, DEFAULT_RADIUS_SCALE};
use quakecore::prelude::EventSource;
use quakecore::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use quakecore::{Presenter, Scene, SceneConfig};

/// One fetch-classify-compose cycle per call.
pub struct Runner {
    presenter: Presenter,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl Runner {
    pub fn new(config: SceneConfig) -> Self {
        let logger = LogManager::new();
        if config.radius_scale == AREA_RADIUS_SCALE {
            logger.caution(&format!(
                "marker radius uses the alternate {}x sizing; the live marker path historically used {}x",
                AREA_RADIUS_SCALE, DEFAULT_RADIUS_SCALE
            ));
        }
        if config.tiles.access_token.is_empty() {
            logger.caution("no tile access token configured; base layers will not load");
        }

        Self {
            presenter: Presenter::new(config),
            metrics: MetricsRecorder::new(),
            logger,
        }
    }

    /// Fetch once and compose the scene. A source failure ends the cycle with
    /// no partial scene.
    pub fn execute(&self, source: &dyn EventSource) -> anyhow::Result<Scene> {
        self.metrics.record_fetch();
        let events = match source.fetch_events() {
            Ok(events) => events,
            Err(err) => {
                self.metrics.record_source_error();
                self.logger
                    .caution(&format!("{} failed: {}", source.describe(), err));
                return Err(err).with_context(|| format!("fetching events from {}", source.describe()));
            }
        };
        self.logger
            .record(&format!("{} delivered {} events", source.describe(), events.len()));

        let scene = self.presenter.build_scene(&events);
        self.metrics.record_scene(&scene);
        Ok(scene)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quakecore::prelude::{SourceError, SourceResult};
    use quakecore::{ColorBucket, EventRecord};

    struct StaticSource(Vec<EventRecord>);

    impl EventSource for StaticSource {
        fn fetch_events(&self) -> SourceResult<Vec<EventRecord>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static source".into()
        }
    }

    struct BrokenSource;

    impl EventSource for BrokenSource {
        fn fetch_events(&self) -> SourceResult<Vec<EventRecord>> {
            Err(SourceError::MalformedPayload("feature 0 is missing `properties.mag`".into()))
        }

        fn describe(&self) -> String {
            "broken source".into()
        }
    }

    #[test]
    fn runner_executes_cycle() {
        let runner = Runner::new(SceneConfig::default());
        let source = StaticSource(vec![
            EventRecord::new("10km N of Town", 5.2, 10.0, 20.0),
            EventRecord::new("Quiet Valley", -0.5, 1.0, 2.0),
        ]);
        let scene = runner.execute(&source).unwrap();

        assert_eq!(scene.marker_count(), 2);
        assert_eq!(scene.overlay.markers[0].encoding.color_bucket, ColorBucket::Purple);
        assert_eq!(scene.overlay.markers[1].encoding.color_bucket, ColorBucket::Green);

        let metrics = runner.metrics();
        assert_eq!(metrics.fetches, 1);
        assert_eq!(metrics.source_errors, 0);
        assert_eq!(metrics.total_markers(), 2);
    }

    #[test]
    fn empty_feed_still_builds_scene() {
        let runner = Runner::new(SceneConfig::default());
        let scene = runner.execute(&StaticSource(Vec::new())).unwrap();
        assert_eq!(scene.marker_count(), 0);
        assert_eq!(scene.legend.entries.len(), 4);
    }

    #[test]
    fn source_failure_is_terminal_and_counted() {
        let runner = Runner::new(SceneConfig::default());
        let err = runner.execute(&BrokenSource).unwrap_err();

        assert!(format!("{:#}", err).contains("fetching events from broken source"));
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::MalformedPayload(_))
        ));
        let metrics = runner.metrics();
        assert_eq!(metrics.source_errors, 1);
        assert_eq!(metrics.total_markers(), 0);
    }
}
