use crate::gui_bridge::model::BridgeModel;
use crate::gui_bridge::page::INDEX_HTML;
use anyhow::Context;
use log::info;
use quakecore::prelude::{RenderSurface, SurfaceResult};
use quakecore::Scene;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{mpsc, Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

type SharedModel = Arc<RwLock<BridgeModel>>;

fn read(state: &SharedModel) -> RwLockReadGuard<'_, BridgeModel> {
    state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write(state: &SharedModel) -> RwLockWriteGuard<'_, BridgeModel> {
    state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Routes served to the browser: the page, the latest scene and a health check.
fn routes(
    state: SharedModel,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let index_route = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML));

    let scene_route = warp::path("scene")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: SharedModel| {
            let guard = read(&state);
            match &guard.scene {
                Some(scene) => warp::reply::with_status(warp::reply::json(scene), StatusCode::OK),
                None => warp::reply::with_status(
                    warp::reply::json(&json!({ "status": guard.status })),
                    StatusCode::SERVICE_UNAVAILABLE,
                ),
            }
        });

    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter)
        .map(|state: SharedModel| {
            let guard = read(&state);
            warp::reply::json(&json!({
                "status": "ok",
                "scene_ready": guard.scene.is_some(),
                "markers": guard.marker_count(),
                "message": guard.status,
            }))
        });

    index_route.or(scene_route).or(health_route)
}

/// Render surface backed by a local HTTP endpoint the Leaflet page polls once.
pub struct GuiBridge {
    state: SharedModel,
    local_addr: Option<SocketAddr>,
}

impl GuiBridge {
    /// Bridge state without a listener.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(BridgeModel::new())),
            local_addr: None,
        }
    }

    /// Start serving on `addr` from a background thread with its own runtime.
    ///
    /// Returns once the listener is bound, or with the bind error.
    pub fn spawn(addr: SocketAddr) -> anyhow::Result<Self> {
        let mut bridge = Self::new();
        let served = routes(bridge.state.clone());
        let (ready_tx, ready_rx) = mpsc::channel::<Result<SocketAddr, String>>();

        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    let _ = ready_tx.send(Err(format!("building bridge runtime: {}", err)));
                    return;
                }
            };
            runtime.block_on(async move {
                match warp::serve(served).try_bind_ephemeral(addr) {
                    Ok((bound, server)) => {
                        let _ = ready_tx.send(Ok(bound));
                        server.await;
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(format!("binding {}: {}", addr, err)));
                    }
                }
            });
        });

        let bound = ready_rx
            .recv()
            .context("map bridge thread exited before binding")?
            .map_err(anyhow::Error::msg)?;
        info!("Map bridge listening on http://{}", bound);
        bridge.local_addr = Some(bound);
        Ok(bridge)
    }

    /// Address the listener is bound to; `None` for a bridge without one.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn publish_status(&self, message: &str) {
        write(&self.state).status = message.to_string();
        info!("[map] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> BridgeModel {
        read(&self.state).clone()
    }
}

impl Default for GuiBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for GuiBridge {
    fn present(&self, scene: &Scene) -> SurfaceResult<()> {
        let mut guard = write(&self.state);
        guard.scene = Some(scene.clone());
        guard.status = format!("Scene ready: {} markers", scene.marker_count());
        info!("[map] {}", guard.status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quakecore::presenter::build_scene;
    use quakecore::EventRecord;

    fn scene() -> Scene {
        build_scene(&[
            EventRecord::new("10km N of Town", 5.2, 10.0, 20.0),
            EventRecord::new("Quiet Valley", -0.5, 1.0, 2.0),
        ])
    }

    #[test]
    fn gui_bridge_updates_state() {
        let gui = GuiBridge::new();
        assert!(gui.snapshot().scene.is_none());

        gui.present(&scene()).unwrap();
        let snapshot = gui.snapshot();
        assert_eq!(snapshot.marker_count(), 2);
        assert!(snapshot.status.contains("2 markers"));
    }

    #[test]
    fn status_is_kept_when_no_scene_arrives() {
        let gui = GuiBridge::new();
        gui.publish_status("Earthquake feed unavailable: feed unreachable");
        let snapshot = gui.snapshot();
        assert!(snapshot.scene.is_none());
        assert!(snapshot.status.contains("unavailable"));
    }

    #[test]
    fn spawn_reports_bound_address() {
        let gui = GuiBridge::spawn(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
        let addr = gui.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
        assert!(GuiBridge::new().local_addr().is_none());
    }

    #[test]
    fn spawn_fails_when_port_is_taken() {
        let held = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = held.local_addr().unwrap();

        let err = match GuiBridge::spawn(addr) {
            Ok(_) => panic!("bridge bound to a port that is already in use"),
            Err(err) => err,
        };
        assert!(format!("{:#}", err).contains(&addr.to_string()));
    }

    #[tokio::test]
    async fn scene_route_serves_published_scene() {
        let gui = GuiBridge::new();
        let filter = routes(gui.state.clone());

        let resp = warp::test::request().path("/scene").reply(&filter).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        gui.present(&scene()).unwrap();
        let resp = warp::test::request().path("/scene").reply(&filter).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["overlay"]["markers"].as_array().unwrap().len(), 2);
        assert_eq!(body["control"]["collapsed"], false);
    }

    #[tokio::test]
    async fn index_and_health_routes_respond() {
        let gui = GuiBridge::new();
        let filter = routes(gui.state.clone());

        let resp = warp::test::request().path("/").reply(&filter).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(String::from_utf8_lossy(resp.body()).contains("L.map(\"map\""));

        gui.present(&scene()).unwrap();
        let resp = warp::test::request().path("/health").reply(&filter).await;
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["scene_ready"], true);
        assert_eq!(body["markers"], 2);
    }
}
