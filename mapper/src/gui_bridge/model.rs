use quakecore::Scene;
use serde::{Deserialize, Serialize};

/// What the bridge currently serves: the latest scene, if any, and a status
/// line for the page when there is none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeModel {
    pub scene: Option<Scene>,
    pub status: String,
}

impl BridgeModel {
    pub fn new() -> Self {
        Self {
            scene: None,
            status: "Waiting for earthquake feed...".into(),
        }
    }

    pub fn marker_count(&self) -> usize {
        self.scene.as_ref().map(Scene::marker_count).unwrap_or(0)
    }
}

impl Default for BridgeModel {
    fn default() -> Self {
        Self::new()
    }
}
