use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::info;
use quakecore::prelude::{RenderSurface, SurfaceError, SurfaceResult};
use quakecore::Scene;

/// Writes the composed scene as pretty JSON for an external renderer.
pub struct SceneFileExporter {
    path: PathBuf,
}

impl SceneFileExporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RenderSurface for SceneFileExporter {
    fn present(&self, scene: &Scene) -> SurfaceResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SurfaceError::Export(format!("creating {}: {}", parent.display(), e))
            })?;
        }
        let file = File::create(&self.path).map_err(|e| {
            SurfaceError::Export(format!("creating {}: {}", self.path.display(), e))
        })?;
        serde_json::to_writer_pretty(file, scene).map_err(|e| {
            SurfaceError::Export(format!("writing {}: {}", self.path.display(), e))
        })?;
        info!(
            "Scene with {} markers written to {}",
            scene.marker_count(),
            self.path.display()
        );
        Ok(())
    }
}
