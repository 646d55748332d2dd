//! Plotting system
//!
//! Owns the plot scene and turns slot activations into drawn functions:
//! - The first slot resets the scene, then draws
//! - Other slots draw on top of what is there
//! - Failed expressions are logged and kept for the window title

use riemann_core::{PlotError, PlotScene, SceneLayers, SceneSettings};
use riemann_render::RenderableLines;

use crate::input::SlotActivation;

/// Manages the scene of plotted functions
pub struct PlottingSystem {
    scene: PlotScene,
    last_error: Option<String>,
}

impl PlottingSystem {
    /// Create an empty scene (sphere and axes only)
    pub fn new(settings: SceneSettings, layers: SceneLayers) -> Result<Self, PlotError> {
        let mut scene = PlotScene::new(settings)?;
        scene.set_layers(layers);
        Ok(Self {
            scene,
            last_error: None,
        })
    }

    /// Plot a slot
    ///
    /// Empty slots draw nothing; for the first slot the scene is still reset.
    /// On error the message is kept and returned; earlier plots stay.
    pub fn activate(&mut self, activation: &SlotActivation) -> Result<(), PlotError> {
        if activation.replaces_scene() {
            self.scene.init();
        }

        let source = activation.source.trim();
        if source.is_empty() {
            self.last_error = None;
            return Ok(());
        }

        match self.scene.draw(source, activation.color) {
            Ok(_) => {
                log::debug!("{} plot(s) in the scene", self.scene.plot_count());
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                log::warn!("Slot {}: cannot plot '{}': {}", activation.index + 1, source, e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Remove every plot (double-click)
    pub fn clear(&mut self) {
        self.scene.init();
        self.last_error = None;
    }

    /// Flip a layer; returns whether it is now visible
    pub fn toggle_layer(&mut self, layer: SceneLayers) -> bool {
        let visible = self.scene.toggle_layer(layer);
        log::info!("Layer {:?}: {}", layer, if visible { "shown" } else { "hidden" });
        visible
    }

    /// New line geometry if the scene changed since the last call
    pub fn take_lines(&mut self) -> Option<RenderableLines> {
        if self.scene.take_dirty() {
            Some(RenderableLines::from_scene(&self.scene))
        } else {
            None
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn scene(&self) -> &PlotScene {
        &self.scene
    }
}
