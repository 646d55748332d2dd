//! The plot scene: Riemann sphere, axes, and drawn functions
//!
//! The sphere and axes are built once. Drawn functions live in a slot map
//! so they can be removed individually; `init` empties them all.

use bitflags::bitflags;
use slotmap::SlotMap;

use crate::projection::{RAY_PLANE_Z, SPHERE_CENTER, SPHERE_RADIUS};
use crate::shapes::{axis_lines, wireframe_sphere, SphereDivisions};
use crate::{Color, Plot, PlotError, PlotKey, SampleDomain, Segment};

bitflags! {
    /// Which groups of segments are visible
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SceneLayers: u8 {
        /// Wireframe sphere
        const SPHERE = 1 << 0;
        /// X and Y axes
        const AXES = 1 << 1;
        /// Function curves on the plane
        const CURVES = 1 << 2;
        /// Sample-to-pole rays
        const RAYS = 1 << 3;
        /// Curve images on the sphere
        const TRACES = 1 << 4;
    }
}

impl Default for SceneLayers {
    fn default() -> Self {
        Self::SPHERE | Self::AXES | Self::CURVES | Self::RAYS
    }
}

/// Settings the scene is built with
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    /// Sampling domain; axes extend over the same range
    pub domain: SampleDomain,
    pub sphere_color: Color,
    pub axis_color: Color,
    pub sphere_divisions: SphereDivisions,
    /// Height of the plane curves
    pub curve_z: f32,
    /// Height where projection rays leave the plane
    pub ray_plane_z: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            domain: SampleDomain::default(),
            sphere_color: Color::from_hex(0x0000ff),
            axis_color: Color::from_hex(0x444444),
            sphere_divisions: SphereDivisions::default(),
            curve_z: 0.0,
            ray_plane_z: RAY_PLANE_Z,
        }
    }
}

/// Sphere, axes, and every plotted function
pub struct PlotScene {
    settings: SceneSettings,
    sphere: Vec<Segment>,
    axes: Vec<Segment>,
    plots: SlotMap<PlotKey, Plot>,
    layers: SceneLayers,
    dirty: bool,
}

impl PlotScene {
    /// Build the sphere and axes; no functions are drawn yet
    pub fn new(settings: SceneSettings) -> Result<Self, PlotError> {
        settings.domain.validate()?;

        let sphere = wireframe_sphere(
            SPHERE_CENTER,
            SPHERE_RADIUS,
            settings.sphere_divisions,
            settings.sphere_color,
        );
        let axes = axis_lines(settings.domain.range as f32, settings.axis_color).to_vec();

        Ok(Self {
            settings,
            sphere,
            axes,
            plots: SlotMap::with_key(),
            layers: SceneLayers::default(),
            dirty: true,
        })
    }

    /// Remove every drawn function, keeping sphere and axes
    pub fn init(&mut self) {
        let removed = self.plots.len();
        self.plots.clear();
        self.dirty = true;
        log::debug!("Scene reset ({} plots removed)", removed);
    }

    /// Plot `source` in `color` on top of what is already drawn
    ///
    /// On error the scene is left unchanged.
    pub fn draw(&mut self, source: &str, color: Color) -> Result<PlotKey, PlotError> {
        let plot = Plot::build(source, color, &self.settings)?;
        log::info!(
            "Plotted '{}': {} samples, {} runs, {} segments",
            plot.source,
            plot.sample_count,
            plot.run_count,
            plot.segment_count()
        );
        self.dirty = true;
        Ok(self.plots.insert(plot))
    }

    /// Remove one plot
    pub fn remove(&mut self, key: PlotKey) -> Option<Plot> {
        let removed = self.plots.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn plot(&self, key: PlotKey) -> Option<&Plot> {
        self.plots.get(key)
    }

    /// Iterate over plots in no particular order
    pub fn plots(&self) -> impl Iterator<Item = (PlotKey, &Plot)> {
        self.plots.iter()
    }

    #[inline]
    pub fn plot_count(&self) -> usize {
        self.plots.len()
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    #[inline]
    pub fn layers(&self) -> SceneLayers {
        self.layers
    }

    /// Replace the visible layers
    pub fn set_layers(&mut self, layers: SceneLayers) {
        if self.layers != layers {
            self.layers = layers;
            self.dirty = true;
        }
    }

    /// Flip a layer; returns whether it is now visible
    pub fn toggle_layer(&mut self, layer: SceneLayers) -> bool {
        self.layers.toggle(layer);
        self.dirty = true;
        self.layers.contains(layer)
    }

    /// Return and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// All segments on visible layers
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        let layers = self.layers;

        visible(layers, SceneLayers::SPHERE, &self.sphere)
            .chain(visible(layers, SceneLayers::AXES, &self.axes))
            .chain(self.plots.values().flat_map(move |plot| {
                visible(layers, SceneLayers::CURVES, &plot.curve)
                    .chain(visible(layers, SceneLayers::RAYS, &plot.rays))
                    .chain(visible(layers, SceneLayers::TRACES, &plot.trace))
            }))
    }

    /// Number of segments on visible layers
    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }
}

fn visible(layers: SceneLayers, layer: SceneLayers, segments: &[Segment]) -> std::slice::Iter<'_, Segment> {
    if layers.contains(layer) {
        segments.iter()
    } else {
        [].iter()
    }
}
