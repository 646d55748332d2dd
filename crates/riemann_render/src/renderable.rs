//! Renderable lines - bridges the plot scene to GPU vertices
//!
//! Every segment becomes two [`LineVertex`] entries, ready for a
//! line-list draw.

use riemann_core::{PlotScene, Segment};

use crate::pipeline::LineVertex;

/// GPU-ready line vertices collected from segments
#[derive(Clone, Debug, Default)]
pub struct RenderableLines {
    pub vertices: Vec<LineVertex>,
}

impl RenderableLines {
    pub fn with_capacity(segment_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(segment_capacity * 2),
        }
    }

    /// Collect every visible segment of the scene
    pub fn from_scene(scene: &PlotScene) -> Self {
        let mut lines = Self::with_capacity(scene.segment_count());
        lines.extend(scene.segments());
        lines
    }

    /// Append one segment
    ///
    /// Colors are converted to linear space for the sRGB surface.
    pub fn add_segment(&mut self, segment: &Segment) {
        let color = segment.color.to_linear().rgba();
        self.vertices.push(LineVertex::new(segment.a.to_array(), color));
        self.vertices.push(LineVertex::new(segment.b.to_array(), color));
    }

    pub fn extend<'a>(&mut self, segments: impl IntoIterator<Item = &'a Segment>) {
        for segment in segments {
            self.add_segment(segment);
        }
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}
