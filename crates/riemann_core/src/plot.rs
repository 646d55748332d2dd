//! A single drawn function

use riemann_expr::CompiledFunction;
use slotmap::new_key_type;

use crate::projection::{curve_segments, projection_rays, sphere_trace};
use crate::{graph, split_polyline, Color, PlotError, SceneSettings, Segment};

new_key_type! {
    /// Handle to a plot inside a [`crate::PlotScene`]
    pub struct PlotKey;
}

/// Geometry built from one expression
#[derive(Clone, Debug)]
pub struct Plot {
    /// Expression text as entered
    pub source: String,
    pub color: Color,
    /// Plane curve, one segment per neighbouring pair in a run
    pub curve: Vec<Segment>,
    /// Sample-to-north-pole rays
    pub rays: Vec<Segment>,
    /// Stereographic image of the curve on the sphere
    pub trace: Vec<Segment>,
    /// Samples taken (origin excluded)
    pub sample_count: usize,
    /// Connected runs after splitting
    pub run_count: usize,
}

impl Plot {
    /// Parse, sample, split, and project `source`
    pub fn build(source: &str, color: Color, settings: &SceneSettings) -> Result<Self, PlotError> {
        let function = CompiledFunction::compile(source)?;
        Self::from_function(&function, color, settings)
    }

    /// Build from an already compiled function
    pub fn from_function(
        function: &CompiledFunction,
        color: Color,
        settings: &SceneSettings,
    ) -> Result<Self, PlotError> {
        let samples = graph(|x| function.call(x), &settings.domain)?;
        let runs = split_polyline(&samples);

        let finite = samples.iter().filter(|s| s.is_finite()).count();
        if finite < samples.len() {
            log::debug!(
                "'{}': {} of {} samples are not finite",
                function.source(),
                samples.len() - finite,
                samples.len()
            );
        }

        Ok(Self {
            source: function.source().to_string(),
            color,
            curve: curve_segments(&runs, settings.curve_z, color),
            rays: projection_rays(&samples, settings.ray_plane_z, color),
            trace: sphere_trace(&runs, color),
            sample_count: samples.len(),
            run_count: runs.len(),
        })
    }

    /// Total segments across all layers
    pub fn segment_count(&self) -> usize {
        self.curve.len() + self.rays.len() + self.trace.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SampleDomain;

    fn coarse() -> SceneSettings {
        SceneSettings {
            domain: SampleDomain::new(2.0, 0.5),
            ..SceneSettings::default()
        }
    }

    #[test]
    fn test_reciprocal_splits_into_two_runs() {
        let plot = Plot::build("1 / x", Color::from_hex(0xff0000), &coarse()).unwrap();
        // x = -2, -1.5, -1, -0.5, 0.5, 1, 1.5, 2
        assert_eq!(plot.sample_count, 8);
        assert_eq!(plot.run_count, 2);
        assert_eq!(plot.curve.len(), 6);
        assert_eq!(plot.rays.len(), 8);
        assert_eq!(plot.trace.len(), 6);
        assert_eq!(plot.source, "1 / x");
    }

    #[test]
    fn test_every_segment_has_plot_color() {
        let color = Color::from_hex(0xff8800);
        let plot = Plot::build("x^2", color, &coarse()).unwrap();
        assert!(plot.curve.iter().chain(&plot.rays).chain(&plot.trace).all(|s| s.color == color));
    }

    #[test]
    fn test_parse_error() {
        let err = Plot::build("1 / ", Color::WHITE, &coarse()).unwrap_err();
        assert!(matches!(err, PlotError::Expr(_)));
    }

    #[test]
    fn test_nowhere_defined_function() {
        let plot = Plot::build("sqrt(-1 - x^2)", Color::WHITE, &coarse()).unwrap();
        assert_eq!(plot.run_count, 0);
        assert_eq!(plot.segment_count(), 0);
    }
}
