//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Line pipeline and its render targets
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use riemann_core::Color;
use riemann_render::{
    context::{ContextError, RenderContext},
    orbit_camera::OrbitCamera,
    pipeline::{LinePipeline, LineUniforms},
    RenderableLines,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    line_pipeline: LinePipeline,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut line_pipeline = LinePipeline::new(
            &context.device,
            context.config.format,
            render_config.msaa_samples,
        );
        line_pipeline.ensure_targets(&context.device, context.config.width, context.config.height);
        log::info!("Line pipeline ready ({}x MSAA)", line_pipeline.sample_count());

        Ok(Self {
            context,
            line_pipeline,
            clear_color: clear_color(render_config.background_color),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.line_pipeline.ensure_targets(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Upload line geometry to GPU
    pub fn upload_lines(&mut self, lines: &RenderableLines) {
        self.line_pipeline
            .upload(&self.context.device, &self.context.queue, &lines.vertices);
        log::debug!("Uploaded {} line segments", lines.segment_count());
    }

    /// Render a single frame
    pub fn render_frame(&mut self, camera: &OrbitCamera) -> Result<(), RenderError> {
        let uniforms = LineUniforms {
            view_proj: camera.view_proj(self.context.aspect_ratio()),
        };
        self.line_pipeline
            .update_uniforms(&self.context.queue, &uniforms);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.line_pipeline
            .render(&mut encoder, &view, self.clear_color);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.config.width, self.context.config.height)
    }
}

/// Background color for an sRGB surface
fn clear_color(hex: u32) -> wgpu::Color {
    let [r, g, b, a] = Color::from_hex(hex).to_linear().rgba();
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_clear_color_is_opaque_grey() {
        let c = clear_color(0x888888);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert!(c.r > 0.2 && c.r < 0.3);
        assert_eq!(c.a, 1.0);
    }
}
