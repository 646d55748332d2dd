//! WGPU context: instance, surface, adapter, device, and queue

use std::sync::Arc;

use winit::{dpi::PhysicalSize, window::Window};

/// Errors raised while setting up the GPU
#[derive(Debug)]
pub enum ContextError {
    /// The window surface could not be created
    Surface(String),
    /// No adapter can present to the surface
    AdapterNotFound,
    /// The adapter refused to open a device
    Device(String),
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::Surface(msg) => write!(f, "Surface error: {}", msg),
            ContextError::AdapterNotFound => write!(f, "No suitable GPU adapter found"),
            ContextError::Device(msg) => write!(f, "Device error: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}

impl From<wgpu::CreateSurfaceError> for ContextError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        ContextError::Surface(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for ContextError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        ContextError::Device(e.to_string())
    }
}

/// GPU state shared by every pipeline
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Create a context, presenting with or without vsync
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
        {
            Some(adapter) => adapter,
            None => {
                log::warn!("No hardware GPU adapter found, trying software fallback");
                instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        force_fallback_adapter: true,
                        compatible_surface: Some(&surface),
                    })
                    .await
                    .ok_or(ContextError::AdapterNotFound)?
            }
        };

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?}, {:?})", info.name, info.device_type, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Riemann Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = preferred_format(&caps.formats);
        let present_mode = choose_present_mode(&caps.present_modes, vsync);
        log::info!("Surface format: {:?}, present mode: {:?}", format, present_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Reconfigure the surface for a new window size
    ///
    /// Zero-sized windows (minimized) are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure after the surface was lost or outdated
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Width over height of the surface
    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }
}

/// Prefer an sRGB surface format
fn preferred_format(formats: &[wgpu::TextureFormat]) -> wgpu::TextureFormat {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb)
}

/// Fifo for vsync, otherwise the lowest-latency mode available
fn choose_present_mode(available: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    available
        .iter()
        .copied()
        .find(|m| matches!(m, wgpu::PresentMode::Immediate | wgpu::PresentMode::Mailbox))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_error_display() {
        assert_eq!(ContextError::AdapterNotFound.to_string(), "No suitable GPU adapter found");
        assert_eq!(
            ContextError::Device("out of memory".to_string()).to_string(),
            "Device error: out of memory"
        );
    }

    #[test]
    fn test_vsync_always_fifo() {
        let modes = [wgpu::PresentMode::Immediate, wgpu::PresentMode::Fifo];
        assert_eq!(choose_present_mode(&modes, true), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn test_no_vsync_prefers_immediate() {
        let modes = [wgpu::PresentMode::Fifo, wgpu::PresentMode::Immediate];
        assert_eq!(choose_present_mode(&modes, false), wgpu::PresentMode::Immediate);
        assert_eq!(choose_present_mode(&[wgpu::PresentMode::Fifo], false), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn test_preferred_format_is_srgb() {
        let formats = [wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Bgra8UnormSrgb];
        assert_eq!(preferred_format(&formats), wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(preferred_format(&[wgpu::TextureFormat::Rgba8Unorm]), wgpu::TextureFormat::Rgba8Unorm);
    }
}
