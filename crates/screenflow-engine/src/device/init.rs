/// GPU initialization parameters.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB swapchain so the sRGB framebuffer image is shown unchanged.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; falls back to the first supported one.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Power preference for adapter selection. A screen flow is a light
    /// workload, so the default asks for the low-power adapter.
    pub power_preference: wgpu::PowerPreference,

    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::LowPower,
            desired_maximum_frame_latency: 2,
        }
    }
}
