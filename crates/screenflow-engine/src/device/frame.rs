/// One acquired swapchain image plus the encoder recording into it.
///
/// Presentation happens when the surface texture is dropped after submit, so
/// the frame must not be held across callbacks.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
