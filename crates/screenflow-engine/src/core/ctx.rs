use winit::window::{Window, WindowId};

use crate::coords::Size;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::paint::Color;
use crate::render::{Presenter, RenderCtx, RenderTarget};
use crate::surface::Image;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-window handles.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Window client area in whole logical pixels.
    pub fn logical_size(&self) -> Size {
        let logical: winit::dpi::LogicalSize<f64> =
            self.window.inner_size().to_logical(self.window.scale_factor());
        Size::new(logical.width.round() as u32, logical.height.round() as u32)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Per-frame context passed to [`super::App::on_frame`].
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window borrow carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub presenter: &'a mut Presenter,
    pub input: &'a InputState,
    pub input_frame: &'a mut InputFrame,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Shows `image` in the window, scaled to the drawable area.
    ///
    /// Swapchain errors that can be recovered from skip the frame; fatal ones
    /// return [`AppControl::Exit`].
    pub fn present(&mut self, image: &Image, clear: Color) -> AppControl {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("failed to acquire frame: {err}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.presenter.present(&rctx, &mut target, image, clear);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
        AppControl::Continue
    }
}
