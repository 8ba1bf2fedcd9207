use winit::event::WindowEvent;

use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Contract between the window runtime and the application.
///
/// Call order: `on_init` once after the window and GPU exist, then per frame
/// any number of `on_window_event`/`on_resize` followed by one `on_frame`.
pub trait App {
    /// Creates GPU-side resources before the first frame.
    ///
    /// An error is fatal: the runtime logs it and exits without rendering.
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Window was resized; sizes are logical pixels.
    fn on_resize(&mut self, width: f32, height: f32) {
        let _ = (width, height);
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
