use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{translate_window_event, InputFrame, InputState};
use crate::render::{RenderCtx, Viewport};
use crate::time::FrameClock;

/// Window and loop configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Frames per second cap; `0` renders as fast as presentation allows.
    pub fps_limit: u32,
    /// Frame deltas above this become zero.
    pub max_frame_delta: Duration,
    pub warn_on_frame_overhead: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ember".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            fps_limit: 0,
            max_frame_delta: FrameClock::DEFAULT_MAX_DELTA,
            warn_on_frame_overhead: true,
        }
    }
}

/// Entry point for the platform loop.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and `app`, and runs until exit.
    ///
    /// Returns the initialization error if window, GPU or `App::on_init` failed.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Time between frames for an fps cap; `None` when uncapped.
pub(crate) fn frame_interval(fps_limit: u32) -> Option<Duration> {
    (fps_limit > 0).then(|| Duration::from_secs_f64(1.0 / fps_limit as f64))
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    window_id: Option<WindowId>,
    next_frame: Option<Instant>,

    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            window_id: None,
            next_frame: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let id = window.id();

        let gpu_init = self.gpu_init.clone();
        let clock = FrameClock::with_max_delta(self.config.max_frame_delta)
            .warn_on_overhead(self.config.warn_on_frame_overhead);

        let mut entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let app = &mut self.app;
        entry
            .with(|fields| {
                let (w, h) = WindowCtx { window: fields.window }.logical_size();
                let rctx = RenderCtx::new(
                    fields.gpu.device(),
                    fields.gpu.queue(),
                    fields.gpu.surface_format(),
                    Viewport::new(w, h),
                );
                app.on_init(&rctx)
            })
            .context("application initialization failed")?;

        // The clock starts after setup so the first delta excludes it.
        entry.with_mut(|fields| fields.clock.reset());
        entry.with_window(|w| w.request_redraw());

        self.entry = Some(entry);
        self.window_id = Some(id);
        Ok(())
    }

    fn resize(&mut self, physical: PhysicalSize<u32>) {
        let Some(entry) = self.entry.as_mut() else { return };

        entry.with_gpu_mut(|gpu| gpu.resize(physical));
        let (w, h) = entry.with_window(|window| {
            window.request_redraw();
            WindowCtx { window }.logical_size()
        });
        self.app.on_resize(w, h);
    }

    fn redraw(&mut self) -> AppControl {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return AppControl::Continue;
        };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            let time = fields.clock.tick();

            // Scoped so the frame borrows end before per-frame input is cleared.
            {
                let mut ctx = FrameCtx {
                    window: WindowCtx { window: fields.window },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                control = app.on_frame(&mut ctx);
            }

            fields.input_frame.clear();
        });
        control
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
            return;
        }
        log::info!("window {:?} ready", self.config.title);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        let Some(entry) = self.entry.as_ref() else { return };

        match self.next_frame {
            Some(deadline) if Instant::now() < deadline => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Wait);
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        if self.window_id != Some(window_id) {
            return;
        }

        if let Some(entry) = self.entry.as_mut() {
            entry.with_mut(|fields| {
                let scale = fields.window.scale_factor();
                if let Some(ev) = translate_window_event(scale, &event) {
                    fields.input_state.apply_event(fields.input_frame, ev);
                }
            });
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.entry = None;
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.resize(*size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size())) {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                let started = Instant::now();
                if self.redraw() == AppControl::Exit {
                    self.exit_requested = true;
                    event_loop.exit();
                    return;
                }
                self.next_frame = frame_interval(self.config.fps_limit).map(|i| started + i);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_limit_sets_frame_interval() {
        assert_eq!(frame_interval(0), None);
        assert_eq!(frame_interval(50), Some(Duration::from_millis(20)));
    }
}
