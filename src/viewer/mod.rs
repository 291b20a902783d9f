//! Interactive figure display.
//!
//! Every figure gets its own window. [`show`] blocks until the user has
//! closed all of them.

pub mod chart;
pub mod figure_window;
pub mod gpu;

use anyhow::{Context, Result};
use log::{error, info};
use std::collections::HashMap;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

pub use figure_window::{window_attributes, FigureWindow};
pub use gpu::GpuContext;

use crate::plot::Figure;

/// Opens one window per figure and returns once every window is closed
pub fn show(figures: Vec<Figure>) -> Result<()> {
    if figures.is_empty() {
        return Ok(());
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut viewer = Viewer::new(figures);
    event_loop.run_app(&mut viewer)?;
    viewer.finish()
}

/// Event-loop state for the open figure windows
struct Viewer {
    pending: Vec<Figure>,
    gpu: Option<GpuContext>,
    windows: HashMap<WindowId, FigureWindow>,
    failure: Option<anyhow::Error>,
}

impl Viewer {
    fn new(figures: Vec<Figure>) -> Self {
        Self {
            pending: figures,
            gpu: None,
            windows: HashMap::new(),
            failure: None,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop, figure: Figure) -> Result<()> {
        let window = Arc::new(
            event_loop
                .create_window(window_attributes(&figure))
                .with_context(|| format!("Failed to create window for {:?}", figure.title))?,
        );

        let (gpu, surface) = match self.gpu.take() {
            Some(gpu) => {
                let surface = gpu.create_surface(window.clone())?;
                (gpu, surface)
            }
            None => pollster::block_on(GpuContext::for_window(window.clone()))?,
        };
        let gpu = self.gpu.insert(gpu);

        let figure_window = FigureWindow::new(gpu, window, surface, figure)?;
        figure_window.request_redraw();
        self.windows.insert(figure_window.id(), figure_window);
        Ok(())
    }

    fn close(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        if let Some(window) = self.windows.remove(&id) {
            info!("Closed figure {:?}", window.title());
        }
        if self.windows.is_empty() {
            event_loop.exit();
        }
    }

    fn finish(self) -> Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        for figure in std::mem::take(&mut self.pending) {
            if let Err(e) = self.open(event_loop, figure) {
                error!("Failed to open figure window: {:#}", e);
                self.failure = Some(e);
                event_loop.exit();
                return;
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };

        if window.handle_event(&event) {
            window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.close(event_loop, id),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &self.gpu {
                    window.resize(gpu, size);
                }
                window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { .. } => window.request_redraw(),
            WindowEvent::RedrawRequested => {
                if let Some(gpu) = &self.gpu {
                    if let Err(e) = window.render(gpu) {
                        error!("Render error: {:#}", e);
                    }
                }
            }
            _ => {}
        }
    }
}
