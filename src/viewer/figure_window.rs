use anyhow::{Context, Result};
use log::{debug, warn};
use std::sync::Arc;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::window::{Window, WindowAttributes, WindowId};

use super::gpu::GpuContext;
use super::chart::show_figure;
use crate::plot::{Figure, DEFAULT_DPI};

/// Window attributes sized to the figure
pub fn window_attributes(figure: &Figure) -> WindowAttributes {
    let (width, height) = figure.size.pixels(DEFAULT_DPI);
    Window::default_attributes()
        .with_title(figure.title.clone())
        .with_inner_size(LogicalSize::new(width, height))
}

/// One figure drawn with egui onto its own window surface
pub struct FigureWindow {
    window: Arc<Window>,
    figure: Figure,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
}

impl FigureWindow {
    pub fn new(
        gpu: &GpuContext,
        window: Arc<Window>,
        surface: wgpu::Surface<'static>,
        figure: Figure,
    ) -> Result<Self> {
        let config = gpu.surface_config(&surface, window.inner_size())?;
        surface.configure(gpu.device(), &config);

        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::light());
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            gpu.device(),
            config.format,
            egui_wgpu::RendererOptions::default(),
        );

        debug!(
            "Opened figure window {:?}: {} points",
            figure.title,
            figure.series.points().len()
        );

        Ok(Self {
            window,
            figure,
            surface,
            config,
            egui_renderer,
            egui_state,
            egui_ctx,
        })
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn title(&self) -> &str {
        &self.figure.title
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Feed an event to egui, returns true if it wants a repaint
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(&self.window, event).repaint
    }

    pub fn resize(&mut self, gpu: &GpuContext, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(gpu.device(), &self.config);
    }

    pub fn render(&mut self, gpu: &GpuContext) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface of {:?} out of date, reconfiguring", self.figure.title);
                self.surface.configure(gpu.device(), &self.config);
                self.window.request_redraw();
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to acquire surface texture"),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let figure = &self.figure;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE.fill(egui::Color32::WHITE).inner_margin(egui::Margin::same(8)))
                .show(ctx, |ui| show_figure(ui, figure));
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(gpu.device(), gpu.queue(), *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Figure Encoder"),
            });

        let extra_commands = self.egui_renderer.update_buffers(
            gpu.device(),
            gpu.queue(),
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        gpu.queue().submit(
            extra_commands
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::Series;
    use winit::dpi::Size;

    #[test]
    fn test_window_attributes_follow_figure() {
        let figure = Figure::new("Frametime", Series::Line { points: Vec::new() });
        let attrs = window_attributes(&figure);

        assert_eq!(attrs.title, "Frametime");
        match attrs.inner_size {
            Some(Size::Logical(size)) => {
                assert_eq!(size.width, 600.0);
                assert_eq!(size.height, 400.0);
            }
            other => panic!("unexpected inner size: {:?}", other),
        }
    }
}
