use std::num::NonZeroU32;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context as _, Result};
use log::{debug, warn};
use reel_core::scene::Scene;
use reel_core::{CANVAS_HEIGHT, CANVAS_WIDTH, Canvas};
use reel_ui::input::UiContext;
use skia_safe::{AlphaType, ColorType, ImageInfo, Rect as SkRect, surfaces};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::assets::AssetManager;
use crate::config::WindowConfig;
use crate::painter::Painter;

/// Messages from the scene driver thread to the window thread.
pub enum CanvasEvent {
    Install(Arc<Scene>),
    Repaint,
    Finished,
}

/// Builds the event loop the window runs on. Must be called on the main thread.
pub fn event_loop() -> Result<EventLoop<CanvasEvent>> {
    EventLoop::<CanvasEvent>::with_user_event()
        .build()
        .context("Failed to create event loop")
}

/// The last scene handed to the window, shared by both threads.
///
/// The closed flag and the scene sit behind one lock, so a scene installed
/// while the window goes away is closed by exactly one side.
#[derive(Default)]
pub(crate) struct Installed {
    inner: Mutex<InstalledState>,
}

#[derive(Default)]
struct InstalledState {
    window_closed: bool,
    scene: Option<Arc<Scene>>,
}

impl Installed {
    pub(crate) fn install(&self, scene: &Arc<Scene>) {
        let Ok(mut state) = self.inner.lock() else {
            scene.close();
            return;
        };
        if state.window_closed {
            debug!("window closed, scene {} will not play", scene.id());
            scene.close();
        } else {
            state.scene = Some(Arc::clone(scene));
        }
    }

    pub(crate) fn close(&self) {
        let scene = match self.inner.lock() {
            Ok(mut state) => {
                state.window_closed = true;
                state.scene.take()
            }
            Err(_) => return,
        };
        if let Some(scene) = scene {
            scene.close();
        }
    }
}

/// Thread-safe handle the driver paints through.
pub struct SkiaCanvas {
    proxy: Mutex<EventLoopProxy<CanvasEvent>>,
    installed: Arc<Installed>,
}

impl SkiaCanvas {
    pub fn new(event_loop: &EventLoop<CanvasEvent>) -> Self {
        Self {
            proxy: Mutex::new(event_loop.create_proxy()),
            installed: Arc::new(Installed::default()),
        }
    }

    /// Marks the window gone and closes whatever scene it was last given.
    /// Call once the event loop has returned, before joining the driver.
    pub fn close_window(&self) {
        self.installed.close();
    }

    fn send(&self, event: CanvasEvent) {
        let Ok(proxy) = self.proxy.lock() else { return };
        if proxy.send_event(event).is_err() {
            debug!("window already gone, dropping canvas event");
        }
    }
}

impl Canvas for SkiaCanvas {
    fn install(&self, scene: Arc<Scene>) {
        self.installed.install(&scene);
        self.send(CanvasEvent::Install(scene));
    }

    fn request_repaint(&self) {
        self.send(CanvasEvent::Repaint);
    }

    fn finish(&self) {
        self.send(CanvasEvent::Finished);
    }
}

/// Uniform scale and centring offsets that fit the canvas into a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub off_x: f32,
    pub off_y: f32,
}

impl Letterbox {
    pub fn fit(win_w: f32, win_h: f32) -> Self {
        let scale = (win_w / CANVAS_WIDTH).min(win_h / CANVAS_HEIGHT).max(0.0);
        Self {
            scale,
            off_x: (win_w - CANVAS_WIDTH * scale) / 2.0,
            off_y: (win_h - CANVAS_HEIGHT * scale) / 2.0,
        }
    }

    /// Window pixel to canvas coordinates.
    pub fn to_logical(&self, physical_x: f32, physical_y: f32) -> (f32, f32) {
        if self.scale == 0.0 {
            return (0.0, 0.0);
        }
        ((physical_x - self.off_x) / self.scale, (physical_y - self.off_y) / self.scale)
    }
}

/// Packs BGRA8888 bytes into the 0RGB words softbuffer presents.
pub fn pack_bgra(src: &[u8], dst: &mut [u32]) {
    for (px, out) in src.chunks_exact(4).zip(dst.iter_mut()) {
        *out = (u32::from(px[2]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[0]);
    }
}

struct Presenter {
    window: Arc<Window>,
    target: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    raster: skia_safe::Surface,
    pixels: Vec<u8>,
}

impl Presenter {
    fn new(window: Arc<Window>) -> Result<Self> {
        let context = softbuffer::Context::new(window.clone()).map_err(|e| anyhow::anyhow!("{e}"))?;
        let target = softbuffer::Surface::new(&context, window.clone()).map_err(|e| anyhow::anyhow!("{e}"))?;
        let size = window.inner_size();
        let raster = Self::raster(size.width, size.height)?;
        let mut presenter = Self { window, target, raster, pixels: Vec::new() };
        presenter.resize(size.width, size.height)?;
        Ok(presenter)
    }

    fn raster(width: u32, height: u32) -> Result<skia_safe::Surface> {
        surfaces::raster_n32_premul((width.max(1) as i32, height.max(1) as i32))
            .context("Failed to create raster surface")
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        self.target.resize(w, h).map_err(|e| anyhow::anyhow!("{e}"))?;
        if self.raster.width() != width as i32 || self.raster.height() != height as i32 {
            self.raster = Self::raster(width, height)?;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let (width, height) = (self.raster.width(), self.raster.height());
        let info = ImageInfo::new((width, height), ColorType::BGRA8888, AlphaType::Premul, None);
        let row_bytes = width as usize * 4;
        self.pixels.resize(row_bytes * height as usize, 0);
        if !self.raster.read_pixels(&info, &mut self.pixels, row_bytes, (0, 0)) {
            anyhow::bail!("Failed to read back the raster surface");
        }

        let mut buffer = self.target.buffer_mut().map_err(|e| anyhow::anyhow!("{e}"))?;
        pack_bgra(&self.pixels, &mut buffer);
        buffer.present().map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(())
    }
}

/// The window: paints the installed scene and feeds clicks back to it.
pub struct SkiaRenderer {
    config: WindowConfig,
    presenter: Option<Presenter>,
    assets: AssetManager,
    painter: Painter,
    scene: Option<Arc<Scene>>,
    installed: Arc<Installed>,

    ui_ctx: UiContext,
    physical_cursor_pos: (f32, f32),
}

impl SkiaRenderer {
    pub fn new(config: WindowConfig, assets_dir: impl AsRef<Path>, canvas: &SkiaCanvas) -> Self {
        Self {
            painter: Painter::new(&config),
            config,
            presenter: None,
            assets: AssetManager::new(assets_dir),
            scene: None,
            installed: Arc::clone(&canvas.installed),
            ui_ctx: UiContext::new(),
            physical_cursor_pos: (0.0, 0.0),
        }
    }

    /// Blocks until the window closes or the driver finishes.
    pub fn run(mut self, event_loop: EventLoop<CanvasEvent>) -> Result<()> {
        event_loop.run_app(&mut self).context("Event loop failed")
    }

    fn request_redraw(&self) {
        if let Some(presenter) = &self.presenter {
            presenter.window.request_redraw();
        }
    }

    fn letterbox(&self) -> Letterbox {
        match &self.presenter {
            Some(p) => {
                let size = p.window.inner_size();
                Letterbox::fit(size.width as f32, size.height as f32)
            }
            None => Letterbox::fit(CANVAS_WIDTH, CANVAS_HEIGHT),
        }
    }

    fn update_cursor(&mut self) {
        let (x, y) = self.letterbox().to_logical(self.physical_cursor_pos.0, self.physical_cursor_pos.1);
        self.ui_ctx.move_to(x, y);
    }

    fn redraw(&mut self) -> Result<()> {
        let view = self.letterbox();
        let Some(presenter) = self.presenter.as_mut() else { return Ok(()) };

        let canvas = presenter.raster.canvas();
        canvas.clear(skia_safe::Color::BLACK);

        let mut clicked = None;
        if let Some(scene) = &self.scene {
            let snap = scene.snapshot();
            canvas.save();
            canvas.translate((view.off_x, view.off_y));
            canvas.scale((view.scale, view.scale));
            canvas.clip_rect(SkRect::from_wh(CANVAS_WIDTH, CANVAS_HEIGHT), None, None);
            clicked = self.painter.paint(canvas, &snap, &self.assets, &self.ui_ctx);
            canvas.restore();
        }
        self.ui_ctx.end_frame();

        presenter.present()?;

        if let (Some(target), Some(scene)) = (clicked, &self.scene) {
            if !scene.set_result(i64::from(target)) {
                debug!("click on {} arrived after its buttons were removed", target);
            }
        }
        Ok(())
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.installed.close();
        if let Some(scene) = &self.scene {
            scene.close();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler<CanvasEvent> for SkiaRenderer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() {
            return;
        }
        let (w, h) = self.config.window_size();
        let window_attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(w, h))
            .with_resizable(self.config.resizable);

        let presenter = event_loop
            .create_window(window_attributes)
            .context("Failed to create window")
            .and_then(|window| Presenter::new(Arc::new(window)));
        match presenter {
            Ok(p) => {
                p.window.request_redraw();
                self.presenter = Some(p);
            }
            Err(e) => {
                log::error!("Cannot open the window: {:#}", e);
                self.close(event_loop);
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: CanvasEvent) {
        match event {
            CanvasEvent::Install(scene) => {
                if let Some(p) = &self.presenter {
                    p.window.set_title(&format!("{} - scene {}", self.config.title, scene.id()));
                }
                self.scene = Some(scene);
                self.request_redraw();
            }
            CanvasEvent::Repaint => self.request_redraw(),
            CanvasEvent::Finished => {
                debug!("driver finished, closing window");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(p) = self.presenter.as_mut() {
                    if let Err(e) = p.resize(size.width, size.height) {
                        warn!("resize failed: {:#}", e);
                    }
                }
                self.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.physical_cursor_pos = (position.x as f32, position.y as f32);
                self.update_cursor();
                self.request_redraw();
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.update_cursor();
                match state {
                    ElementState::Pressed => self.ui_ctx.press(),
                    ElementState::Released => self.ui_ctx.release(),
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    log::error!("Failed to present frame: {:#}", e);
                    self.close(event_loop);
                }
            }
            _ => {}
        }
    }
}
