use std::path::PathBuf;
use std::time::Instant;

use nebula_core::{AnimationLoop, Lifecycle, Raster, Scheduler, Viewport};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

mod present;
mod settings;

use present::GpuState;

/// Frames map onto `request_redraw`; winit has no way to retract one, so a
/// cancelled token is simply forgotten and the next redraw only re-presents.
struct WindowScheduler<'w> {
    window: &'w Window,
    listening: bool,
    next_token: u64,
    pending: Option<u64>,
}

impl<'w> WindowScheduler<'w> {
    fn new(window: &'w Window) -> Self {
        Self {
            window,
            listening: false,
            next_token: 0,
            pending: None,
        }
    }
}

impl Scheduler for WindowScheduler<'_> {
    type FrameToken = u64;
    type ListenerToken = ();

    fn attach_resize(&mut self) -> nebula_core::Result<()> {
        self.listening = true;
        Ok(())
    }

    fn detach_resize(&mut self, _token: ()) {
        self.listening = false;
    }

    fn request_frame(&mut self) -> nebula_core::Result<u64> {
        self.next_token += 1;
        self.pending = Some(self.next_token);
        self.window.request_redraw();
        Ok(self.next_token)
    }

    fn cancel_frame(&mut self, token: u64) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let seed = std::env::var(settings::SEED_ENV).ok();
    let config = settings::load(config_path.as_deref(), seed.as_deref())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Nebula (native)")
        .with_inner_size(LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    let size = window.inner_size();
    let (rw, rh) = settings::raster_size(size.width, size.height);
    let mut raster = Raster::new(rw, rh);
    let mut anim = AnimationLoop::mount(WindowScheduler::new(&window), config, Viewport::new(rw, rh))?;
    anim.start()?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            gpu.resize(size);
            if anim.scheduler().listening {
                let (w, h) = settings::raster_size(size.width, size.height);
                anim.on_resize(w, h, &mut raster);
            }
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        }
        | Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(NamedKey::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if anim.state() != Lifecycle::Unmounted {
                if let Err(e) = anim.dispose() {
                    log::warn!("dispose: {e}");
                }
            }
            elwt.exit();
        }
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => {
            if anim.scheduler().pending.is_some() {
                if let Err(e) = anim.on_frame(Instant::now(), &mut raster) {
                    log::error!("frame error: {e}");
                    elwt.exit();
                    return;
                }
            }
            match gpu.render(&raster) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
