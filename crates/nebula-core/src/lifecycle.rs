//! Mount/start/stop/dispose state machine and the frame driver.
//!
//! `Unmounted -> Initialized -> Running -> Stopped -> Unmounted`; `Stopped` is
//! terminal for a mount instance. The host side (request/cancel a frame,
//! attach/detach a resize listener) sits behind [`Scheduler`].

use crate::clock::FrameClock;
use crate::config::NebulaConfig;
use crate::error::{NebulaError, Result};
use crate::scene::NebulaScene;
use crate::surface::Surface;
use crate::viewport::{ResizeOutcome, Viewport};
use instant::Instant;
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Unmounted,
    Initialized,
    Running,
    Stopped,
}

/// Host facilities for per-frame callbacks and resize notifications.
pub trait Scheduler {
    type FrameToken;
    type ListenerToken;

    fn attach_resize(&mut self) -> Result<Self::ListenerToken>;
    fn detach_resize(&mut self, token: Self::ListenerToken);
    fn request_frame(&mut self) -> Result<Self::FrameToken>;
    fn cancel_frame(&mut self, token: Self::FrameToken);
}

// Held as one value so teardown releases both registrations or neither.
struct Registrations<S: Scheduler> {
    listener: S::ListenerToken,
    frame: Option<S::FrameToken>,
}

pub struct AnimationLoop<S: Scheduler, R = StdRng> {
    scheduler: S,
    scene: Option<NebulaScene<R>>,
    clock: FrameClock,
    state: Lifecycle,
    registrations: Option<Registrations<S>>,
}

impl<S: Scheduler> AnimationLoop<S, StdRng> {
    /// Seed a scene for `viewport` and attach the resize listener.
    pub fn mount(scheduler: S, config: NebulaConfig, viewport: Viewport) -> Result<Self> {
        let scene = NebulaScene::new(config, viewport)?;
        Self::mount_scene(scheduler, scene)
    }
}

impl<S: Scheduler, R: Rng> AnimationLoop<S, R> {
    /// Mount around an already-built scene (e.g. one with an injected random source).
    pub fn mount_scene(mut scheduler: S, scene: NebulaScene<R>) -> Result<Self> {
        let listener = scheduler.attach_resize()?;
        let clock = FrameClock::new(scene.config().pacing);
        let vp = scene.viewport();
        log::info!("[loop] mounted {}x{}", vp.width, vp.height);
        Ok(Self {
            scheduler,
            scene: Some(scene),
            clock,
            state: Lifecycle::Initialized,
            registrations: Some(Registrations {
                listener,
                frame: None,
            }),
        })
    }

    #[inline]
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    #[inline]
    pub fn scene(&self) -> Option<&NebulaScene<R>> {
        self.scene.as_ref()
    }

    #[inline]
    pub fn scene_mut(&mut self) -> Option<&mut NebulaScene<R>> {
        self.scene.as_mut()
    }

    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// True while a resize listener (and possibly a frame) is registered.
    #[inline]
    pub fn has_registrations(&self) -> bool {
        self.registrations.is_some()
    }

    pub fn start(&mut self) -> Result<()> {
        self.transition(Lifecycle::Running, &[Lifecycle::Initialized])?;
        let token = self.scheduler.request_frame()?;
        if let Some(reg) = self.registrations.as_mut() {
            reg.frame = Some(token);
        }
        self.clock.reset();
        self.state = Lifecycle::Running;
        log::info!("[loop] running");
        Ok(())
    }

    /// Frame callback: advance, draw, schedule the next frame. A no-op unless running.
    pub fn on_frame<T: Surface + ?Sized>(&mut self, now: Instant, surface: &mut T) -> Result<()> {
        if self.state != Lifecycle::Running {
            return Ok(());
        }
        // The token that fired this callback is spent.
        if let Some(reg) = self.registrations.as_mut() {
            reg.frame = None;
        }
        let dt_units = self.clock.tick(now);
        if let Some(scene) = self.scene.as_mut() {
            scene.advance(dt_units);
            scene.draw(surface);
        }
        // Without a next frame the loop is dead; release everything rather than report Running.
        let token = match self.scheduler.request_frame() {
            Ok(token) => token,
            Err(e) => {
                self.release();
                self.state = Lifecycle::Stopped;
                log::warn!("[loop] stopped: {e}");
                return Err(e);
            }
        };
        if let Some(reg) = self.registrations.as_mut() {
            reg.frame = Some(token);
        }
        Ok(())
    }

    /// Resize notification; ignored once stopped.
    pub fn on_resize<T: Surface + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        surface: &mut T,
    ) -> ResizeOutcome {
        match (self.state, self.scene.as_mut()) {
            (Lifecycle::Initialized | Lifecycle::Running, Some(scene)) => {
                scene.resize(width, height, surface)
            }
            _ => ResizeOutcome::Ignored,
        }
    }

    /// Cancel the pending frame and detach the resize listener together.
    pub fn stop(&mut self) -> Result<()> {
        self.transition(
            Lifecycle::Stopped,
            &[Lifecycle::Initialized, Lifecycle::Running],
        )?;
        self.release();
        self.state = Lifecycle::Stopped;
        log::info!("[loop] stopped");
        Ok(())
    }

    /// Tear down: stops first if still active, then drops the scene.
    pub fn dispose(&mut self) -> Result<()> {
        if matches!(self.state, Lifecycle::Initialized | Lifecycle::Running) {
            self.stop()?;
        }
        self.transition(Lifecycle::Unmounted, &[Lifecycle::Stopped])?;
        self.scene = None;
        self.state = Lifecycle::Unmounted;
        log::info!("[loop] disposed");
        Ok(())
    }

    // Cancel the pending frame and detach the listener together.
    fn release(&mut self) {
        if let Some(reg) = self.registrations.take() {
            if let Some(frame) = reg.frame {
                self.scheduler.cancel_frame(frame);
            }
            self.scheduler.detach_resize(reg.listener);
        }
    }

    fn transition(&self, to: Lifecycle, allowed_from: &[Lifecycle]) -> Result<()> {
        if allowed_from.contains(&self.state) {
            Ok(())
        } else {
            Err(NebulaError::InvalidTransition {
                from: self.state,
                to,
            })
        }
    }
}
