// Mount/start/stop/dispose transitions and registration bookkeeping.

use instant::Instant;
use nebula_core::{
    AnimationLoop, FramePacing, Lifecycle, NebulaConfig, NebulaError, NebulaScene, Raster,
    ResizeOutcome, ResizePolicy, Scheduler, Surface, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[derive(Default)]
struct FakeScheduler {
    next_token: u32,
    pending_frames: Vec<u32>,
    listeners: Vec<u32>,
    requested: usize,
    fail_attach: bool,
    fail_request: bool,
}

impl Scheduler for FakeScheduler {
    type FrameToken = u32;
    type ListenerToken = u32;

    fn attach_resize(&mut self) -> nebula_core::Result<u32> {
        if self.fail_attach {
            return Err(NebulaError::Scheduler("no window".into()));
        }
        self.next_token += 1;
        self.listeners.push(self.next_token);
        Ok(self.next_token)
    }

    fn detach_resize(&mut self, token: u32) {
        self.listeners.retain(|t| *t != token);
    }

    fn request_frame(&mut self) -> nebula_core::Result<u32> {
        if self.fail_request {
            return Err(NebulaError::Scheduler("raf unavailable".into()));
        }
        self.next_token += 1;
        self.requested += 1;
        self.pending_frames.push(self.next_token);
        Ok(self.next_token)
    }

    fn cancel_frame(&mut self, token: u32) {
        self.pending_frames.retain(|t| *t != token);
    }
}

fn config() -> NebulaConfig {
    NebulaConfig {
        seed: Some(17),
        ..NebulaConfig::default()
    }
}

fn mounted() -> AnimationLoop<FakeScheduler> {
    AnimationLoop::mount(FakeScheduler::default(), config(), Viewport::new(120, 80)).unwrap()
}

#[test]
fn mount_attaches_listener_and_seeds_scene() {
    let anim = mounted();
    assert_eq!(anim.state(), Lifecycle::Initialized);
    assert_eq!(anim.scheduler().listeners.len(), 1);
    assert!(anim.scheduler().pending_frames.is_empty());
    let scene = anim.scene().unwrap();
    assert_eq!(scene.field().stars.len(), 300);
    assert_eq!(scene.field().mists.len(), 20);
}

#[test]
fn mount_fails_cleanly_when_listener_cannot_attach() {
    let scheduler = FakeScheduler {
        fail_attach: true,
        ..FakeScheduler::default()
    };
    let err = AnimationLoop::mount(scheduler, config(), Viewport::new(10, 10));
    assert!(matches!(err, Err(NebulaError::Scheduler(_))));
}

#[test]
fn mount_rejects_invalid_config() {
    let bad = NebulaConfig {
        star_count: 0,
        ..config()
    };
    let err = AnimationLoop::mount(FakeScheduler::default(), bad, Viewport::new(10, 10));
    assert!(matches!(err, Err(NebulaError::InvalidConfig(_))));
}

#[test]
fn running_loop_schedules_one_frame_at_a_time() {
    let mut anim = mounted();
    let mut raster = Raster::new(120, 80);
    anim.start().unwrap();
    assert_eq!(anim.state(), Lifecycle::Running);
    assert_eq!(anim.scheduler().pending_frames.len(), 1);

    let t0 = Instant::now();
    for k in 0..5 {
        anim.on_frame(t0 + Duration::from_millis(16 * k), &mut raster)
            .unwrap();
    }
    assert_eq!(anim.scheduler().requested, 6);
    assert!((anim.scene().unwrap().time() - 0.05).abs() < 1e-5);
    // frames were actually drawn
    assert_eq!(raster.pixel_rgba8(0, 0).map(|p| p[3]), Some(255));
}

#[test]
fn stop_releases_frame_and_listener_together() {
    let mut anim = mounted();
    anim.start().unwrap();
    assert!(anim.has_registrations());
    anim.stop().unwrap();
    assert_eq!(anim.state(), Lifecycle::Stopped);
    assert!(!anim.has_registrations());
    assert!(anim.scheduler().pending_frames.is_empty());
    assert!(anim.scheduler().listeners.is_empty());
}

#[test]
fn stop_before_start_detaches_listener() {
    let mut anim = mounted();
    anim.stop().unwrap();
    assert!(anim.scheduler().listeners.is_empty());
}

#[test]
fn stopped_is_terminal() {
    let mut anim = mounted();
    anim.start().unwrap();
    anim.stop().unwrap();
    assert!(matches!(
        anim.start(),
        Err(NebulaError::InvalidTransition {
            from: Lifecycle::Stopped,
            to: Lifecycle::Running
        })
    ));
    assert!(anim.stop().is_err());
}

#[test]
fn start_twice_is_rejected() {
    let mut anim = mounted();
    anim.start().unwrap();
    assert!(anim.start().is_err());
    assert_eq!(anim.scheduler().pending_frames.len(), 1);
}

#[test]
fn failed_start_leaves_loop_initialized() {
    let scheduler = FakeScheduler {
        fail_request: true,
        ..FakeScheduler::default()
    };
    let mut anim = AnimationLoop::mount(scheduler, config(), Viewport::new(10, 10)).unwrap();
    assert!(anim.start().is_err());
    assert_eq!(anim.state(), Lifecycle::Initialized);
}

#[test]
fn lost_frame_request_stops_the_loop() {
    let mut anim = mounted();
    let mut raster = Raster::new(120, 80);
    anim.start().unwrap();
    anim.scheduler_mut().fail_request = true;

    let err = anim.on_frame(Instant::now(), &mut raster).unwrap_err();
    assert!(matches!(err, NebulaError::Scheduler(_)));
    assert_eq!(anim.state(), Lifecycle::Stopped);
    assert!(!anim.has_registrations());
    assert!(anim.scheduler().listeners.is_empty());

    // the dead loop can still be disposed
    anim.dispose().unwrap();
    assert_eq!(anim.state(), Lifecycle::Unmounted);
}

#[test]
fn frames_after_stop_do_nothing() {
    let mut anim = mounted();
    let mut raster = Raster::new(120, 80);
    anim.start().unwrap();
    anim.stop().unwrap();
    anim.on_frame(Instant::now(), &mut raster).unwrap();
    assert_eq!(anim.scene().unwrap().time(), 0.0);
    assert_eq!(raster.pixel_rgba8(0, 0), Some([0, 0, 0, 0]));
    assert!(anim.scheduler().pending_frames.is_empty());
}

#[test]
fn dispose_from_running_stops_then_unmounts() {
    let mut anim = mounted();
    anim.start().unwrap();
    anim.dispose().unwrap();
    assert_eq!(anim.state(), Lifecycle::Unmounted);
    assert!(anim.scene().is_none());
    assert!(anim.scheduler().listeners.is_empty());
    assert!(anim.scheduler().pending_frames.is_empty());
    assert!(anim.dispose().is_err());
}

#[test]
fn resize_retains_positions_by_default() {
    let mut anim = mounted();
    let mut raster = Raster::new(120, 80);
    let before = anim.scene().unwrap().field().clone();
    let outcome = anim.on_resize(300, 200, &mut raster);
    assert_eq!(outcome, ResizeOutcome::Retained);
    assert_eq!(raster.size(), (300, 200));
    assert_eq!(anim.scene().unwrap().viewport(), Viewport::new(300, 200));
    assert_eq!(anim.scene().unwrap().field(), &before);
}

#[test]
fn zero_sized_resize_is_ignored() {
    let mut anim = mounted();
    let mut raster = Raster::new(120, 80);
    assert_eq!(anim.on_resize(0, 50, &mut raster), ResizeOutcome::Ignored);
    assert_eq!(raster.size(), (120, 80));
}

#[test]
fn reseed_policy_reinitializes_for_new_size() {
    let config = NebulaConfig {
        resize_policy: ResizePolicy::Reseed,
        ..config()
    };
    let scene =
        NebulaScene::with_rng(config, Viewport::new(120, 80), StdRng::seed_from_u64(4)).unwrap();
    let mut anim = AnimationLoop::mount_scene(FakeScheduler::default(), scene).unwrap();
    let mut raster = Raster::new(120, 80);
    let before = anim.scene().unwrap().field().clone();

    assert_eq!(anim.on_resize(2000, 1000, &mut raster), ResizeOutcome::Reseed);
    let field = anim.scene().unwrap().field();
    assert_ne!(field, &before);
    assert_eq!(field.stars.len(), 300);
    assert!(field.mists.iter().all(|m| m.radius >= 500.0));
}

#[test]
fn resize_after_stop_is_ignored() {
    let mut anim = mounted();
    let mut raster = Raster::new(120, 80);
    anim.stop().unwrap();
    assert_eq!(anim.on_resize(300, 200, &mut raster), ResizeOutcome::Ignored);
    assert_eq!(raster.size(), (120, 80));
}

#[test]
fn elapsed_pacing_follows_wall_clock_with_cap() {
    let config = NebulaConfig {
        pacing: FramePacing::Elapsed { max_units: 4.0 },
        ..config()
    };
    let mut anim =
        AnimationLoop::mount(FakeScheduler::default(), config, Viewport::new(40, 30)).unwrap();
    let mut raster = Raster::new(40, 30);
    anim.start().unwrap();
    let t0 = Instant::now();
    anim.on_frame(t0, &mut raster).unwrap(); // first frame: 1 unit
    anim.on_frame(t0 + Duration::from_millis(50), &mut raster)
        .unwrap(); // 3 units
    anim.on_frame(t0 + Duration::from_secs(10), &mut raster)
        .unwrap(); // capped at 4
    let t = anim.scene().unwrap().time();
    assert!((t - 0.08).abs() < 1e-4, "t = {t}");
}
