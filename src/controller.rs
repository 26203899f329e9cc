//! Controller: the lifecycle state machine and the render loop.
//!
//! The controller owns the context and the scene from acquisition to
//! teardown. It is deliberately `!Send`: native drivers require every
//! context-bound call to come from the thread that created the context, so
//! the controller is built, run and dropped on one thread.
//!
//! ```text
//! Uninitialized ──acquire──▶ ContextReady ──scene──▶ SceneReady
//!                                                        │ run
//!                                                        ▼
//!                  Terminated ◀──teardown── Stopping ◀── Running
//! ```

use crate::actor::{FrameMailbox, InterruptMonitor, MailboxSender, PacingSignal, TickerActor};
use crate::error::Error;
use crate::gpu::Gpu;
use crate::platform::{Platform, SurfaceSize};
use crate::scene::{QuadScene, SceneConfig};
use crate::time::{Clock, MonotonicClock};
use crossbeam_channel::Receiver;
use std::marker::PhantomData;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Nothing acquired yet.
    Uninitialized,
    /// Context and surface are live.
    ContextReady,
    /// Scene resources are uploaded.
    SceneReady,
    /// The steady-state loop is running.
    Running,
    /// The loop has ended; teardown pending or in progress.
    Stopping,
    /// Everything released.
    Terminated,
}

/// Configuration for the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Target frames per second.
    pub frame_rate: u32,
    /// Extension functions that must resolve on the context.
    pub required_extensions: Vec<String>,
    /// Scene parameters.
    pub scene: SceneConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            required_extensions: Vec::new(),
            scene: SceneConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Reject configurations the loop cannot honor.
    pub fn validate(&self) -> Result<(), Error> {
        if self.frame_rate == 0 {
            return Err(Error::InvalidConfig("frame rate must be positive".to_string()));
        }
        let scene = &self.scene;
        if !(scene.near > 0.0 && scene.far > scene.near) {
            return Err(Error::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got {} / {}",
                scene.near, scene.far
            )));
        }
        Ok(())
    }

    /// Interval between ticks.
    pub fn frame_interval(&self) -> Duration {
        crate::actor::frame_interval(self.frame_rate)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames rendered and presented.
    pub frames: u64,
    /// Wall time spent in the loop.
    pub elapsed: Duration,
}

/// The render lane.
pub struct Controller<P: Platform + Gpu> {
    platform: P,
    context: Option<P::Context>,
    scene: Option<QuadScene>,
    config: ControllerConfig,
    clock: Arc<dyn Clock>,
    /// Animation origin.
    start: Instant,
    state: LifecycleState,
    frames: u64,
    owner: ThreadId,
    /// Pins the controller to the thread that created the context.
    _not_send: PhantomData<*const ()>,
}

impl<P: Platform + Gpu> Controller<P> {
    /// Bring up context and scene using the system clock.
    pub fn new(platform: P, config: ControllerConfig) -> Result<Self, Error> {
        Self::with_clock(platform, config, Arc::new(MonotonicClock))
    }

    /// Bring up context and scene with an explicit animation clock.
    ///
    /// Performs `Uninitialized → ContextReady → SceneReady`. If context
    /// acquisition fails nothing is released; any later failure releases
    /// the context before returning.
    pub fn with_clock(
        mut platform: P,
        config: ControllerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        config.validate()?;

        log::info!("create context..");
        let context = platform.acquire_context().map_err(Error::ContextAcquire)?;

        let start = clock.now();
        let mut controller = Self {
            platform,
            context: Some(context),
            scene: None,
            config,
            clock,
            start,
            state: LifecycleState::Uninitialized,
            frames: 0,
            owner: thread::current().id(),
            _not_send: PhantomData,
        };
        controller.transition(LifecycleState::ContextReady);

        // From here on an early return drops the controller, which releases
        // the context exactly once.
        let size = controller.bind_context()?;
        controller.init_scene(size)?;
        Ok(controller)
    }

    fn bind_context(&mut self) -> Result<SurfaceSize, Error> {
        let context = self
            .context
            .as_ref()
            .ok_or(Error::InvalidState(self.state))?;
        self.platform
            .bind_current(context)
            .map_err(Error::BindCurrent)?;

        let size = self.platform.surface_size(context);
        log::info!("display: {size}");
        let info = self.platform.renderer_info(context);
        log::info!("renderer: {} {}", info.vendor, info.renderer);
        log::info!("version: {} / {}", info.version, info.shading_language);

        for name in &self.config.required_extensions {
            match self.platform.resolve_extension(name) {
                Some(function) => log::debug!("extension {name} at {:p}", function.as_ptr()),
                None => return Err(Error::MissingExtension(name.clone())),
            }
        }
        Ok(size)
    }

    fn init_scene(&mut self, size: SurfaceSize) -> Result<(), Error> {
        log::info!("init scene..");
        let scene = QuadScene::init(&mut self.platform, size, &self.config.scene)?;
        self.scene = Some(scene);
        self.start = self.clock.now();
        self.transition(LifecycleState::SceneReady);
        Ok(())
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Frames rendered so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The configuration in use.
    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The platform, for inspection.
    pub const fn platform(&self) -> &P {
        &self.platform
    }

    /// Run the steady-state loop until the mailbox yields `Stop`.
    ///
    /// Every frame is gated by one `wait()`; a `Stop` that is already
    /// pending means no frame is drawn at all. A draw or present failure
    /// ends the loop with that error; teardown is still owed.
    pub fn run(&mut self, mailbox: &FrameMailbox) -> Result<RunSummary, Error> {
        debug_assert_eq!(thread::current().id(), self.owner);
        if self.state != LifecycleState::SceneReady {
            return Err(Error::InvalidState(self.state));
        }

        self.transition(LifecycleState::Running);
        log::info!("start draw..");
        let started = Instant::now();
        let first_frame = self.frames;

        while mailbox.wait() == PacingSignal::Continue {
            if let Err(err) = self.frame() {
                self.transition(LifecycleState::Stopping);
                return Err(err);
            }
        }

        self.transition(LifecycleState::Stopping);
        Ok(RunSummary {
            frames: self.frames - first_frame,
            elapsed: started.elapsed(),
        })
    }

    /// Start a ticker at the configured rate on `sender` and run.
    ///
    /// The ticker is stopped again when the loop ends.
    pub fn run_paced(
        &mut self,
        mailbox: &FrameMailbox,
        sender: MailboxSender,
    ) -> Result<RunSummary, Error> {
        let ticker = TickerActor::with_frame_rate(sender, self.config.frame_rate)
            .map_err(|source| Error::Spawn {
                lane: "ticker",
                source,
            })?;
        log::debug!("ticker at {:?} per frame", ticker.interval());

        let result = self.run(mailbox);
        ticker.join();
        result
    }

    /// One update, draw, present cycle.
    fn frame(&mut self) -> Result<(), Error> {
        let elapsed = self.clock.now().saturating_duration_since(self.start);
        let (Some(context), Some(scene)) = (self.context.as_ref(), self.scene.as_mut()) else {
            return Err(Error::InvalidState(self.state));
        };

        scene.update(&mut self.platform, elapsed)?;
        scene.draw(&mut self.platform)?;
        self.platform.present(context).map_err(Error::Present)?;

        self.frames += 1;
        log::trace!("frame {} at {:.1}ms", self.frames, elapsed.as_secs_f64() * 1e3);
        Ok(())
    }

    /// Tear down scene and context and enter `Terminated`.
    ///
    /// Cleanup is best-effort: a failing scene release does not prevent the
    /// context release. The first failure is returned.
    pub fn shutdown(mut self) -> Result<(), Error> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<(), Error> {
        debug_assert_eq!(thread::current().id(), self.owner);
        if self.state == LifecycleState::Terminated {
            return Ok(());
        }
        if self.state != LifecycleState::Stopping {
            self.transition(LifecycleState::Stopping);
        }

        let mut result = Ok(());
        if let Some(scene) = self.scene.take() {
            if let Err(err) = scene.release(&mut self.platform) {
                log::warn!("{err}; releasing context anyway");
                result = Err(err);
            }
        }
        if let Some(context) = self.context.take() {
            log::info!("destroy context..");
            if let Err(err) = self.platform.release_context(context) {
                if result.is_ok() {
                    result = Err(Error::ContextTeardown(err));
                } else {
                    log::warn!("{}", Error::ContextTeardown(err));
                }
            }
        }

        self.transition(LifecycleState::Terminated);
        result
    }

    fn transition(&mut self, next: LifecycleState) {
        log::debug!("lifecycle: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl<P: Platform + Gpu> Drop for Controller<P> {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            log::error!("{err}");
        }
    }
}

/// Drive one complete run on the calling thread.
///
/// Arms the interrupt monitor on `interrupts` before anything else so an
/// early request is never lost, brings up the controller, renders at the
/// configured rate until stopped, then tears down. Teardown failures are
/// reported but do not turn a clean stop into an error.
pub fn run<P: Platform + Gpu>(
    platform: P,
    config: ControllerConfig,
    interrupts: Receiver<()>,
) -> Result<RunSummary, Error> {
    let (sender, mailbox) = crate::actor::mailbox::channel();
    let _monitor = InterruptMonitor::arm(sender.clone(), interrupts).map_err(|source| {
        Error::Spawn {
            lane: "interrupt",
            source,
        }
    })?;

    let mut controller = Controller::new(platform, config)?;
    let summary = controller.run_paced(&mailbox, sender)?;

    if let Err(err) = controller.shutdown() {
        log::error!("{err}");
    }
    Ok(summary)
}
