//! # Frameloop
//!
//! A fixed-rate fullscreen render loop for single-display embedded devices.
//!
//! Frameloop brings up a hardware rendering context on the attached display,
//! redraws a scene at a fixed target rate, and tears the context down cleanly
//! when the operator interrupts it.
//!
//! ## Core Concepts
//!
//! - **Frame mailbox**: single-slot handoff that coalesces late ticks, so a
//!   slow frame never builds up a backlog
//! - **Sticky stop**: once a stop is posted, no later tick revives the loop
//! - **Actor lanes**: ticker and interrupt monitor run on their own threads;
//!   only the mailbox is shared
//! - **Pinned context**: the controller is `!Send`, so every driver call
//!   comes from the thread that created the context
//!
//! ## Example
//!
//! ```rust,no_run
//! use frameloop::{actor, Controller, ControllerConfig, HeadlessPlatform};
//!
//! let (sender, mailbox) = actor::mailbox::channel();
//! let mut controller = Controller::new(HeadlessPlatform::default(), ControllerConfig::default())?;
//! let summary = controller.run_paced(&mailbox, sender)?;
//! controller.shutdown()?;
//! println!("{} frames", summary.frames);
//! # Ok::<(), frameloop::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod controller;
pub mod error;
pub mod gpu;
pub mod logging;
pub mod platform;
pub mod scene;
pub mod time;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use actor::{FrameMailbox, InterruptMonitor, MailboxSender, PacingSignal, TickerActor};
pub use controller::{run, Controller, ControllerConfig, LifecycleState, RunSummary};
pub use error::{Error, GpuError, PlatformError, SceneResource};
pub use gpu::{GlError, Gpu};
pub use logging::{init_logging, LoggingConfig};
pub use platform::{HeadlessPlatform, Platform, SurfaceSize};
pub use scene::{QuadScene, SceneConfig};
pub use time::{Clock, ManualClock, MonotonicClock};
