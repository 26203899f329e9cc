//! Actor Model: the three lanes that pace the render loop.
//!
//! This module implements the pacing machinery using crossbeam channels:
//! - **Ticker Actor**: posts `Continue` at the target frame rate
//! - **Interrupt Actor**: posts a single `Stop` on operator interrupt
//! - **Frame Mailbox**: single-slot handoff that coalesces backlog
//!
//! The render lane itself is the [`Controller`](crate::Controller), which
//! runs on the thread that owns the graphics context.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  Continue
//! │ Ticker Thread│ ──────────┐
//! └──────────────┘           ▼
//!                      ┌─────────────┐   wait()   ┌──────────────┐
//!                      │Frame Mailbox│ ─────────▶ │  Controller  │
//!                      └─────────────┘            │ (main thread)│
//! ┌──────────────┐           ▲                    └──────────────┘
//! │  Interrupt   │ ──────────┘                           │
//! │    Thread    │   Stop                                │ draw / present
//! └──────────────┘                                       ▼
//!                                                 ┌──────────────┐
//!                                                 │   Platform   │
//!                                                 └──────────────┘
//! ```

mod interrupt;
pub mod mailbox;
mod messages;
mod ticker;

pub use interrupt::{os_interrupts, InterruptMonitor};
pub use mailbox::{FrameMailbox, MailboxClosed, MailboxSender};
pub use messages::PacingSignal;
pub use ticker::{frame_interval, TickerActor};
