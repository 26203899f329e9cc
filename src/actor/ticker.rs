//! Ticker Actor: Dedicated thread for generating frame pacing signals.
//!
//! This actor posts a `Continue` into the frame mailbox at a fixed rate.
//! It never reads the mailbox and never waits on the render lane: a tick
//! that finds the slot occupied is simply coalesced.

use super::mailbox::MailboxSender;
use super::messages::PacingSignal;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Ticker actor that generates regular pacing signals.
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Ticks posted so far.
    ticks: Arc<AtomicU64>,
    interval: Duration,
}

impl TickerActor {
    /// Spawn a new ticker actor posting into `sender` every `interval`.
    ///
    /// The first tick is posted immediately, so the first frame does not
    /// wait a full interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the ticker thread.
    pub fn spawn(sender: MailboxSender, interval: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let ticks = Arc::new(AtomicU64::new(0));
        let ticks_clone = ticks.clone();

        let handle = thread::Builder::new()
            .name("frameloop-ticker".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, &ticks_clone, interval);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            ticks,
            interval,
        })
    }

    /// Spawn a ticker for a target frame rate (frames per second, > 0).
    pub fn with_frame_rate(sender: MailboxSender, frame_rate: u32) -> io::Result<Self> {
        Self::spawn(sender, frame_interval(frame_rate))
    }

    /// Interval between ticks.
    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks posted so far (coalesced ones included).
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main ticker loop.
    fn run_loop(
        sender: &MailboxSender,
        shutdown: &Arc<AtomicBool>,
        ticks: &Arc<AtomicU64>,
        interval: Duration,
    ) {
        let mut next_tick = Instant::now();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                if sender.post(PacingSignal::Continue).is_err() {
                    log::debug!("ticker: mailbox closed, exiting");
                    break;
                }
                ticks.fetch_add(1, Ordering::Relaxed);

                next_tick += interval;

                // Behind schedule: realign instead of bursting to catch up
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                thread::sleep(next_tick - now);
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Tick interval for a frame rate in frames per second.
///
/// A zero rate is treated as one frame per second.
pub fn frame_interval(frame_rate: u32) -> Duration {
    Duration::from_secs(1) / frame_rate.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::mailbox;

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(60), Duration::from_nanos(16_666_666));
        assert_eq!(frame_interval(1), Duration::from_secs(1));
        assert_eq!(frame_interval(0), Duration::from_secs(1));
    }

    #[test]
    fn test_ticker_basic() {
        let (tx, mailbox) = mailbox::channel();
        let ticker = TickerActor::spawn(tx, Duration::from_millis(10)).unwrap();

        // First tick is immediate, the second follows an interval later
        assert_eq!(mailbox.wait(), PacingSignal::Continue);
        assert_eq!(mailbox.wait(), PacingSignal::Continue);
        assert!(ticker.ticks() >= 2);

        ticker.join();
    }

    #[test]
    fn test_ticker_never_overfills() {
        let (tx, mailbox) = mailbox::channel();
        let ticker = TickerActor::spawn(tx, Duration::from_millis(1)).unwrap();

        // Slow consumer: many ticks, one pending slot
        thread::sleep(Duration::from_millis(30));
        assert!(ticker.ticks() > 1);
        assert_eq!(mailbox.pending(), 1);

        ticker.join();
    }

    #[test]
    fn test_ticker_exits_when_mailbox_dropped() {
        let (tx, mailbox) = mailbox::channel();
        let ticker = TickerActor::spawn(tx, Duration::from_millis(1)).unwrap();
        drop(mailbox);

        // join returns because the loop notices the closed mailbox
        ticker.join();
    }

    #[test]
    fn test_ticker_shutdown() {
        let (tx, _mailbox) = mailbox::channel();
        let ticker = TickerActor::spawn(tx, Duration::from_millis(100)).unwrap();
        ticker.shutdown();

        thread::sleep(Duration::from_millis(20));
        ticker.join();
    }
}
