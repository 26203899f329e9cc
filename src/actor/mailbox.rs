//! Frame Mailbox: single-slot, coalescing handoff between the producer lanes
//! and the render lane.
//!
//! Producers never block. A `Continue` that finds the slot occupied is
//! dropped on the floor: the pending signal already grants one frame. A
//! `Stop` additionally latches a shared flag before it tries the slot, so it
//! survives even when the slot is full, and every later `wait()` resolves to
//! `Stop`.

use super::messages::PacingSignal;
use crossbeam_channel::{bounded, Receiver, RecvError, Sender, TrySendError};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The render lane has gone away; nobody will ever read another signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("frame mailbox closed")]
pub struct MailboxClosed;

/// Create a connected producer/consumer pair.
///
/// The sender may be cloned freely, one clone per producer lane.
pub fn channel() -> (MailboxSender, FrameMailbox) {
    let (tx, rx) = bounded(1);
    let stop = Arc::new(AtomicBool::new(false));

    let sender = MailboxSender {
        tx,
        stop: Arc::clone(&stop),
    };
    let mailbox = FrameMailbox {
        rx,
        stop,
        waits: Cell::new(0),
    };
    (sender, mailbox)
}

/// Write-only end of the mailbox, held by the ticker and interrupt monitor.
#[derive(Debug, Clone)]
pub struct MailboxSender {
    tx: Sender<PacingSignal>,
    stop: Arc<AtomicBool>,
}

impl MailboxSender {
    /// Post a signal without blocking.
    ///
    /// A full slot is not an error: the signal is coalesced into the one
    /// already pending. Only a dropped consumer is reported.
    pub fn post(&self, signal: PacingSignal) -> Result<(), MailboxClosed> {
        if signal.is_stop() {
            // Latch first so a consumer that empties the slot between our
            // failed try_send and its own drain still sees the stop.
            self.stop.store(true, Ordering::SeqCst);
        }

        match self.tx.try_send(signal) {
            Ok(()) | Err(TrySendError::Full(_)) => Ok(()),
            Err(TrySendError::Disconnected(_)) => Err(MailboxClosed),
        }
    }

    /// Whether a `Stop` has been posted by any producer.
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

/// Read end of the mailbox, owned by the render lane.
#[derive(Debug)]
pub struct FrameMailbox {
    rx: Receiver<PacingSignal>,
    stop: Arc<AtomicBool>,
    waits: Cell<u64>,
}

impl FrameMailbox {
    /// Block until a signal is available, then drain the backlog.
    ///
    /// Returns `Continue` at most once per call no matter how many ticks
    /// piled up. Returns `Stop` if any stop was posted before the drain
    /// finished, and on every call after that.
    pub fn wait(&self) -> PacingSignal {
        self.waits.set(self.waits.get() + 1);

        if self.stop.load(Ordering::SeqCst) {
            self.discard_pending();
            return PacingSignal::Stop;
        }

        match self.rx.recv() {
            Ok(first) => self.drain(first),
            Err(RecvError) => {
                log::warn!("all pacing producers are gone, stopping");
                self.stop.store(true, Ordering::SeqCst);
                PacingSignal::Stop
            }
        }
    }

    /// Number of times `wait()` has been called.
    pub fn waits(&self) -> u64 {
        self.waits.get()
    }

    /// Number of signals currently pending (0 or 1).
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Whether a terminal signal has been latched.
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    fn drain(&self, first: PacingSignal) -> PacingSignal {
        let mut signal = first;
        let mut coalesced = 0u32;

        while let Ok(next) = self.rx.try_recv() {
            signal = signal.merge(next);
            coalesced += 1;
        }
        if coalesced > 0 {
            log::trace!("coalesced {coalesced} pending signal(s)");
        }

        if self.stop.load(Ordering::SeqCst) {
            PacingSignal::Stop
        } else {
            signal
        }
    }

    fn discard_pending(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_continue_is_delivered() {
        let (tx, mailbox) = channel();
        tx.post(PacingSignal::Continue).unwrap();
        assert_eq!(mailbox.wait(), PacingSignal::Continue);
        assert_eq!(mailbox.pending(), 0);
    }

    #[test]
    fn test_slot_never_exceeds_one() {
        let (tx, mailbox) = channel();
        for _ in 0..10 {
            tx.post(PacingSignal::Continue).unwrap();
        }
        assert_eq!(mailbox.pending(), 1);

        // A burst of ticks yields one frame, not ten.
        assert_eq!(mailbox.wait(), PacingSignal::Continue);
        assert_eq!(mailbox.pending(), 0);
    }

    #[test]
    fn test_stop_wins_over_pending_continue() {
        for _ in 0..100 {
            let (tx, mailbox) = channel();
            tx.post(PacingSignal::Continue).unwrap();
            tx.post(PacingSignal::Continue).unwrap();
            tx.post(PacingSignal::Stop).unwrap();
            tx.post(PacingSignal::Continue).unwrap();
            assert_eq!(mailbox.wait(), PacingSignal::Stop);
        }
    }

    #[test]
    fn test_stop_is_sticky() {
        let (tx, mailbox) = channel();
        tx.post(PacingSignal::Stop).unwrap();
        assert_eq!(mailbox.wait(), PacingSignal::Stop);

        tx.post(PacingSignal::Continue).unwrap();
        assert_eq!(mailbox.wait(), PacingSignal::Stop);
        assert_eq!(mailbox.wait(), PacingSignal::Stop);
        assert!(mailbox.is_stopped());
    }

    #[test]
    fn test_disconnect_resolves_to_stop() {
        let (tx, mailbox) = channel();
        drop(tx);
        assert_eq!(mailbox.wait(), PacingSignal::Stop);
        assert!(mailbox.is_stopped());
    }

    #[test]
    fn test_post_after_consumer_dropped() {
        let (tx, mailbox) = channel();
        drop(mailbox);
        assert_eq!(tx.post(PacingSignal::Continue), Err(MailboxClosed));
        assert!(!tx.stop_requested());
        assert_eq!(tx.post(PacingSignal::Stop), Err(MailboxClosed));
        assert!(tx.stop_requested());
    }

    #[test]
    fn test_wait_count_is_n_plus_one() {
        const N: u64 = 8;
        let (tx, mailbox) = channel();
        let (ack_tx, ack_rx) = crossbeam_channel::bounded::<()>(0);

        let producer = thread::spawn(move || {
            for _ in 0..N {
                tx.post(PacingSignal::Continue).unwrap();
                ack_rx.recv().unwrap();
            }
            tx.post(PacingSignal::Stop).unwrap();
        });

        let mut frames = 0;
        while mailbox.wait() == PacingSignal::Continue {
            frames += 1;
            ack_tx.send(()).unwrap();
        }
        producer.join().unwrap();

        assert_eq!(frames, N);
        assert_eq!(mailbox.waits(), N + 1);
    }

    #[test]
    fn test_wait_blocks_until_posted() {
        let (tx, mailbox) = channel();
        let producer = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(20));
            tx.post(PacingSignal::Stop).unwrap();
        });
        assert_eq!(mailbox.wait(), PacingSignal::Stop);
        producer.join().unwrap();
    }
}
