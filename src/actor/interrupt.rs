//! Interrupt Actor: turns an external stop request into a terminal pacing
//! signal.
//!
//! The monitor is single-shot. It waits for the first request, posts `Stop`
//! and exits; later requests are ignored.

use super::mailbox::MailboxSender;
use super::messages::PacingSignal;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::io;
use std::thread::{self, JoinHandle};

/// Install the process-wide SIGINT hook and return its request stream.
///
/// Can only succeed once per process. Each interrupt is forwarded as a
/// `()` message; the channel holds one, so repeats while one is pending are
/// dropped. The returned sender feeds the same stream, for stop requests
/// that do not come from the OS.
///
/// # Errors
///
/// Fails if a handler is already installed or the OS refuses it.
pub fn os_interrupts() -> Result<(Sender<()>, Receiver<()>), ctrlc::Error> {
    let (tx, rx) = bounded(1);
    let hook = tx.clone();
    ctrlc::set_handler(move || {
        let _ = hook.try_send(());
    })?;
    Ok((tx, rx))
}

/// Interrupt monitor lane.
pub struct InterruptMonitor {
    handle: Option<JoinHandle<bool>>,
}

impl InterruptMonitor {
    /// Arm the monitor: wait on `requests` and post `Stop` into `sender`
    /// on the first one.
    ///
    /// If every request sender is dropped first, the monitor exits quietly
    /// without posting anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the monitor thread.
    pub fn arm(sender: MailboxSender, requests: Receiver<()>) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name("frameloop-interrupt".to_string())
            .spawn(move || Self::watch(&sender, &requests))?;

        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Whether the monitor has finished (fired or lost its request source).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the monitor thread and report whether it posted `Stop`.
    ///
    /// Blocks until a request arrives or the request source is dropped.
    pub fn join(mut self) -> bool {
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or(false)
    }

    fn watch(sender: &MailboxSender, requests: &Receiver<()>) -> bool {
        if requests.recv().is_err() {
            log::debug!("interrupt source closed before any request");
            return false;
        }

        log::info!("break.");
        if sender.post(PacingSignal::Stop).is_err() {
            log::debug!("interrupt: render lane already gone");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::mailbox;

    #[test]
    fn test_request_becomes_stop() {
        let (tx, mailbox) = mailbox::channel();
        let (req_tx, req_rx) = bounded(1);
        let monitor = InterruptMonitor::arm(tx, req_rx).unwrap();

        req_tx.send(()).unwrap();
        assert_eq!(mailbox.wait(), PacingSignal::Stop);
        assert!(monitor.join());
    }

    #[test]
    fn test_request_before_first_frame_is_kept() {
        let (tx, mailbox) = mailbox::channel();
        let (req_tx, req_rx) = bounded(1);
        req_tx.send(()).unwrap();

        let monitor = InterruptMonitor::arm(tx.clone(), req_rx).unwrap();
        assert!(monitor.join());

        // Ticks arriving afterwards do not resurrect the loop
        tx.post(PacingSignal::Continue).unwrap();
        assert_eq!(mailbox.wait(), PacingSignal::Stop);
    }

    #[test]
    fn test_second_request_is_inert() {
        let (tx, mailbox) = mailbox::channel();
        let (req_tx, req_rx) = bounded(2);
        req_tx.send(()).unwrap();
        req_tx.send(()).unwrap();

        let monitor = InterruptMonitor::arm(tx, req_rx).unwrap();
        assert!(monitor.join());
        assert_eq!(mailbox.wait(), PacingSignal::Stop);
        // The second request is still sitting unread
        assert_eq!(req_tx.len(), 1);
    }

    #[test]
    fn test_closed_source_posts_nothing() {
        let (tx, mailbox) = mailbox::channel();
        let (req_tx, req_rx) = bounded::<()>(1);
        let monitor = InterruptMonitor::arm(tx, req_rx).unwrap();

        drop(req_tx);
        assert!(!monitor.join());
        assert!(!mailbox.is_stopped());
        assert_eq!(mailbox.pending(), 0);
    }
}
