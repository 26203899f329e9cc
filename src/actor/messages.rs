//! Message types for actor communication.
//!
//! The only thing that crosses a lane boundary is a pacing signal: the
//! producers say "advance" or "stop", the render lane obeys.

/// Signal gating frame advancement.
///
/// The ticker only ever sends `Continue`; the interrupt monitor only ever
/// sends `Stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacingSignal {
    /// Render the next frame.
    Continue,
    /// Leave the render loop and tear down.
    Stop,
}

impl PacingSignal {
    /// Whether this is the terminal signal.
    #[inline]
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }

    /// Combine two signals observed in the same resolution step.
    ///
    /// `Stop` always wins over `Continue`.
    #[inline]
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        if self.is_stop() || other.is_stop() {
            Self::Stop
        } else {
            Self::Continue
        }
    }
}
