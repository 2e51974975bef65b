//! Screensaver state machine
//!
//! Decides when to power the display down after a run of blank frames and
//! when to bring it back. The machine is explicit, finite, and
//! deterministic: each update feeds one `(is_blank, now)` sample, and a
//! sleep or wake command is emitted only on the edge into that state.

/// Idle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleState {
    /// Display on, showing content
    Awake,
    /// Display on, blank frames are being counted
    CountingEmpty,
    /// Display powered off by the screensaver
    Asleep,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleAction {
    /// Nothing to send
    None,
    /// Send the sleep command
    Sleep,
    /// Send the wake command
    Wake,
}

/// Default delay before the screensaver kicks in
pub const DEFAULT_SCREENSAVER_DELAY_MS: u64 = 60_000;

/// Screensaver state with its blank-frame bookkeeping
///
/// Timestamps are milliseconds from any monotonic clock.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleMachine {
    state: IdleState,
    /// Time of the first blank frame in the current run
    first_empty_ms: Option<u64>,
    /// Blank frames seen in the current run
    empty_frame_count: u32,
    /// Blank time required before sleeping
    delay_ms: u64,
}

impl Default for IdleMachine {
    fn default() -> Self {
        Self::new(DEFAULT_SCREENSAVER_DELAY_MS)
    }
}

impl IdleMachine {
    /// Create an awake machine with the given screensaver delay
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            state: IdleState::Awake,
            first_empty_ms: None,
            empty_frame_count: 0,
            delay_ms,
        }
    }

    /// Feed one frame sample and return the command to send, if any
    pub fn step(&mut self, is_blank: bool, now_ms: u64) -> IdleAction {
        use IdleState::*;

        match (self.state, is_blank) {
            (Awake, false) => IdleAction::None,

            (Awake, true) => {
                self.first_empty_ms = Some(now_ms);
                self.empty_frame_count = 1;
                self.state = CountingEmpty;
                IdleAction::None
            }

            (CountingEmpty, true) => {
                self.empty_frame_count = self.empty_frame_count.saturating_add(1);
                let first = self.first_empty_ms.unwrap_or(now_ms);
                if now_ms.saturating_sub(first) >= self.delay_ms {
                    self.state = Asleep;
                    IdleAction::Sleep
                } else {
                    IdleAction::None
                }
            }

            // Already off: no repeated sleep commands
            (Asleep, true) => IdleAction::None,

            (CountingEmpty, false) | (Asleep, false) => {
                let was_asleep = self.state == Asleep;
                self.empty_frame_count = 0;
                self.first_empty_ms = None;
                self.state = Awake;
                if was_asleep {
                    IdleAction::Wake
                } else {
                    IdleAction::None
                }
            }
        }
    }

    /// Current state
    pub fn state(&self) -> IdleState {
        self.state
    }

    /// Check if the screensaver has the display powered off
    pub fn is_asleep(&self) -> bool {
        self.state == IdleState::Asleep
    }

    /// Blank frames seen in the current run
    pub fn empty_frame_count(&self) -> u32 {
        self.empty_frame_count
    }

    /// Time of the first blank frame in the current run
    pub fn first_empty_ms(&self) -> Option<u64> {
        self.first_empty_ms
    }

    /// Configured screensaver delay
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}
