//! Display driver errors

use gu7000_core::{ConfigError, FrameError};
use gu7000_protocol::CommandError;

/// Display driver errors
///
/// `E` is the UART error type; transport failures are passed through
/// unchanged and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Serial write or flush failed
    Transport(E),
    /// Command argument outside the device contract
    Command(CommandError),
    /// Frame construction failed
    Frame(FrameError),
    /// Frame size differs from the configured display
    FrameMismatch,
    /// Invalid driver configuration
    Config(ConfigError),
}

impl<E> From<CommandError> for DisplayError<E> {
    fn from(e: CommandError) -> Self {
        DisplayError::Command(e)
    }
}

impl<E> From<FrameError> for DisplayError<E> {
    fn from(e: FrameError) -> Self {
        DisplayError::Frame(e)
    }
}

impl<E> From<ConfigError> for DisplayError<E> {
    fn from(e: ConfigError) -> Self {
        DisplayError::Config(e)
    }
}

impl<E> DisplayError<E> {
    /// Check if this error came from the serial link
    pub fn is_transport(&self) -> bool {
        matches!(self, DisplayError::Transport(_))
    }
}
