//! Driver for Noritake GU7000 VFD modules over a flow-controlled UART
//!
//! This crate provides:
//! - [`Channel`]: chunked writer that honors the module's CTS line
//! - [`Device`]: one method per device command, encoded and sent
//! - [`Gu7000`]: frame-level driver that diffs each rendered frame against
//!   the last one sent, transmits only the changed band, and runs the
//!   screensaver
//!
//! # Architecture
//!
//! ```text
//!  renderer ──Frame──▶ Gu7000::update
//!                        │  diff vs previous frame
//!                        │  screensaver step
//!                        ▼
//!                      Device (move_cursor, show_image, sleep, wake, ...)
//!                        │  Command ─▶ Packet
//!                        ▼
//!                      Channel (wait CTS, write chunk, wait CTS, flush)
//!                        │
//!                        ▼
//!                      UartTx + InputPin (gu7000-hal)
//! ```
//!
//! The driver is synchronous and single-owner. A stuck CTS line blocks the
//! caller; there is no timeout.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod device;
pub mod driver;
pub mod error;
pub mod transport;

#[cfg(test)]
mod mock;

// Re-export key types
pub use device::Device;
pub use driver::{Gu7000, UpdateAction};
pub use error::DisplayError;
pub use transport::Channel;

pub use gu7000_core::{Band, DisplayConfig, Frame, IdleState};
