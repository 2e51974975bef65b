//! GU7000 Hardware Abstraction Layer
//!
//! This crate defines the two hardware capabilities the VFD driver needs:
//! a byte-oriented serial transmitter and the device's ready (CTS) line.
//! Everything above this crate is written against these traits, so the
//! same driver runs on a host serial port, an MCU UART, or a test double.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  gu7000-display (driver, transport)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gu7000-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embedded-io  │       │ embedded-hal  │
//! │  Write (TX)   │       │ InputPin (CTS)│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`] - Serial transmission
//! - [`gpio::InputPin`] - Ready / clear-to-send signal

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, ReadyFn};
pub use uart::UartTx;
