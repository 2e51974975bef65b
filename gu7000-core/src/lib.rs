//! Board-agnostic core logic for the GU7000 VFD driver
//!
//! This crate contains all display logic that does not touch hardware:
//!
//! - Monochrome frame buffer type
//! - Frame diffing down to a page-aligned band
//! - Screensaver (idle) state machine
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod diff;
pub mod frame;
pub mod idle;

pub use config::{ConfigError, DisplayConfig, MAX_CHUNK_SIZE};
pub use diff::{Band, DiffOutcome};
pub use frame::{Frame, FrameError};
pub use idle::{IdleAction, IdleMachine, IdleState};
