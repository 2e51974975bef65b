//! GU7000 VFD Wire Protocol
//!
//! This crate defines the byte-level command set understood by Noritake
//! GU7000 series vacuum fluorescent display modules, and the packing of
//! monochrome pixels into the module's display memory layout.
//!
//! # Protocol Overview
//!
//! Every command is an opcode-prefixed packet with little-endian
//! parameters and an optional payload:
//! ```text
//! ┌──────────────┬────────────────────┬──────────────────┐
//! │ OPCODE       │ PARAMETERS         │ PAYLOAD          │
//! │ 1–5B         │ 0–5B, little-endian│ 0–N B (images)   │
//! └──────────────┴────────────────────┴──────────────────┘
//! ```
//!
//! There is no acknowledgement and no checksum. The module relies on the
//! CTS line for flow control, which the transport layer honors.
//!
//! # Display memory layout
//!
//! The module addresses rows in pages of 8 pixels. Image data is sent
//! column by column; each byte holds 8 vertically stacked pixels of one
//! page with the topmost pixel in bit 0. See [`pack`].

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod command;
pub mod pack;
pub mod packet;

pub use command::{opcodes, Brightness, Command, CommandError};
pub use pack::{pack, pack_into, packed_len, PAGE_HEIGHT, PIXEL_THRESHOLD};
pub use packet::{Packet, MAX_HEADER_LEN};
