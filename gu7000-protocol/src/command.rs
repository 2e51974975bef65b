//! Command set for GU7000 modules
//!
//! Every device operation is one variant of [`Command`]. Builders validate
//! their arguments, so a constructed command always encodes to a well-formed
//! packet.

use crate::pack::{packed_len, PAGE_HEIGHT};
use crate::packet::Packet;

/// Opcode bytes for every supported command
pub mod opcodes {
    /// Initialize display (ESC @)
    pub const RESET: [u8; 2] = [0x1B, 0x40];
    /// Clear display memory and home the cursor (FF)
    pub const CLEAR: [u8; 1] = [0x0C];
    /// Set cursor position, followed by xL xH yL yH
    pub const MOVE_CURSOR: [u8; 2] = [0x1F, 0x24];
    /// Set brightness, followed by a level 1..=8
    pub const BRIGHTNESS: [u8; 2] = [0x1F, 0x58];
    /// Real-time bit image display, followed by xL xH yL yH g d(1)..d(k)
    pub const SHOW_IMAGE: [u8; 4] = [0x1F, 0x28, 0x66, 0x11];
    /// Bit image mode byte: fixed format
    pub const IMAGE_MODE: u8 = 0x01;
    /// Display scroll action, followed by wL wH cL cH s
    pub const SCROLL: [u8; 4] = [0x1F, 0x28, 0x61, 0x10];
    /// Display power off
    pub const SLEEP: [u8; 5] = [0x1F, 0x28, 0x61, 0x40, 0x00];
    /// Display power on
    pub const WAKE: [u8; 5] = [0x1F, 0x28, 0x61, 0x40, 0x01];
}

/// Lowest brightness level the module accepts
pub const MIN_BRIGHTNESS_LEVEL: u8 = 1;

/// Highest brightness level the module accepts
pub const MAX_BRIGHTNESS_LEVEL: u8 = 8;

/// Errors raised when a command argument violates the device contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// A value does not fit its wire field or lies outside its domain
    OutOfRange,
    /// Image height is not a multiple of the 8-row page height
    UnalignedHeight,
    /// Pixel or payload buffer length does not match the stated dimensions
    SizeMismatch,
    /// Header does not fit the packet buffer
    PacketTooLarge,
}

/// Brightness level in the device's 1..=8 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    /// Full brightness
    pub const MAX: Self = Self(MAX_BRIGHTNESS_LEVEL);

    /// Dimmest visible level
    pub const MIN: Self = Self(MIN_BRIGHTNESS_LEVEL);

    /// Convert a fraction in `[0, 1]` to a device level
    ///
    /// The level is `round(fraction * 8)` clamped to `1..=8`, so zero still
    /// lights the display at its dimmest setting.
    pub fn from_fraction(fraction: f32) -> Result<Self, CommandError> {
        if !(0.0..=1.0).contains(&fraction) {
            // Also rejects NaN
            return Err(CommandError::OutOfRange);
        }
        // Non-negative, so truncating after +0.5 rounds half up
        let level = (fraction * MAX_BRIGHTNESS_LEVEL as f32 + 0.5) as u8;
        Ok(Self(level.clamp(MIN_BRIGHTNESS_LEVEL, MAX_BRIGHTNESS_LEVEL)))
    }

    /// Use a raw device level
    pub fn from_level(level: u8) -> Result<Self, CommandError> {
        if (MIN_BRIGHTNESS_LEVEL..=MAX_BRIGHTNESS_LEVEL).contains(&level) {
            Ok(Self(level))
        } else {
            Err(CommandError::OutOfRange)
        }
    }

    /// Raw device level
    pub const fn level(self) -> u8 {
        self.0
    }
}

/// A single device operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Re-initialize the module
    Reset,
    /// Clear the display
    Clear,
    /// Position the write cursor
    ///
    /// `x` is a pixel column; `page` is the row address in 8-pixel pages.
    MoveCursor { x: u16, page: u16 },
    /// Set display brightness
    SetBrightness(Brightness),
    /// Write packed image data at the cursor
    ///
    /// `pages` is the image height in 8-pixel pages.
    ShowImage {
        width: u16,
        pages: u16,
        data: &'a [u8],
    },
    /// Scroll the display memory
    Scroll { address: u16, times: u16, speed: u8 },
    /// Power the display off (screensaver)
    Sleep,
    /// Power the display back on
    Wake,
}

impl<'a> Command<'a> {
    /// Cursor placement at pixel column `x`, pixel row `y`
    ///
    /// The row is sent as a page address (`y / 8`).
    pub fn move_cursor(x: u32, y: u32) -> Result<Self, CommandError> {
        Ok(Command::MoveCursor {
            x: to_u16(x)?,
            page: to_u16(y / PAGE_HEIGHT as u32)?,
        })
    }

    /// Brightness from a fraction in `[0, 1]`
    pub fn brightness(fraction: f32) -> Result<Self, CommandError> {
        Brightness::from_fraction(fraction).map(Command::SetBrightness)
    }

    /// Image of `width` x `height` pixels from already packed data
    ///
    /// `data` must be exactly `width * height / 8` bytes.
    pub fn image(width: u32, height: u32, data: &'a [u8]) -> Result<Self, CommandError> {
        if height % PAGE_HEIGHT as u32 != 0 {
            return Err(CommandError::UnalignedHeight);
        }
        let width16 = to_u16(width)?;
        let pages = to_u16(height / PAGE_HEIGHT as u32)?;
        if data.len() != packed_len(width as usize, height as usize) {
            return Err(CommandError::SizeMismatch);
        }
        Ok(Command::ShowImage {
            width: width16,
            pages,
            data,
        })
    }

    /// Scroll starting at pixel column `x`, pixel row `y`
    ///
    /// The start address is the display memory byte offset of `(x, y)`:
    /// `x * display_height / 8 + y / 8`.
    pub fn scroll(
        x: u32,
        y: u32,
        times: u32,
        speed: u8,
        display_height: u32,
    ) -> Result<Self, CommandError> {
        if display_height % PAGE_HEIGHT as u32 != 0 {
            return Err(CommandError::UnalignedHeight);
        }
        let address = x
            .checked_mul(display_height)
            .map(|column_bytes| column_bytes / PAGE_HEIGHT as u32)
            .and_then(|offset| offset.checked_add(y / PAGE_HEIGHT as u32))
            .ok_or(CommandError::OutOfRange)?;
        Ok(Command::Scroll {
            address: to_u16(address)?,
            times: to_u16(times)?,
            speed,
        })
    }

    /// Encode this command into a packet
    pub fn to_packet(&self) -> Result<Packet<'a>, CommandError> {
        let mut header = [0u8; crate::packet::MAX_HEADER_LEN];
        let (len, payload): (usize, &'a [u8]) = match *self {
            Command::Reset => (put(&mut header, 0, &opcodes::RESET), NO_PAYLOAD),
            Command::Clear => (put(&mut header, 0, &opcodes::CLEAR), NO_PAYLOAD),
            Command::MoveCursor { x, page } => {
                let at = put(&mut header, 0, &opcodes::MOVE_CURSOR);
                let at = put(&mut header, at, &x.to_le_bytes());
                (put(&mut header, at, &page.to_le_bytes()), NO_PAYLOAD)
            }
            Command::SetBrightness(level) => {
                let at = put(&mut header, 0, &opcodes::BRIGHTNESS);
                (put(&mut header, at, &[level.level()]), NO_PAYLOAD)
            }
            Command::ShowImage { width, pages, data } => {
                let at = put(&mut header, 0, &opcodes::SHOW_IMAGE);
                let at = put(&mut header, at, &width.to_le_bytes());
                let at = put(&mut header, at, &pages.to_le_bytes());
                (put(&mut header, at, &[opcodes::IMAGE_MODE]), data)
            }
            Command::Scroll {
                address,
                times,
                speed,
            } => {
                let at = put(&mut header, 0, &opcodes::SCROLL);
                let at = put(&mut header, at, &address.to_le_bytes());
                let at = put(&mut header, at, &times.to_le_bytes());
                (put(&mut header, at, &[speed]), NO_PAYLOAD)
            }
            Command::Sleep => (put(&mut header, 0, &opcodes::SLEEP), NO_PAYLOAD),
            Command::Wake => (put(&mut header, 0, &opcodes::WAKE), NO_PAYLOAD),
        };

        Packet::new(&header[..len], payload).ok_or(CommandError::PacketTooLarge)
    }
}

const NO_PAYLOAD: &[u8] = &[];

/// Copy `bytes` into `buf` at `at`, returning the next free index
fn put(buf: &mut [u8], at: usize, bytes: &[u8]) -> usize {
    let end = at + bytes.len();
    buf[at..end].copy_from_slice(bytes);
    end
}

fn to_u16(value: u32) -> Result<u16, CommandError> {
    u16::try_from(value).map_err(|_| CommandError::OutOfRange)
}
