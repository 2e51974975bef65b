//! Pixel packing into GU7000 display memory layout.
//!
//! Input is a row-major buffer with one byte per pixel. Output is column
//! major: for each column, one byte per 8-row page, top page first. Within
//! a byte, bit 0 is the topmost pixel of the page.
//!
//! ```text
//!  pixels (W x 16)          packed (W * 2 bytes)
//!  x=0 x=1 ...              [x0 p0][x0 p1][x1 p0][x1 p1] ...
//!  y=0  ┐
//!  ...  ├ page 0 -> bits 0..7
//!  y=7  ┘
//!  y=8  ┐
//!  ...  ├ page 1
//!  y=15 ┘
//! ```

use alloc::vec::Vec;

use crate::command::CommandError;

/// Rows per display memory page
pub const PAGE_HEIGHT: usize = 8;

/// Pixel values at or above this level are lit
pub const PIXEL_THRESHOLD: u8 = 1;

/// Number of packed bytes for a `width` x `height` region
pub const fn packed_len(width: usize, height: usize) -> usize {
    width * (height / PAGE_HEIGHT)
}

/// Pack a row-major pixel buffer into a new byte vector
pub fn pack(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, CommandError> {
    let mut out = Vec::new();
    pack_into(pixels, width, height, &mut out)?;
    Ok(out)
}

/// Pack a row-major pixel buffer into `out`, replacing its contents
///
/// Reusing `out` across frames avoids a fresh allocation per update.
pub fn pack_into(
    pixels: &[u8],
    width: usize,
    height: usize,
    out: &mut Vec<u8>,
) -> Result<(), CommandError> {
    if height % PAGE_HEIGHT != 0 {
        return Err(CommandError::UnalignedHeight);
    }
    if width.checked_mul(height) != Some(pixels.len()) {
        return Err(CommandError::SizeMismatch);
    }

    let pages = height / PAGE_HEIGHT;
    out.clear();
    out.reserve(packed_len(width, height));

    for x in 0..width {
        for page in 0..pages {
            let mut byte = 0u8;
            for bit in 0..PAGE_HEIGHT {
                let y = page * PAGE_HEIGHT + bit;
                if pixels[y * width + x] >= PIXEL_THRESHOLD {
                    byte |= 1 << bit;
                }
            }
            out.push(byte);
        }
    }

    Ok(())
}
