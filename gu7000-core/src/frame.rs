//! Monochrome frame buffer
//!
//! A frame is what the renderer hands to the driver once per update: a
//! row-major grid with one byte per pixel. Any value at or above
//! [`PIXEL_THRESHOLD`] is lit.

use alloc::vec;
use alloc::vec::Vec;

use gu7000_protocol::{PAGE_HEIGHT, PIXEL_THRESHOLD};

/// Errors from frame construction or pixel access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Width or height is zero
    ZeroDimension,
    /// Height is not a multiple of the 8-row page height
    UnalignedHeight,
    /// Pixel buffer length is not `width * height`
    SizeMismatch,
    /// Coordinates lie outside the frame
    OutOfBounds,
}

/// A rendered monochrome frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

impl Frame {
    /// Create a blank frame
    pub fn new(width: u16, height: u16) -> Result<Self, FrameError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        })
    }

    /// Wrap an existing row-major pixel buffer
    pub fn from_pixels(width: u16, height: u16, pixels: Vec<u8>) -> Result<Self, FrameError> {
        check_dimensions(width, height)?;
        if pixels.len() != width as usize * height as usize {
            return Err(FrameError::SizeMismatch);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Height in 8-row pages
    pub const fn pages(&self) -> u16 {
        self.height / PAGE_HEIGHT as u16
    }

    /// Raw row-major pixel data
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read a pixel
    pub fn get(&self, x: u16, y: u16) -> Option<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write a pixel
    pub fn set(&mut self, x: u16, y: u16, value: u8) -> Result<(), FrameError> {
        let i = self.index(x, y).ok_or(FrameError::OutOfBounds)?;
        self.pixels[i] = value;
        Ok(())
    }

    /// Check if a pixel is lit
    pub fn is_lit(&self, x: u16, y: u16) -> bool {
        self.get(x, y).is_some_and(|p| p >= PIXEL_THRESHOLD)
    }

    /// Pixels of one row
    pub fn row(&self, y: u16) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.pixels[start..start + self.width as usize])
    }

    /// Contiguous pixels of rows `[start_y, end_y)`
    ///
    /// Row-major storage makes a horizontal band a plain sub-slice, so the
    /// cropped region can be packed without copying.
    pub fn rows(&self, start_y: u16, end_y: u16) -> Option<&[u8]> {
        if start_y > end_y || end_y > self.height {
            return None;
        }
        let w = self.width as usize;
        Some(&self.pixels[start_y as usize * w..end_y as usize * w])
    }

    /// Check if no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p < PIXEL_THRESHOLD)
    }

    /// Check if both frames have the same dimensions
    pub fn same_size(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

fn check_dimensions(width: u16, height: u16) -> Result<(), FrameError> {
    if width == 0 || height == 0 {
        return Err(FrameError::ZeroDimension);
    }
    if height as usize % PAGE_HEIGHT != 0 {
        return Err(FrameError::UnalignedHeight);
    }
    Ok(())
}
