//! GU7000 command encoder
//!
//! One method per device capability. Each builds a [`Command`], encodes it
//! into a packet and hands it to the [`Channel`].

use alloc::vec::Vec;

use gu7000_hal::{InputPin, UartTx};
use gu7000_protocol::{pack_into, Command};

use crate::error::DisplayError;
use crate::transport::Channel;

/// Command-level access to a GU7000 module
pub struct Device<U, P> {
    channel: Channel<U, P>,
    /// Display height, needed to compute scroll addresses
    height: u16,
    /// Reused packing buffer
    packed: Vec<u8>,
}

impl<U, P> Device<U, P>
where
    U: UartTx,
    P: InputPin,
{
    /// Create a device on an open channel
    pub fn new(channel: Channel<U, P>, height: u16) -> Self {
        Self {
            channel,
            height,
            packed: Vec::new(),
        }
    }

    /// Encode and send one command
    pub fn send(&mut self, command: Command<'_>) -> Result<(), DisplayError<U::Error>> {
        let packet = command.to_packet()?;
        self.channel
            .write_packet(&packet)
            .map_err(DisplayError::Transport)
    }

    /// Re-initialize the module
    pub fn reset(&mut self) -> Result<(), DisplayError<U::Error>> {
        self.send(Command::Reset)
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), DisplayError<U::Error>> {
        self.send(Command::Clear)
    }

    /// Move the cursor to pixel column `x`, pixel row `y`
    pub fn move_cursor(&mut self, x: u32, y: u32) -> Result<(), DisplayError<U::Error>> {
        self.send(Command::move_cursor(x, y)?)
    }

    /// Set brightness from a fraction in `[0, 1]`
    pub fn set_brightness(&mut self, level: f32) -> Result<(), DisplayError<U::Error>> {
        self.send(Command::brightness(level)?)
    }

    /// Pack and send a row-major pixel region at the cursor
    ///
    /// `height` must be a multiple of 8 and `pixels` exactly
    /// `width * height` long.
    pub fn show_image(
        &mut self,
        pixels: &[u8],
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError<U::Error>> {
        pack_into(pixels, width as usize, height as usize, &mut self.packed)?;
        let packet = Command::image(width as u32, height as u32, &self.packed)?.to_packet()?;
        self.channel
            .write_packet(&packet)
            .map_err(DisplayError::Transport)
    }

    /// Scroll display memory starting at `(x, y)`
    pub fn scroll(
        &mut self,
        x: u32,
        y: u32,
        times: u32,
        speed: u8,
    ) -> Result<(), DisplayError<U::Error>> {
        self.send(Command::scroll(x, y, times, speed, self.height as u32)?)
    }

    /// Power the display off
    pub fn sleep(&mut self) -> Result<(), DisplayError<U::Error>> {
        self.send(Command::Sleep)
    }

    /// Power the display on
    pub fn wake(&mut self) -> Result<(), DisplayError<U::Error>> {
        self.send(Command::Wake)
    }

    /// Consume the device and return the UART and ready pin
    pub fn release(self) -> (U, P) {
        self.channel.release()
    }
}
