//! Frame-level GU7000 driver
//!
//! [`Gu7000::update`] is the single entry point for rendered frames. It
//! compares the frame with the last one sent, transmits only the changed
//! page-aligned band, and feeds the screensaver.
//!
//! Update sequence:
//! 1. Classify: first frame, identical, reverse-scan miss, or changed band
//! 2. Screensaver step on the frame's blank state (wake is sent here, so
//!    the module is powered before image data arrives)
//! 3. Cursor to `(0, start_y)` and image of the band
//! 4. Store the frame as the previous frame
//! 5. Sleep command, if the screensaver asked for one
//!
//! If any write fails, the screensaver step is rolled back.

use gu7000_core::diff::{align_band, diff};
use gu7000_core::{Band, DiffOutcome, DisplayConfig, Frame, IdleAction, IdleMachine, IdleState};
use gu7000_hal::{InputPin, UartTx};

use crate::device::Device;
use crate::error::DisplayError;
use crate::transport::Channel;

/// What an update sent to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateAction {
    /// No previous frame: the whole frame was sent
    FullUpdate,
    /// Only rows `[start_y, end_y)` were sent
    BandUpdate(Band),
    /// Nothing was sent
    NoChange,
}

/// Diff decision before anything is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    Transmit(Band, UpdateAction),
    Skip,
}

/// Decide what to send for a diff outcome, and whether the frame counts as
/// blank for the screensaver
///
/// A reverse-scan miss is treated as an empty frame. A change that aligns
/// to an empty band is skipped and the previous frame is kept, so it shows
/// up again in the next diff. Rows above a start that was rounded up to the
/// next page are not resent, even though the frame becomes the previous
/// frame.
fn plan_for(outcome: DiffOutcome, height: u16, is_blank: bool) -> (Plan, bool) {
    match outcome {
        DiffOutcome::Identical => (Plan::Skip, is_blank),
        DiffOutcome::EmptyDiff => (Plan::Skip, true),
        DiffOutcome::Changed { raw_start, raw_end } => {
            let band = align_band(raw_start, raw_end, height);
            if band.is_empty() {
                (Plan::Skip, is_blank)
            } else {
                (Plan::Transmit(band, UpdateAction::BandUpdate(band)), is_blank)
            }
        }
    }
}

/// GU7000 driver owning the serial link
pub struct Gu7000<U, P> {
    device: Device<U, P>,
    config: DisplayConfig,
    previous: Option<Frame>,
    idle: IdleMachine,
}

impl<U, P> Gu7000<U, P>
where
    U: UartTx,
    P: InputPin,
{
    /// Create a driver on an open UART and its ready line
    ///
    /// Nothing is sent until [`init`](Self::init) or the first update.
    pub fn new(uart: U, ready: P, config: DisplayConfig) -> Result<Self, DisplayError<U::Error>> {
        config.validate()?;
        let channel = Channel::new(uart, ready, config.chunk_size);
        Ok(Self {
            device: Device::new(channel, config.height),
            idle: IdleMachine::new(config.screensaver_delay_ms()),
            config,
            previous: None,
        })
    }

    /// Reset and clear the module, then apply the configured brightness
    pub fn init(&mut self) -> Result<(), DisplayError<U::Error>> {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "GU7000 init: {}x{}, chunk {}",
            self.config.width,
            self.config.height,
            self.config.chunk_size
        );

        self.device.reset()?;
        self.device.clear()?;
        self.device.set_brightness(self.config.brightness)?;
        self.previous = None;
        Ok(())
    }

    /// Bring the display in line with `frame`
    ///
    /// `now_ms` is a monotonic timestamp used by the screensaver.
    ///
    /// On error the screensaver is left as it was before the call, so a
    /// sleep or wake that never reached the module is sent again on the
    /// next update.
    pub fn update(
        &mut self,
        frame: Frame,
        now_ms: u64,
    ) -> Result<UpdateAction, DisplayError<U::Error>> {
        self.check_size(&frame)?;

        let (plan, is_blank) = match &self.previous {
            None => (
                Plan::Transmit(Band::full(frame.height()), UpdateAction::FullUpdate),
                frame.is_blank(),
            ),
            Some(previous) => plan_for(diff(&frame, previous), frame.height(), frame.is_blank()),
        };

        self.execute(frame, plan, is_blank, now_ms)
    }

    fn execute(
        &mut self,
        frame: Frame,
        plan: Plan,
        is_blank: bool,
        now_ms: u64,
    ) -> Result<UpdateAction, DisplayError<U::Error>> {
        let idle_before = self.idle.clone();
        let idle_action = self.idle.step(is_blank, now_ms);

        let result = self.send_update(frame, plan, idle_action);
        if result.is_err() {
            self.idle = idle_before;
        }
        result
    }

    fn send_update(
        &mut self,
        frame: Frame,
        plan: Plan,
        idle_action: IdleAction,
    ) -> Result<UpdateAction, DisplayError<U::Error>> {
        if idle_action == IdleAction::Wake {
            #[cfg(feature = "defmt")]
            defmt::info!("Screensaver: wake");
            self.device.wake()?;
        }

        let action = match plan {
            Plan::Transmit(band, action) => {
                self.send_band(&frame, band)?;
                #[cfg(feature = "defmt")]
                defmt::trace!("Sent rows {}..{}", band.start_y, band.end_y);
                self.previous = Some(frame);
                action
            }
            Plan::Skip => UpdateAction::NoChange,
        };

        if idle_action == IdleAction::Sleep {
            #[cfg(feature = "defmt")]
            defmt::info!(
                "Screensaver: sleep after {} blank frames",
                self.idle.empty_frame_count()
            );
            self.device.sleep()?;
        }

        Ok(action)
    }

    /// Send a whole frame at the origin without diffing
    pub fn show_frame(&mut self, frame: Frame) -> Result<(), DisplayError<U::Error>> {
        self.check_size(&frame)?;
        self.send_band(&frame, Band::full(frame.height()))?;
        self.previous = Some(frame);
        Ok(())
    }

    /// Clear the display
    ///
    /// The previous frame is dropped, so the next update is a full one.
    pub fn clear(&mut self) -> Result<(), DisplayError<U::Error>> {
        self.previous = None;
        self.device.clear()
    }

    /// Change brightness, as a fraction in `[0, 1]`
    pub fn set_brightness(&mut self, level: f32) -> Result<(), DisplayError<U::Error>> {
        self.device.set_brightness(level)
    }

    /// Forget the previous frame to force a full update next time
    ///
    /// Use after a transport error: the protocol has no acknowledgement,
    /// so the module's content is unknown.
    pub fn invalidate(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Previous frame invalidated");
        self.previous = None;
    }

    /// Direct command access
    pub fn device(&mut self) -> &mut Device<U, P> {
        &mut self.device
    }

    /// Current screensaver state
    pub fn idle_state(&self) -> IdleState {
        self.idle.state()
    }

    /// Screensaver bookkeeping
    pub fn idle(&self) -> &IdleMachine {
        &self.idle
    }

    /// Last frame sent to the module
    pub fn previous_frame(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Consume the driver and return the UART and ready pin
    pub fn release(self) -> (U, P) {
        self.device.release()
    }

    fn check_size(&self, frame: &Frame) -> Result<(), DisplayError<U::Error>> {
        if frame.width() != self.config.width || frame.height() != self.config.height {
            return Err(DisplayError::FrameMismatch);
        }
        Ok(())
    }

    fn send_band(&mut self, frame: &Frame, band: Band) -> Result<(), DisplayError<U::Error>> {
        let pixels = frame
            .rows(band.start_y, band.end_y)
            .ok_or(DisplayError::FrameMismatch)?;
        self.device.move_cursor(0, band.start_y as u32)?;
        self.device.show_image(pixels, frame.width(), band.height())
    }
}
