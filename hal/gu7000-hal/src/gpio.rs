//! GPIO pin abstractions
//!
//! The driver only ever reads one line: the device's ready (CTS) signal.

/// Digital input pin
///
/// Takes `&mut self` because reading a pin on most HALs goes through a
/// borrowed peripheral handle.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        T::is_high(self)
    }
}

/// Ready line backed by a predicate
///
/// Lets callers inject the flow-control signal as a closure, e.g. a
/// modem-status query on a host serial port or a scripted signal in tests.
pub struct ReadyFn<F>(pub F);

impl<F> ReadyFn<F>
where
    F: FnMut() -> bool,
{
    /// Wrap a predicate
    pub fn new(predicate: F) -> Self {
        Self(predicate)
    }
}

impl<F> InputPin for ReadyFn<F>
where
    F: FnMut() -> bool,
{
    fn is_high(&mut self) -> bool {
        (self.0)()
    }
}

/// Adapter for `embedded-hal` 1.0 digital inputs
///
/// A read error is reported as "not ready", so the caller keeps polling.
/// Failed reads are counted and, with the `defmt` feature, logged.
#[cfg(feature = "embedded-hal")]
pub struct HalPin<P> {
    pin: P,
    read_errors: u32,
}

#[cfg(feature = "embedded-hal")]
impl<P> HalPin<P> {
    /// Wrap an `embedded-hal` input pin
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            read_errors: 0,
        }
    }

    /// Number of reads that returned an error
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    /// Consume the adapter and return the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

#[cfg(feature = "embedded-hal")]
impl<P> InputPin for HalPin<P>
where
    P: embedded_hal::digital::InputPin,
{
    fn is_high(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(level) => level,
            Err(_) => {
                self.read_errors = self.read_errors.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("Ready pin read failed ({} so far)", self.read_errors);
                false
            }
        }
    }
}
