//! UART serial communication abstractions
//!
//! The link to the display is one-directional: the driver only transmits.
//! Opening the port and configuring its baud rate happen before the UART
//! is handed to the driver.

/// UART transmitter
///
/// Blocking trait for sending data over an already-open serial link.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_blocking(self, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}

/// Adapter for `embedded-io` writers
///
/// Wraps any blocking `embedded_io::Write` (HAL UARTs, host serial ports
/// behind an adapter) as a [`UartTx`].
#[cfg(feature = "embedded-io")]
pub struct IoUart<W>(pub W);

#[cfg(feature = "embedded-io")]
impl<W> IoUart<W> {
    /// Consume the adapter and return the wrapped writer
    pub fn into_inner(self) -> W {
        self.0
    }
}

#[cfg(feature = "embedded-io")]
impl<W> UartTx for IoUart<W>
where
    W: embedded_io::Write,
{
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}

#[cfg(all(test, feature = "embedded-io"))]
mod tests {
    use super::*;
    use embedded_io::ErrorKind;

    /// Writer that accepts at most 3 bytes per call
    #[derive(Default)]
    struct SmallWriter {
        buf: [u8; 16],
        len: usize,
        flushes: u32,
        fail: bool,
    }

    impl embedded_io::ErrorType for SmallWriter {
        type Error = ErrorKind;
    }

    impl embedded_io::Write for SmallWriter {
        fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            let n = data.len().min(3).min(self.buf.len() - self.len);
            self.buf[self.len..self.len + n].copy_from_slice(&data[..n]);
            self.len += n;
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_io_uart_writes_everything() {
        let mut uart = IoUart(SmallWriter::default());
        uart.write_blocking(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
        uart.flush().unwrap();

        let writer = uart.into_inner();
        assert_eq!(&writer.buf[..writer.len], &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(writer.flushes, 1);
    }

    #[test]
    fn test_io_uart_passes_errors_through() {
        let mut uart = IoUart(SmallWriter {
            fail: true,
            ..SmallWriter::default()
        });
        assert_eq!(uart.write_blocking(&[0x0C]), Err(ErrorKind::Other));
    }
}
