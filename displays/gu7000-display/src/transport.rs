//! Flow-controlled serial channel
//!
//! GU7000 modules have a small receive buffer and raise CTS (the ready
//! line) when they can accept more data. Every packet is cut into chunks
//! of at most `chunk_size` bytes, and each chunk is sent as:
//!
//! 1. spin until ready
//! 2. write the chunk
//! 3. spin until ready
//! 4. flush
//!
//! The spin has no timeout: a module that never raises CTS blocks the
//! caller. UART errors are returned as-is, with no retry.

use heapless::Vec;

use gu7000_core::config::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use gu7000_hal::{InputPin, UartTx};
use gu7000_protocol::Packet;

/// Chunked writer over a UART and its ready line
pub struct Channel<U, P> {
    uart: U,
    ready: P,
    chunk_size: usize,
}

impl<U, P> Channel<U, P>
where
    U: UartTx,
    P: InputPin,
{
    /// Create a channel writing `chunk_size` bytes at a time
    ///
    /// The size is clamped to `1..=MAX_CHUNK_SIZE`.
    pub fn new(uart: U, ready: P, chunk_size: usize) -> Self {
        Self {
            uart,
            ready,
            chunk_size: chunk_size.clamp(1, MAX_CHUNK_SIZE),
        }
    }

    /// Create a channel with the default 4-byte chunks
    pub fn with_default_chunks(uart: U, ready: P) -> Self {
        Self::new(uart, ready, DEFAULT_CHUNK_SIZE)
    }

    /// Bytes written per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Write a raw byte sequence
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), U::Error> {
        for chunk in bytes.chunks(self.chunk_size) {
            self.write_chunk(chunk)?;
        }
        Ok(())
    }

    /// Write an encoded packet
    ///
    /// Header and payload are chunked as one continuous byte stream, so a
    /// chunk may straddle the boundary between them.
    pub fn write_packet(&mut self, packet: &Packet<'_>) -> Result<(), U::Error> {
        let mut chunk: Vec<u8, MAX_CHUNK_SIZE> = Vec::new();
        for byte in packet.bytes() {
            // Cannot overflow: chunk_size <= MAX_CHUNK_SIZE
            let _ = chunk.push(byte);
            if chunk.len() == self.chunk_size {
                self.write_chunk(&chunk)?;
                chunk.clear();
            }
        }
        if !chunk.is_empty() {
            self.write_chunk(&chunk)?;
        }
        Ok(())
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), U::Error> {
        self.wait_ready();
        self.uart.write_blocking(chunk)?;
        self.wait_ready();
        self.uart.flush()
    }

    fn wait_ready(&mut self) {
        while !self.ready.is_high() {
            core::hint::spin_loop();
        }
    }

    /// Consume the channel and return the UART and ready pin
    pub fn release(self) -> (U, P) {
        (self.uart, self.ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, Event, MockError, MockReady, MockUart};
    use gu7000_hal::ReadyFn;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_ten_bytes_in_chunks_of_four() {
        let log = mock::log();
        let mut channel = Channel::new(MockUart::new(&log), MockReady::always(&log), 4);
        let data: [u8; 10] = core::array::from_fn(|i| i as u8);

        channel.write(&data).unwrap();

        assert_eq!(mock::write_sizes(&log), vec![4, 4, 2]);
        assert_eq!(mock::written(&log), data.to_vec());

        // Each chunk: ready, write, ready, flush
        let events = log.borrow();
        assert_eq!(events.len(), 12);
        for (i, group) in events.chunks(4).enumerate() {
            assert_eq!(group[0], Event::Ready);
            assert!(matches!(group[1], Event::Write(_)), "chunk {i}");
            assert_eq!(group[2], Event::Ready);
            assert_eq!(group[3], Event::Flush);
        }
    }

    #[test]
    fn test_packet_chunks_straddle_header_and_payload() {
        let log = mock::log();
        let mut channel = Channel::new(MockUart::new(&log), MockReady::always(&log), 4);
        let payload = [0xA0, 0xA1, 0xA2];
        let packet = Packet::new(&[0x01, 0x02, 0x03], &payload).unwrap();

        channel.write_packet(&packet).unwrap();

        assert_eq!(mock::write_sizes(&log), vec![4, 2]);
        assert_eq!(
            mock::written(&log),
            vec![0x01, 0x02, 0x03, 0xA0, 0xA1, 0xA2]
        );
    }

    #[test]
    fn test_waits_while_not_ready() {
        let log = mock::log();
        let mut channel = Channel::new(MockUart::new(&log), MockReady::busy_for(&log, 100), 4);

        channel.write(&[1, 2, 3, 4, 5]).unwrap();

        let (_, ready) = channel.release();
        // Two chunks, two waits each, 100 low reads before every high
        assert_eq!(ready.polls, 4 * 101);
        assert_eq!(mock::write_sizes(&log), vec![4, 1]);
    }

    #[test]
    fn test_transport_error_propagates_without_retry() {
        let log = mock::log();
        let mut channel =
            Channel::new(MockUart::failing_after(&log, 1), MockReady::always(&log), 4);

        assert_eq!(channel.write(&[0; 12]), Err(MockError));
        // First chunk went out, second failed, third never attempted
        assert_eq!(mock::write_sizes(&log), vec![4]);
    }

    #[test]
    fn test_chunk_size_is_clamped() {
        let log = mock::log();
        let channel = Channel::new(MockUart::new(&log), MockReady::always(&log), 0);
        assert_eq!(channel.chunk_size(), 1);
        let channel = Channel::new(MockUart::new(&log), MockReady::always(&log), 1000);
        assert_eq!(channel.chunk_size(), MAX_CHUNK_SIZE);
    }

    struct NullUart;

    impl UartTx for NullUart {
        type Error = MockError;

        fn write_blocking(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_stuck_ready_line_blocks_instead_of_failing() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();

        let handle = std::thread::spawn(move || {
            let ready = ReadyFn::new(move || {
                counter.fetch_add(1, Ordering::Relaxed);
                false
            });
            let mut channel = Channel::with_default_chunks(NullUart, ready);
            channel.write(&[0x0C])
        });

        // Keep sampling until the writer has clearly been spinning a while
        while polls.load(Ordering::Relaxed) < 100_000 {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(!handle.is_finished());
        // The writer thread is left spinning; it ends with the test process.
    }

    proptest! {
        #[test]
        fn chunks_reassemble_to_input(
            data in proptest::collection::vec(any::<u8>(), 0..200),
            chunk_size in 1usize..=MAX_CHUNK_SIZE,
        ) {
            let log = mock::log();
            let mut channel =
                Channel::new(MockUart::new(&log), MockReady::always(&log), chunk_size);
            channel.write(&data).unwrap();

            let sizes = mock::write_sizes(&log);
            prop_assert_eq!(sizes.len(), data.len().div_ceil(chunk_size));
            prop_assert!(sizes.iter().all(|&s| s >= 1 && s <= chunk_size));
            prop_assert_eq!(mock::written(&log), data);
        }
    }
}
