//! Test doubles for the serial link
//!
//! The UART and the ready pin share one event log, so tests can assert the
//! exact interleaving of ready checks, writes, and flushes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use gu7000_hal::{InputPin, UartTx};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Ready line sampled high
    Ready,
    Write(Vec<u8>),
    Flush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// All bytes written so far, in order
pub fn written(log: &Log) -> Vec<u8> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Write(bytes) => Some(bytes.clone()),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Sizes of the individual writes
pub fn write_sizes(log: &Log) -> Vec<usize> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Write(bytes) => Some(bytes.len()),
            _ => None,
        })
        .collect()
}

/// Count occurrences of `needle` in the written byte stream
pub fn count_sequence(log: &Log, needle: &[u8]) -> usize {
    let bytes = written(log);
    bytes.windows(needle.len()).filter(|w| *w == needle).count()
}

/// Shared flag that makes a [`MockUart`] fail while set
pub type FailSwitch = Rc<Cell<bool>>;

pub fn fail_switch() -> FailSwitch {
    Rc::new(Cell::new(false))
}

pub struct MockUart {
    log: Log,
    /// Fail every write once this many writes succeeded
    fail_after: Option<usize>,
    writes: usize,
    switch: Option<FailSwitch>,
}

impl MockUart {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            fail_after: None,
            writes: 0,
            switch: None,
        }
    }

    pub fn failing_after(log: &Log, writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::new(log)
        }
    }

    /// UART that fails whenever `switch` is set
    pub fn switchable(log: &Log, switch: &FailSwitch) -> Self {
        Self {
            switch: Some(switch.clone()),
            ..Self::new(log)
        }
    }
}

impl UartTx for MockUart {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_after.is_some_and(|n| self.writes >= n)
            || self.switch.as_ref().is_some_and(|s| s.get())
        {
            return Err(MockError);
        }
        self.writes += 1;
        self.log.borrow_mut().push(Event::Write(data.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

/// Ready pin that reads low `busy` times before each high
pub struct MockReady {
    log: Log,
    busy: usize,
    remaining: usize,
    pub polls: usize,
}

impl MockReady {
    pub fn always(log: &Log) -> Self {
        Self::busy_for(log, 0)
    }

    pub fn busy_for(log: &Log, busy: usize) -> Self {
        Self {
            log: log.clone(),
            busy,
            remaining: busy,
            polls: 0,
        }
    }
}

impl InputPin for MockReady {
    fn is_high(&mut self) -> bool {
        self.polls += 1;
        if self.remaining > 0 {
            self.remaining -= 1;
            return false;
        }
        self.remaining = self.busy;
        self.log.borrow_mut().push(Event::Ready);
        true
    }
}
