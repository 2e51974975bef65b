//! Frame diffing down to a page-aligned band
//!
//! Pure logic: compares two frames and reports the vertical band of rows
//! that must be retransmitted. Pixels are compared by lit state, so two
//! different non-zero intensities count as equal.

use gu7000_protocol::{PAGE_HEIGHT, PIXEL_THRESHOLD};

use crate::frame::Frame;

/// Half-open row range `[start_y, end_y)`, both page aligned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band {
    pub start_y: u16,
    pub end_y: u16,
}

impl Band {
    /// Band covering a whole frame of `height` rows
    pub const fn full(height: u16) -> Self {
        Self {
            start_y: 0,
            end_y: height,
        }
    }

    /// Number of rows in the band
    pub const fn height(&self) -> u16 {
        self.end_y - self.start_y
    }

    /// Check if the band covers no rows
    pub const fn is_empty(&self) -> bool {
        self.start_y == self.end_y
    }
}

/// Result of comparing a new frame against the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiffOutcome {
    /// No pixel differs
    Identical,
    /// The forward scan hit a row but the reverse scan did not
    ///
    /// Handled like an empty frame: counted by the screensaver, not sent.
    EmptyDiff,
    /// Rows `[raw_start, raw_end)` contain every difference (unaligned)
    Changed { raw_start: u16, raw_end: u16 },
}

/// Compare two frames of equal size
pub fn diff(new: &Frame, previous: &Frame) -> DiffOutcome {
    classify(first_diff_row(new, previous), last_diff_row(new, previous))
}

/// Combine the results of the forward and reverse scans
///
/// `last` is the index of the last differing row (inclusive).
pub fn classify(first: Option<u16>, last: Option<u16>) -> DiffOutcome {
    match (first, last) {
        (None, _) => DiffOutcome::Identical,
        // Reverse pass found nothing: no usable band
        (Some(_), None) => DiffOutcome::EmptyDiff,
        (Some(raw_start), Some(last)) => DiffOutcome::Changed {
            raw_start,
            raw_end: last.saturating_add(1),
        },
    }
}

/// Top-to-bottom scan for the first row with a differing pixel
pub fn first_diff_row(new: &Frame, previous: &Frame) -> Option<u16> {
    (0..new.height()).find(|&y| row_differs(new, previous, y))
}

/// Bottom-to-top scan for the last row with a differing pixel
pub fn last_diff_row(new: &Frame, previous: &Frame) -> Option<u16> {
    (0..new.height()).rev().find(|&y| row_differs(new, previous, y))
}

fn row_differs(a: &Frame, b: &Frame, y: u16) -> bool {
    match (a.row(y), b.row(y)) {
        (Some(a), Some(b)) => a
            .iter()
            .zip(b)
            .any(|(&p, &q)| (p >= PIXEL_THRESHOLD) != (q >= PIXEL_THRESHOLD)),
        (None, None) => false,
        _ => true,
    }
}

/// Align a raw row range to display pages
///
/// The start snaps to the nearest page boundary (halfway rounds up); the
/// end rounds up to the next boundary. Both are clamped to `height`.
pub fn align_band(raw_start: u16, raw_end: u16, height: u16) -> Band {
    let page = PAGE_HEIGHT as u32;
    let start = (raw_start as u32 + page / 2) / page * page;
    let end = (raw_end as u32).div_ceil(page) * page;
    let height = height as u32;

    let end_y = end.min(height) as u16;
    let start_y = start.min(end_y as u32) as u16;
    Band { start_y, end_y }
}
