//! Inbound frame parsing
//!
//! The device answers each read word during the next word, so the data for
//! the word at slot `k` sits in slot `k + 1` of the inbound frame. Values are
//! sent high byte first.

use crate::transaction::{RegTracker, WORD_LEN};

fn be_u16(rx: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([rx[at], rx[at + 1]])
}

/// Value of a single register read
///
/// The read word sits at slot 0, or slot 1 behind a page-select word; its
/// response is one slot later.
pub(crate) fn single_read(rx: &[u8], page_selected: bool) -> u16 {
    let slot = 1 + usize::from(page_selected);
    be_u16(rx, slot * WORD_LEN)
}

/// Values of an array read, in request order
pub(crate) fn array_read(rx: &[u8], count: usize, tracker: RegTracker) -> ArrayValues<'_> {
    ArrayValues {
        rx,
        tracker,
        count,
        index: 0,
        cursor: WORD_LEN,
    }
}

/// Iterator over the registers returned by an array read
#[derive(Debug, Clone)]
pub(crate) struct ArrayValues<'a> {
    rx: &'a [u8],
    tracker: RegTracker,
    count: usize,
    index: usize,
    cursor: usize,
}

impl Iterator for ArrayValues<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.index >= self.count {
            return None;
        }
        // A page-select word answers with garbage in the slot before the data
        if self.tracker.is_marked(self.index) {
            self.cursor += WORD_LEN;
        }
        let value = be_u16(self.rx, self.cursor);
        self.cursor += WORD_LEN;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArrayValues<'_> {}
