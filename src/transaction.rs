//! Outbound frame construction
//!
//! Every bus word is two bytes: an address byte and a payload byte. Bit 7 of
//! the address byte selects a write; a read word carries a zero payload and
//! its data comes back in the following word's slot. Frames built here are
//! handed to the bus unchanged and parsed by [`crate::response`].

use crate::address::RegisterAddress;

/// Bytes per bus word for discrete register access
pub const WORD_LEN: usize = 2;

/// Most registers one [`read_register_array`](crate::AdisDriver::read_register_array)
/// call may request
pub const MAX_ARRAY_READ: usize = 32;

/// Capacity of the driver's transmit and receive buffers
///
/// Sized for the worst-case array read: a page-select word before every
/// entry, plus the trailing flush word.
pub const BUFFER_CAPACITY: usize = WORD_LEN * (2 * MAX_ARRAY_READ + 1);

const WRITE_BIT: u8 = 0x80;

/// Word writing `value` to the byte at `offset`
pub(crate) const fn write_word(offset: u8, value: u8) -> [u8; 2] {
    [WRITE_BIT | offset, value]
}

/// Word requesting the 16-bit register at `offset`
pub(crate) const fn read_word(offset: u8) -> [u8; 2] {
    [offset & !WRITE_BIT, 0]
}

/// A page-select write to be placed ahead of the words that need it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct PageSelect {
    /// Offset of the page register (mirrored on every page)
    pub(crate) register: u8,
    /// Page to select
    pub(crate) page: u8,
}

impl PageSelect {
    pub(crate) const fn word(self) -> [u8; 2] {
        write_word(self.register, self.page)
    }
}

/// Records which array-read entries were preceded by a page-select word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct RegTracker(u32);

impl RegTracker {
    pub(crate) fn mark(&mut self, index: usize) {
        self.0 |= 1 << index;
    }

    pub(crate) const fn is_marked(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }
}

/// Fixed-capacity outbound frame
///
/// Callers never exceed [`BUFFER_CAPACITY`]; the driver validates its
/// profile and configuration against it at construction.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    bytes: [u8; BUFFER_CAPACITY],
    len: usize,
}

impl Frame {
    pub(crate) const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_CAPACITY],
            len: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    fn push_word(&mut self, word: [u8; 2]) {
        self.bytes[self.len..self.len + WORD_LEN].copy_from_slice(&word);
        self.len += WORD_LEN;
    }

    fn push_zeros(&mut self, count: usize) {
        self.bytes[self.len..self.len + count].fill(0);
        self.len += count;
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// A lone page-select word
pub(crate) fn page_select(frame: &mut Frame, select: PageSelect) {
    frame.clear();
    frame.push_word(select.word());
}

/// Write a 16-bit value, low byte first
///
/// `[select?] [W|offset, lo] [W|offset+1, hi]`
pub(crate) fn single_write(
    frame: &mut Frame,
    select: Option<PageSelect>,
    address: RegisterAddress,
    value: u16,
) {
    let [high, low] = value.to_be_bytes();
    frame.clear();
    if let Some(select) = select {
        frame.push_word(select.word());
    }
    frame.push_word(write_word(address.offset(), low));
    frame.push_word(write_word(address.high_offset(), high));
}

/// Read a 16-bit register
///
/// `[select?] [offset, 0] [offset+1, 0]`. The second read word only clocks
/// out the first one's response.
pub(crate) fn single_read(frame: &mut Frame, select: Option<PageSelect>, address: RegisterAddress) {
    frame.clear();
    if let Some(select) = select {
        frame.push_word(select.word());
    }
    frame.push_word(read_word(address.offset()));
    frame.push_word(read_word(address.high_offset()));
}

/// Read several registers in one burst
///
/// On paged devices (`page_register` is `Some`) a page-select word goes
/// before the first entry and before every entry whose page differs from
/// its predecessor's. One zero word is appended to flush the last read.
pub(crate) fn array_read(
    frame: &mut Frame,
    page_register: Option<u8>,
    addresses: &[RegisterAddress],
) -> RegTracker {
    let mut tracker = RegTracker::default();
    let mut current_page = None;
    frame.clear();

    for (index, address) in addresses.iter().enumerate() {
        if let Some(register) = page_register {
            if current_page != Some(address.page()) {
                frame.push_word(
                    PageSelect {
                        register,
                        page: address.page(),
                    }
                    .word(),
                );
                tracker.mark(index);
                current_page = Some(address.page());
            }
        }
        frame.push_word(read_word(address.offset()));
    }

    frame.push_word([0, 0]);
    tracker
}

/// Burst trigger: the trigger register's read word, then `payload_len`
/// zero bytes for the device to clock the sample out on
pub(crate) fn burst(frame: &mut Frame, trigger: RegisterAddress, payload_len: usize) {
    frame.clear();
    frame.push_word(read_word(trigger.offset()));
    frame.push_zeros(payload_len);
}

/// Length of the largest array-read frame for `entries` registers
pub(crate) const fn array_read_len(entries: usize, paged: bool) -> usize {
    let selects = if paged { entries } else { 0 };
    WORD_LEN * (entries + selects + 1)
}
