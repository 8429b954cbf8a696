//! Register addressing
//!
//! ADIS parts expose 16-bit registers in 128-byte windows called pages. A
//! register is identified by a 16-bit id `0xPPOO`: the high byte is the page,
//! the low byte the byte offset of the register's low half. Devices without
//! paging put every register on page 0.

/// Physical location of a 16-bit register
///
/// The offset is always even; the constructors reject odd offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterAddress {
    page: u8,
    offset: u8,
}

impl RegisterAddress {
    /// Create an address from a page and a byte offset
    ///
    /// # Panics
    ///
    /// Panics if `offset` is odd. Used in `const` register tables, where the
    /// panic surfaces as a compile error.
    #[must_use]
    pub const fn new(page: u8, offset: u8) -> Self {
        assert!(offset & 1 == 0, "register offsets are 16-bit aligned");
        Self { page, offset }
    }

    /// Create an address, returning `None` for an odd offset
    #[must_use]
    pub const fn try_new(page: u8, offset: u8) -> Option<Self> {
        if offset & 1 == 0 {
            Some(Self { page, offset })
        } else {
            None
        }
    }

    /// Resolve a `0xPPOO` register id into its page and offset
    ///
    /// # Panics
    ///
    /// Panics if the offset byte is odd.
    #[must_use]
    pub const fn from_id(id: u16) -> Self {
        let [page, offset] = id.to_be_bytes();
        Self::new(page, offset)
    }

    /// Page holding the register
    #[must_use]
    pub const fn page(self) -> u8 {
        self.page
    }

    /// Byte offset of the register's low half within its page
    #[must_use]
    pub const fn offset(self) -> u8 {
        self.offset
    }

    /// Byte offset of the register's high half
    #[must_use]
    pub const fn high_offset(self) -> u8 {
        self.offset + 1
    }

    /// The `0xPPOO` id of this register
    #[must_use]
    pub const fn id(self) -> u16 {
        u16::from_be_bytes([self.page, self.offset])
    }

    /// The same register offset on a different page
    #[must_use]
    pub const fn on_page(self, page: u8) -> Self {
        Self {
            page,
            offset: self.offset,
        }
    }
}

impl From<RegisterAddress> for u16 {
    fn from(address: RegisterAddress) -> Self {
        address.id()
    }
}
