//! Page selection state
//!
//! Paged parts only decode register offsets relative to the page held in
//! their `PAGE_ID` register. The driver mirrors that register here so it can
//! skip page-select writes when the device is already on the right page.
//! The belief is dropped (`invalidate`) whenever it may no longer match the
//! hardware: at cold start, after a reset, after a failed transfer that
//! carried a page select, and after a raw write to the page register.

/// What has to happen before a register on a given page can be accessed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum PageAction {
    /// The device is known to be on the target page
    None,
    /// The device page is unknown and must be read back first
    Refresh,
    /// The device is on another page; a page-select word is required
    Select(u8),
}

/// Cached copy of the device's active page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct PageCache {
    paged: bool,
    active: Option<u8>,
}

impl PageCache {
    /// A cache for a device with or without paging
    ///
    /// Unpaged devices start valid on page 0 and never change.
    pub(crate) const fn new(paged: bool) -> Self {
        Self {
            paged,
            active: if paged { None } else { Some(0) },
        }
    }

    pub(crate) const fn is_paged(&self) -> bool {
        self.paged
    }

    #[cfg(test)]
    pub(crate) const fn is_valid(&self) -> bool {
        self.active.is_some()
    }

    /// The cached page, if the cache is valid
    #[cfg(test)]
    pub(crate) const fn active(&self) -> Option<u8> {
        self.active
    }

    /// Decide what is needed to reach `target`
    pub(crate) const fn plan(&self, target: u8) -> PageAction {
        if !self.paged {
            return PageAction::None;
        }
        match self.active {
            None => PageAction::Refresh,
            Some(page) if page == target => PageAction::None,
            Some(_) => PageAction::Select(target),
        }
    }

    /// Record a page the device is now known to be on
    pub(crate) fn set(&mut self, page: u8) {
        if self.paged {
            self.active = Some(page);
        }
    }

    /// Forget the cached page
    pub(crate) fn invalidate(&mut self) {
        if self.paged {
            self.active = None;
        }
    }
}
