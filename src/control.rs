//! Device control and identification types
//!
//! Miscellaneous-control settings, firmware identification and the
//! snapshots returned by [`AdisDriver::device_info`](crate::AdisDriver::device_info)
//! and [`AdisDriver::self_test`](crate::AdisDriver::self_test).

/// Signal polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Active low, or falling edge for inputs
    Low = 0,
    /// Active high, or rising edge for inputs
    #[default]
    High = 1,
}

impl Polarity {
    const fn from_bit(set: bool) -> Self {
        if set { Self::High } else { Self::Low }
    }
}

/// Sample clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    /// Internal oscillator
    #[default]
    Internal = 0,
    /// Each edge on the sync pin starts a sample
    ExternalSync = 1,
    /// Internal clock scaled from a pulse-per-second input
    Pps = 2,
}

impl ClockMode {
    /// Decode a sync-mode field value
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Internal),
            1 => Some(Self::ExternalSync),
            2 => Some(Self::Pps),
            _ => None,
        }
    }
}

/// `MSC_CTRL` field positions
pub(crate) mod msc {
    pub(crate) const DR_POLARITY: u16 = 1 << 0;
    pub(crate) const SYNC_POLARITY: u16 = 1 << 1;
    pub(crate) const SYNC_SHIFT: u16 = 2;
    pub(crate) const SYNC_MASK: u16 = 0b111 << SYNC_SHIFT;
    pub(crate) const POP: u16 = 1 << 6;
    pub(crate) const LINEAR_G: u16 = 1 << 7;
    /// Every bit owned by [`MiscControl`](super::MiscControl)
    pub(crate) const FIELDS: u16 = DR_POLARITY | SYNC_POLARITY | SYNC_MASK | POP | LINEAR_G;
}

/// Settings held in the miscellaneous-control register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MiscControl {
    /// Data-ready output polarity
    pub data_ready_polarity: Polarity,
    /// Sync input edge
    pub sync_polarity: Polarity,
    /// Sample clock source
    pub clock_mode: ClockMode,
    /// Linear-g compensation for the gyroscopes
    pub linear_g_compensation: bool,
    /// Point-of-percussion alignment
    pub pop_compensation: bool,
}

impl Default for MiscControl {
    /// Factory setting (`MSC_CTRL` = 0x00C1)
    fn default() -> Self {
        Self {
            data_ready_polarity: Polarity::High,
            sync_polarity: Polarity::Low,
            clock_mode: ClockMode::Internal,
            linear_g_compensation: true,
            pop_compensation: true,
        }
    }
}

impl MiscControl {
    /// Register bits for these settings
    ///
    /// Bits the settings do not own are left clear.
    #[must_use]
    pub const fn to_raw(&self) -> u16 {
        let mut value = (self.clock_mode as u16) << msc::SYNC_SHIFT;
        if matches!(self.data_ready_polarity, Polarity::High) {
            value |= msc::DR_POLARITY;
        }
        if matches!(self.sync_polarity, Polarity::High) {
            value |= msc::SYNC_POLARITY;
        }
        if self.pop_compensation {
            value |= msc::POP;
        }
        if self.linear_g_compensation {
            value |= msc::LINEAR_G;
        }
        value
    }

    /// Decode a register value; `None` if the sync field holds a mode this
    /// driver does not model
    #[must_use]
    pub const fn from_raw(value: u16) -> Option<Self> {
        let Some(clock_mode) = ClockMode::from_code((value & msc::SYNC_MASK) >> msc::SYNC_SHIFT)
        else {
            return None;
        };
        Some(Self {
            data_ready_polarity: Polarity::from_bit(value & msc::DR_POLARITY != 0),
            sync_polarity: Polarity::from_bit(value & msc::SYNC_POLARITY != 0),
            clock_mode,
            linear_g_compensation: value & msc::LINEAR_G != 0,
            pop_compensation: value & msc::POP != 0,
        })
    }

    /// Merge these settings into an existing register value
    #[must_use]
    pub(crate) const fn apply(&self, current: u16) -> u16 {
        (current & !msc::FIELDS) | self.to_raw()
    }
}

const fn bcd(value: u16) -> u16 {
    let mut out = 0;
    let mut scale = 1;
    let mut rest = value;
    while rest != 0 {
        out += (rest & 0xF) * scale;
        scale *= 10;
        rest >>= 4;
    }
    out
}

/// Firmware revision, decoded from `FIRM_REV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareRevision {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
}

impl FirmwareRevision {
    /// Decode the BCD register value (`0x0106` is 1.06)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_raw(value: u16) -> Self {
        Self {
            major: bcd(value >> 8) as u8,
            minor: bcd(value & 0xFF) as u8,
        }
    }
}

/// Firmware build date, decoded from `FIRM_DM` and `FIRM_Y`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareDate {
    /// Day of month
    pub day: u8,
    /// Month
    pub month: u8,
    /// Year
    pub year: u16,
}

impl FirmwareDate {
    /// Decode the BCD registers: `FIRM_DM` is `0xMMDD`, `FIRM_Y` is `0xYYYY`
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_raw(day_month: u16, year: u16) -> Self {
        Self {
            day: bcd(day_month & 0xFF) as u8,
            month: bcd(day_month >> 8) as u8,
            year: bcd(year),
        }
    }
}

/// Identification and configuration snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    /// `PROD_ID`
    pub product_id: u16,
    /// Firmware revision
    pub firmware_revision: FirmwareRevision,
    /// Firmware build date
    pub firmware_date: FirmwareDate,
    /// `SERIAL_NUM`
    pub serial_number: u16,
    /// `DEC_RATE`
    pub decimation: u16,
    /// Page the device reported, on paged parts
    pub active_page: Option<u8>,
    /// Raw range register, on parts that report their range
    pub range: Option<u16>,
    /// Sample clock source, on parts with a misc-control register
    pub clock_mode: Option<ClockMode>,
    pub(crate) output_rate: u32,
}

impl DeviceInfo {
    /// Output data rate implied by the decimation setting, Hz
    #[must_use]
    pub const fn output_data_rate_hz(&self) -> u32 {
        self.output_rate
    }
}

/// Outcome of an on-chip self-test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestReport {
    /// Diagnostic register read after the test
    pub diagnostic: u16,
    /// No failure bit was set
    pub passed: bool,
}
