//! Device variant descriptions
//!
//! A [`DeviceProfile`] holds everything the driver needs to know about one
//! IMU variant: its capabilities, where its registers live, how its burst
//! frames are laid out and how raw counts map to physical units. Profiles
//! are plain `const` data; pick one at construction time.

pub mod adis1647x;
pub mod adis1648x;
pub mod adis1649x;

use crate::address::RegisterAddress;
use crate::burst::{BurstLayout, ChannelWidth};
use crate::scale::{RangeRegister, ScaleFactorTable, ScaleProfile};
use crate::transaction::BUFFER_CAPACITY;

/// Optional features of a device variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// Registers are spread over pages selected through `PAGE_ID`
    pub paged: bool,
    /// `DEC_RATE` accepts any divisor instead of a power-of-two exponent
    pub arbitrary_decimation: bool,
    /// Sampling can follow an external clock on the sync pin
    pub external_sync: bool,
    /// Sampling can be scaled from a pulse-per-second input
    pub pps: bool,
}

/// Addresses of the registers the driver uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterMap {
    /// Page register, mirrored at the same offset on every page
    pub page_id: Option<RegisterAddress>,
    /// `PROD_ID`
    pub product_id: RegisterAddress,
    /// `FIRM_REV`
    pub firmware_revision: RegisterAddress,
    /// `FIRM_DM`
    pub firmware_day_month: RegisterAddress,
    /// `FIRM_Y`
    pub firmware_year: RegisterAddress,
    /// `SERIAL_NUM`
    pub serial_number: RegisterAddress,
    /// User scratch register used by the loopback check
    pub scratch: RegisterAddress,
    /// `GLOB_CMD`
    pub command: RegisterAddress,
    /// `DEC_RATE`
    pub decimation: RegisterAddress,
    /// Diagnostic/status register checked after a self-test
    pub diagnostic: RegisterAddress,
    /// `MSC_CTRL`
    pub misc_control: Option<RegisterAddress>,
}

/// A `GLOB_CMD` bit and how long the device is busy after it is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandSpec {
    /// Value written to the command register
    pub mask: u16,
    /// Wait before the device accepts further traffic
    pub duration_ms: u32,
}

/// Commands issued through the command register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Commands {
    /// Software reset
    pub software_reset: CommandSpec,
    /// Store user configuration to flash
    pub flash_update: CommandSpec,
    /// Run the on-chip self-test
    pub self_test: CommandSpec,
    /// Apply the bias null estimate
    pub bias_correction_update: CommandSpec,
}

/// Complete description of one device variant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceProfile {
    /// Part name
    pub name: &'static str,
    /// Expected `PROD_ID` value
    pub product_id: u16,
    /// Optional features
    pub capabilities: Capabilities,
    /// Register locations
    pub registers: RegisterMap,
    /// Burst frame with 16-bit inertial channels
    pub burst16: Option<BurstLayout>,
    /// Burst frame with 32-bit inertial channels
    pub burst32: Option<BurstLayout>,
    /// `MSC_CTRL` bit switching the hardware to 32-bit bursts
    pub burst32_enable: Option<u16>,
    /// Fixed scale factors
    pub scales: ScaleProfile,
    /// Range register, when the gyroscope range is read from the device
    pub range: Option<RangeRegister>,
    /// Internal sample rate, Hz
    pub max_data_rate: u32,
    /// Minimum idle time between bus words, µs
    pub stall_us: u32,
    /// Command bits and their durations
    pub commands: Commands,
    /// Bits of the diagnostic register that flag a failed self-test
    pub self_test_failure_mask: u16,
}

impl DeviceProfile {
    /// Burst layout for a channel width, if the variant offers it
    #[must_use]
    pub const fn burst_layout(&self, width: ChannelWidth) -> Option<&BurstLayout> {
        match width {
            ChannelWidth::Bits16 => self.burst16.as_ref(),
            ChannelWidth::Bits32 => self.burst32.as_ref(),
        }
    }

    /// Whether the variant supports burst reads at all
    #[must_use]
    pub const fn supports_burst(&self) -> bool {
        self.burst16.is_some() || self.burst32.is_some()
    }

    /// Widest burst width the variant offers
    #[must_use]
    pub const fn widest_burst(&self) -> Option<ChannelWidth> {
        if self.burst32.is_some() {
            Some(ChannelWidth::Bits32)
        } else if self.burst16.is_some() {
            Some(ChannelWidth::Bits16)
        } else {
            None
        }
    }

    /// Select the scale table for a width and a range register value
    ///
    /// `range_value` is the raw content of the range register; it is ignored
    /// on variants with a fixed range. Returns `None` for a range code
    /// without a known scale.
    #[must_use]
    pub fn scale_table(
        &self,
        width: ChannelWidth,
        range_value: Option<u16>,
    ) -> Option<ScaleFactorTable> {
        let gyro = match (self.range, range_value) {
            (Some(range), Some(value)) => range.gyro_scale(value)?,
            (Some(_), None) => return None,
            (None, _) => self.scales.gyro,
        };
        Some(self.scales.table(width, gyro))
    }

    /// `DEC_RATE` value producing `rate` Hz, if the rate is reachable
    ///
    /// The rate must divide the internal sample rate. Without arbitrary
    /// decimation the divisor must also be a power of two, encoded as its
    /// exponent.
    #[must_use]
    pub fn decimation_for(&self, rate: u32) -> Option<u16> {
        if rate == 0 || rate > self.max_data_rate || self.max_data_rate % rate != 0 {
            return None;
        }
        let divisor = self.max_data_rate / rate;
        if self.capabilities.arbitrary_decimation {
            u16::try_from(divisor - 1).ok()
        } else if divisor.is_power_of_two() {
            u16::try_from(divisor.trailing_zeros()).ok()
        } else {
            None
        }
    }

    /// Output rate in Hz for a `DEC_RATE` value
    #[must_use]
    pub fn output_rate(&self, decimation: u16) -> u32 {
        if self.capabilities.arbitrary_decimation {
            self.max_data_rate / (u32::from(decimation) + 1)
        } else {
            self.max_data_rate
                .checked_shr(u32::from(decimation))
                .unwrap_or(0)
        }
    }

    /// Check the profile for internal consistency
    ///
    /// Every burst layout must fit the driver's buffers and place each
    /// channel inside its payload; a paged variant needs a page register,
    /// and the sample rate must be non-zero.
    #[must_use]
    pub fn validate(&self) -> bool {
        let layouts_ok = [
            (self.burst16, ChannelWidth::Bits16),
            (self.burst32, ChannelWidth::Bits32),
        ]
        .iter()
        .all(|(layout, width)| {
            layout.is_none_or(|l| {
                l.width == *width && l.is_consistent() && l.frame_len() <= BUFFER_CAPACITY
            })
        });

        let optional_scales_ok = [self.burst16, self.burst32].iter().flatten().all(|l| {
            (l.magnetometer.is_none() || self.scales.magnetometer.is_some())
                && (l.barometer.is_none() || self.scales.barometer.is_some())
        });

        layouts_ok
            && optional_scales_ok
            && self.capabilities.paged == self.registers.page_id.is_some()
            && (self.burst32_enable.is_none() || self.registers.misc_control.is_some())
            && self.max_data_rate > 0
    }
}
