//! Conversion of raw samples to physical units
//!
//! Every channel is converted as `raw / scale`, with `scale` given in raw
//! counts per physical unit. The factors depend on the channel width read
//! and, on range-configurable parts, on the range the device reports.

use crate::address::RegisterAddress;
use crate::burst::{ChannelWidth, RawSample, Triad};

/// Counts per physical unit for one channel, per burst width
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelScale {
    /// Counts per unit for 16-bit outputs
    pub bits16: f32,
    /// Counts per unit for 32-bit outputs
    pub bits32: f32,
}

impl ChannelScale {
    /// Factor for the given width
    #[must_use]
    pub const fn for_width(self, width: ChannelWidth) -> f32 {
        match width {
            ChannelWidth::Bits16 => self.bits16,
            ChannelWidth::Bits32 => self.bits32,
        }
    }
}

/// One gyroscope range a device may report
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeOption {
    /// Field value in the range register
    pub code: u16,
    /// Gyroscope sensitivity for this range
    pub gyro: ChannelScale,
}

/// Read-only register reporting the factory-configured gyroscope range
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeRegister {
    /// Register address
    pub address: RegisterAddress,
    /// Field mask, before shifting
    pub mask: u16,
    /// Field position
    pub shift: u8,
    /// Known field values
    pub options: &'static [RangeOption],
}

impl RangeRegister {
    /// Extract the range field from a register value
    #[must_use]
    pub const fn code(&self, value: u16) -> u16 {
        (value & self.mask) >> self.shift
    }

    /// Gyroscope sensitivity for a register value
    #[must_use]
    pub fn gyro_scale(&self, value: u16) -> Option<ChannelScale> {
        let code = self.code(value);
        self.options
            .iter()
            .find(|option| option.code == code)
            .map(|option| option.gyro)
    }
}

/// Fixed scale data of a device variant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleProfile {
    /// Gyroscope sensitivity, LSB/(°/s); overridden by the range register when present
    pub gyro: ChannelScale,
    /// Accelerometer sensitivity, LSB/g
    pub accel: ChannelScale,
    /// Temperature sensitivity, LSB/°C
    pub temperature: f32,
    /// Temperature reported by a raw value of zero, °C
    pub temperature_offset: f32,
    /// Magnetometer sensitivity, LSB/mgauss
    pub magnetometer: Option<f32>,
    /// Barometer sensitivity, LSB/mbar
    pub barometer: Option<f32>,
}

impl ScaleProfile {
    /// Resolve the factors for one channel width
    #[must_use]
    pub const fn table(&self, width: ChannelWidth, gyro: ChannelScale) -> ScaleFactorTable {
        ScaleFactorTable {
            gyro: gyro.for_width(width),
            accel: self.accel.for_width(width),
            temperature: self.temperature,
            temperature_offset: self.temperature_offset,
            magnetometer: self.magnetometer,
            barometer: self.barometer,
        }
    }
}

/// Scale factors in effect for the configured width and range
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleFactorTable {
    /// LSB/(°/s)
    pub gyro: f32,
    /// LSB/g
    pub accel: f32,
    /// LSB/°C
    pub temperature: f32,
    /// °C at a raw value of zero
    pub temperature_offset: f32,
    /// LSB/mgauss
    pub magnetometer: Option<f32>,
    /// LSB/mbar
    pub barometer: Option<f32>,
}

/// A sample in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaledSample {
    /// Status/diagnostic word
    pub status: Option<u16>,
    /// Sample counter
    pub counter: Option<u16>,
    /// Angular rate, °/s
    pub gyro: Triad<f32>,
    /// Acceleration, g
    pub accel: Triad<f32>,
    /// Temperature, °C
    pub temperature: f32,
    /// Magnetic field, mgauss
    pub magnetometer: Option<Triad<f32>>,
    /// Pressure, mbar
    pub barometer: Option<f32>,
}

/// Convert a raw sample
///
/// Optional channels are only produced when both the sample carries them and
/// the table has a factor for them.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn scale(raw: &RawSample, table: &ScaleFactorTable) -> ScaledSample {
    ScaledSample {
        status: raw.status,
        counter: raw.counter,
        gyro: raw.gyro.map(|v| v as f32 / table.gyro),
        accel: raw.accel.map(|v| v as f32 / table.accel),
        temperature: raw.temperature as f32 / table.temperature + table.temperature_offset,
        magnetometer: raw
            .magnetometer
            .zip(table.magnetometer)
            .map(|(m, s)| m.map(|v| f32::from(v) / s)),
        barometer: raw
            .barometer
            .zip(table.barometer)
            .map(|(b, s)| f32::from(b) / s),
    }
}
