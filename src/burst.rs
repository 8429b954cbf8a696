//! Burst-mode sample frames
//!
//! A burst read sends the trigger register's read word and keeps chip select
//! asserted while the device streams a complete sample. The first word of the
//! response is the latent answer to whatever preceded the trigger; the
//! payload starts right after it. Channel positions are fixed per device and
//! described by a [`BurstLayout`].
//!
//! # Example
//!
//! ```
//! use adis_imu::burst::decode;
//! use adis_imu::profile::adis1647x::BURST_16;
//!
//! let payload = [
//!     0x00, 0x00, // DIAG_STAT
//!     0x00, 0x0A, 0xFF, 0xF6, 0x00, 0x00, // gyro
//!     0x0F, 0xA0, 0x00, 0x00, 0xF0, 0x60, // accel
//!     0x00, 0xFA, // temperature
//!     0x00, 0x07, // DATA_CNTR
//!     0x00, 0x00, // checksum
//! ];
//! let sample = decode(&BURST_16, &payload);
//! assert_eq!(sample.gyro.y, -10);
//! assert_eq!(sample.accel.x, 4000);
//! assert_eq!(sample.counter, Some(7));
//! ```

use crate::address::RegisterAddress;

/// Width of the gyroscope and accelerometer channels in a burst frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelWidth {
    /// One 16-bit word per channel
    Bits16,
    /// Two 16-bit words per channel
    Bits32,
}

impl ChannelWidth {
    /// Payload bytes taken by one channel
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Bits16 => 2,
            Self::Bits32 => 4,
        }
    }
}

/// Order of the two half-words making up a 32-bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalfWordOrder {
    /// `*_LOW` register first, then `*_OUT` (all current ADIS parts)
    LowFirst,
    /// `*_OUT` register first, then `*_LOW`
    HighFirst,
}

/// How the frame's checksum field is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumKind {
    /// 16-bit sum of every payload byte before the checksum
    ByteSum16,
    /// 32-bit CRC sent as two half-words (extracted, not validated)
    Crc32,
}

impl ChecksumKind {
    /// Payload bytes taken by the checksum field
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::ByteSum16 => 2,
            Self::Crc32 => 4,
        }
    }
}

/// Position and kind of a burst checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChecksumField {
    /// Byte offset within the payload
    pub offset: usize,
    /// Checksum algorithm
    pub kind: ChecksumKind,
}

/// Byte layout of one burst frame
///
/// Offsets are relative to the start of the payload, i.e. after the
/// trigger's response word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstLayout {
    /// Register whose read word starts the burst
    pub trigger: RegisterAddress,
    /// Payload length in bytes
    pub length: usize,
    /// Width of the gyro and accel channels
    pub width: ChannelWidth,
    /// Half-word order of 32-bit channels
    pub order: HalfWordOrder,
    /// Status/diagnostic word
    pub status: Option<usize>,
    /// Gyroscope X, Y, Z
    pub gyro: [usize; 3],
    /// Accelerometer X, Y, Z
    pub accel: [usize; 3],
    /// Temperature (always 16-bit)
    pub temperature: usize,
    /// Sample counter
    pub counter: Option<usize>,
    /// Magnetometer X, Y, Z (16-bit)
    pub magnetometer: Option<[usize; 3]>,
    /// Barometer (16-bit)
    pub barometer: Option<usize>,
    /// Checksum field
    pub checksum: Option<ChecksumField>,
}

impl BurstLayout {
    /// Total bytes on the bus for one burst, trigger word included
    #[must_use]
    pub const fn frame_len(&self) -> usize {
        2 + self.length
    }

    /// Check that every channel lies inside the payload
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let wide = self.width.bytes();
        let fits = |offset: usize, size: usize| offset + size <= self.length;

        self.gyro.iter().chain(self.accel.iter()).all(|&o| fits(o, wide))
            && fits(self.temperature, 2)
            && self.status.is_none_or(|o| fits(o, 2))
            && self.counter.is_none_or(|o| fits(o, 2))
            && self
                .magnetometer
                .is_none_or(|axes| axes.iter().all(|&o| fits(o, 2)))
            && self.barometer.is_none_or(|o| fits(o, 2))
            && self
                .checksum
                .is_none_or(|field| fits(field.offset, field.kind.bytes()))
    }

    fn word(payload: &[u8], offset: usize) -> u16 {
        u16::from_be_bytes([payload[offset], payload[offset + 1]])
    }

    fn double_word(&self, payload: &[u8], offset: usize) -> u32 {
        let first = u32::from(Self::word(payload, offset));
        let second = u32::from(Self::word(payload, offset + 2));
        match self.order {
            HalfWordOrder::LowFirst => (second << 16) | first,
            HalfWordOrder::HighFirst => (first << 16) | second,
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn channel(&self, payload: &[u8], offset: usize) -> i32 {
        match self.width {
            ChannelWidth::Bits16 => i32::from(Self::word(payload, offset) as i16),
            ChannelWidth::Bits32 => self.double_word(payload, offset) as i32,
        }
    }

    fn triad(&self, payload: &[u8], offsets: [usize; 3]) -> Triad<i32> {
        Triad {
            x: self.channel(payload, offsets[0]),
            y: self.channel(payload, offsets[1]),
            z: self.channel(payload, offsets[2]),
        }
    }

    /// Recompute the checksum over `payload`
    ///
    /// Returns `None` when the layout has no checksum, or one this driver
    /// does not compute.
    #[must_use]
    pub fn compute_checksum(&self, payload: &[u8]) -> Option<u32> {
        let field = self.checksum?;
        match field.kind {
            ChecksumKind::ByteSum16 => {
                let sum = payload[..field.offset]
                    .iter()
                    .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)));
                Some(u32::from(sum))
            }
            ChecksumKind::Crc32 => None,
        }
    }
}

/// Three-axis reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Triad<T> {
    /// X axis
    pub x: T,
    /// Y axis
    pub y: T,
    /// Z axis
    pub z: T,
}

impl<T> Triad<T> {
    /// Apply `f` to each axis
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Triad<U> {
        Triad {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }
}

impl Triad<f32> {
    /// Euclidean norm
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// One unscaled sample as read from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Status/diagnostic word, if the frame carries one
    pub status: Option<u16>,
    /// Sample counter, if the frame carries one
    pub counter: Option<u16>,
    /// Angular rate
    pub gyro: Triad<i32>,
    /// Acceleration
    pub accel: Triad<i32>,
    /// Temperature
    pub temperature: i32,
    /// Magnetic field
    pub magnetometer: Option<Triad<i16>>,
    /// Barometric pressure
    pub barometer: Option<i16>,
    /// Checksum as transmitted
    pub checksum: Option<u32>,
}

/// Decode a burst payload
///
/// `payload` must hold at least `layout.length` bytes.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn decode(layout: &BurstLayout, payload: &[u8]) -> RawSample {
    let word = |offset: usize| BurstLayout::word(payload, offset);

    RawSample {
        status: layout.status.map(word),
        counter: layout.counter.map(word),
        gyro: layout.triad(payload, layout.gyro),
        accel: layout.triad(payload, layout.accel),
        temperature: i32::from(word(layout.temperature) as i16),
        magnetometer: layout.magnetometer.map(|axes| Triad {
            x: word(axes[0]) as i16,
            y: word(axes[1]) as i16,
            z: word(axes[2]) as i16,
        }),
        barometer: layout.barometer.map(|offset| word(offset) as i16),
        checksum: layout.checksum.map(|field| match field.kind {
            ChecksumKind::ByteSum16 => u32::from(word(field.offset)),
            ChecksumKind::Crc32 => layout.double_word(payload, field.offset),
        }),
    }
}
