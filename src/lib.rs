#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod address;
pub mod burst;
pub mod config;
pub mod control;
pub mod device;
pub mod interface;
pub mod profile;
pub mod scale;
pub mod transaction;

mod page;
mod response;

// Re-export main types
pub use address::RegisterAddress;
pub use burst::{BurstLayout, ChannelWidth, ChecksumKind, HalfWordOrder, RawSample, Triad};
pub use config::Config;
pub use control::{
    ClockMode, DeviceInfo, FirmwareDate, FirmwareRevision, MiscControl, Polarity, SelfTestReport,
};
pub use device::{AdisDriver, RegisterValues};
pub use interface::{BusInterface, SpiInterface};
pub use profile::DeviceProfile;
pub use profile::adis1647x::{ADIS16475, ADIS16477};
pub use profile::adis1648x::ADIS16488A;
pub use profile::adis1649x::{ADIS16495_1, ADIS16495_2, ADIS16495_3};
pub use scale::{ScaleFactorTable, ScaledSample};
pub use transaction::{BUFFER_CAPACITY, MAX_ARRAY_READ};

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// `PROD_ID` does not match the selected device profile
    ProductIdMismatch {
        /// Product id of the profile
        expected: u16,
        /// Product id read from the device
        found: u16,
    },
    /// Requested data rate cannot be produced exactly
    InvalidDataRate,
    /// The device has no burst mode
    BurstNotSupported,
    /// Scratch register loopback read back a different value
    CommunicationCheckFailed {
        /// Value written
        expected: u16,
        /// Value read back
        found: u16,
    },
    /// Invalid profile or configuration parameter
    InvalidConfig,
    /// Invalid register list (empty or too long)
    InvalidRequest,
    /// Range register holds a code without a known scale (contains the register value)
    UnknownRange(u16),
    /// Burst checksum verification failed
    ChecksumMismatch {
        /// Checksum sent by the device
        expected: u32,
        /// Checksum computed over the payload
        computed: u32,
    },
    /// The device lacks the capability this operation needs
    Unsupported,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
