//! Driver configuration

use crate::burst::ChannelWidth;
use crate::transaction::MAX_ARRAY_READ;

/// Driver settings chosen at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Burst channel width; `None` picks the widest the device offers
    pub channel_width: Option<ChannelWidth>,
    /// Inter-word stall in µs; `None` uses the device's minimum
    pub stall_us: Option<u32>,
    /// Most registers accepted by one array read (at most [`MAX_ARRAY_READ`])
    pub max_array_len: usize,
    /// Reject burst samples whose 16-bit checksum does not match
    pub verify_checksum: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_width: None,
            stall_us: None,
            max_array_len: MAX_ARRAY_READ,
            verify_checksum: false,
        }
    }
}
