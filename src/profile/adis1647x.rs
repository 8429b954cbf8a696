//! ADIS1647x family (ADIS16475, ADIS16477)
//!
//! Unpaged parts: every register lives on page 0. The gyroscope range is
//! fixed per model and reported in `RANG_MDL`; the accelerometer range
//! depends on the part number.

use super::{Capabilities, CommandSpec, Commands, DeviceProfile, RegisterMap};
use crate::burst::{BurstLayout, ChannelWidth, ChecksumField, ChecksumKind, HalfWordOrder};
use crate::scale::{ChannelScale, RangeOption, RangeRegister, ScaleProfile};

/// Register ids
#[allow(missing_docs)]
pub mod regs {
    use crate::address::RegisterAddress;

    pub const DIAG_STAT: RegisterAddress = RegisterAddress::from_id(0x0002);
    pub const X_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x0004);
    pub const X_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x0006);
    pub const Y_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x0008);
    pub const Y_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x000A);
    pub const Z_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x000C);
    pub const Z_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x000E);
    pub const X_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x0010);
    pub const X_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x0012);
    pub const Y_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x0014);
    pub const Y_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x0016);
    pub const Z_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x0018);
    pub const Z_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x001A);
    pub const TEMP_OUT: RegisterAddress = RegisterAddress::from_id(0x001C);
    pub const TIME_STAMP: RegisterAddress = RegisterAddress::from_id(0x001E);
    pub const DATA_CNTR: RegisterAddress = RegisterAddress::from_id(0x0022);
    pub const FILT_CTRL: RegisterAddress = RegisterAddress::from_id(0x005C);
    pub const RANG_MDL: RegisterAddress = RegisterAddress::from_id(0x005E);
    pub const MSC_CTRL: RegisterAddress = RegisterAddress::from_id(0x0060);
    pub const UP_SCALE: RegisterAddress = RegisterAddress::from_id(0x0062);
    pub const DEC_RATE: RegisterAddress = RegisterAddress::from_id(0x0064);
    pub const NULL_CFG: RegisterAddress = RegisterAddress::from_id(0x0066);
    pub const GLOB_CMD: RegisterAddress = RegisterAddress::from_id(0x0068);
    pub const FIRM_REV: RegisterAddress = RegisterAddress::from_id(0x006C);
    pub const FIRM_DM: RegisterAddress = RegisterAddress::from_id(0x006E);
    pub const FIRM_Y: RegisterAddress = RegisterAddress::from_id(0x0070);
    pub const PROD_ID: RegisterAddress = RegisterAddress::from_id(0x0072);
    pub const SERIAL_NUM: RegisterAddress = RegisterAddress::from_id(0x0074);
    pub const USER_SCR1: RegisterAddress = RegisterAddress::from_id(0x0076);
    pub const USER_SCR2: RegisterAddress = RegisterAddress::from_id(0x0078);
    pub const USER_SCR3: RegisterAddress = RegisterAddress::from_id(0x007A);
    pub const FLSHCNT_LOW: RegisterAddress = RegisterAddress::from_id(0x007C);
    pub const FLSHCNT_HIGH: RegisterAddress = RegisterAddress::from_id(0x007E);
}

/// `MSC_CTRL` bit selecting 32-bit burst frames
pub const BURST32: u16 = 1 << 9;

/// `DIAG_STAT` bit set when the self-test fails
pub const DIAG_SENSOR_FAILURE: u16 = 1 << 5;

const REGISTERS: RegisterMap = RegisterMap {
    page_id: None,
    product_id: regs::PROD_ID,
    firmware_revision: regs::FIRM_REV,
    firmware_day_month: regs::FIRM_DM,
    firmware_year: regs::FIRM_Y,
    serial_number: regs::SERIAL_NUM,
    scratch: regs::USER_SCR1,
    command: regs::GLOB_CMD,
    decimation: regs::DEC_RATE,
    diagnostic: regs::DIAG_STAT,
    misc_control: Some(regs::MSC_CTRL),
};

const COMMANDS: Commands = Commands {
    software_reset: CommandSpec {
        mask: 1 << 7,
        duration_ms: 255,
    },
    flash_update: CommandSpec {
        mask: 1 << 3,
        duration_ms: 72,
    },
    self_test: CommandSpec {
        mask: 1 << 2,
        duration_ms: 14,
    },
    bias_correction_update: CommandSpec {
        mask: 1 << 0,
        duration_ms: 1,
    },
};

/// Burst frame with 16-bit channels, triggered by a read of `GLOB_CMD`
pub const BURST_16: BurstLayout = BurstLayout {
    trigger: regs::GLOB_CMD,
    length: 20,
    width: ChannelWidth::Bits16,
    order: HalfWordOrder::LowFirst,
    status: Some(0),
    gyro: [2, 4, 6],
    accel: [8, 10, 12],
    temperature: 14,
    counter: Some(16),
    magnetometer: None,
    barometer: None,
    checksum: Some(ChecksumField {
        offset: 18,
        kind: ChecksumKind::ByteSum16,
    }),
};

/// Burst frame with 32-bit channels (`MSC_CTRL` `BURST32` set)
pub const BURST_32: BurstLayout = BurstLayout {
    trigger: regs::GLOB_CMD,
    length: 32,
    width: ChannelWidth::Bits32,
    order: HalfWordOrder::LowFirst,
    status: Some(0),
    gyro: [2, 6, 10],
    accel: [14, 18, 22],
    temperature: 26,
    counter: Some(28),
    magnetometer: None,
    barometer: None,
    checksum: Some(ChecksumField {
        offset: 30,
        kind: ChecksumKind::ByteSum16,
    }),
};

/// `RANG_MDL` bits [3:2]
pub const RANGE: RangeRegister = RangeRegister {
    address: regs::RANG_MDL,
    mask: 0b1100,
    shift: 2,
    options: &[
        // ±125 °/s
        RangeOption {
            code: 0,
            gyro: ChannelScale {
                bits16: 160.0,
                bits32: 10_485_760.0,
            },
        },
        // ±500 °/s
        RangeOption {
            code: 1,
            gyro: ChannelScale {
                bits16: 40.0,
                bits32: 2_621_440.0,
            },
        },
        // ±2000 °/s
        RangeOption {
            code: 3,
            gyro: ChannelScale {
                bits16: 10.0,
                bits32: 655_360.0,
            },
        },
    ],
};

const fn profile(name: &'static str, product_id: u16, accel: ChannelScale) -> DeviceProfile {
    DeviceProfile {
        name,
        product_id,
        capabilities: Capabilities {
            paged: false,
            arbitrary_decimation: true,
            external_sync: true,
            pps: true,
        },
        registers: REGISTERS,
        burst16: Some(BURST_16),
        burst32: Some(BURST_32),
        burst32_enable: Some(BURST32),
        scales: ScaleProfile {
            // Replaced by the RANG_MDL lookup
            gyro: ChannelScale {
                bits16: 10.0,
                bits32: 655_360.0,
            },
            accel,
            temperature: 10.0,
            temperature_offset: 0.0,
            magnetometer: None,
            barometer: None,
        },
        range: Some(RANGE),
        max_data_rate: 2000,
        stall_us: 16,
        commands: COMMANDS,
        self_test_failure_mask: DIAG_SENSOR_FAILURE,
    }
}

/// ADIS16475, ±8 g accelerometer
pub const ADIS16475: DeviceProfile = profile(
    "ADIS16475",
    0x405B,
    ChannelScale {
        bits16: 4000.0,
        bits32: 262_144_000.0,
    },
);

/// ADIS16477, ±40 g accelerometer
pub const ADIS16477: DeviceProfile = profile(
    "ADIS16477",
    0x405D,
    ChannelScale {
        bits16: 800.0,
        bits32: 52_428_800.0,
    },
);
