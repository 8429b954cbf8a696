//! ADIS1648x family (ADIS16488A)
//!
//! Ten degrees of freedom: gyroscope, accelerometer, magnetometer and
//! barometer on a paged register map laid out like the ADIS1649x.

use super::{Capabilities, CommandSpec, Commands, DeviceProfile, RegisterMap};
use crate::burst::{BurstLayout, ChannelWidth, ChecksumField, ChecksumKind, HalfWordOrder};
use crate::scale::{ChannelScale, ScaleProfile};

/// Register ids
#[allow(missing_docs)]
pub mod regs {
    use crate::address::RegisterAddress;

    pub const PAGE_ID: RegisterAddress = RegisterAddress::from_id(0x0000);
    pub const SEQ_CNT: RegisterAddress = RegisterAddress::from_id(0x0006);
    pub const SYS_E_FLAG: RegisterAddress = RegisterAddress::from_id(0x0008);
    pub const DIAG_STS: RegisterAddress = RegisterAddress::from_id(0x000A);
    pub const TEMP_OUT: RegisterAddress = RegisterAddress::from_id(0x000E);
    pub const X_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x0010);
    pub const X_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x0012);
    pub const Y_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x0014);
    pub const Y_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x0016);
    pub const Z_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x0018);
    pub const Z_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x001A);
    pub const X_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x001C);
    pub const X_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x001E);
    pub const Y_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x0020);
    pub const Y_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x0022);
    pub const Z_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x0024);
    pub const Z_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x0026);
    pub const X_MAGN_OUT: RegisterAddress = RegisterAddress::from_id(0x0028);
    pub const Y_MAGN_OUT: RegisterAddress = RegisterAddress::from_id(0x002A);
    pub const Z_MAGN_OUT: RegisterAddress = RegisterAddress::from_id(0x002C);
    pub const BAROM_LOW: RegisterAddress = RegisterAddress::from_id(0x002E);
    pub const BAROM_OUT: RegisterAddress = RegisterAddress::from_id(0x0030);
    pub const BURST_CMD: RegisterAddress = RegisterAddress::from_id(0x007C);
    pub const PROD_ID: RegisterAddress = RegisterAddress::from_id(0x007E);
    pub const USER_SCR_1: RegisterAddress = RegisterAddress::from_id(0x0274);
    pub const USER_SCR_2: RegisterAddress = RegisterAddress::from_id(0x0276);
    pub const GLOB_CMD: RegisterAddress = RegisterAddress::from_id(0x0302);
    pub const FNCTIO_CTRL: RegisterAddress = RegisterAddress::from_id(0x0306);
    pub const DEC_RATE: RegisterAddress = RegisterAddress::from_id(0x030C);
    pub const FIRM_REV: RegisterAddress = RegisterAddress::from_id(0x0378);
    pub const FIRM_DM: RegisterAddress = RegisterAddress::from_id(0x037A);
    pub const FIRM_Y: RegisterAddress = RegisterAddress::from_id(0x037C);
    pub const SERIAL_NUM: RegisterAddress = RegisterAddress::from_id(0x0420);
}

/// Burst frame triggered by a read of `BURST_CMD`
pub const BURST_16: BurstLayout = BurstLayout {
    trigger: regs::BURST_CMD,
    length: 30,
    width: ChannelWidth::Bits16,
    order: HalfWordOrder::LowFirst,
    status: Some(0),
    gyro: [4, 6, 8],
    accel: [10, 12, 14],
    temperature: 2,
    counter: Some(24),
    magnetometer: Some([16, 18, 20]),
    barometer: Some(22),
    checksum: Some(ChecksumField {
        offset: 26,
        kind: ChecksumKind::Crc32,
    }),
};

/// ADIS16488A
pub const ADIS16488A: DeviceProfile = DeviceProfile {
    name: "ADIS16488A",
    product_id: 0x4068,
    capabilities: Capabilities {
        paged: true,
        arbitrary_decimation: true,
        external_sync: true,
        pps: false,
    },
    registers: RegisterMap {
        page_id: Some(regs::PAGE_ID),
        product_id: regs::PROD_ID,
        firmware_revision: regs::FIRM_REV,
        firmware_day_month: regs::FIRM_DM,
        firmware_year: regs::FIRM_Y,
        serial_number: regs::SERIAL_NUM,
        scratch: regs::USER_SCR_1,
        command: regs::GLOB_CMD,
        decimation: regs::DEC_RATE,
        diagnostic: regs::SYS_E_FLAG,
        misc_control: None,
    },
    burst16: Some(BURST_16),
    burst32: None,
    burst32_enable: None,
    scales: ScaleProfile {
        gyro: ChannelScale {
            bits16: 50.0,
            bits32: 3_276_800.0,
        },
        accel: ChannelScale {
            bits16: 1250.0,
            bits32: 81_920_000.0,
        },
        temperature: 1.0 / 0.005_65,
        temperature_offset: 25.0,
        magnetometer: Some(10.0),
        barometer: Some(25.0),
    },
    range: None,
    max_data_rate: 2460,
    stall_us: 2,
    commands: Commands {
        software_reset: CommandSpec {
            mask: 1 << 7,
            duration_ms: 500,
        },
        flash_update: CommandSpec {
            mask: 1 << 3,
            duration_ms: 375,
        },
        self_test: CommandSpec {
            mask: 1 << 1,
            duration_ms: 12,
        },
        bias_correction_update: CommandSpec {
            mask: 1 << 0,
            duration_ms: 1,
        },
    },
    self_test_failure_mask: 1 << 5,
};
