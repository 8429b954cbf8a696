//! ADIS1649x family (ADIS16495-1/-2/-3)
//!
//! Paged parts. Output data is on page 0, user configuration on pages 2 and
//! 3, and identification on pages 3 and 4. The three models share a product
//! id and differ only in gyroscope range.

use super::{Capabilities, CommandSpec, Commands, DeviceProfile, RegisterMap};
use crate::burst::{BurstLayout, ChannelWidth, ChecksumField, ChecksumKind, HalfWordOrder};
use crate::scale::{ChannelScale, ScaleProfile};

/// Register ids
#[allow(missing_docs)]
pub mod regs {
    use crate::address::RegisterAddress;

    pub const PAGE_ID: RegisterAddress = RegisterAddress::from_id(0x0000);
    pub const DATA_CNT: RegisterAddress = RegisterAddress::from_id(0x0004);
    pub const SYS_E_FLAG: RegisterAddress = RegisterAddress::from_id(0x0008);
    pub const DIAG_STS: RegisterAddress = RegisterAddress::from_id(0x000A);
    pub const TEMP_OUT: RegisterAddress = RegisterAddress::from_id(0x000E);
    pub const X_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x0010);
    pub const X_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x0012);
    pub const Y_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x0014);
    pub const Y_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x0016);
    pub const Z_GYRO_LOW: RegisterAddress = RegisterAddress::from_id(0x0018);
    pub const Z_GYRO_OUT: RegisterAddress = RegisterAddress::from_id(0x001A);
    pub const X_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x001C);
    pub const X_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x001E);
    pub const Y_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x0020);
    pub const Y_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x0022);
    pub const Z_ACCL_LOW: RegisterAddress = RegisterAddress::from_id(0x0024);
    pub const Z_ACCL_OUT: RegisterAddress = RegisterAddress::from_id(0x0026);
    pub const BURST_CMD: RegisterAddress = RegisterAddress::from_id(0x007C);
    pub const PROD_ID: RegisterAddress = RegisterAddress::from_id(0x007E);
    pub const USER_SCR_1: RegisterAddress = RegisterAddress::from_id(0x0274);
    pub const USER_SCR_2: RegisterAddress = RegisterAddress::from_id(0x0276);
    pub const USER_SCR_3: RegisterAddress = RegisterAddress::from_id(0x0278);
    pub const USER_SCR_4: RegisterAddress = RegisterAddress::from_id(0x027A);
    pub const GLOB_CMD: RegisterAddress = RegisterAddress::from_id(0x0302);
    pub const FNCTIO_CTRL: RegisterAddress = RegisterAddress::from_id(0x0306);
    pub const DEC_RATE: RegisterAddress = RegisterAddress::from_id(0x030C);
    pub const FIRM_REV: RegisterAddress = RegisterAddress::from_id(0x0378);
    pub const FIRM_DM: RegisterAddress = RegisterAddress::from_id(0x037A);
    pub const FIRM_Y: RegisterAddress = RegisterAddress::from_id(0x037C);
    pub const SERIAL_NUM: RegisterAddress = RegisterAddress::from_id(0x0420);
}

/// `SYS_E_FLAG` bit set when the self-test fails
pub const SYS_SELF_TEST_FAILURE: u16 = 1 << 5;

/// 32-bit burst frame triggered by a read of `BURST_CMD`
///
/// The frame opens with the fixed `BURST_ID` word (0xA5A5).
pub const BURST_32: BurstLayout = BurstLayout {
    trigger: regs::BURST_CMD,
    length: 36,
    width: ChannelWidth::Bits32,
    order: HalfWordOrder::LowFirst,
    status: Some(2),
    gyro: [6, 10, 14],
    accel: [18, 22, 26],
    temperature: 4,
    counter: Some(30),
    magnetometer: None,
    barometer: None,
    checksum: Some(ChecksumField {
        offset: 32,
        kind: ChecksumKind::Crc32,
    }),
};

const fn profile(name: &'static str, gyro: ChannelScale) -> DeviceProfile {
    DeviceProfile {
        name,
        product_id: 0x406F,
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
        burst16: None,
        burst32: Some(BURST_32),
        burst32_enable: None,
        scales: ScaleProfile {
            gyro,
            accel: ChannelScale {
                bits16: 4000.0,
                bits32: 262_144_000.0,
            },
            // 0.00565 °C/LSB, 25 °C at zero
            temperature: 1.0 / 0.005_65,
            temperature_offset: 25.0,
            magnetometer: None,
            barometer: None,
        },
        range: None,
        max_data_rate: 4250,
        stall_us: 16,
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
                duration_ms: 20,
            },
            bias_correction_update: CommandSpec {
                mask: 1 << 0,
                duration_ms: 1,
            },
        },
        self_test_failure_mask: SYS_SELF_TEST_FAILURE,
    }
}

/// ADIS16495-1, ±125 °/s
pub const ADIS16495_1: DeviceProfile = profile(
    "ADIS16495-1",
    ChannelScale {
        bits16: 160.0,
        bits32: 10_485_760.0,
    },
);

/// ADIS16495-2, ±450 °/s
pub const ADIS16495_2: DeviceProfile = profile(
    "ADIS16495-2",
    ChannelScale {
        bits16: 40.0,
        bits32: 2_621_440.0,
    },
);

/// ADIS16495-3, ±2000 °/s
pub const ADIS16495_3: DeviceProfile = profile(
    "ADIS16495-3",
    ChannelScale {
        bits16: 10.0,
        bits32: 655_360.0,
    },
);
