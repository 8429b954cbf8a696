//! Unit tests for device identification

use crate::common::create_mock_driver;
use adis_imu::profile::{adis1647x, adis1648x, adis1649x};
use adis_imu::{
    ADIS16475, ADIS16477, ADIS16488A, ADIS16495_2, ChannelWidth, ClockMode, Error,
    FirmwareDate, FirmwareRevision,
};

#[test]
fn test_device_info_unpaged() {
    let (mut driver, bus) = create_mock_driver(ADIS16475);
    bus.set_register(adis1647x::regs::DEC_RATE, 9);

    let info = driver.device_info().unwrap();

    assert_eq!(info.product_id, 0x405B);
    assert_eq!(info.firmware_revision, FirmwareRevision { major: 1, minor: 6 });
    assert_eq!(
        info.firmware_date,
        FirmwareDate {
            day: 15,
            month: 7,
            year: 2019
        }
    );
    assert_eq!(info.serial_number, 0x1234);
    assert_eq!(info.decimation, 9);
    assert_eq!(info.output_data_rate_hz(), 200);
    assert_eq!(info.active_page, None);
    assert_eq!(info.range, Some(0x000F));
    assert_eq!(info.clock_mode, Some(ClockMode::Internal));
}

#[test]
fn test_device_info_paged() {
    let (mut driver, _bus) = create_mock_driver(ADIS16495_2);

    let info = driver.device_info().unwrap();

    assert_eq!(info.product_id, 0x406F);
    assert_eq!(info.decimation, 0);
    assert_eq!(info.output_data_rate_hz(), 4250);
    assert_eq!(info.active_page, Some(3), "DEC_RATE is the last register read");
    assert_eq!(info.range, None);
    assert_eq!(info.clock_mode, None);
}

#[test]
fn test_init_returns_device_info() {
    let (mut driver, bus) = create_mock_driver(ADIS16488A);
    bus.set_register(adis1648x::regs::DEC_RATE, 1);

    let info = driver.init().unwrap();
    assert_eq!(info.product_id, 0x4068);
    assert_eq!(info.output_data_rate_hz(), 1230);
}

#[test]
fn test_product_id_mismatch() {
    let (mut driver, bus) = create_mock_driver(ADIS16477);
    bus.set_register(adis1647x::regs::PROD_ID, 0x405B);

    match driver.init() {
        Err(Error::ProductIdMismatch { expected, found }) => {
            assert_eq!(expected, 0x405D);
            assert_eq!(found, 0x405B);
        }
        other => panic!("Expected product id mismatch, got {:?}", other),
    }

    // Nothing past the product id is read
    assert_eq!(bus.transfers().len(), 1);
}

#[test]
fn test_product_id_mismatch_paged() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_2);
    bus.set_register(adis1649x::regs::PROD_ID, 0x4068);

    assert!(matches!(
        driver.device_info(),
        Err(Error::ProductIdMismatch {
            expected: 0x406F,
            found: 0x4068
        })
    ));
}

#[test]
fn test_scale_table_follows_range() {
    let (mut driver, bus) = create_mock_driver(ADIS16475);

    // ±125 °/s
    bus.set_register(adis1647x::regs::RANG_MDL, 0x0003);
    driver.device_info().unwrap();
    assert_eq!(driver.scale_table().unwrap().gyro, 10_485_760.0);

    // ±2000 °/s
    bus.set_register(adis1647x::regs::RANG_MDL, 0x000F);
    driver.device_info().unwrap();
    assert_eq!(driver.scale_table().unwrap().gyro, 655_360.0);
    assert_eq!(driver.scale_table().unwrap().accel, 262_144_000.0);
}

#[test]
fn test_unknown_range_code() {
    let (mut driver, bus) = create_mock_driver(ADIS16475);
    bus.set_register(adis1647x::regs::RANG_MDL, 0x0008);

    assert!(matches!(driver.device_info(), Err(Error::UnknownRange(0x0008))));
    assert!(driver.scale_table().is_none());
}

#[test]
fn test_clock_mode_reported_from_misc_control() {
    let (mut driver, bus) = create_mock_driver(ADIS16475);
    bus.set_register(adis1647x::regs::MSC_CTRL, 0x00C1 | (2 << 2));

    let info = driver.device_info().unwrap();
    assert_eq!(info.clock_mode, Some(ClockMode::Pps));
}

#[test]
fn test_fixed_range_variant_uses_profile_scale() {
    let (mut driver, _bus) = create_mock_driver(ADIS16495_2);

    driver.device_info().unwrap();
    assert_eq!(driver.channel_width(), Some(ChannelWidth::Bits32));
    assert_eq!(driver.scale_table().unwrap().gyro, 2_621_440.0);
    assert_eq!(driver.scale_table().unwrap().temperature_offset, 25.0);
}
