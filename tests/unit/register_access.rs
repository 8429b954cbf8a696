//! Unit tests for single register reads and writes

use crate::common::{Operation, create_mock_driver};
use adis_imu::profile::{adis1647x, adis1649x};
use adis_imu::{ADIS16475, ADIS16495_1, RegisterAddress};

#[test]
fn test_write_frame_low_byte_first() {
    let (mut driver, bus) = create_mock_driver(ADIS16475);

    driver.write_register(adis1647x::regs::USER_SCR1, 0xA5C3).unwrap();

    let transfers = bus.transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].tx, vec![0xF6, 0xC3, 0xF7, 0xA5]);
    assert_eq!(transfers[0].word_len, 2);
    assert_eq!(transfers[0].stall_us, ADIS16475.stall_us);

    assert_eq!(bus.register(adis1647x::regs::USER_SCR1), 0xA5C3);
}

#[test]
fn test_read_returns_scratch_value() {
    let (mut driver, bus) = create_mock_driver(ADIS16475);
    bus.set_register(adis1647x::regs::USER_SCR1, 0xA5A5);

    assert_eq!(driver.read_register(adis1647x::regs::USER_SCR1).unwrap(), 0xA5A5);

    let transfers = bus.transfers();
    assert_eq!(transfers[0].tx, vec![0x76, 0x00, 0x77, 0x00]);
}

#[test]
fn test_round_trip_unpaged() {
    let (mut driver, _bus) = create_mock_driver(ADIS16475);
    let scratch = [
        adis1647x::regs::USER_SCR1,
        adis1647x::regs::USER_SCR2,
        adis1647x::regs::USER_SCR3,
    ];

    for (i, value) in [0x0000u16, 0x0001, 0x00FF, 0x7FFF, 0x8000, 0xFFFF, 0x1234]
        .into_iter()
        .enumerate()
    {
        let address = scratch[i % scratch.len()];
        driver.write_register(address, value).unwrap();
        assert_eq!(driver.read_register(address).unwrap(), value);
    }
}

#[test]
fn test_round_trip_across_pages() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);

    driver.write_register(adis1649x::regs::USER_SCR_1, 0xBEEF).unwrap();
    driver.write_register(adis1649x::regs::DEC_RATE, 0x0009).unwrap();
    driver.write_register(adis1649x::regs::USER_SCR_4, 0x0F0F).unwrap();

    assert_eq!(driver.read_register(adis1649x::regs::USER_SCR_1).unwrap(), 0xBEEF);
    assert_eq!(driver.read_register(adis1649x::regs::DEC_RATE).unwrap(), 0x0009);
    assert_eq!(driver.read_register(adis1649x::regs::USER_SCR_4).unwrap(), 0x0F0F);

    // Registers on different pages with the same offset stay apart
    assert_eq!(bus.register(adis1649x::regs::USER_SCR_1), 0xBEEF);
    assert_eq!(bus.register(RegisterAddress::new(0, 0x74)), 0x0000);
}

#[test]
fn test_write_on_current_page_has_no_select() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);
    driver.set_active_page(2).unwrap();
    bus.clear_operations();

    driver.write_register(adis1649x::regs::USER_SCR_2, 0x1234).unwrap();

    assert_eq!(
        bus.operations(),
        vec![
            Operation::Write { page: 2, offset: 0x76, value: 0x34 },
            Operation::Write { page: 2, offset: 0x77, value: 0x12 },
        ]
    );
}

#[test]
fn test_stall_override_from_config() {
    let config = adis_imu::Config {
        stall_us: Some(40),
        ..adis_imu::Config::default()
    };
    let (mut driver, bus) =
        crate::common::test_utils::create_mock_driver_with(ADIS16475, config);

    driver.read_register(adis1647x::regs::PROD_ID).unwrap();
    assert_eq!(bus.transfers()[0].stall_us, 40);
}
