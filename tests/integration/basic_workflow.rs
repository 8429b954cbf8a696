//! Integration tests for basic workflow scenarios

use crate::common::test_utils::{assert_float_eq, byte_sum, put16, put32};
use crate::common::{MockDelay, create_mock_driver};
use adis_imu::profile::{adis1647x, adis1649x};
use adis_imu::{ADIS16475, ADIS16495_3, ChannelWidth, ClockMode, MiscControl};

#[test]
fn test_complete_unpaged_workflow() {
    let (mut driver, bus) = create_mock_driver(ADIS16475);
    let mut delay = MockDelay::default();

    // Identify and configure
    let info = driver.init().unwrap();
    assert_eq!(info.product_id, 0x405B);
    driver.check_communications().unwrap();
    driver.set_data_rate(100).unwrap();
    driver
        .configure_misc_control(MiscControl {
            clock_mode: ClockMode::ExternalSync,
            ..MiscControl::default()
        })
        .unwrap();
    driver.flash_update(&mut delay).unwrap();

    let info = driver.device_info().unwrap();
    assert_eq!(info.output_data_rate_hz(), 100);
    assert_eq!(info.clock_mode, Some(ClockMode::ExternalSync));
    assert_eq!(driver.channel_width(), Some(ChannelWidth::Bits32));

    // Stream a few samples
    let layout = adis1647x::BURST_32;
    for counter in 0..3u16 {
        let mut payload = vec![0u8; layout.length];
        put32(&mut payload, layout.gyro[0], 655_360 * u32::from(counter));
        put32(&mut payload, layout.accel[2], 262_144_000);
        put16(&mut payload, layout.temperature, 300);
        put16(&mut payload, layout.counter.unwrap(), counter);
        let sum = byte_sum(&payload, 30);
        put16(&mut payload, 30, sum);
        bus.set_burst_payload(layout.trigger, payload);

        let sample = driver.read_burst_scaled().unwrap();
        assert_eq!(sample.counter, Some(counter));
        assert_float_eq(sample.gyro.x, f32::from(counter), 1e-4);
        assert_float_eq(sample.accel.z, 1.0, 1e-6);
        assert_float_eq(sample.temperature, 30.0, 1e-4);
    }

    assert_eq!(delay.total_ms, 72);
}

#[test]
fn test_complete_paged_workflow() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_3);
    let mut delay = MockDelay::default();

    let info = driver.init().unwrap();
    assert_eq!(info.firmware_revision.major, 1);
    assert_eq!(info.firmware_date.year, 2019);

    driver.software_reset(&mut delay).unwrap();
    bus.set_current_page(0);

    driver.check_communications().unwrap();
    driver.set_data_rate(850).unwrap();
    assert_eq!(bus.register(adis1649x::regs::DEC_RATE), 4);

    let values = driver
        .read_register_array(&[
            adis1649x::regs::PROD_ID,
            adis1649x::regs::DEC_RATE,
            adis1649x::regs::SERIAL_NUM,
        ])
        .unwrap();
    assert_eq!(values.as_slice(), &[0x406F, 4, 0x1234]);
    assert_eq!(bus.current_page(), 4);

    let layout = adis1649x::BURST_32;
    let mut payload = vec![0u8; layout.length];
    put16(&mut payload, 0, 0xA5A5);
    put32(&mut payload, layout.gyro[1], (-655_360i32) as u32);
    bus.set_burst_payload(layout.trigger, payload);

    let sample = driver.read_burst_scaled().unwrap();
    assert_float_eq(sample.gyro.y, -1.0, 1e-6);
    assert_float_eq(sample.temperature, 25.0, 1e-4);
    assert_eq!(bus.current_page(), 0);
    assert_eq!(driver.active_page().unwrap(), 0);

    assert_eq!(delay.total_ms, 500);
}

#[test]
fn test_error_recovery() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_3);
    driver.init().unwrap();

    // Lose the bus in the middle of a page change
    bus.fail_next_transfer_after(1);
    assert!(driver.read_register(adis1649x::regs::SERIAL_NUM).is_err());

    // Subsequent operations work and land on the right page
    assert_eq!(driver.read_register(adis1649x::regs::SERIAL_NUM).unwrap(), 0x1234);
    assert_eq!(driver.read_register(adis1649x::regs::PROD_ID).unwrap(), 0x406F);
    assert_eq!(bus.current_page(), 0);
}
