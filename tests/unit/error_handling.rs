//! Unit tests for error handling and recovery

use crate::common::{MockBus, MockError, create_initialized_driver, create_mock_driver};
use adis_imu::profile::{RegisterMap, adis1647x};
use adis_imu::{ADIS16475, ADIS16495_1, AdisDriver, Config, DeviceProfile, Error};

fn new_driver(
    profile: DeviceProfile,
    config: Config,
) -> Result<AdisDriver<MockBus>, Error<MockError>> {
    AdisDriver::new(MockBus::new(&profile), profile, config)
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, bus) = create_initialized_driver(ADIS16475);
    bus.set_register(adis1647x::regs::USER_SCR2, 0x4242);

    bus.fail_next_transfer();
    let result = driver.read_register(adis1647x::regs::USER_SCR2);
    assert!(
        matches!(result, Err(Error::Bus(MockError::Communication))),
        "Read should fail when error is injected"
    );

    // The error was only for one operation
    assert_eq!(driver.read_register(adis1647x::regs::USER_SCR2).unwrap(), 0x4242);
}

#[test]
fn test_write_failure_basic() {
    let (mut driver, bus) = create_initialized_driver(ADIS16475);

    bus.fail_next_transfer();
    let result = driver.write_register(adis1647x::regs::USER_SCR2, 0x1234);
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(bus.register(adis1647x::regs::USER_SCR2), 0);

    driver.write_register(adis1647x::regs::USER_SCR2, 0x1234).unwrap();
    assert_eq!(bus.register(adis1647x::regs::USER_SCR2), 0x1234);
}

#[test]
fn test_burst_failure() {
    let (mut driver, bus) = create_initialized_driver(ADIS16475);

    bus.fail_next_transfer();
    assert!(matches!(
        driver.read_burst(),
        Err(Error::Bus(MockError::Communication))
    ));
    assert!(driver.read_burst().is_ok());
}

#[test]
fn test_init_failure_propagates() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);

    bus.fail_next_transfer();
    assert!(driver.init().is_err());

    // A second attempt starts from scratch
    let info = driver.init().unwrap();
    assert_eq!(info.product_id, 0x406F);
}

#[test]
fn test_bus_error_converts_into_driver_error() {
    let error: Error<MockError> = MockError::Communication.into();
    assert!(matches!(error, Error::Bus(MockError::Communication)));
}

// --- Configuration validation ---

#[test]
fn test_array_limit_out_of_range() {
    for max_array_len in [0, adis_imu::MAX_ARRAY_READ + 1] {
        let config = Config {
            max_array_len,
            ..Config::default()
        };
        assert!(
            matches!(new_driver(ADIS16475, config), Err(Error::InvalidConfig)),
            "max_array_len {} should be rejected",
            max_array_len
        );
    }
}

#[test]
fn test_default_config_accepted_for_all_profiles() {
    for profile in [
        adis_imu::ADIS16475,
        adis_imu::ADIS16477,
        adis_imu::ADIS16488A,
        adis_imu::ADIS16495_1,
        adis_imu::ADIS16495_2,
        adis_imu::ADIS16495_3,
    ] {
        assert!(
            new_driver(profile, Config::default()).is_ok(),
            "{} should be accepted",
            profile.name
        );
    }
}

#[test]
fn test_paged_profile_without_page_register() {
    let profile = DeviceProfile {
        registers: RegisterMap {
            page_id: None,
            ..ADIS16495_1.registers
        },
        ..ADIS16495_1
    };
    assert!(matches!(
        new_driver(profile, Config::default()),
        Err(Error::InvalidConfig)
    ));
}

#[test]
fn test_burst_width_switch_without_misc_control() {
    let profile = DeviceProfile {
        registers: RegisterMap {
            misc_control: None,
            ..ADIS16475.registers
        },
        ..ADIS16475
    };
    assert!(matches!(
        new_driver(profile, Config::default()),
        Err(Error::InvalidConfig)
    ));
}

#[test]
fn test_zero_sample_rate_profile() {
    let profile = DeviceProfile {
        max_data_rate: 0,
        ..ADIS16475
    };
    assert!(matches!(
        new_driver(profile, Config::default()),
        Err(Error::InvalidConfig)
    ));
}

#[test]
fn test_burst_layout_outside_payload() {
    let mut layout = adis1647x::BURST_16;
    layout.counter = Some(layout.length);
    let profile = DeviceProfile {
        burst16: Some(layout),
        ..ADIS16475
    };
    assert!(matches!(
        new_driver(profile, Config::default()),
        Err(Error::InvalidConfig)
    ));
}
