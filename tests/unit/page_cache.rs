//! Unit tests for page selection and the page cache

use crate::common::{MockDelay, MockError, Operation, create_mock_driver};
use adis_imu::profile::adis1649x::regs;
use adis_imu::{ADIS16475, ADIS16495_1, Error};

#[test]
fn test_first_paged_access_reads_page_register() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);

    let id = driver.read_register(regs::PROD_ID).unwrap();
    assert_eq!(id, 0x406F);

    // Page unknown at start: read it back, then no select is needed for page 0
    assert_eq!(
        bus.operations(),
        vec![
            Operation::Read { page: 0, offset: 0x00 },
            Operation::Read { page: 0, offset: 0x7E },
        ]
    );
    assert_eq!(bus.page_select_count(), 0);
}

#[test]
fn test_page_select_only_on_change() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);

    assert_eq!(driver.read_register(regs::FIRM_REV).unwrap(), 0x0106);
    assert_eq!(driver.read_register(regs::FIRM_DM).unwrap(), 0x0715);
    assert_eq!(driver.read_register(regs::FIRM_Y).unwrap(), 0x2019);

    assert_eq!(bus.page_select_count(), 1, "All three registers are on page 3");
    assert_eq!(bus.current_page(), 3);

    // The frames after the first carry no page-select word
    let transfers = bus.transfers();
    let last = transfers.last().unwrap();
    assert_eq!(last.tx, vec![0x7C, 0x00, 0x7D, 0x00]);
}

#[test]
fn test_page_select_folded_into_read_frame() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);
    driver.set_active_page(0).unwrap();
    bus.clear_operations();

    driver.read_register(regs::DEC_RATE).unwrap();

    let transfers = bus.transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].tx, vec![0x80, 0x03, 0x0C, 0x00, 0x0D, 0x00]);
    assert_eq!(transfers[0].word_len, 2);
}

#[test]
fn test_page_switch_back_and_forth() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);

    driver.read_register(regs::FIRM_REV).unwrap();
    driver.read_register(regs::PROD_ID).unwrap();
    driver.read_register(regs::SERIAL_NUM).unwrap();
    driver.read_register(regs::SERIAL_NUM).unwrap();

    let selects: Vec<_> = bus
        .operations()
        .into_iter()
        .filter_map(|op| match op {
            Operation::PageSelect { to, .. } => Some(to),
            _ => None,
        })
        .collect();
    assert_eq!(selects, vec![3, 0, 4]);
}

#[test]
fn test_set_active_page_is_idempotent() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);

    driver.set_active_page(2).unwrap();
    driver.set_active_page(2).unwrap();

    assert_eq!(bus.page_select_count(), 1);
    assert_eq!(bus.current_page(), 2);
    assert_eq!(driver.active_page().unwrap(), 2);
}

#[test]
fn test_failed_select_invalidates_cache() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);
    driver.set_active_page(0).unwrap();

    // The page-select word goes out, then the bus fails
    bus.fail_next_transfer_after(1);
    let result = driver.read_register(regs::FIRM_REV);
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(bus.current_page(), 3);

    bus.clear_operations();
    assert_eq!(driver.read_register(regs::FIRM_REV).unwrap(), 0x0106);

    // Cache was dropped: the page is read back and found to be right already
    let ops = bus.operations();
    assert_eq!(ops[0], Operation::Read { page: 3, offset: 0x00 });
    assert_eq!(bus.page_select_count(), 0);
}

#[test]
fn test_failure_without_select_keeps_cache() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);
    driver.set_active_page(3).unwrap();

    bus.fail_next_transfer();
    assert!(driver.read_register(regs::FIRM_REV).is_err());

    bus.clear_operations();
    driver.read_register(regs::FIRM_REV).unwrap();
    assert_eq!(bus.read_count(0x00), 0, "No page read-back expected");
}

#[test]
fn test_raw_page_register_write_invalidates_cache() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);
    driver.set_active_page(0).unwrap();

    driver.write_register(regs::PAGE_ID, 3).unwrap();
    assert_eq!(bus.current_page(), 3);

    bus.clear_operations();
    driver.read_register(regs::FIRM_REV).unwrap();

    let ops = bus.operations();
    assert_eq!(ops[0], Operation::Read { page: 3, offset: 0x00 });
    assert_eq!(bus.page_select_count(), 0);
}

#[test]
fn test_failed_page_register_write_invalidates_cache() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);
    driver.set_active_page(0).unwrap();

    // The low byte switches the page, then the bus fails
    bus.fail_next_transfer_after(1);
    let result = driver.write_register(regs::PAGE_ID, 3);
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(bus.current_page(), 3);

    bus.clear_operations();
    assert_eq!(driver.read_register(regs::PROD_ID).unwrap(), 0x406F);

    let ops = bus.operations();
    assert_eq!(ops[0], Operation::Read { page: 3, offset: 0x00 });
    assert_eq!(ops[1], Operation::PageSelect { from: 3, to: 0 });
}

#[test]
fn test_software_reset_invalidates_cache() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);
    let mut delay = MockDelay::default();

    driver.set_active_page(3).unwrap();
    driver.software_reset(&mut delay).unwrap();

    // The device restarts on page 0
    bus.set_current_page(0);
    bus.clear_operations();

    driver.read_register(regs::FIRM_REV).unwrap();
    let ops = bus.operations();
    assert_eq!(ops[0], Operation::Read { page: 0, offset: 0x00 });
    assert_eq!(ops[1], Operation::PageSelect { from: 0, to: 3 });
}

#[test]
fn test_invalidate_page_cache_forces_read_back() {
    let (mut driver, bus) = create_mock_driver(ADIS16495_1);
    driver.set_active_page(2).unwrap();

    bus.set_current_page(4);
    driver.invalidate_page_cache();
    bus.clear_operations();

    driver.read_register(regs::SERIAL_NUM).unwrap();
    assert_eq!(bus.read_count(0x00), 1);
    assert_eq!(bus.page_select_count(), 0);
}

#[test]
fn test_unpaged_device_page_control() {
    let (mut driver, bus) = create_mock_driver(ADIS16475);

    driver.set_active_page(0).unwrap();
    assert!(bus.transfers().is_empty());

    assert!(matches!(driver.set_active_page(1), Err(Error::Unsupported)));
    assert_eq!(driver.active_page().unwrap(), 0);
    assert!(bus.transfers().is_empty());
}
