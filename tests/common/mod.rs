//! Common test utilities and mock implementations


pub use mock_bus::{MockBus, MockError, Operation};
pub use test_utils::{MockDelay, create_initialized_driver, create_mock_driver};
