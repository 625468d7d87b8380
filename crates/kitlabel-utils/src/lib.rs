pub mod atomic_write;
pub mod error;
pub mod exit_codes;
pub mod lock;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;
