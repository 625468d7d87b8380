// Re-export shared crates so engine modules and front ends share one path.
pub use kitlabel_catalog as catalog;
pub use kitlabel_config as config;
pub use kitlabel_template as template;

pub use kitlabel_utils::atomic_write;
pub use kitlabel_utils::error;
pub use kitlabel_utils::exit_codes;
pub use kitlabel_utils::lock;
pub use kitlabel_utils::logging;
#[cfg(any(test, feature = "test-utils"))]
pub use kitlabel_utils::test_support;
pub use kitlabel_utils::types;

pub mod batch;
pub mod cart;
pub mod context;
pub mod expansion;
pub mod notes;
pub mod persistence;
pub mod sink;
pub mod sizing;
pub mod variables;
