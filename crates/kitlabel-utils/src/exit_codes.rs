//! Exit code constants for kitlabel.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Operation completed successfully |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `LOAD_FAILURE` | Catalog or templates could not be loaded |
//! | 4 | `VALIDATION` | A cart mutation was rejected |
//! | 5 | `CART_FULL` | The cart is at capacity |
//! | 6 | `RENDER_FAILURE` | Templates could not be rendered; no batch produced |
//! | 7 | `NOT_FOUND` | Product or cart entry not found |
//! | 8 | `DELIVERY_FAILURE` | Print jobs could not be written |

/// Exit codes matching the documented exit code table.
///
/// Use the named constants, or [`as_i32()`](Self::as_i32) to get the numeric
/// value for `std::process::exit()`.
///
/// # Example
///
/// ```rust
/// use kitlabel_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::CART_FULL, ExitCode::from_i32(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid arguments or configuration
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Catalog or template collaborator failed
    pub const LOAD_FAILURE: ExitCode = ExitCode(3);

    /// Requested mutation rejected by validation
    pub const VALIDATION: ExitCode = ExitCode(4);

    /// Cart at maximum size
    pub const CART_FULL: ExitCode = ExitCode(5);

    /// Batch aborted because a template could not be rendered
    pub const RENDER_FAILURE: ExitCode = ExitCode(6);

    /// Product code or cart entry id not found
    pub const NOT_FOUND: ExitCode = ExitCode(7);

    /// Rendered print jobs could not be written to the output
    pub const DELIVERY_FAILURE: ExitCode = ExitCode(8);

    /// Get the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    ///
    /// Prefer using the named constants when possible.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
