//! Error types for clamp configuration.

use thiserror::Error;

/// Errors produced while reading clamp options.
///
/// Truncation itself never fails; only values coming from outside (flags,
/// option files) are validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClampError {
    /// The clamp value is not a line count, `auto`, or a length containing
    /// `px` or `em`.
    #[error("invalid clamp value '{0}': expected a line count, \"auto\", or a length in px or em")]
    InvalidClampValue(String),
}
