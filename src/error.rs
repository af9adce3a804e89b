use thiserror::Error;

/// Errors raised at the parameter and settings boundary.
///
/// The band computation itself never fails: once a [`BandParams`] exists it
/// is valid, and every structurally valid series produces a full-length
/// result. Positions that cannot be computed are `None` in the output, not
/// errors.
///
/// [`BandParams`]: crate::BandParams
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter lies outside its legal domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the settings schema.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A presentation style field is malformed.
    #[error("invalid style `{field}`: {reason}")]
    InvalidStyle {
        /// Dotted path of the offending field, e.g. `upper.color`.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A value is legal for the engine but outside what the settings form
    /// accepts.
    #[error("`{name}` = {value} is outside the settings range [{min}, {max}]")]
    OutOfBounds {
        /// Parameter name as it appears in the settings schema.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// The settings document could not be parsed or written.
    #[error("settings document: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_style(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidStyle {
            field,
            reason: reason.into(),
        }
    }
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
