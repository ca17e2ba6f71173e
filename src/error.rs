use derive_more::Display;

/// Everything here is recoverable: the caller surfaces the message and the
/// user retries by re-invoking the operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Error {
    /// A transition was requested without a captured photo. No side effect.
    #[display(fmt = "Take a Selfie First!")]
    MissingPhoto,

    /// A transition was requested without a known location. No side effect.
    #[display(fmt = "Location is not available")]
    MissingLocation,

    /// Platform access (location/camera) was refused.
    #[display(fmt = "Permission denied: {}", _0)]
    PermissionDenied(String),

    /// Reverse geocoding failed. Non-fatal; display code degrades to a
    /// placeholder address.
    #[display(fmt = "Address lookup failed: {}", _0)]
    Geocode(String),

    /// Check-in/out submission failed (transport error or non-2xx).
    /// Local state is unchanged and the photo stays attached.
    #[display(fmt = "Failed to send check data: {}", _0)]
    Submission(String),

    /// The persisted session document could not be read or written.
    #[display(fmt = "Session store error: {}", _0)]
    Store(String),
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_errors_carry_user_facing_messages() {
        assert_eq!(Error::MissingPhoto.to_string(), "Take a Selfie First!");
        assert_eq!(
            Error::Submission("timeout".into()).to_string(),
            "Failed to send check data: timeout"
        );
    }
}
