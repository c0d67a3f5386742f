use thiserror::Error;

/// Failure taxonomy for a weather lookup.
///
/// Every failure path in the client normalizes to one of these variants; the
/// `Display` output is the exact text shown to the user. Underlying causes
/// (transport errors, parse errors) are logged where they occur and are
/// deliberately not part of the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The provider does not know the requested city (HTTP 404).
    #[error("City \"{0}\" not found. Please check the spelling and try again.")]
    NotFound(String),

    /// The credential was rejected (HTTP 401), regardless of body contents.
    #[error("Invalid API key. Please check your configuration.")]
    Unauthorized,

    /// Any other HTTP error; carries the provider-supplied message when one
    /// exists, otherwise [`LookupError::provider_fallback`].
    #[error("{0}")]
    Provider(String),

    /// Transport failures, malformed success payloads, anything uncategorized.
    #[error("An unexpected error occurred")]
    Unexpected,
}

impl LookupError {
    /// Message used for an HTTP error response without a usable provider message.
    pub fn provider_fallback() -> Self {
        Self::Provider("Failed to fetch weather data".to_string())
    }
}
