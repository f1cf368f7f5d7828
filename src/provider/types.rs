use std::time::Duration;

/// Errors a provider client may raise from a fetch.
///
/// The aggregator classifies every variant the same way (the provider's
/// slot is recorded with an error status), so clients must not fail with
/// anything outside this enum.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("malformed upstream payload: {0}")]
    Parse(String),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ProviderError::UpstreamStatus(status.as_u16())
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}
