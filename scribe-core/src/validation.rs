//! Repository URL validation
//!
//! Pure checks run before a submission is attempted. Nothing here touches
//! the network.

use thiserror::Error;
use url::Url;

/// The only host repositories may be submitted from
pub const REPOSITORY_HOST: &str = "github.com";

/// Reasons a repository URL is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Repository URL is required")]
    Empty,

    #[error("Not a valid absolute URL: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("URL must point to github.com, got '{0}'")]
    WrongHost(String),

    #[error("URL must not carry credentials")]
    Credentials,

    #[error("URL must not specify a port, got {0}")]
    UnexpectedPort(u16),

    #[error("URL must reference a repository, not the github.com root")]
    MissingPath,
}

/// Returns `true` if `input` is an acceptable repository reference
pub fn validate(input: &str) -> bool {
    check(input).is_ok()
}

/// Checks `input` and returns the parsed URL, or the reason it was rejected
pub fn check(input: &str) -> Result<Url, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if host == REPOSITORY_HOST => {}
        Some(host) => return Err(ValidationError::WrongHost(host.to_string())),
        None => return Err(ValidationError::WrongHost(String::new())),
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(ValidationError::Credentials);
    }

    // Default ports are normalized away by the parser
    if let Some(port) = url.port() {
        return Err(ValidationError::UnexpectedPort(port));
    }

    if url.path().trim_matches('/').is_empty() {
        return Err(ValidationError::MissingPath);
    }

    Ok(url)
}
