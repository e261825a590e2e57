//! Email delivery error types.

/// Errors that can occur when rendering or sending a confirmation email.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The mail provider rejected the API key
    #[error("unauthorized: check SENDGRID_API_KEY")]
    Unauthorized,

    /// The mail provider returned an error status
    #[error("mail API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The API key cannot be used as a header value
    #[error("invalid API key format")]
    InvalidApiKey,

    /// A message template failed to render
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}
