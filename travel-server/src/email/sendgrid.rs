//! SendGrid v3 mail client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;

use super::error::EmailError;
use super::message::ConfirmationEmail;

/// Default base URL for the SendGrid API.
pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// Configuration for the SendGrid client.
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Sender address
    pub from: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SendGridConfig {
    /// Create a new config with the given API key and sender address.
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            from: from.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

impl<'a> MailRequest<'a> {
    fn new(from: &'a str, email: &'a ConfirmationEmail) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from: Address { email: from },
            subject: &email.subject,
            // SendGrid requires text/plain before text/html.
            content: [
                Content {
                    kind: "text/plain",
                    value: &email.text,
                },
                Content {
                    kind: "text/html",
                    value: &email.html,
                },
            ],
        }
    }
}

/// Client for the SendGrid mail send endpoint.
#[derive(Debug, Clone)]
pub struct SendGridClient {
    http: reqwest::Client,
    base_url: String,
    from: String,
}

impl SendGridClient {
    /// Create a new SendGrid client.
    pub fn new(config: SendGridConfig) -> Result<Self, EmailError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| EmailError::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            from: config.from,
        })
    }

    /// Send one email.
    pub async fn send(&self, email: &ConfirmationEmail) -> Result<(), EmailError> {
        let url = format!("{}/v3/mail/send", self.base_url);
        let body = MailRequest::new(&self.from, email);

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(EmailError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}
