//! Transactional mail delivery via an HTTP mail API

use serde::Serialize;

use crate::config::MailConfig;
use crate::error::{AppError, AppResult};

/// Client for the transactional mail API
#[derive(Clone)]
pub struct MailClient {
    client: reqwest::Client,
    config: MailConfig,
}

/// Outgoing message payload
#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

impl MailClient {
    /// Create a new MailClient instance
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send a plain-text message to a single recipient
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let payload = MailPayload {
            from: &self.config.from_address,
            to,
            subject,
            body,
        };

        let response = self
            .client
            .post(&self.config.api_endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::MailError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Mail API returned {}: {}", status, text);
            return Err(AppError::MailError(format!(
                "Mail API returned {}",
                status
            )));
        }

        tracing::debug!("Mail sent to {}: {}", to, subject);
        Ok(())
    }

    /// Send the welcome message after registration
    pub async fn send_welcome(&self, to: &str, first_name: &str) -> AppResult<()> {
        let body = format!(
            "Hello {},\n\nYour account on the Manufacturing ERP Platform has been created.\n\
             You can now sign in with your username and password.\n",
            first_name
        );
        self.send(to, "Welcome to the Manufacturing ERP Platform", &body)
            .await
    }

    /// Send a password-reset link containing the one-time token
    pub async fn send_password_reset(&self, to: &str, token: &str) -> AppResult<()> {
        let link = format!(
            "{}/reset-password?token={}",
            self.config.frontend_url.trim_end_matches('/'),
            token
        );
        let body = format!(
            "A password reset was requested for your account.\n\n\
             Open the link below to choose a new password. The link can be used once.\n\n{}\n\n\
             If you did not request this, you can ignore this message.\n",
            link
        );
        self.send(to, "Password reset request", &body).await
    }
}
