/// Outgoing account mail
///
/// Messages carry a single link back to the client application. The default
/// implementation writes the link to the log instead of delivering it.
use crate::error::AppResult;

#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, email: &str, name: &str, token: &str) -> AppResult<()>;

    async fn send_password_reset(&self, email: &str, name: &str, token: &str) -> AppResult<()>;
}

/// Mailer that logs the links it would send
#[derive(Debug, Clone)]
pub struct LogMailer {
    client_url: String,
}

impl LogMailer {
    pub fn new(client_url: impl Into<String>) -> Self {
        Self {
            client_url: client_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/verify-email?token={}", self.client_url, token)
    }

    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={}", self.client_url, token)
    }
}

#[async_trait::async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, email: &str, name: &str, token: &str) -> AppResult<()> {
        tracing::info!(
            to = %email,
            name = %name,
            link = %self.verification_link(token),
            "Verification email"
        );
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, name: &str, token: &str) -> AppResult<()> {
        tracing::info!(
            to = %email,
            name = %name,
            link = %self.reset_link(token),
            "Password reset email"
        );
        Ok(())
    }
}
