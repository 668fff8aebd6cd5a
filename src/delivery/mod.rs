//! Delivery boundary: HTML-to-PDF conversion and outbound mail. Both are
//! external collaborators consumed behind narrow traits; the core neither
//! knows nor cares how conversion or transport actually happens. The stub
//! implementations here back the server binary when no real engine is
//! configured, and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ServiceError;

/// Page geometry options passed through to the converter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfOptions {
    pub format: PageFormat,
    pub landscape: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    A4,
    Letter,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            format: PageFormat::A4,
            landscape: false,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// Converts an HTML document to PDF bytes. Conversion failures surface
    /// as `ServiceError::ExternalServiceError`.
    async fn convert(&self, html: &str, options: &PdfOptions) -> Result<Vec<u8>, ServiceError>;
}

/// An outbound e-mail carrying a rendered document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Dispatches a message. Transport failures surface as
    /// `ServiceError::ExternalServiceError`.
    async fn send(&self, message: &MailMessage) -> Result<(), ServiceError>;
}

/// Pass-through converter that wraps the HTML bytes unchanged. Stands in for
/// a real engine in development and in the integration tests.
#[derive(Debug, Default, Clone)]
pub struct PassthroughPdfConverter;

#[async_trait]
impl PdfConverter for PassthroughPdfConverter {
    async fn convert(&self, html: &str, _options: &PdfOptions) -> Result<Vec<u8>, ServiceError> {
        Ok(html.as_bytes().to_vec())
    }
}

/// Mail sender that only logs the dispatch. Used when no transport is
/// configured.
#[derive(Debug, Default, Clone)]
pub struct LoggingMailSender;

#[async_trait]
impl MailSender for LoggingMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), ServiceError> {
        info!(to = %message.to, subject = %message.subject, "mail transport not configured; logging only");
        Ok(())
    }
}
