use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::delivery::{MailMessage, MailSender, PdfConverter, PdfOptions};
use crate::errors::ServiceError;
use crate::rendering::{self, TemplateStore};
use crate::repositories::ProductRepository;
use crate::services::OrderService;

/// Returned by `email_order` once the transport accepted the message.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryConfirmation {
    pub order_id: Uuid,
    pub recipient: String,
}

/// Turns assembled orders and product lists into delivered documents:
/// HTML via the rendering module, then PDF bytes or an outbound e-mail
/// through the delivery adapters.
#[derive(Clone)]
pub struct DocumentService {
    orders: OrderService,
    products: Arc<dyn ProductRepository>,
    templates: TemplateStore,
    pdf: Arc<dyn PdfConverter>,
    mail: Arc<dyn MailSender>,
    mail_from: String,
}

impl DocumentService {
    pub fn new(
        orders: OrderService,
        products: Arc<dyn ProductRepository>,
        templates: TemplateStore,
        pdf: Arc<dyn PdfConverter>,
        mail: Arc<dyn MailSender>,
        mail_from: String,
    ) -> Self {
        Self {
            orders,
            products,
            templates,
            pdf,
            mail,
            mail_from,
        }
    }

    /// Renders the order document and converts it to PDF bytes.
    #[instrument(skip(self))]
    pub async fn download_order(&self, order_id: Uuid) -> Result<Vec<u8>, ServiceError> {
        let document = self.orders.order_document(order_id).await?;
        let template = self.templates.order_template()?;
        let html = rendering::render_order_document(&document, &template);
        self.pdf.convert(&html, &PdfOptions::default()).await
    }

    /// E-mails the rendered order document to its customer. The customer
    /// must exist and have a non-empty e-mail address; that precondition is
    /// checked before any adapter is invoked.
    #[instrument(skip(self))]
    pub async fn email_order(&self, order_id: Uuid) -> Result<DeliveryConfirmation, ServiceError> {
        let document = self.orders.order_document(order_id).await?;

        let recipient = document
            .customer
            .as_ref()
            .filter(|c| c.has_email())
            .and_then(|c| c.email.clone())
            .ok_or_else(|| {
                ServiceError::PreconditionFailed(format!(
                    "Customer of order {} has no e-mail address",
                    order_id
                ))
            })?;

        let template = self.templates.order_template()?;
        let html = rendering::render_order_document(&document, &template);

        let message = MailMessage {
            from: self.mail_from.clone(),
            to: recipient.clone(),
            subject: document.order.title.clone(),
            html_body: html,
        };
        self.mail.send(&message).await?;

        Ok(DeliveryConfirmation {
            order_id,
            recipient,
        })
    }

    /// Renders the full product price list and converts it to PDF bytes.
    #[instrument(skip(self))]
    pub async fn download_price_list(&self) -> Result<Vec<u8>, ServiceError> {
        let products = self.products.find_all().await?;
        let template = self.templates.price_list_template()?;
        let html = rendering::render_price_list(&products, &template);
        self.pdf.convert(&html, &PdfOptions::default()).await
    }
}
