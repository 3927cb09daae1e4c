//! Receipt composition and delivery.

use std::sync::Arc;

use chrono::Utc;

use crate::blockchain::types::TransferReceipt;
use crate::config::schema::PresentationConfig;
use crate::error::PayResult;
use crate::mail::{MailAddress, MailAttachment, MailResult, MailTransport, OutgoingMail};
use crate::observability::metrics;
use crate::payments::types::TransferRequest;
use crate::render::{
    EmailReceiptContext, PdfReceiptContext, PdfRenderer, ReceiptFacts, ReceiptRenderer,
};

pub const DEFAULT_SUBJECT: &str = "Payment Receipt";
pub const DEFAULT_PDF_FILE_NAME: &str = "receipt.pdf";

/// Renders receipts and mails them to both parties of a transfer.
pub struct ReceiptMailer {
    renderer: ReceiptRenderer,
    transport: Arc<dyn MailTransport>,
    presentation: PresentationConfig,
}

impl ReceiptMailer {
    pub fn new(
        presentation: PresentationConfig,
        transport: Arc<dyn MailTransport>,
        pdf: Arc<dyn PdfRenderer>,
    ) -> PayResult<Self> {
        Ok(Self {
            renderer: ReceiptRenderer::new(&presentation, pdf)?,
            transport,
            presentation,
        })
    }

    pub async fn verify(&self) -> MailResult<bool> {
        self.transport.verify().await
    }

    /// Render the PDF and email body for a confirmed transfer and send them.
    pub async fn deliver(
        &self,
        request: &TransferRequest,
        receipt: &TransferReceipt,
        token_symbol: &str,
    ) -> PayResult<()> {
        let facts = ReceiptFacts {
            org_name: &request.org_name,
            beneficiary: request.beneficiary,
            amount: &request.amount,
            token_symbol,
            tx_hash: receipt.tx_hash,
            payer: receipt.payer,
            confirmed_at: receipt.timestamp,
            additional_info: request.additional_info.as_deref(),
        };
        let now = Utc::now();

        let pdf = self
            .renderer
            .render_pdf(&PdfReceiptContext::new(&facts, &self.presentation, now))
            .await?;
        let html = self
            .renderer
            .render_email(&EmailReceiptContext::new(&facts, &self.presentation, now))?;

        let mail = compose_receipt_mail(request, &self.presentation, html, pdf);
        self.transport.send(mail).await?;

        metrics::record_email_sent();
        tracing::info!(
            tx_hash = %receipt.tx_hash,
            payer_email = %request.payer_email,
            org_email = %request.org_email,
            "Receipt emailed"
        );
        Ok(())
    }
}

/// Address a receipt from the organisation to the payer and the organisation.
pub fn compose_receipt_mail(
    request: &TransferRequest,
    presentation: &PresentationConfig,
    html: String,
    pdf: Vec<u8>,
) -> OutgoingMail {
    let file_name = presentation
        .pdf_file_name
        .clone()
        .unwrap_or_else(|| DEFAULT_PDF_FILE_NAME.to_string());

    OutgoingMail {
        from: MailAddress::named(&request.org_name, &request.org_email),
        to: vec![
            MailAddress::new(&request.payer_email),
            MailAddress::new(&request.org_email),
        ],
        subject: presentation
            .subject
            .clone()
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        html,
        attachments: vec![MailAttachment::pdf(file_name, pdf)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn request() -> TransferRequest {
        TransferRequest {
            token: Address::repeat_byte(0x20),
            amount: "1.5".to_string(),
            memo: None,
            beneficiary: Address::repeat_byte(0x22),
            org_name: "Acme Ltd".to_string(),
            org_email: "billing@acme.test".to_string(),
            payer_email: "payer@client.test".to_string(),
            additional_info: None,
        }
    }

    #[test]
    fn test_compose_defaults() {
        let mail = compose_receipt_mail(
            &request(),
            &PresentationConfig::default(),
            "<p>hi</p>".to_string(),
            b"%PDF".to_vec(),
        );

        assert_eq!(mail.from.to_string(), "Acme Ltd <billing@acme.test>");
        assert_eq!(
            mail.to,
            vec![
                MailAddress::new("payer@client.test"),
                MailAddress::new("billing@acme.test")
            ]
        );
        assert_eq!(mail.subject, "Payment Receipt");
        assert_eq!(mail.attachments.len(), 1);
        assert_eq!(mail.attachments[0].filename, "receipt.pdf");
        assert_eq!(mail.attachments[0].content, b"%PDF");
    }

    #[test]
    fn test_compose_overrides() {
        let presentation = PresentationConfig {
            subject: Some("Thanks for paying".to_string()),
            pdf_file_name: Some("acme-receipt.pdf".to_string()),
            ..PresentationConfig::default()
        };
        let mail = compose_receipt_mail(&request(), &presentation, String::new(), Vec::new());

        assert_eq!(mail.subject, "Thanks for paying");
        assert_eq!(mail.attachments[0].filename, "acme-receipt.pdf");
    }
}
