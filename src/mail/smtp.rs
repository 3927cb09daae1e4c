//! SMTP delivery through lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::schema::SmtpConfig;
use crate::mail::message::{MailAddress, OutgoingMail};
use crate::mail::{MailError, MailResult, MailTransport};

/// Mail transport backed by an async SMTP connection pool.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send or verify.
    pub fn new(config: &SmtpConfig) -> MailResult<Self> {
        let params = TlsParameters::new(config.host.clone())
            .map_err(|e| MailError::Config(format!("TLS setup for {}: {}", config.host, e)))?;
        let tls = if config.is_secure() {
            Tls::Wrapper(params)
        } else {
            Tls::Opportunistic(params)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            .port(config.port)
            .tls(tls)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if !config.user.is_empty() {
            builder = builder.credentials(Credentials::new(config.user.clone(), config.pass.clone()));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            secure = config.is_secure(),
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
            host: config.host.clone(),
            port: config.port,
        })
    }
}

fn mailbox(address: &MailAddress) -> MailResult<Mailbox> {
    let email = address
        .email
        .parse()
        .map_err(|e| MailError::Address(format!("'{}': {}", address.email, e)))?;
    Ok(Mailbox::new(address.name.clone(), email))
}

/// Compose a MIME message: HTML body followed by the attachments.
pub(crate) fn to_message(mail: &OutgoingMail) -> MailResult<Message> {
    let mut builder = Message::builder()
        .from(mailbox(&mail.from)?)
        .subject(mail.subject.as_str());
    for recipient in &mail.to {
        builder = builder.to(mailbox(recipient)?);
    }

    let mut body = MultiPart::mixed().singlepart(SinglePart::html(mail.html.clone()));
    for attachment in &mail.attachments {
        let content_type = ContentType::parse(&attachment.content_type)
            .map_err(|e| MailError::Message(format!("{}: {}", attachment.content_type, e)))?;
        body = body.singlepart(
            Attachment::new(attachment.filename.clone()).body(attachment.content.clone(), content_type),
        );
    }

    builder
        .multipart(body)
        .map_err(|e| MailError::Message(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn verify(&self) -> MailResult<bool> {
        let ok = self
            .transport
            .test_connection()
            .await
            .map_err(|e| MailError::Transport(format!("{}:{}: {}", self.host, self.port, e)))?;
        tracing::info!(host = %self.host, ok, "SMTP connection verified");
        Ok(ok)
    }

    async fn send(&self, mail: OutgoingMail) -> MailResult<()> {
        let message = to_message(&mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        tracing::debug!(subject = %mail.subject, recipients = mail.to.len(), "Email sent");
        Ok(())
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
