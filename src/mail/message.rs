//! Transport-independent email types.

use std::fmt;

/// Email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    pub name: Option<String>,
    pub email: String,
}

impl MailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    pub fn named(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

/// A file attached to an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    /// MIME type, e.g. `application/pdf`.
    pub content_type: String,
    pub content: Vec<u8>,
}

impl MailAttachment {
    pub fn pdf(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: "application/pdf".to_string(),
            content,
        }
    }
}

/// A fully composed HTML email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: MailAddress,
    pub to: Vec<MailAddress>,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<MailAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        assert_eq!(
            MailAddress::named("Acme Ltd", "billing@acme.test").to_string(),
            "Acme Ltd <billing@acme.test>"
        );
        assert_eq!(MailAddress::new("payer@client.test").to_string(), "payer@client.test");
    }

    #[test]
    fn test_pdf_attachment() {
        let attachment = MailAttachment::pdf("receipt.pdf", b"%PDF".to_vec());
        assert_eq!(attachment.content_type, "application/pdf");
        assert_eq!(attachment.content, b"%PDF");
    }
}
