//! Single payment flow against mock chain, mailer and PDF renderer.

use alloy::primitives::U256;
use payhash::config::PresentationConfig;

mod common;
use common::{harness, harness_with, request, MockChain, MockMailer, PDF_BYTES};

#[tokio::test]
async fn test_pay_emails_receipt_to_payer_and_org() {
    let h = harness(MockChain::new(), MockMailer::default());

    let result = h.orchestrator.pay(&request(0)).await;
    assert!(result.is_success(), "{:?}", result);
    let receipt = result.receipt().unwrap().clone();

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    let mail = &sent[0];
    assert_eq!(mail.from.to_string(), "Acme Ltd <billing@acme.test>");
    let recipients: Vec<_> = mail.to.iter().map(|to| to.email.as_str()).collect();
    assert_eq!(recipients, vec!["payer0@client.test", "billing@acme.test"]);
    assert_eq!(mail.subject, "Payment Receipt");
    assert!(mail.html.contains(&receipt.tx_hash.to_string()));

    assert_eq!(mail.attachments.len(), 1);
    assert_eq!(mail.attachments[0].filename, "receipt.pdf");
    assert_eq!(mail.attachments[0].content_type, "application/pdf");
    assert_eq!(mail.attachments[0].content, PDF_BYTES);

    let documents = h.pdf.documents.lock().unwrap();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].contains("1.5 AlphaUSD"));
}

#[tokio::test]
async fn test_pay_scales_amount_by_token_decimals() {
    let h = harness(MockChain::new(), MockMailer::default());

    h.orchestrator.pay(&request(0)).await;

    let transfers = h.chain.transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].transfer.amount, U256::from(1_500_000u64));
    assert_eq!(transfers[0].transfer.to, request(0).beneficiary);
    assert!(transfers[0].slot.is_none());
}

#[tokio::test]
async fn test_pay_attaches_memo() {
    let h = harness(MockChain::new(), MockMailer::default());
    let mut req = request(0);
    req.memo = Some("INV-42".to_string());

    h.orchestrator.pay(&req).await;

    assert_eq!(h.chain.transfers()[0].transfer.memo.as_ref(), b"INV-42");
}

#[tokio::test]
async fn test_pay_on_unexpected_chain_sends_nothing() {
    let h = harness(MockChain::new().on_chain(1), MockMailer::default());

    let result = h.orchestrator.pay(&request(0)).await;

    assert_eq!(result.error(), Some("Receipt not found"));
    assert!(h.chain.transfers().is_empty());
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_pay_on_configured_chain() {
    let h = harness(MockChain::new().on_chain(1), MockMailer::default());
    let orchestrator = h.orchestrator.with_expected_chain_id(1);

    let result = orchestrator.pay(&request(0)).await;

    assert!(result.is_success());
    assert_eq!(h.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_pay_reports_mail_failure_after_transfer() {
    let h = harness(MockChain::new(), MockMailer::rejecting("payer0@client.test"));

    let result = h.orchestrator.pay(&request(0)).await;

    assert!(result.error().unwrap().contains("550"));
    assert_eq!(h.chain.transfers().len(), 1);
}

#[tokio::test]
async fn test_pay_rejects_bad_amount() {
    let h = harness(MockChain::new(), MockMailer::default());
    let mut req = request(0);
    req.amount = "one and a half".to_string();

    let result = h.orchestrator.pay(&req).await;

    assert!(result.error().unwrap().starts_with("Invalid amount"));
    assert!(h.chain.transfers().is_empty());
}

#[tokio::test]
async fn test_pay_rejects_amount_finer_than_token_decimals() {
    let h = harness(MockChain::new(), MockMailer::default());
    let mut req = request(0);
    req.amount = "1.1234567".to_string();

    let result = h.orchestrator.pay(&req).await;

    assert!(result.error().unwrap().starts_with("Invalid amount '1.1234567'"));
    assert!(h.chain.transfers().is_empty());
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_pay_without_account() {
    let h = harness(MockChain::new().without_accounts(), MockMailer::default());

    let result = h.orchestrator.pay(&request(0)).await;

    assert_eq!(result.error(), Some("No sender account available"));
}

#[tokio::test]
async fn test_presentation_overrides_reach_the_mail() {
    let presentation = PresentationConfig {
        subject: Some("Thanks from Acme".to_string()),
        pdf_file_name: Some("acme.pdf".to_string()),
        footer_text: Some("Acme billing".to_string()),
        ..PresentationConfig::default()
    };
    let h = harness_with(MockChain::new(), MockMailer::default(), presentation);

    h.orchestrator.pay(&request(0)).await;

    let mail = &h.mailer.sent()[0];
    assert_eq!(mail.subject, "Thanks from Acme");
    assert_eq!(mail.attachments[0].filename, "acme.pdf");
    assert!(mail.html.contains("Thanks from Acme"));
    assert!(mail.html.contains("Acme billing"));
}

#[tokio::test]
async fn test_verify_transporter() {
    let h = harness(MockChain::new(), MockMailer::default());
    assert!(h.orchestrator.verify_transporter().await.unwrap());

    let down = MockMailer {
        unreachable: true,
        ..MockMailer::default()
    };
    let h = harness(MockChain::new(), down);
    assert!(h.orchestrator.verify_transporter().await.is_err());
}
