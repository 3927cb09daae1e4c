//! Payment metrics.
//!
//! # Metrics
//! - `payhash_payments_total` (counter): single payments by outcome
//! - `payhash_payment_duration_seconds` (histogram): end-to-end payment latency
//! - `payhash_batch_items_total` (counter): concurrent batch items by outcome
//! - `payhash_emails_sent_total` (counter): receipt emails accepted by SMTP

use std::time::Duration;

pub fn record_payment(outcome: &'static str, elapsed: Duration) {
    ::metrics::counter!("payhash_payments_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("payhash_payment_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_batch_item(outcome: &'static str) {
    ::metrics::counter!("payhash_batch_items_total", "outcome" => outcome).increment(1);
}

pub fn record_email_sent() {
    ::metrics::counter!("payhash_emails_sent_total").increment(1);
}
