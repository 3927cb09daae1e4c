//! Decimal amount scaling.

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::U256;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Scale a human-readable decimal amount to token base units.
///
/// `decimals` must be the value reported by the token contract. Amounts with
/// more significant fraction digits than the token supports are rejected.
pub fn scale_amount(amount: &str, decimals: u8) -> BlockchainResult<U256> {
    let invalid = |reason: String| BlockchainError::InvalidAmount {
        amount: amount.to_string(),
        reason,
    };

    let trimmed = amount.trim();
    if let Some((_, fraction)) = trimmed.split_once('.') {
        let significant = fraction.trim_end_matches('0').len();
        if significant > usize::from(decimals) {
            return Err(invalid(format!(
                "{} fraction digits, token supports {}",
                significant, decimals
            )));
        }
    }

    match parse_units(trimmed, decimals).map_err(|e| invalid(e.to_string()))? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(invalid("amount must not be negative".to_string())),
    }
}
