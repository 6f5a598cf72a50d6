use std::num::IntErrorKind;

use thiserror::Error;

/// Money is held in whole currency units. The account never deals in fractions,
/// so 500 means five hundred, not five.
pub type Amount = i64;

/// Balance credited when an account is opened (the minimum opening deposit).
pub const OPENING_BALANCE: Amount = 500;

/// Format an amount with thousands separators.
/// Example: 5500 -> "5,500", -1200 -> "-1,200"
pub fn format_amount(amount: Amount) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// Parse user input into an amount.
/// Example: "150" -> 150, "5,000" -> 5000, "150.00" -> 150, "" -> 0
///
/// Amounts are never negative; "-50" is rejected.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        // A cleared numeric field reads as zero
        return Ok(0);
    }
    if input.starts_with('-') {
        return Err(ParseAmountError::Negative(input.to_string()));
    }

    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (input, None),
    };

    if let Some(fraction) = fraction {
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseAmountError::InvalidFormat(input.to_string()));
        }
        if fraction.chars().any(|c| c != '0') {
            return Err(ParseAmountError::Fractional(input.to_string()));
        }
    }

    let cleaned: String = whole.chars().filter(|c| *c != ',' && *c != '_').collect();
    if matches!(cleaned.as_str(), "" | "+") {
        return Err(ParseAmountError::InvalidFormat(input.to_string()));
    }

    cleaned.parse::<Amount>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ParseAmountError::OutOfRange(input.to_string())
        }
        _ => ParseAmountError::InvalidFormat(input.to_string()),
    })
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("invalid amount '{0}'")]
    InvalidFormat(String),

    #[error("amount '{0}' must not be negative")]
    Negative(String),

    #[error("amount '{0}' must be a whole number")]
    Fractional(String),

    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}
