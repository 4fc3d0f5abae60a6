//! Amount extraction for bolt11 Lightning invoices.
//!
//! Zap totals only need the invoice amount, which lives in the
//! human-readable part before the bech32 separator:
//! `ln` + currency prefix + optional digits + optional multiplier.
//! Checksum and signature verification belong to the payment layer,
//! not to receipt aggregation.

use thiserror::Error;

use crate::constants::MSATS_PER_SAT;

/// Millisatoshis in one whole bitcoin (amounts without a multiplier
/// are denominated in BTC)
const MSATS_PER_BTC: u128 = 100_000_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Bolt11Error {
    #[error("invoice does not start with 'ln'")]
    MissingPrefix,
    #[error("invoice has no bech32 separator")]
    MissingSeparator,
    #[error("invalid amount digits")]
    InvalidAmount,
    #[error("invalid amount multiplier '{0}'")]
    InvalidMultiplier(char),
    #[error("amount overflows 64-bit millisatoshis")]
    Overflow,
    #[error("pico amount carries sub-millisatoshi precision")]
    SubMillisat,
}

/// Decode the invoice amount in millisatoshis.
///
/// Returns `Ok(None)` for amountless invoices, which are valid per
/// BOLT-11 (the payer chooses the amount).
pub fn amount_msats(invoice: &str) -> Result<Option<u64>, Bolt11Error> {
    // bech32 is case-insensitive; invoices in QR codes are often upper-case
    let lower = invoice.trim().to_lowercase();

    // The HRP ends at the last '1' in the string
    let separator = lower.rfind('1').ok_or(Bolt11Error::MissingSeparator)?;
    let hrp = &lower[..separator];

    let rest = hrp.strip_prefix("ln").ok_or(Bolt11Error::MissingPrefix)?;

    // Skip the currency prefix (bc, tb, tbs, bcrt, ...). Without a
    // whitelist of network prefixes, a multiplier letter with no digits
    // is indistinguishable from a longer currency prefix, so it parses
    // as amountless.
    let amount_part = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    if amount_part.is_empty() {
        return Ok(None);
    }

    let (digits, multiplier) = match amount_part.chars().last() {
        Some(c) if c.is_ascii_digit() => (amount_part, None),
        // the trailing char may be multi-byte, so slice by its UTF-8 width
        Some(c) => (&amount_part[..amount_part.len() - c.len_utf8()], Some(c)),
        None => return Ok(None),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Bolt11Error::InvalidAmount);
    }
    let base: u128 = digits.parse().map_err(|_| Bolt11Error::InvalidAmount)?;

    let msats = match multiplier {
        None => base.checked_mul(MSATS_PER_BTC).ok_or(Bolt11Error::Overflow)?,
        Some('m') => base
            .checked_mul(MSATS_PER_BTC / 1_000)
            .ok_or(Bolt11Error::Overflow)?,
        Some('u') => base
            .checked_mul(MSATS_PER_BTC / 1_000_000)
            .ok_or(Bolt11Error::Overflow)?,
        Some('n') => base
            .checked_mul(MSATS_PER_BTC / 1_000_000_000)
            .ok_or(Bolt11Error::Overflow)?,
        Some('p') => {
            // 1 pico-BTC is 0.1 msat; BOLT-11 forbids sub-msat amounts
            if base % 10 != 0 {
                return Err(Bolt11Error::SubMillisat);
            }
            base / 10
        }
        Some(c) => return Err(Bolt11Error::InvalidMultiplier(c)),
    };

    u64::try_from(msats)
        .map(Some)
        .map_err(|_| Bolt11Error::Overflow)
}

/// Floor-convert millisatoshis to whole satoshis
pub fn msats_to_sats(msats: u64) -> u64 {
    msats / MSATS_PER_SAT
}
