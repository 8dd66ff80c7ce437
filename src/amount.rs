//! NEAR amount conversion between human decimals and yoctoNEAR strings

use crate::constants::NEAR_NOMINATION_EXP;
use crate::error::{GuestbookError, Result};

/// Convert a human-entered NEAR amount ("1.5", "1,000") into yoctoNEAR.
///
/// Blank input means zero. More than 24 fractional digits, a second dot or
/// any non-digit is rejected.
pub fn parse_near_amount(input: &str) -> Result<String> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok("0".to_string());
    }

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (cleaned.as_str(), ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !all_digits(whole)
        || !all_digits(fraction)
        || fraction.len() > NEAR_NOMINATION_EXP
    {
        return Err(GuestbookError::InvalidAmount(input.to_string()));
    }

    let mut digits = String::with_capacity(whole.len() + NEAR_NOMINATION_EXP);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(NEAR_NOMINATION_EXP - fraction.len()));

    // Must fit a u128 balance
    let value: u128 = digits
        .parse()
        .map_err(|_| GuestbookError::InvalidAmount(input.to_string()))?;
    Ok(value.to_string())
}

/// Render a yoctoNEAR string as NEAR with at most `fraction_digits` decimals
/// (rounded half up, trailing zeros trimmed).
pub fn format_near_amount(yocto: &str, fraction_digits: usize) -> Result<String> {
    let fraction_digits = fraction_digits.min(NEAR_NOMINATION_EXP);
    let mut value: u128 = yocto
        .trim()
        .parse()
        .map_err(|_| GuestbookError::InvalidAmount(yocto.to_string()))?;

    let dropped = NEAR_NOMINATION_EXP - fraction_digits;
    if dropped > 0 {
        let half = 5 * 10u128.pow((dropped - 1) as u32);
        value = value.saturating_add(half);
    }

    let unit = 10u128.pow(NEAR_NOMINATION_EXP as u32);
    let whole = value / unit;
    let fraction = value % unit;

    let fraction = format!("{:0width$}", fraction, width = NEAR_NOMINATION_EXP);
    let fraction = fraction[..fraction_digits].trim_end_matches('0');

    let whole = group_thousands(&whole.to_string());
    if fraction.is_empty() {
        Ok(whole)
    } else {
        Ok(format!("{}.{}", whole, fraction))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
