//! Currency formatting. The locale/currency pair (pt-BR / BRL) is a policy
//! constant of the business, not user-configurable.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as Brazilian reais: `R$ 1.234,56`. Always two decimal
/// places, `.` as the thousands separator and `,` as the decimal separator.
/// Midpoints round away from zero, the usual behavior for displayed prices.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits
        .split_once('.')
        .unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}
