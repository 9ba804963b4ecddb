use serde::{Deserialize, Serialize};

/// More fraction digits than this are ignored when formatting.
pub const MAX_FRACTION_DIGITS: u32 = 9;

/// Locale currency convention used to display prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub fraction_digits: u32,
    /// `true` renders `1.000 ₫`, `false` renders `$1,000`.
    pub symbol_after: bool,
}

impl CurrencyFormat {
    /// Vietnamese dong as formatted by the `vi-VN` locale.
    pub fn vnd() -> Self {
        Self {
            code: "VND".to_string(),
            symbol: "₫".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
            fraction_digits: 0,
            symbol_after: true,
        }
    }

    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let digits = self.fraction_digits.min(MAX_FRACTION_DIGITS);
        let scale = 10u128.pow(digits);
        let scaled = (amount.abs() * scale as f64).round() as u128;
        let integer = scaled / scale;
        let fraction = scaled % scale;

        let mut number = group_thousands(integer, self.thousands_separator);
        if digits > 0 {
            number.push(self.decimal_separator);
            number.push_str(&format!("{:0width$}", fraction, width = digits as usize));
        }

        let sign = if scaled > 0 && amount < 0.0 { "-" } else { "" };
        if self.symbol_after {
            format!("{}{}\u{a0}{}", sign, number, self.symbol)
        } else {
            format!("{}{}{}", sign, self.symbol, number)
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::vnd()
    }
}

fn group_thousands(value: u128, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
