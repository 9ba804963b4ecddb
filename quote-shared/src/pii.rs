use serde::{Serialize, Deserialize, Serializer};
use std::fmt;

/// Number of trailing characters left readable when a masked value is printed.
const VISIBLE_TAIL: usize = 3;

/// Wrapper for customer contact data (phone numbers mostly).
///
/// `Debug` and `Display` only reveal the last few characters so the value can
/// be correlated in logs without leaking it. Serialization is transparent
/// because API payloads and stored rows need the real value.
#[derive(Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

fn mask_tail(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= VISIBLE_TAIL {
        return "*".repeat(chars.len());
    }
    let hidden = chars.len() - VISIBLE_TAIL;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask_tail(&self.0.to_string()))
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask_tail(&self.0.to_string()))
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    /// Borrow the unmasked value.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_is_masked_in_logs() {
        let phone = Masked("0901234567".to_string());
        assert_eq!(format!("{}", phone), "*******567");
        assert_eq!(format!("{:?}", phone), "*******567");
    }

    #[test]
    fn test_short_values_are_fully_hidden() {
        assert_eq!(format!("{}", Masked("12".to_string())), "**");
    }

    #[test]
    fn test_serialization_is_transparent() {
        let phone = Masked("0901234567".to_string());
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"0901234567\"");
    }
}
