use thiserror::Error;

/// Amounts are integer cents. 1 unit = 100 cents.
pub type Cents = i64;

/// Format cents as a plain decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a decimal string into cents. A leading `+` or `-` is accepted,
/// extra fractional digits are truncated.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "-3" -> -300
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseCentsError::Empty);
    }

    let (negative, digits) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let (units_str, fraction_str) = digits.split_once('.').unwrap_or((digits, ""));
    if units_str.is_empty() && fraction_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat(input.to_string()));
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !fraction_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat(input.to_string()));
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseCentsError::Overflow(input.to_string()))?
    };

    // "5" means 50 cents, "05" means 5, anything past two digits is dropped
    let fraction: i64 = match fraction_str.len() {
        0 => 0,
        1 => i64::from(fraction_str.as_bytes()[0] - b'0') * 10,
        _ => fraction_str[..2]
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat(input.to_string()))?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or_else(|| ParseCentsError::Overflow(input.to_string()))?;

    Ok(if negative { -cents } else { cents })
}

/// Sum amounts exactly and clamp the result to the `Cents` range once at the
/// end, so the outcome does not depend on the order of the inputs.
pub fn sum_cents(amounts: impl IntoIterator<Item = Cents>) -> Cents {
    let total: i128 = amounts.into_iter().map(i128::from).sum();
    total.clamp(i128::from(Cents::MIN), i128::from(Cents::MAX)) as Cents
}

/// Serde adapter writing cents as the same decimal string the CLI prints,
/// e.g. `5000` <-> `"50.00"`.
pub mod cents_serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_cents, parse_cents, Cents};

    pub fn serialize<S>(value: &Cents, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_cents(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Cents, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_cents(&s).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCentsError {
    #[error("empty amount")]
    Empty,

    #[error("invalid money format: {0}")]
    InvalidFormat(String),

    #[error("amount out of range: {0}")]
    Overflow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
        assert_eq!(format_cents(i64::MIN), "-92233720368547758.08");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents("0.05"), Ok(5));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("7."), Ok(700));
        assert_eq!(parse_cents("+1.10"), Ok(110));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents("100.999"), Ok(10099));
        assert_eq!(parse_cents("  42 "), Ok(4200));
    }

    #[test]
    fn test_sum_cents_is_order_independent() {
        let forward = sum_cents([i64::MAX, 1, -1]);
        let backward = sum_cents([-1, 1, i64::MAX]);
        let mixed = sum_cents([1, i64::MAX, -1]);
        assert_eq!(forward, i64::MAX);
        assert_eq!(backward, i64::MAX);
        assert_eq!(mixed, i64::MAX);

        assert_eq!(sum_cents([i64::MIN, -5, 10]), i64::MIN + 5);
        assert_eq!(sum_cents([i64::MAX, i64::MAX]), i64::MAX);
        assert_eq!(sum_cents(std::iter::empty()), 0);
    }

    #[test]
    fn test_cents_serde_uses_decimal_strings() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Row {
            #[serde(with = "cents_serde")]
            amount: Cents,
        }

        let json = serde_json::to_string(&Row { amount: -1250 }).unwrap();
        assert_eq!(json, r#"{"amount":"-12.50"}"#);

        let row: Row = serde_json::from_str(r#"{"amount":"110.00"}"#).unwrap();
        assert_eq!(row, Row { amount: 11000 });
        assert!(serde_json::from_str::<Row>(r#"{"amount":"lots"}"#).is_err());
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert_eq!(parse_cents(""), Err(ParseCentsError::Empty));
        assert!(matches!(
            parse_cents("abc"),
            Err(ParseCentsError::InvalidFormat(_))
        ));
        assert!(parse_cents("12.34.56").is_err());
        assert!(parse_cents("-").is_err());
        assert!(parse_cents(".").is_err());
        assert!(matches!(
            parse_cents("99999999999999999999"),
            Err(ParseCentsError::Overflow(_))
        ));
    }
}
