// Duration expressions for configuration values (e.g. "10m", "1h30m", "90s")

use anyhow::Result;
use std::time::Duration;

/// Parse a duration expression made of `<n>d`, `<n>h`, `<n>m`, `<n>s` parts.
/// A bare number is taken as seconds.
pub fn parse_duration(expr: &str) -> Result<Duration> {
    let expr = expr.trim();
    if expr.is_empty() {
        anyhow::bail!("Duration cannot be empty");
    }

    if let Ok(secs) = expr.parse::<u64>() {
        if secs == 0 {
            anyhow::bail!("Duration must be greater than 0");
        }
        return Ok(Duration::from_secs(secs));
    }

    let mut total_secs = 0u64;
    let mut digits = String::new();

    for c in expr.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = match c {
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => anyhow::bail!("Invalid duration format: {}", expr),
        };
        if digits.is_empty() {
            anyhow::bail!("Invalid duration format: {}", expr);
        }
        let n: u64 = digits.parse()?;
        total_secs = match n.checked_mul(unit).and_then(|secs| total_secs.checked_add(secs)) {
            Some(total) => total,
            None => anyhow::bail!("Duration is too large: {}", expr),
        };
        digits.clear();
    }

    if !digits.is_empty() {
        anyhow::bail!("Invalid duration format: {} (missing unit)", expr);
    }
    if total_secs == 0 {
        anyhow::bail!("Duration must be greater than 0");
    }

    Ok(Duration::from_secs(total_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("10m").unwrap(), Duration::from_secs(600));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("600").unwrap(), Duration::from_secs(600));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("1h30").is_err());
        assert!(parse_duration("999999999999999d").is_err());
        assert!(parse_duration("18446744073709551615s1s").is_err());
        assert!(parse_duration("99999999999999999999s").is_err());
    }
}
