use std::future::Future;
use std::time::Duration;

use crate::errors::AppError;

/// Parses durations such as `30s`, `500ms` or `1m30s`.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("invalid duration {:?}", value));
        }
        let amount = rest[..digits]
            .parse::<u64>()
            .map_err(|err| format!("invalid duration {:?}: {}", value, err))?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let out_of_range = || format!("duration {:?} out of range", value);
        let part = match &rest[..unit_len] {
            "ms" => Duration::from_millis(amount),
            "s" => Duration::from_secs(amount),
            "m" => Duration::from_secs(amount.checked_mul(60).ok_or_else(out_of_range)?),
            "h" => Duration::from_secs(amount.checked_mul(3600).ok_or_else(out_of_range)?),
            "" => return Err(format!("missing unit in duration {:?}", value)),
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, value)),
        };
        total = total.checked_add(part).ok_or_else(out_of_range)?;
        rest = &rest[unit_len..];
    }

    Ok(total)
}

/// Runs `fut` under a deadline, reporting `op` when it expires.
pub async fn within<T, F>(limit: Duration, op: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| AppError::Timeout(format!("{}: context deadline exceeded", op)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
    }

    #[test]
    fn parses_compound_durations() {
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("30").is_err());
        assert!(parse_duration("s30").is_err());
        assert!(parse_duration("10 days").is_err());
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_duration("18446744073709551615h").is_err());
        assert!(parse_duration("18446744073709551615m").is_err());
        assert!(parse_duration("18446744073709551615s1s").is_err());
    }

    #[tokio::test]
    async fn within_reports_deadline() {
        let result: Result<(), AppError> = within(Duration::from_millis(5), "GetClient", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(AppError::Timeout(msg)) if msg.starts_with("GetClient")));
    }
}
