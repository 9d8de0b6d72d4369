use std::time::Duration;

use crate::error::ValidationError;

pub(crate) fn parse_header(raw: &str) -> Result<(String, String), ValidationError> {
    let (key, value) = raw
        .split_once(':')
        .ok_or_else(|| ValidationError::InvalidHeaderFormat {
            header: raw.to_owned(),
        })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::InvalidHeaderFormat {
            header: raw.to_owned(),
        });
    }
    Ok((key.to_owned(), value.trim().to_owned()))
}

pub(crate) fn parse_positive_u64(raw: &str) -> Result<u64, String> {
    let value: u64 = raw
        .parse()
        .map_err(|err| format!("Invalid number '{}': {}", raw, err))?;
    if value == 0 {
        return Err(format!("Value must be greater than zero, got '{}'", raw));
    }
    Ok(value)
}

/// Parses durations like `500ms`, `10s`, `2m` or a bare number of seconds.
pub(crate) fn parse_duration_arg(raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    let (digits, unit) = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(split) => trimmed.split_at(split),
        None => (trimmed, "s"),
    };
    let value: u64 = digits
        .parse()
        .map_err(|err| format!("Invalid duration '{}': {}", raw, err))?;
    match unit.trim() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value.saturating_mul(60))),
        "h" => Ok(Duration::from_secs(value.saturating_mul(3600))),
        other => Err(format!("Invalid duration unit '{}' in '{}'", other, raw)),
    }
}
