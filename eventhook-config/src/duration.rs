// Duration string parsing
//
// Accepts the same grammar as Go's time.ParseDuration, which is what webhook
// configurations are usually written in: a sequence of decimal numbers, each
// with an optional fraction and a mandatory unit ("300ms", "1.5h", "2h45m").
// Negative durations are rejected since they are meaningless as timeouts.

use crate::{ConfigError, Result};
use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest duration accepted, matching Go's int64 nanosecond range.
const MAX_NANOS: u128 = i64::MAX as u128;

/// Parse a duration string such as `"30s"`, `"1m30s"` or `"250ms"`.
///
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. The bare
/// string `"0"` is also accepted.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let mut s = input.trim();

    if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s.starts_with('-') {
        return Err(invalid(input, "negative durations are not allowed"));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid(input, "empty duration"));
    }

    let mut total: u128 = 0;

    while !s.is_empty() {
        let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, rest) = s.split_at(int_len);
        s = rest;

        let mut frac_part = "";
        if let Some(rest) = s.strip_prefix('.') {
            let frac_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            frac_part = &rest[..frac_len];
            s = &rest[frac_len..];
        }

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid(input, "expected a number"));
        }

        let unit_len = s
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(s.len());
        let (unit, rest) = s.split_at(unit_len);
        s = rest;

        let unit_nanos = match unit {
            "" => return Err(invalid(input, "missing unit")),
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            other => return Err(invalid(input, format!("unknown unit {:?}", other))),
        };

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| invalid(input, "value out of range"))?
        };

        let mut nanos = whole
            .checked_mul(unit_nanos)
            .ok_or_else(|| invalid(input, "value out of range"))?;

        if !frac_part.is_empty() {
            // Digits past nanosecond resolution of the largest unit are noise.
            let digits = &frac_part[..frac_part.len().min(18)];
            let frac: u128 = digits
                .parse()
                .map_err(|_| invalid(input, "value out of range"))?;
            nanos = nanos
                .checked_add(frac * unit_nanos / 10u128.pow(digits.len() as u32))
                .ok_or_else(|| invalid(input, "value out of range"))?;
        }

        total = total
            .checked_add(nanos)
            .filter(|t| *t <= MAX_NANOS)
            .ok_or_else(|| invalid(input, "value out of range"))?;
    }

    Ok(Duration::from_nanos(total as u64))
}

fn invalid(input: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidDuration {
        input: input.to_string(),
        reason: reason.into(),
    }
}
