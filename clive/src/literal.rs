//! Scalar literal parsing shared by annotations, defaults and flag values.

use std::time::Duration;

/// Parses a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

/// Parses a duration expression such as `300ms`, `1.5h` or `2h45m`.
///
/// The input is an optional `+` followed by one or more decimal numbers,
/// each with a unit suffix. A lone `0` is accepted without a unit. Negative
/// durations are rejected because [`Duration`] is unsigned.
///
/// # Errors
///
/// Returns a human-readable message describing the first problem found.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let body = raw.strip_prefix('+').unwrap_or(raw);
    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(format!("invalid duration {raw:?}"));
    }
    if body.starts_with('-') {
        return Err(format!("negative duration {raw:?} is not supported"));
    }

    let mut total: u128 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let (number, after_number) = split_number(rest);
        if number.is_empty() || number == "." {
            return Err(format!("invalid duration {raw:?}"));
        }
        let (unit, after_unit) = split_unit(after_number);
        let scale = NANOS_PER_UNIT
            .iter()
            .find_map(|(name, nanos)| (*name == unit).then_some(*nanos))
            .ok_or_else(|| {
                if unit.is_empty() {
                    format!("missing unit in duration {raw:?}")
                } else {
                    format!("unknown unit {unit:?} in duration {raw:?}")
                }
            })?;
        let part = scale_decimal(number, scale).ok_or_else(|| format!("invalid duration {raw:?}"))?;
        total = total
            .checked_add(part)
            .ok_or_else(|| format!("duration {raw:?} overflows"))?;
        rest = after_unit;
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| format!("duration {raw:?} overflows"))
}

/// Renders a duration in a form [`parse_duration`] reads back exactly, such
/// as `1h30m` or `1s500ms`.
pub(crate) fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return String::from("0s");
    }
    let mut remaining = duration.as_nanos();
    let mut out = String::new();
    for (unit, nanos) in [
        ("h", 3_600_000_000_000_u128),
        ("m", 60_000_000_000),
        ("s", 1_000_000_000),
        ("ms", 1_000_000),
        ("us", 1_000),
        ("ns", 1),
    ] {
        let count = remaining.checked_div(nanos).unwrap_or_default();
        if count > 0 {
            out.push_str(&format!("{count}{unit}"));
            remaining -= count * nanos;
        }
    }
    out
}

fn split_number(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    input.split_at(end)
}

fn split_unit(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| c.is_ascii_digit() || c == '.')
        .unwrap_or(input.len());
    input.split_at(end)
}

/// Multiplies a decimal literal such as `1.25` by `scale` without going
/// through floating point. Fractional digits beyond nanosecond precision are
/// truncated.
fn scale_decimal(number: &str, scale: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if fraction.contains('.') {
        return None;
    }
    let whole_value: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut total = whole_value.checked_mul(scale)?;
    let mut place = scale;
    for digit in fraction.chars() {
        place = place.checked_div(10)?;
        if place == 0 {
            break;
        }
        total = total.checked_add(u128::from(digit.to_digit(10)?) * place)?;
    }
    Some(total)
}
