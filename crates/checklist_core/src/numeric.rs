//! Brazilian-locale decimal handling for numeric fields.
//!
//! Editable numbers use `.` for thousands and `,` for decimals with exactly
//! two fraction digits (`1.234,56`). The service speaks plain decimals with
//! optional `,` thousands separators (`1,234.56`).

/// Empty numeric fields are submitted as this literal rather than omitted.
pub const EMPTY_NUMERIC_WIRE: &str = "0.00";

pub fn decode_numeric(wire: &str) -> String {
    let stripped: String = wire.trim().chars().filter(|c| *c != ',').collect();
    match parse_leading_float(&stripped) {
        Some(value) => format_brazilian(value),
        None => String::new(),
    }
}

pub fn encode_numeric(editable: &str) -> String {
    if editable.is_empty() {
        return EMPTY_NUMERIC_WIRE.to_string();
    }
    editable.replace('.', "").replacen(',', ".", 1)
}

pub fn format_brazilian(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push(',');
    out.push_str(frac_part);
    out
}

/// Live reformatting of typed numeric input, treating the digits as cents.
///
/// With more than two digits the last two become the fraction; shorter input
/// is kept as bare digits so the user can keep typing.
pub fn reformat_numeric_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() > 2 {
        format_cents(&digits)
    } else {
        digits
    }
}

/// Completes a partial numeric entry when the input loses focus, so `5`
/// becomes `0,05`. Empty input stays empty.
pub fn finalize_numeric_input(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    format_cents(&format!("{digits:0>3}"))
}

pub fn parse_brazilian_number(display: &str) -> Option<f64> {
    let kept: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    parse_leading_float(&kept.replace('.', "").replacen(',', ".", 1))
}

fn format_cents(digits: &str) -> String {
    let (int_part, frac_part) = digits.split_at(digits.len() - 2);
    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    format!("{},{}", group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Parses the longest decimal literal at the start of `input`, ignoring
/// whatever trails it (`12abc` reads as 12). Non-finite results are rejected.
fn parse_leading_float(input: &str) -> Option<f64> {
    let input = input.trim_start();
    let bytes = input.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    input[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
#[path = "tests/numeric_tests.rs"]
mod tests;
