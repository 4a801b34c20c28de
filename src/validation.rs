//! Classification of raw numeric input typed into the swap form.
//!
//! Checks run in a fixed order and the first match wins:
//! empty, not a number, zero, negative, digit limit, valid.

use std::fmt;

/// Outcome of validating a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputValidationStatus {
    #[default]
    Valid,
    Empty,
    Zero,
    NotFloat,
    Negative,
    /// Assigned by the balance check of the caller, never derived here.
    InsufficientBalance,
    /// Assigned by the route lookup of the caller, never derived here.
    NoPools,
    MaxDigitsExceeded,
}

impl InputValidationStatus {
    pub fn message(&self) -> &'static str {
        match self {
            InputValidationStatus::Valid => "Valid",
            InputValidationStatus::Empty => "Empty",
            InputValidationStatus::Zero => "Zero",
            InputValidationStatus::NotFloat => "Not Float",
            InputValidationStatus::Negative => "Negative",
            InputValidationStatus::InsufficientBalance => "Insufficient Balance",
            InputValidationStatus::NoPools => "There are no Pools with selected tokens",
            InputValidationStatus::MaxDigitsExceeded => "Maximum Digits Exceeded",
        }
    }
}

impl fmt::Display for InputValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Restrict to at most two integer and two fractional digits.
    pub limit_digits: bool,
}

pub fn number_input_validation_status(
    value: &str,
    options: ValidationOptions,
) -> InputValidationStatus {
    if value.trim().is_empty() {
        return InputValidationStatus::Empty;
    }

    if !is_float(value) {
        return InputValidationStatus::NotFloat;
    }

    // The grammar above only admits strings `f64` parses.
    let parsed: f64 = match value.parse() {
        Ok(v) => v,
        Err(_) => return InputValidationStatus::NotFloat,
    };

    if parsed == 0.0 {
        return InputValidationStatus::Zero;
    }

    if parsed < 0.0 {
        return InputValidationStatus::Negative;
    }

    if options.limit_digits && !within_digit_limit(value) {
        return InputValidationStatus::MaxDigitsExceeded;
    }

    InputValidationStatus::Valid
}

pub fn is_valid_status(status: InputValidationStatus) -> bool {
    status == InputValidationStatus::Valid
}

/// Valid without any digit limit.
pub fn is_valid_input(value: &str) -> bool {
    is_valid_status(number_input_validation_status(
        value,
        ValidationOptions::default(),
    ))
}

/// `([+-]? digits+)? ('.' digits*)? ([eE] [+-]? digits+)?` with at least one
/// mantissa digit.
fn is_float(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;

    let signed = matches!(bytes.first(), Some(b'+' | b'-'));
    if signed {
        i += 1;
    }

    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        mantissa_digits += 1;
        i += 1;
    }

    // A sign binds to integer digits: `-.5` is rejected.
    if signed && mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            mantissa_digits += 1;
            i += 1;
        }
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let mut exponent_digits = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            exponent_digits += 1;
            i += 1;
        }
        if exponent_digits == 0 {
            return false;
        }
    }

    i == bytes.len()
}

/// Accepts `""`, `d`, `dd`, or up to two digits on each side of one `.`.
fn within_digit_limit(value: &str) -> bool {
    let mut integer_digits = 0usize;
    let mut fraction_digits = 0usize;
    let mut points = 0usize;

    for c in value.chars() {
        match c {
            '0'..='9' if points == 0 => integer_digits += 1,
            '0'..='9' => fraction_digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }

    match points {
        0 => integer_digits <= 2,
        1 => integer_digits <= 2 && fraction_digits <= 2,
        _ => false,
    }
}
