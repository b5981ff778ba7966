//! Cell text helpers shared by the scan and rewrite phases.

use std::borrow::Cow;

use calamine::Data;

/// Text of a scanned cell, borrowed when the cell already holds a string.
/// Whole floats print without a fraction, so a numeric SSN reads `123456789`.
pub fn cell_text(cell: &Data) -> Cow<'_, str> {
    match cell {
        Data::Empty => Cow::Borrowed(""),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cow::Borrowed(s),
        Data::Float(n) if n.fract() == 0.0 => Cow::Owned(format!("{n:.0}")),
        other => Cow::Owned(other.to_string()),
    }
}

/// A cell counts towards the used range when it shows any text.
pub fn is_populated(cell: &Data) -> bool {
    match cell {
        Data::Empty => false,
        Data::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// True when a date cell should be blanked: empty after trimming, or `null` in any case.
pub fn is_empty_or_null(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text.eq_ignore_ascii_case("null")
}

/// Keeps every numeric character of `text`, not only ASCII digits.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_numeric()).collect()
}

/// The SSN as an integer, if its digits form one. `"123-45-6789"` gives `123456789`.
/// Non-ASCII digits survive the filter and then fail the parse.
pub fn parse_ssn(text: &str) -> Option<i64> {
    digits_only(text).parse().ok()
}
