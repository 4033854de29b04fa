//! Case-number formatter: canonicalises a sessions-case identifier into the
//! court-filing form `"S.C.No. <n> of <year>"`.
//!
//! Accepted input shapes, in resolution order:
//!
//! | Input                      | Output                         |
//! |----------------------------|--------------------------------|
//! | contains `S.C.No.`         | unchanged (already canonical)  |
//! | `SC0002`, `sc 2`, `SC002`  | `S.C.No. 2 of <year>`          |
//! | `0047`, `47`               | `S.C.No. 47 of <year>`         |
//! | anything else              | trimmed, otherwise unchanged   |
//!
//! When no primary identifier is supplied, a separate numeric field is used
//! instead. The formatter never fails; unrecognised text passes through.

use regex::Regex;
use std::sync::LazyLock;

/// Markers that identify an already-canonical case number.
const CANONICAL_MARKERS: &[&str] = &["S.C.No.", "S.C. No."];

static SC_PREFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^SC\s*0*([0-9]+)$").expect("static regex"));

static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0*([0-9]+)$").expect("static regex"));

/// Format a case number.
///
/// `primary` is the free-form identifier (`caseNumber` / `SCNo`), `fallback`
/// is a bare number supplied separately (`case_number`), and `year` is the
/// filing year used whenever the output is synthesised.
pub fn format_case_number(primary: Option<&str>, fallback: Option<&str>, year: i32) -> String {
    let Some(primary) = primary else {
        return fallback
            .filter(|f| !f.trim().is_empty())
            .and_then(|f| leading_integer(f.trim()))
            .map(|n| canonical(&n, year))
            .unwrap_or_default();
    };

    let cleaned = primary.trim();

    if is_canonical(cleaned) {
        return cleaned.to_string();
    }

    if let Some(caps) = SC_PREFIXED.captures(cleaned) {
        return canonical(&strip_leading_zeros(&caps[1]), year);
    }

    if let Some(caps) = DIGITS_ONLY.captures(cleaned) {
        return canonical(&strip_leading_zeros(&caps[1]), year);
    }

    cleaned.to_string()
}

/// `true` if `s` already carries one of the canonical `S.C.No.` markers.
pub fn is_canonical(s: &str) -> bool {
    CANONICAL_MARKERS.iter().any(|m| s.contains(m))
}

fn canonical(number: &str, year: i32) -> String {
    format!("S.C.No. {number} of {year}")
}

/// Strip leading zeros from a non-empty digit run; an all-zero run is `"0"`.
///
/// Works on text rather than a machine integer so arbitrarily long digit runs
/// never overflow.
fn strip_leading_zeros(digits: &str) -> String {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Lenient base-10 integer parse: optional sign followed by at least one
/// digit; trailing junk is ignored (`"47abc"` → `47`). Returns the decimal
/// text of the value, or `None` when no digits lead the string.
fn leading_integer(s: &str) -> Option<String> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude = strip_leading_zeros(&rest[..end]);
    if negative && magnitude != "0" {
        Some(format!("-{magnitude}"))
    } else {
        Some(magnitude)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::sc_padded("SC0002", "S.C.No. 2 of 2025")]
    #[case::sc_short("SC2", "S.C.No. 2 of 2025")]
    #[case::sc_lowercase("sc002", "S.C.No. 2 of 2025")]
    #[case::sc_spaced("SC  0325", "S.C.No. 325 of 2025")]
    #[case::sc_all_zeros("SC000", "S.C.No. 0 of 2025")]
    #[case::digits("0047", "S.C.No. 47 of 2025")]
    #[case::digits_surrounding_space("  12 ", "S.C.No. 12 of 2025")]
    #[case::zero("0", "S.C.No. 0 of 2025")]
    fn canonicalises_recognised_shapes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_case_number(Some(input), None, 2025), expected);
    }

    #[rstest]
    #[case::canonical("S.C.No. 325 of 2024")]
    #[case::canonical_spaced("S.C. No. 9 of 2023")]
    #[case::other_court("C.C.No. 12 of 2025")]
    #[case::trailing_letters("SC12A")]
    #[case::internal_space_digits("12 34")]
    fn passes_through_other_text(#[case] input: &str) {
        assert_eq!(format_case_number(Some(input), None, 2025), input);
    }

    #[test]
    fn canonical_input_is_trimmed() {
        assert_eq!(
            format_case_number(Some("  S.C.No. 1 of 2020  "), None, 2025),
            "S.C.No. 1 of 2020"
        );
    }

    #[test]
    fn empty_primary_string_is_passed_through_empty() {
        assert_eq!(format_case_number(Some("   "), Some("47"), 2025), "");
    }

    #[test]
    fn fallback_used_when_primary_missing() {
        assert_eq!(format_case_number(None, Some("47"), 2025), "S.C.No. 47 of 2025");
        assert_eq!(format_case_number(None, Some(" 007 "), 2025), "S.C.No. 7 of 2025");
        assert_eq!(format_case_number(None, Some("47abc"), 2025), "S.C.No. 47 of 2025");
    }

    #[test]
    fn unusable_fallback_yields_empty() {
        assert_eq!(format_case_number(None, None, 2025), "");
        assert_eq!(format_case_number(None, Some(""), 2025), "");
        assert_eq!(format_case_number(None, Some("   "), 2025), "");
        assert_eq!(format_case_number(None, Some("abc"), 2025), "");
    }

    #[test]
    fn huge_digit_runs_do_not_overflow() {
        let digits = "000123456789012345678901234567890";
        assert_eq!(
            format_case_number(Some(digits), None, 2025),
            "S.C.No. 123456789012345678901234567890 of 2025"
        );
    }

    #[test]
    fn leading_integer_handles_signs() {
        assert_eq!(leading_integer("-5").as_deref(), Some("-5"));
        assert_eq!(leading_integer("+5").as_deref(), Some("5"));
        assert_eq!(leading_integer("-0").as_deref(), Some("0"));
        assert_eq!(leading_integer("-"), None);
    }
}
