//! Credit totals and weighted averages
//!
//! Everything here is a pure function of the current semesters. Nothing is
//! cached; the view recomputes on every render.

use super::model::{Semester, Subject};

/// GPA text shown when no credits have been entered
pub const ZERO_GPA: &str = "0.00";

/// Parse the numeric prefix of `text`, or 0 when there is none.
///
/// Leading whitespace is skipped, then an optional sign followed by either
/// `Infinity` or a decimal literal (`12`, `3.5`, `.5`, `5.`, `1e3`). Trailing
/// garbage is ignored, so `"3학점"` reads as 3.
pub fn parse_numeric(text: &str) -> f64 {
    let trimmed = text.trim_start_matches(is_leading_space);
    let value = match numeric_prefix(trimmed) {
        Some(Prefix::Infinity { negative: true }) => f64::NEG_INFINITY,
        Some(Prefix::Infinity { negative: false }) => f64::INFINITY,
        Some(Prefix::Decimal(literal)) => literal.parse::<f64>().unwrap_or(0.0),
        None => 0.0,
    };
    // -0 and NaN both count as "nothing entered"
    if value == 0.0 || value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Unicode white space plus the byte-order mark. NEL (U+0085) is not
/// skipped, so `"\u{85}3"` has no numeric prefix.
fn is_leading_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

enum Prefix<'a> {
    Infinity { negative: bool },
    Decimal(&'a str),
}

fn numeric_prefix(s: &str) -> Option<Prefix<'_>> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }
    if s[i..].starts_with("Infinity") {
        return Some(Prefix::Infinity { negative });
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < len && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return None;
    }

    if i < len && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    Some(Prefix::Decimal(&s[..i]))
}

/// Running credit and credit-weighted score sums
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub credits: f64,
    pub points: f64,
}

impl Totals {
    /// Accumulate a run of subjects
    pub fn of<'a>(subjects: impl IntoIterator<Item = &'a Subject>) -> Self {
        subjects.into_iter().fold(Self::default(), |acc, subject| {
            let credit = parse_numeric(&subject.credit);
            let score = parse_numeric(&subject.score);
            Self {
                credits: acc.credits + credit,
                points: acc.points + credit * score,
            }
        })
    }

    /// Weighted average as display text
    pub fn gpa(&self) -> String {
        if self.credits == 0.0 || self.credits.is_nan() {
            return ZERO_GPA.to_string();
        }
        format_fixed2(self.points / self.credits)
    }
}

/// Sum of credits in one semester
pub fn semester_credits(semester: &Semester) -> f64 {
    Totals::of(&semester.subjects).credits
}

/// Weighted average of one semester, two decimals
pub fn calculate_gpa(semester: &Semester) -> String {
    Totals::of(&semester.subjects).gpa()
}

/// Sum of credits across every semester
pub fn total_credits_taken(semesters: &[Semester]) -> f64 {
    overall_totals(semesters).credits
}

/// Weighted average across every subject of every semester
pub fn overall_gpa(semesters: &[Semester]) -> String {
    overall_totals(semesters).gpa()
}

fn overall_totals(semesters: &[Semester]) -> Totals {
    Totals::of(semesters.iter().flat_map(|s| &s.subjects))
}

/// Magnitude from which numbers are written with an exponent
const EXPONENT_ABOVE: f64 = 1.0e21;
/// Magnitude below which numbers are written with an exponent
const EXPONENT_BELOW: f64 = 1.0e-6;

/// Format with exactly two decimals.
///
/// A value sitting exactly halfway between two cents rounds away from zero
/// (`0.125` → `0.13`), where `{:.2}` would round to even. Magnitudes of
/// 1e21 and up keep their exponent form (`1e+21`).
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() || value.abs() >= EXPONENT_ABOVE {
        return format_number(value);
    }
    // Only odd multiples of 1/8 land exactly on a half cent
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths.abs() < 9.0e15 && (eighths as i64) % 2 != 0 {
        let cents = (value.abs() * 100.0).ceil();
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{:.2}", cents / 100.0);
    }
    format!("{value:.2}")
}

/// Shortest text that reads back as `value` (`5`, `4.5`, `1e+21`, `1e-7`)
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= EXPONENT_ABOVE || value.abs() < EXPONENT_BELOW {
        exponent_form(value)
    } else {
        format!("{value}")
    }
}

/// `1.5e22` → `1.5e+22`, `1e-7` → `1e-7`
fn exponent_form(value: f64) -> String {
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}
