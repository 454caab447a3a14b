use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use shared_types::PeriodKind;

// The range grammar is asymmetric: the left side of "to" must use an
// abbreviated month name, the right side a full one. chrono's %b and %B
// both accept either form when parsing, so the tables enforce it.
const MONTHS_ABBREVIATED: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTHS_FULL: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Canonical date range resolved from a column header. Both bounds are
/// `YYYY-MM-DD` strings, or both empty when the header's dates could
/// not be inferred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Sentinel for a header whose dates could not be inferred.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }

    fn from_bounds(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Classify a column header into its date range and period kind.
///
/// Total and deterministic: unparseable headers degrade to an
/// unresolved range but keep the kind their lexical shape implies.
pub fn classify_header(header: &str) -> (DateRange, PeriodKind) {
    (date_range_for_header(header), period_kind_for_header(header))
}

/// Period kind from the header's lexical shape alone. A "to" anywhere
/// in the header wins over the "fy" prefix; everything else is Monthly.
pub fn period_kind_for_header(header: &str) -> PeriodKind {
    let lowered = header.trim().to_lowercase();
    if lowered.contains("to") {
        PeriodKind::SemiAnnual
    } else if lowered.starts_with("fy") {
        PeriodKind::Annual
    } else {
        PeriodKind::Monthly
    }
}

/// Resolve the header's date range. Grammars are tried in priority
/// order: range form, fiscal-year form, then a generic calendar month.
pub fn date_range_for_header(header: &str) -> DateRange {
    let trimmed = header.trim();
    let lowered = trimmed.to_lowercase();

    if lowered.contains("to") {
        return parse_range_header(&lowered);
    }
    if lowered.starts_with("fy ") {
        return parse_fiscal_header(trimmed);
    }
    parse_month_header(trimmed)
}

/// "Apr 23 to September 23" -> first day of the left month through the
/// last day of the right month. Split on the first "to" occurrence.
fn parse_range_header(lowered: &str) -> DateRange {
    let split_at = match lowered.find("to") {
        Some(index) => index,
        None => return DateRange::unresolved(),
    };
    let left = lowered[..split_at].trim();
    let right = lowered[split_at + 2..].trim();

    let start = parse_month_year(left, &MONTHS_ABBREVIATED);
    let end = parse_month_year(right, &MONTHS_FULL);

    match (start, end) {
        (Some(start), Some(end)) => match month_bounds(end.year(), end.month()) {
            Some((_, last)) => DateRange::from_bounds(start, last),
            None => DateRange::unresolved(),
        },
        _ => DateRange::unresolved(),
    }
}

/// "fy 23-24" -> April 1 2023 through March 31 2024. The first numeric
/// token after "fy" is a two-digit offset from 2000.
fn parse_fiscal_header(header: &str) -> DateRange {
    let year = header
        .split_whitespace()
        .nth(1)
        .and_then(|token| token.split('-').next())
        .and_then(|token| token.parse::<i32>().ok());
    let year = match year {
        Some(year) => year + 2000,
        None => return DateRange::unresolved(),
    };

    match (
        NaiveDate::from_ymd_opt(year, 4, 1),
        NaiveDate::from_ymd_opt(year + 1, 3, 31),
    ) {
        (Some(start), Some(end)) => DateRange::from_bounds(start, end),
        _ => DateRange::unresolved(),
    }
}

/// Generic single-period fallback: any parseable month expression spans
/// the first through last calendar day of that month.
fn parse_month_header(header: &str) -> DateRange {
    parse_calendar_expression(header)
        .and_then(|date| month_bounds(date.year(), date.month()))
        .map(|(first, last)| DateRange::from_bounds(first, last))
        .unwrap_or_else(DateRange::unresolved)
}

/// "mon yy" with the month looked up in the given name table. Both
/// tokens are required, the year must be two digits at most.
fn parse_month_year(part: &str, names: &[&str; 12]) -> Option<NaiveDate> {
    let mut tokens = part.split_whitespace();
    let month_token = tokens.next()?;
    let year_token = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    let month = names.iter().position(|name| *name == month_token)? as u32 + 1;
    let year: i32 = year_token.parse().ok()?;
    if !(0..100).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year + 2000, month, 1)
}

/// Lenient month-expression parse in the style of a spreadsheet date
/// column: month-year forms first, then plain and timestamped dates.
fn parse_calendar_expression(header: &str) -> Option<NaiveDate> {
    let with_day = format!("01 {}", header);
    for format in ["%d %b-%y", "%d %b %y", "%d %b-%Y", "%d %b %Y", "%d %Y-%m"] {
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, format) {
            return Some(date);
        }
    }

    for format in ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(header, format) {
            return Some(date);
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(header, format) {
            return Some(datetime.date());
        }
    }

    None
}

/// First and last calendar day of a month; handles the December
/// rollover and variable month lengths.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.checked_sub_days(Days::new(1))?;
    Some((first, last))
}
