//! Month-granularity calendar helpers.
//!
//! The simulation steps in whole calendar months, so every date the engine
//! handles is a month boundary (the first of a month). The helpers here do
//! direct calendar arithmetic on year/month numbers — no `jiff::Span`
//! allocation or normalisation in the stepping loop.

use jiff::civil::Date;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in a calendar month without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// The month boundary containing `d` (the first day of `d`'s month).
#[inline]
pub fn month_start(d: Date) -> Date {
    jiff::civil::date(d.year(), d.month(), 1)
}

/// The first day of the month after `d`'s month.
#[inline]
pub fn next_month(d: Date) -> Date {
    add_months(d, 1)
}

/// The month boundary `n` months after `d`'s month. Negative `n` steps back.
#[inline]
pub fn add_months(d: Date, n: i32) -> Date {
    let total = i32::from(d.year()) * 12 + i32::from(d.month()) - 1 + n;
    jiff::civil::date((total.div_euclid(12)) as i16, (total.rem_euclid(12) + 1) as i8, 1)
}

/// Whole months from `from`'s month to `to`'s month (to - from).
///
/// Positive when `to` is later. Days within the month are ignored.
#[inline]
pub fn months_between(from: Date, to: Date) -> i32 {
    (i32::from(to.year()) - i32::from(from.year())) * 12
        + (i32::from(to.month()) - i32::from(from.month()))
}

/// Parse a month string into its month boundary.
///
/// Accepts `yy/mm`, `yyyy/mm`, and the same with `-` or `.` separators.
/// Two-digit years are taken as 2000-based.
pub fn parse_month(s: &str) -> Option<Date> {
    let normalized = s.replace(['-', '.'], "/");
    let (year, month) = normalized.split_once('/')?;
    let mut year: i16 = year.trim().parse().ok()?;
    let month: i8 = month.trim().parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    if year < 100 {
        year += 2000;
    }
    if !(1900..=2200).contains(&year) {
        return None;
    }
    Some(jiff::civil::date(year, month, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(date(2025, 6, 15)), date(2025, 6, 1));
        assert_eq!(month_start(date(2025, 6, 1)), date(2025, 6, 1));
    }

    #[test]
    fn test_next_month() {
        assert_eq!(next_month(date(2025, 1, 1)), date(2025, 2, 1));
        assert_eq!(next_month(date(2025, 12, 31)), date(2026, 1, 1));
        assert_eq!(next_month(date(2024, 2, 29)), date(2024, 3, 1));
    }

    #[test]
    fn test_add_months() {
        assert_eq!(add_months(date(2025, 1, 1), 0), date(2025, 1, 1));
        assert_eq!(add_months(date(2025, 1, 1), 11), date(2025, 12, 1));
        assert_eq!(add_months(date(2025, 1, 1), 12), date(2026, 1, 1));
        assert_eq!(add_months(date(2025, 10, 1), 5), date(2026, 3, 1));
        assert_eq!(add_months(date(2025, 3, 1), -3), date(2024, 12, 1));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2025, 1, 1), date(2025, 1, 31)), 0);
        assert_eq!(months_between(date(2025, 1, 1), date(2025, 4, 1)), 3);
        assert_eq!(months_between(date(2025, 4, 1), date(2025, 1, 1)), -3);
        assert_eq!(months_between(date(2024, 11, 1), date(2025, 2, 1)), 3);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025/01"), Some(date(2025, 1, 1)));
        assert_eq!(parse_month("2025-1"), Some(date(2025, 1, 1)));
        assert_eq!(parse_month("25/10"), Some(date(2025, 10, 1)));
        assert_eq!(parse_month("25.3"), Some(date(2025, 3, 1)));
        assert_eq!(parse_month("2025/13"), None);
        assert_eq!(parse_month("3000/01"), None);
        assert_eq!(parse_month("garbage"), None);
    }
}
