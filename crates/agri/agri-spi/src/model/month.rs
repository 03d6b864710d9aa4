//! Calendar month

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar month, rendered as `YYYY-MM`.
///
/// Stored as the first day of the month so ordering and month arithmetic
/// come straight from [`NaiveDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// Create a month; `None` when `month` is not in `1..=12`
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Parse `YYYY-MM` or `YYYY-MM-DD` (the day is discarded)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self::from_date(date));
        }
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .ok()
            .map(Self)
    }

    /// The following calendar month
    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// The `n` consecutive months after this one
    pub fn following(&self, n: usize) -> Vec<Month> {
        let mut months = Vec::with_capacity(n);
        let mut current = *self;
        for _ in 0..n {
            match current.succ() {
                Some(next) => {
                    months.push(next);
                    current = next;
                }
                None => break,
            }
        }
        months
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid month '{s}', expected YYYY-MM"))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_year_month() {
        let month = Month::new(2024, 3).unwrap();
        assert_eq!(month.to_string(), "2024-03");
    }

    #[test]
    fn test_parse_both_formats() {
        assert_eq!(Month::parse("2023-11"), Month::new(2023, 11));
        assert_eq!(Month::parse("2023-11-15"), Month::new(2023, 11));
        assert_eq!(Month::parse("2023-13"), None);
        assert_eq!(Month::parse("november"), None);
    }

    #[test]
    fn test_succ_rolls_over_year() {
        let december = Month::new(2023, 12).unwrap();
        assert_eq!(december.succ(), Month::new(2024, 1));
    }

    #[test]
    fn test_following_months() {
        let start = Month::new(2024, 11).unwrap();
        let labels: Vec<String> = start.following(3).iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["2024-12", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_serde_as_string() {
        let month = Month::new(2024, 7).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2024-07\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }
}
