//! Time window and bucketing types

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::SpendlogError;

/// A calendar month, stored as its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Month containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Following month (saturates at the end of the supported calendar)
    pub fn next(self) -> Self {
        self.0.checked_add_months(Months::new(1)).map_or(self, Self)
    }

    /// Preceding month (saturates at the start of the supported calendar)
    pub fn prev(self) -> Self {
        self.0.checked_sub_months(Months::new(1)).map_or(self, Self)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for YearMonth {
    type Err = SpendlogError;

    /// Parse a strict `YYYY-MM` token
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SpendlogError::Parse(format!("invalid month '{}', expected YYYY-MM", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = SpendlogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Which entries participate in an aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    #[default]
    AllTime,
    Month(YearMonth),
}

impl Window {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::AllTime => true,
            Self::Month(month) => month.contains(date),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTime => f.write_str("all time"),
            Self::Month(month) => write!(f, "{}", month),
        }
    }
}

impl FromStr for Window {
    type Err = SpendlogError;

    /// `all` for all time, otherwise a `YYYY-MM` month
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::AllTime)
        } else {
            s.parse().map(Self::Month)
        }
    }
}

/// Time-series bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Granularity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    pub fn column_label(self) -> &'static str {
        match self {
            Self::Daily => "Date",
            Self::Weekly => "Week",
            Self::Monthly => "Month",
        }
    }

    /// First calendar day of the bucket containing `date`.
    /// Weeks start on Sunday.
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => {
                let back = date.weekday().num_days_from_sunday() as u64;
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Self::Monthly => YearMonth::from_date(date).first_day(),
        }
    }

    /// Canonical sortable key for a bucket starting at `start`
    pub fn bucket_key(self, start: NaiveDate) -> String {
        match self {
            Self::Daily | Self::Weekly => start.format("%Y-%m-%d").to_string(),
            Self::Monthly => start.format("%Y-%m").to_string(),
        }
    }
}

impl FromStr for Granularity {
    type Err = SpendlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Self::Daily),
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            _ => Err(SpendlogError::Parse(format!(
                "invalid granularity '{}', expected daily, weekly or monthly",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(ym.year(), 2024);
        assert_eq!(ym.month(), 2);
        assert_eq!(ym.to_string(), "2024-02");
    }

    #[test]
    fn test_year_month_rejects_malformed() {
        for bad in ["2024-13", "2024-00", "2024-2", "24-02", "2024/02", "2024-02-01", ""] {
            assert!(bad.parse::<YearMonth>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_year_month_contains() {
        let ym = YearMonth::new(2024, 2).unwrap();
        assert!(ym.contains(date(2024, 2, 1)));
        assert!(ym.contains(date(2024, 2, 29)));
        assert!(!ym.contains(date(2024, 3, 1)));
        assert!(!ym.contains(date(2023, 2, 15)));
    }

    #[test]
    fn test_year_month_next_prev_cross_year() {
        let dec = YearMonth::new(2023, 12).unwrap();
        assert_eq!(dec.next(), YearMonth::new(2024, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_year_month_serde_as_string() {
        let ym = YearMonth::new(2024, 7).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2024-07\"");
        let back: YearMonth = serde_json::from_str("\"2024-07\"").unwrap();
        assert_eq!(back, ym);
    }

    #[test]
    fn test_window_parse() {
        assert_eq!("all".parse::<Window>().unwrap(), Window::AllTime);
        assert_eq!(
            "2024-02".parse::<Window>().unwrap(),
            Window::Month(YearMonth::new(2024, 2).unwrap())
        );
        assert!("february".parse::<Window>().is_err());
    }

    #[test]
    fn test_window_display() {
        assert_eq!(Window::AllTime.to_string(), "all time");
        assert_eq!(
            Window::Month(YearMonth::new(2024, 2).unwrap()).to_string(),
            "2024-02"
        );
    }

    #[test]
    fn test_window_contains() {
        let feb = Window::Month(YearMonth::new(2024, 2).unwrap());
        assert!(feb.contains(date(2024, 2, 10)));
        assert!(!feb.contains(date(2024, 1, 31)));
        assert!(Window::AllTime.contains(date(1999, 1, 1)));
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!("Weekly".parse::<Granularity>().unwrap(), Granularity::Weekly);
        assert_eq!("m".parse::<Granularity>().unwrap(), Granularity::Monthly);
        assert!("yearly".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_granularity_default_is_monthly() {
        assert_eq!(Granularity::default(), Granularity::Monthly);
    }

    #[test]
    fn test_weekly_bucket_starts_on_sunday() {
        // 2024-03-10 is a Sunday
        let sunday = date(2024, 3, 10);
        assert_eq!(Granularity::Weekly.bucket_start(sunday), sunday);
        assert_eq!(Granularity::Weekly.bucket_start(date(2024, 3, 14)), sunday);
        assert_eq!(Granularity::Weekly.bucket_start(date(2024, 3, 16)), sunday);
        assert_eq!(
            Granularity::Weekly.bucket_start(date(2024, 3, 17)),
            date(2024, 3, 17)
        );
    }

    #[test]
    fn test_weekly_bucket_crosses_month_boundary() {
        // 2024-03-01 is a Friday; its week started on Sunday 2024-02-25
        assert_eq!(
            Granularity::Weekly.bucket_start(date(2024, 3, 1)),
            date(2024, 2, 25)
        );
    }

    #[test]
    fn test_bucket_keys() {
        let d = date(2024, 1, 5);
        assert_eq!(Granularity::Daily.bucket_key(d), "2024-01-05");
        assert_eq!(
            Granularity::Monthly.bucket_key(Granularity::Monthly.bucket_start(d)),
            "2024-01"
        );
        assert_eq!(
            Granularity::Weekly.bucket_key(Granularity::Weekly.bucket_start(d)),
            "2023-12-31"
        );
    }
}
