use std::{
    fmt::{self, Display},
    time::SystemTime,
};

use chrono::{
    DateTime, Datelike, Local, Month, Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone,
    Timelike,
};

use crate::interpreter::value::period::Period;

const WEEKDAY_NAMES: [&str; 7] =
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// How much of a time is meaningful, which also decides how it prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    /// `June 2010`
    YearMonth,
    /// `3 June 2010`
    Date,
    /// `3 June 2010, 10:11`
    ShortClock,
    /// `3 June 2010, 10:11:12`
    Clock,
}

/// A readable or writable part of a time, as in `t.day` or `t.month++`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// Day of the week, Monday being 1.
    Weekday,
    /// The time with its clock part removed.
    Date,
}

impl TimeField {
    /// Looks up a field by name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            "hour" => Some(Self::Hour),
            "minute" => Some(Self::Minute),
            "second" => Some(Self::Second),
            "weekday" => Some(Self::Weekday),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    const fn minimum_precision(self) -> Precision {
        match self {
            Self::Year | Self::Month => Precision::YearMonth,
            Self::Day | Self::Weekday | Self::Date => Precision::Date,
            Self::Hour | Self::Minute => Precision::ShortClock,
            Self::Second => Precision::Clock,
        }
    }
}

/// A point on the local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    moment:    NaiveDateTime,
    precision: Precision,
}

impl Time {
    #[must_use]
    pub const fn new(moment: NaiveDateTime, precision: Precision) -> Self {
        Self { moment, precision }
    }

    #[must_use]
    pub const fn moment(self) -> NaiveDateTime {
        self.moment
    }

    #[must_use]
    pub const fn precision(self) -> Precision {
        self.precision
    }

    /// Builds a date, rolling out-of-range days and months over into the
    /// neighbouring month or year.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::time::Time;
    ///
    /// assert_eq!(Time::from_calendar(2010, 6, 3).unwrap().to_string(), "3 June 2010");
    /// assert_eq!(Time::from_calendar(2010, 13, 1).unwrap().to_string(), "1 January 2011");
    /// assert_eq!(Time::from_calendar(2010, 3, 0).unwrap().to_string(), "28 February 2010");
    /// ```
    #[must_use]
    pub fn from_calendar(year: i64, month: i64, day: i64) -> Option<Self> {
        normalized(year, month, day, 0).map(|moment| Self::new(moment, Precision::Date))
    }

    /// Builds a date only when the day exists in that month.
    #[must_use]
    pub fn from_date_exact(year: i64, month: u32, day: u32) -> Option<Self> {
        let year = i32::try_from(year).ok()?;
        let moment = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
        Some(Self::new(moment, Precision::Date))
    }

    /// The first day of a month, printed as `June 2010`.
    #[must_use]
    pub fn year_month(year: i64, month: u32) -> Option<Self> {
        Self::from_date_exact(year, month, 1).map(|t| Self::new(t.moment, Precision::YearMonth))
    }

    /// Adds a clock part to a date. Without seconds the time prints as a
    /// short clock.
    #[must_use]
    pub fn with_clock(self, hour: u32, minute: u32, second: Option<u32>) -> Option<Self> {
        let moment = self.moment
                         .date()
                         .and_hms_opt(hour, minute, second.unwrap_or(0))?;
        let precision = if second.is_some() { Precision::Clock } else { Precision::ShortClock };
        Some(Self::new(moment, precision))
    }

    /// The current local time, to the second.
    #[must_use]
    pub fn now() -> Self {
        let moment = Local::now().naive_local();
        Self::new(moment.with_nanosecond(0).unwrap_or(moment), Precision::Clock)
    }

    /// The current local date.
    #[must_use]
    pub fn today() -> Self {
        let now = Self::now();
        now.date_only()
    }

    /// Converts a filesystem timestamp into local time.
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        let moment = DateTime::<Local>::from(time).naive_local();
        Self::new(moment.with_nanosecond(0).unwrap_or(moment), Precision::Clock)
    }

    /// Converts into a filesystem timestamp, interpreting the time as local.
    #[must_use]
    pub fn to_system_time(self) -> Option<SystemTime> {
        Local.from_local_datetime(&self.moment)
             .earliest()
             .map(SystemTime::from)
    }

    /// The same day at midnight, printed without a clock.
    #[must_use]
    pub fn date_only(self) -> Self {
        let moment = self.moment.date().and_time(chrono::NaiveTime::MIN);
        let precision = self.precision.min(Precision::Date);
        Self::new(moment, precision)
    }

    /// Takes the calendar day from `self` and the clock from `clock`.
    #[must_use]
    pub fn at_clock_of(self, clock: Self) -> Self {
        Self::new(self.moment.date().and_time(clock.moment.time()), Precision::Clock)
    }

    /// Reads a numeric field. Returns `None` for [`TimeField::Date`].
    #[must_use]
    pub fn field(self, field: TimeField) -> Option<i64> {
        let m = self.moment;
        match field {
            TimeField::Year => Some(i64::from(m.year())),
            TimeField::Month => Some(i64::from(m.month())),
            TimeField::Day => Some(i64::from(m.day())),
            TimeField::Hour => Some(i64::from(m.hour())),
            TimeField::Minute => Some(i64::from(m.minute())),
            TimeField::Second => Some(i64::from(m.second())),
            TimeField::Weekday => Some(i64::from(m.weekday().number_from_monday())),
            TimeField::Date => None,
        }
    }

    /// Overwrites a field and renormalizes through the calendar, so
    /// `day = 32` rolls into the next month.
    #[must_use]
    pub fn set_field(self, field: TimeField, value: i64) -> Option<Self> {
        let m = self.moment;
        let mut year = i64::from(m.year());
        let mut month = i64::from(m.month());
        let mut day = i64::from(m.day());
        let mut hour = i64::from(m.hour());
        let mut minute = i64::from(m.minute());
        let mut second = i64::from(m.second());

        match field {
            TimeField::Year => year = value,
            TimeField::Month => month = value,
            TimeField::Day => day = value,
            TimeField::Hour => hour = value,
            TimeField::Minute => minute = value,
            TimeField::Second => second = value,
            TimeField::Weekday => {
                let current = i64::from(m.weekday().number_from_monday());
                day = day.checked_add(value.checked_sub(current)?)?;
            },
            TimeField::Date => return None,
        }

        let seconds = hour.checked_mul(3_600)?
                          .checked_add(minute.checked_mul(60)?)?
                          .checked_add(second)?;
        let moment = normalized(year, month, day, seconds)?;
        Some(Self::new(moment, self.precision.max(field.minimum_precision())))
    }

    /// Moves a field by `delta` units. Months and years keep the day within
    /// the length of the target month.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::time::{Time, TimeField};
    ///
    /// let t = Time::from_calendar(2010, 1, 31).unwrap();
    /// let shifted = t.shift_field(TimeField::Month, 1).unwrap();
    /// assert_eq!(shifted.to_string(), "28 February 2010");
    /// ```
    #[must_use]
    pub fn shift_field(self, field: TimeField, delta: i64) -> Option<Self> {
        let moment = match field {
            TimeField::Year => shift_months(self.moment, delta.checked_mul(12)?)?,
            TimeField::Month => shift_months(self.moment, delta)?,
            TimeField::Day | TimeField::Weekday | TimeField::Date => {
                self.moment.checked_add_signed(TimeDelta::try_days(delta)?)?
            },
            TimeField::Hour => self.moment.checked_add_signed(TimeDelta::try_hours(delta)?)?,
            TimeField::Minute => self.moment.checked_add_signed(TimeDelta::try_minutes(delta)?)?,
            TimeField::Second => self.moment.checked_add_signed(TimeDelta::try_seconds(delta)?)?,
        };
        Some(Self::new(moment, self.precision.max(field.minimum_precision())))
    }

    /// Adds a period unit by unit: months first, then days, then the clock.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::{period::{Period, PeriodUnit}, time::Time};
    ///
    /// let t = Time::from_calendar(2010, 8, 3).unwrap();
    /// let later = t.add_period(Period::of(30, PeriodUnit::Day)).unwrap();
    /// assert_eq!(later.to_string(), "2 September 2010");
    /// ```
    #[must_use]
    pub fn add_period(self, period: Period) -> Option<Self> {
        let moment = shift_months(self.moment, period.total_months())?;
        let moment = moment.checked_add_signed(TimeDelta::try_days(period.total_days())?)?;
        let moment = moment.checked_add_signed(TimeDelta::try_seconds(period.clock_seconds())?)?;

        let mut precision = self.precision;
        if period.total_days() != 0 {
            precision = precision.max(Precision::Date);
        }
        if period.seconds != 0 {
            precision = Precision::Clock;
        } else if period.hours != 0 || period.minutes != 0 {
            precision = precision.max(Precision::ShortClock);
        }
        Some(Self::new(moment, precision))
    }

    #[must_use]
    pub fn sub_period(self, period: Period) -> Option<Self> {
        self.add_period(period.negated())
    }

    /// The distance from `earlier` to `self` as whole days plus a clock
    /// remainder.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::time::Time;
    ///
    /// let a = Time::from_calendar(2010, 6, 3).unwrap();
    /// let b = Time::from_calendar(2010, 6, 1).unwrap();
    /// assert_eq!(a.since(b).to_string(), "2 days");
    /// ```
    #[must_use]
    pub fn since(self, earlier: Self) -> Period {
        let total = self.moment
                        .signed_duration_since(earlier.moment)
                        .num_seconds();
        let rest = total % 86_400;
        Period { days: total / 86_400,
                 hours: rest / 3_600,
                 minutes: rest % 3_600 / 60,
                 seconds: rest % 60,
                 ..Period::default() }
    }

    /// Easter Sunday of a year in the Gregorian calendar.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::time::Time;
    ///
    /// assert_eq!(Time::easter(2024).unwrap().to_string(), "31 March 2024");
    /// ```
    #[must_use]
    pub fn easter(year: i64) -> Option<Self> {
        let a = year.rem_euclid(19);
        let b = year.div_euclid(100);
        let c = year.rem_euclid(100);
        let d = b / 4;
        let e = b % 4;
        let f = (b + 8) / 25;
        let g = (b - f + 1) / 3;
        let h = (19 * a + b - d - g + 15).rem_euclid(30);
        let i = c / 4;
        let k = c % 4;
        let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
        let m = (a + 11 * h + 22 * l) / 451;
        let month = (h + l - 7 * m + 114) / 31;
        let day = (h + l - 7 * m + 114) % 31 + 1;
        Self::from_calendar(year, month, day)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.moment;
        let month = month_name(m.month()).unwrap_or_default();
        match self.precision {
            Precision::YearMonth => write!(f, "{month} {}", m.year()),
            Precision::Date => write!(f, "{} {month} {}", m.day(), m.year()),
            Precision::ShortClock => write!(f,
                                            "{} {month} {}, {:02}:{:02}",
                                            m.day(),
                                            m.year(),
                                            m.hour(),
                                            m.minute()),
            Precision::Clock => write!(f,
                                       "{} {month} {}, {:02}:{:02}:{:02}",
                                       m.day(),
                                       m.year(),
                                       m.hour(),
                                       m.minute(),
                                       m.second()),
        }
    }
}

/// English name of a month numbered from 1.
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    let number = u8::try_from(month).ok()?;
    Month::try_from(number).ok().map(|m| m.name())
}

/// Month number for a full or abbreviated English month name, ignoring case.
///
/// # Example
/// ```
/// use uro::interpreter::value::time::month_from_name;
///
/// assert_eq!(month_from_name("August"), Some(8));
/// assert_eq!(month_from_name("dec"), Some(12));
/// assert_eq!(month_from_name("days"), None);
/// ```
#[must_use]
pub fn month_from_name(name: &str) -> Option<u32> {
    name.parse::<Month>().ok().map(|m| m.number_from_month())
}

/// English name of a weekday, Monday being 1.
#[must_use]
pub fn weekday_name(day: i64) -> Option<&'static str> {
    let index = usize::try_from(day.checked_sub(1)?).ok()?;
    WEEKDAY_NAMES.get(index).copied()
}

fn shift_months(moment: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let amount = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 { moment.checked_add_months(amount) } else { moment.checked_sub_months(amount) }
}

fn normalized(year: i64, month: i64, day: i64, seconds: i64) -> Option<NaiveDateTime> {
    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first.checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)?;
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::period::PeriodUnit;

    fn date(year: i64, month: i64, day: i64) -> Time {
        Time::from_calendar(year, month, day).unwrap()
    }

    #[test]
    fn prints_every_precision() {
        let t = date(2010, 6, 3);
        assert_eq!(t.to_string(), "3 June 2010");
        assert_eq!(t.with_clock(10, 11, None).unwrap().to_string(), "3 June 2010, 10:11");
        assert_eq!(t.with_clock(9, 5, Some(1)).unwrap().to_string(), "3 June 2010, 09:05:01");
        assert_eq!(Time::year_month(2010, 6).unwrap().to_string(), "June 2010");
    }

    #[test]
    fn setting_fields_rolls_over() {
        let t = date(2010, 12, 31).set_field(TimeField::Day, 32).unwrap();
        assert_eq!(t.to_string(), "1 January 2011");

        let t = date(2010, 6, 3).set_field(TimeField::Month, 0).unwrap();
        assert_eq!(t.to_string(), "3 December 2009");
    }

    #[test]
    fn clock_fields_raise_precision() {
        let t = date(2010, 6, 3).shift_field(TimeField::Hour, 2).unwrap();
        assert_eq!(t.to_string(), "3 June 2010, 02:00");
    }

    #[test]
    fn weekday_counts_from_monday() {
        let t = date(2024, 1, 1);
        assert_eq!(t.field(TimeField::Weekday), Some(1));
        let sunday = t.set_field(TimeField::Weekday, 7).unwrap();
        assert_eq!(sunday.to_string(), "7 January 2024");
    }

    #[test]
    fn difference_keeps_clock_remainder() {
        let a = date(2010, 6, 3).with_clock(10, 0, Some(30)).unwrap();
        let b = date(2010, 6, 1).with_clock(8, 0, Some(0)).unwrap();
        assert_eq!(a.since(b).to_string(), "2 days 2 hours 30 seconds");
    }

    #[test]
    fn periods_with_months_clamp_the_day() {
        let t = date(2012, 1, 31).add_period(Period::of(1, PeriodUnit::Month)).unwrap();
        assert_eq!(t.to_string(), "29 February 2012");
    }

    #[test]
    fn names_are_looked_up() {
        assert_eq!(month_name(8), Some("August"));
        assert_eq!(month_name(13), None);
        assert_eq!(weekday_name(7), Some("Sunday"));
        assert_eq!(weekday_name(0), None);
    }
}
