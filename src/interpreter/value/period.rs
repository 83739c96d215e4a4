use std::fmt::{self, Display};

/// Seconds in each unit when a period is reduced to one magnitude.
const SECONDS_PER_MINUTE: i128 = 60;
const SECONDS_PER_HOUR: i128 = 3_600;
const SECONDS_PER_DAY: i128 = 86_400;
const SECONDS_PER_WEEK: i128 = 7 * SECONDS_PER_DAY;
const SECONDS_PER_MONTH: i128 = 30 * SECONDS_PER_DAY;
const SECONDS_PER_YEAR: i128 = 365 * SECONDS_PER_DAY;

/// Unit suffix of a period literal such as `3 days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl PeriodUnit {
    /// Looks up a unit by its singular or plural name, ignoring case.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::period::PeriodUnit;
    ///
    /// assert_eq!(PeriodUnit::from_name("Days"), Some(PeriodUnit::Day));
    /// assert_eq!(PeriodUnit::from_name("hour"), Some(PeriodUnit::Hour));
    /// assert_eq!(PeriodUnit::from_name("fortnight"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "year" | "years" => Some(Self::Year),
            "month" | "months" => Some(Self::Month),
            "week" | "weeks" => Some(Self::Week),
            "day" | "days" => Some(Self::Day),
            "hour" | "hours" => Some(Self::Hour),
            "minute" | "minutes" => Some(Self::Minute),
            "second" | "seconds" => Some(Self::Second),
            _ => None,
        }
    }
}

/// A calendar-aware length of time.
///
/// Each unit is kept separately so that `1 month` stays a month when it is
/// added to a time, instead of turning into a fixed number of days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Period {
    pub years:   i64,
    pub months:  i64,
    pub weeks:   i64,
    pub days:    i64,
    pub hours:   i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Period {
    /// A period of `amount` units.
    #[must_use]
    pub fn of(amount: i64, unit: PeriodUnit) -> Self {
        let mut period = Self::default();
        match unit {
            PeriodUnit::Year => period.years = amount,
            PeriodUnit::Month => period.months = amount,
            PeriodUnit::Week => period.weeks = amount,
            PeriodUnit::Day => period.days = amount,
            PeriodUnit::Hour => period.hours = amount,
            PeriodUnit::Minute => period.minutes = amount,
            PeriodUnit::Second => period.seconds = amount,
        }
        period
    }

    fn parts(self) -> [(i64, &'static str); 7] {
        [(self.years, "year"),
         (self.months, "month"),
         (self.weeks, "week"),
         (self.days, "day"),
         (self.hours, "hour"),
         (self.minutes, "minute"),
         (self.seconds, "second")]
    }

    fn combine(self, other: Self, f: impl Fn(i64, i64) -> Option<i64>) -> Option<Self> {
        Some(Self { years:   f(self.years, other.years)?,
                    months:  f(self.months, other.months)?,
                    weeks:   f(self.weeks, other.weeks)?,
                    days:    f(self.days, other.days)?,
                    hours:   f(self.hours, other.hours)?,
                    minutes: f(self.minutes, other.minutes)?,
                    seconds: f(self.seconds, other.seconds)?, })
    }

    /// Unit-wise sum; `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.combine(other, i64::checked_add)
    }

    /// Unit-wise difference; `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.combine(other, i64::checked_sub)
    }

    /// Multiplies every unit by `factor`; `None` on overflow.
    #[must_use]
    pub fn checked_scale(self, factor: i64) -> Option<Self> {
        self.combine(Self::default(), |a, _| a.checked_mul(factor))
    }

    /// Negates every unit.
    #[must_use]
    pub fn negated(self) -> Self {
        self.checked_scale(-1).unwrap_or(self)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.parts().iter().all(|(amount, _)| *amount == 0)
    }

    /// Months carried by the year and month units.
    #[must_use]
    pub fn total_months(self) -> i64 {
        self.years.saturating_mul(12).saturating_add(self.months)
    }

    /// Days carried by the week and day units.
    #[must_use]
    pub fn total_days(self) -> i64 {
        self.weeks.saturating_mul(7).saturating_add(self.days)
    }

    /// Seconds carried by the hour, minute and second units.
    #[must_use]
    pub fn clock_seconds(self) -> i64 {
        self.hours
            .saturating_mul(3_600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }

    /// Approximate length in seconds, counting a month as 30 days and a year
    /// as 365 days. Used for comparing periods.
    #[must_use]
    pub fn approximate_seconds(self) -> i128 {
        i128::from(self.years) * SECONDS_PER_YEAR
        + i128::from(self.months) * SECONDS_PER_MONTH
        + i128::from(self.weeks) * SECONDS_PER_WEEK
        + i128::from(self.days) * SECONDS_PER_DAY
        + i128::from(self.hours) * SECONDS_PER_HOUR
        + i128::from(self.minutes) * SECONDS_PER_MINUTE
        + i128::from(self.seconds)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "no period");
        }

        let mut first = true;
        for (amount, unit) in self.parts() {
            if amount == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;

            let plural = if amount.abs() == 1 { "" } else { "s" };
            write!(f, "{amount} {unit}{plural}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_non_zero_parts_in_order() {
        let period = Period { days: 2,
                              hours: 3,
                              ..Period::default() };
        assert_eq!(period.to_string(), "2 days 3 hours");
        assert_eq!(Period::of(1, PeriodUnit::Day).to_string(), "1 day");
        assert_eq!(Period::of(-1, PeriodUnit::Week).to_string(), "-1 week");
        assert_eq!(Period::default().to_string(), "no period");
    }

    #[test]
    fn arithmetic_is_unit_wise() {
        let sum = Period::of(75, PeriodUnit::Day).checked_add(Period::of(2, PeriodUnit::Day));
        assert_eq!(sum, Some(Period::of(77, PeriodUnit::Day)));

        let scaled = Period::of(3, PeriodUnit::Hour).checked_scale(4);
        assert_eq!(scaled, Some(Period::of(12, PeriodUnit::Hour)));
    }

    #[test]
    fn approximate_length_orders_mixed_units() {
        let week = Period::of(1, PeriodUnit::Week);
        let days = Period::of(8, PeriodUnit::Day);
        assert!(week.approximate_seconds() < days.approximate_seconds());
    }
}
