use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::Value,
            time::{self, Time},
        },
    },
};

fn calendar(time: Option<Time>, line: usize) -> EvalResult<Value> {
    time.map(Value::Time)
        .ok_or(RuntimeError::TimeOutOfRange { line })
}

/// `date(day, month, year)`. Days and months beyond their range roll over,
/// so `date(32, 1, 2020)` is the first of February.
pub fn date(args: &[Value], line: usize) -> EvalResult<Value> {
    let day = args[0].as_integer(line)?;
    let month = args[1].as_integer(line)?;
    let year = args[2].as_integer(line)?;
    calendar(Time::from_calendar(year, month, day), line)
}

/// English name of a month numbered from 1.
///
/// # Errors
/// `InvalidArgument` outside 1 to 12.
pub fn month_name(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = args[0].as_integer(line)?;
    let name = u32::try_from(n).ok().and_then(time::month_name);
    name.map(Value::from)
        .ok_or_else(|| invalid(format!("no month number {n}"), line))
}

/// English name of a weekday, Monday being 1.
///
/// # Errors
/// `InvalidArgument` outside 1 to 7.
pub fn weekday_name(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = args[0].as_integer(line)?;
    time::weekday_name(n).map(Value::from)
                         .ok_or_else(|| invalid(format!("no weekday number {n}"), line))
}

const fn invalid(details: String, line: usize) -> RuntimeError {
    RuntimeError::InvalidArgument { details, line }
}

/// The first of January of a year.
pub fn new_year(args: &[Value], line: usize) -> EvalResult<Value> {
    calendar(Time::from_calendar(args[0].as_integer(line)?, 1, 1), line)
}

/// The 25th of December of a year.
pub fn christmas(args: &[Value], line: usize) -> EvalResult<Value> {
    calendar(Time::from_calendar(args[0].as_integer(line)?, 12, 25), line)
}

/// Easter Sunday of a year.
pub fn easter(args: &[Value], line: usize) -> EvalResult<Value> {
    calendar(Time::easter(args[0].as_integer(line)?), line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_roll_over() {
        let t = date(&[32.into(), 1.into(), 2020.into()], 1).unwrap();
        assert_eq!(t.to_string(), "1 February 2020");
    }

    #[test]
    fn names_months_and_weekdays() {
        assert_eq!(month_name(&[8.into()], 1).unwrap(), Value::from("August"));
        assert_eq!(weekday_name(&[7.into()], 1).unwrap(), Value::from("Sunday"));
        assert!(month_name(&[13.into()], 1).is_err());
    }

    #[test]
    fn holidays() {
        assert_eq!(christmas(&[2021.into()], 1).unwrap().to_string(), "25 December 2021");
        assert_eq!(easter(&[2021.into()], 1).unwrap().to_string(), "4 April 2021");
    }
}
