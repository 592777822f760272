use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Represents the time slot a period occupies within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub begin: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Creates a new `TimeRange` if `begin` is before `end`
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Option<Self> {
        (begin < end).then_some(Self { begin, end })
    }

    /// Parses two time strings and creates a `TimeRange` if valid.
    /// # Returns
    /// `Some(TimeRange)` if parsing succeeds and `begin` is before `end`
    pub fn from_strings(begin: &str, end: &str) -> Option<Self> {
        let fmt = "%I:%M%p"; // 12-hour format with AM/PM
        let begin = NaiveTime::parse_from_str(begin, fmt).ok()?;
        let end = NaiveTime::parse_from_str(end, fmt).ok()?;

        Self::new(begin, end)
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}",
            self.begin.format("%I:%M%p"),
            self.end.format("%I:%M%p")
        )
    }
}

/// A numbered period of the school day, with an optional time slot.
///
/// Periods are values ordered by `number` ascending; the number is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonNumber {
    pub number: u32,
    pub time: Option<TimeRange>,
}

impl LessonNumber {
    /// Creates a period without a time slot. Returns `None` for number 0.
    pub fn new(number: u32) -> Option<Self> {
        (number >= 1).then_some(Self { number, time: None })
    }

    pub fn with_time(mut self, time: TimeRange) -> Self {
        self.time = Some(time);
        self
    }
}

impl Display for LessonNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.time {
            Some(time) => write!(f, "{} ({})", self.number, time),
            None => write!(f, "{}", self.number),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lesson_number_is_one_based() {
        assert!(LessonNumber::new(0).is_none());
        assert!(LessonNumber::new(1).is_some());
    }

    #[test]
    fn test_lesson_numbers_order_by_number() {
        let mut numbers: Vec<LessonNumber> = [3, 1, 2]
            .into_iter()
            .map(|n| LessonNumber::new(n).unwrap())
            .collect();
        numbers.sort_by_key(|n| n.number);

        let order: Vec<u32> = numbers.iter().map(|n| n.number).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_timerange_from_strings() {
        let time = TimeRange::from_strings("08:30AM", "09:15AM").unwrap();
        assert_eq!(time.to_string(), "08:30AM-09:15AM");

        // End before begin is not a valid slot
        assert!(TimeRange::from_strings("09:15AM", "08:30AM").is_none());
        assert!(TimeRange::from_strings("not a time", "09:15AM").is_none());
    }
}
