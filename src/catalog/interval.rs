use chrono::NaiveDate;

/// A closed date interval, both endpoints inclusive
///
/// The constructor normalizes reversed endpoints so that `start <= end`
/// always holds. The swap is a caller error and is logged as one, not
/// treated as a silent success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start > end {
            tracing::warn!(
                %start,
                %end,
                "interval endpoints are reversed, swapping them"
            );
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether a date falls inside the interval, endpoints included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
