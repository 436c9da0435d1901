use chrono::NaiveTime;

use crate::model::attendance::AttendanceStatus;

/// Opening of the morning window, inclusive.
pub fn morning_start() -> NaiveTime {
    hms(8, 30, 0)
}

/// Close of the morning window, inclusive.
pub fn morning_end() -> NaiveTime {
    hms(10, 0, 0)
}

/// From this time on a first submission counts as a half day.
pub fn afternoon_threshold() -> NaiveTime {
    hms(13, 0, 0)
}

fn hms(hour: u32, min: u32, sec: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, sec).unwrap_or_default()
}

/// Where a time-of-day falls relative to the two submission windows.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TimeWindow {
    /// Before 08:30:00.
    BeforeMorning,
    /// 08:30:00 ..= 10:00:00.
    Morning,
    /// Strictly between 10:00:00 and 13:00:00.
    Midday,
    /// 13:00:00 onwards.
    Afternoon,
}

impl TimeWindow {
    pub fn classify(t: NaiveTime) -> Self {
        if t < morning_start() {
            TimeWindow::BeforeMorning
        } else if t <= morning_end() {
            TimeWindow::Morning
        } else if t < afternoon_threshold() {
            TimeWindow::Midday
        } else {
            TimeWindow::Afternoon
        }
    }

    /// Status earned when the day's first submission lands in this window.
    pub fn attendance(self) -> AttendanceStatus {
        match self {
            TimeWindow::Morning => AttendanceStatus::Present,
            TimeWindow::Afternoon => AttendanceStatus::HalfDay,
            TimeWindow::BeforeMorning | TimeWindow::Midday => AttendanceStatus::PresentLate,
        }
    }

    pub fn accepts_submissions(self) -> bool {
        matches!(self, TimeWindow::Morning | TimeWindow::Afternoon)
    }
}

pub fn classify_first_submission(t: NaiveTime) -> AttendanceStatus {
    TimeWindow::classify(t).attendance()
}

pub fn submission_window_open(t: NaiveTime) -> bool {
    TimeWindow::classify(t).accepts_submissions()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn morning_window_is_inclusive_on_both_ends() {
        assert_eq!(classify_first_submission(t(8, 30, 0)), AttendanceStatus::Present);
        assert_eq!(classify_first_submission(t(9, 15, 0)), AttendanceStatus::Present);
        assert_eq!(classify_first_submission(t(10, 0, 0)), AttendanceStatus::Present);
    }

    #[test]
    fn just_outside_the_morning_window_is_late() {
        assert_eq!(classify_first_submission(t(8, 29, 59)), AttendanceStatus::PresentLate);
        assert_eq!(classify_first_submission(t(10, 0, 1)), AttendanceStatus::PresentLate);
        let fraction_past = NaiveTime::from_hms_milli_opt(10, 0, 0, 500).unwrap();
        assert_eq!(classify_first_submission(fraction_past), AttendanceStatus::PresentLate);
    }

    #[test]
    fn small_hours_count_as_late_not_rejected() {
        assert_eq!(classify_first_submission(t(2, 0, 0)), AttendanceStatus::PresentLate);
        assert_eq!(classify_first_submission(t(0, 0, 0)), AttendanceStatus::PresentLate);
    }

    #[test]
    fn afternoon_threshold_is_half_day() {
        assert_eq!(classify_first_submission(t(12, 59, 59)), AttendanceStatus::PresentLate);
        assert_eq!(classify_first_submission(t(13, 0, 0)), AttendanceStatus::HalfDay);
        assert_eq!(classify_first_submission(t(23, 59, 59)), AttendanceStatus::HalfDay);
    }

    #[test]
    fn submissions_accepted_only_inside_windows() {
        assert!(submission_window_open(t(8, 30, 0)));
        assert!(submission_window_open(t(10, 0, 0)));
        assert!(submission_window_open(t(13, 0, 0)));
        assert!(!submission_window_open(t(8, 0, 0)));
        assert!(!submission_window_open(t(11, 30, 0)));
    }
}
