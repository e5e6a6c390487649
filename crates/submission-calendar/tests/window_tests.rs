//! Tests for month windows, labels and the search debouncer.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use submission_calendar::debounce::Debouncer;
use submission_calendar::event::{Event, RecurrenceEnd, RecurrenceRule, SubmissionId};
use submission_calendar::label::{clock_time, event_detail, long_date, truncate};
use submission_calendar::window::MonthWindow;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn offset_zero_is_the_month_of_today() {
    let window = MonthWindow::from_offset(date(2024, 1, 31), 0);

    assert_eq!(window, MonthWindow::new(2024, 1).unwrap());
}

#[test]
fn offsets_roll_over_years() {
    let today = date(2024, 1, 31);

    assert_eq!(MonthWindow::from_offset(today, 1).label(), "February 2024");
    assert_eq!(MonthWindow::from_offset(today, -1).label(), "December 2023");
    assert_eq!(MonthWindow::from_offset(today, 24).label(), "January 2026");
    assert_eq!(MonthWindow::from_offset(today, -13).label(), "December 2022");
}

#[test]
fn labels_use_full_month_names() {
    let names: Vec<String> = (1..=12)
        .map(|m| MonthWindow::new(2025, m).unwrap().label())
        .collect();

    assert_eq!(names[0], "January 2025");
    assert_eq!(names[4], "May 2025");
    assert_eq!(names[8], "September 2025");
    assert_eq!(names[11], "December 2025");
}

#[test]
fn month_lengths_follow_the_calendar() {
    assert_eq!(MonthWindow::new(2024, 2).unwrap().days_in_month(), 29);
    assert_eq!(MonthWindow::new(2023, 2).unwrap().days_in_month(), 28);
    assert_eq!(MonthWindow::new(2024, 12).unwrap().days_in_month(), 31);
    assert_eq!(MonthWindow::new(2024, 12).unwrap().last_day(), date(2024, 12, 31));
    assert_eq!(MonthWindow::new(2024, 4).unwrap().days().count(), 30);
}

#[test]
fn invalid_month_is_rejected() {
    assert!(MonthWindow::new(2024, 0).is_none());
    assert!(MonthWindow::new(2024, 13).is_none());
}

#[test]
fn padding_counts_days_before_the_first_from_sunday() {
    // 2024-09-01 is a Sunday, 2024-06-01 a Saturday.
    assert_eq!(MonthWindow::new(2024, 9).unwrap().leading_padding(), 0);
    assert_eq!(MonthWindow::new(2024, 6).unwrap().leading_padding(), 6);
}

#[test]
fn clock_time_is_us_style() {
    let morning = date(2024, 1, 1).and_hms_opt(9, 5, 0).unwrap();
    let midnight = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
    let evening = date(2024, 1, 1).and_hms_opt(21, 45, 0).unwrap();

    assert_eq!(clock_time(morning), "9:05 AM");
    assert_eq!(clock_time(midnight), "12:00 AM");
    assert_eq!(clock_time(evening), "9:45 PM");
}

#[test]
fn truncate_leaves_short_text_alone() {
    assert_eq!(truncate("Standup", 23), "Standup");
    assert_eq!(truncate("abcdef", 3), "abc...");
}

#[test]
fn detail_spells_out_dates_and_recurrence() {
    let event = Event::new(
        SubmissionId(4),
        "Team Sync",
        date(2024, 1, 1).and_hms_opt(10, 0, 0).unwrap(),
        date(2024, 1, 2).and_hms_opt(13, 30, 0).unwrap(),
    )
    .with_type("Meeting")
    .with_info("Room 4B")
    .with_recurrence(RecurrenceRule::Weekly, RecurrenceEnd::On(date(2024, 3, 1)));

    let detail = event_detail(&event);

    assert_eq!(detail.title, "Team Sync");
    assert_eq!(detail.starts, "Monday, Jan 1, 2024, 10:00 AM");
    assert_eq!(detail.ends, "Tuesday, Jan 2, 2024, 1:30 PM");
    assert_eq!(detail.event_type, "Meeting");
    assert_eq!(detail.recurrence, "Weekly");
    assert_eq!(detail.recurs_until.as_deref(), Some("Friday, Mar 1, 2024"));
    assert_eq!(detail.additional_info, "Room 4B");
}

#[test]
fn detail_of_one_off_event_has_no_recurrence() {
    let start = date(2024, 7, 4).and_hms_opt(12, 0, 0).unwrap();
    let detail = event_detail(&Event::new(SubmissionId(5), "Picnic", start, start));

    assert_eq!(detail.recurrence, "");
    assert_eq!(detail.recurs_until, None);
    assert_eq!(long_date(date(2024, 7, 4)), "Thursday, Jul 4, 2024");
}

#[test]
fn debouncer_fires_once_after_quiet_period() {
    let mut debouncer = Debouncer::new(Duration::from_millis(500));
    let t0 = Instant::now();

    assert!(!debouncer.fire_if_due(t0));
    debouncer.trigger(t0);
    debouncer.trigger(t0 + Duration::from_millis(300));

    assert!(!debouncer.fire_if_due(t0 + Duration::from_millis(500)));
    assert!(debouncer.fire_if_due(t0 + Duration::from_millis(800)));
    assert!(!debouncer.fire_if_due(t0 + Duration::from_millis(900)));
}

#[test]
fn unrepresentable_wait_never_fires() {
    let mut debouncer = Debouncer::new(Duration::from_millis(u64::MAX));
    let t0 = Instant::now();

    debouncer.trigger(t0);

    assert!(!debouncer.is_pending());
    assert!(!debouncer.fire_if_due(t0 + Duration::from_secs(3600)));
}

#[test]
fn cancelled_debounce_never_fires() {
    let mut debouncer = Debouncer::new(Duration::from_millis(500));
    let t0 = Instant::now();

    debouncer.trigger(t0);
    debouncer.cancel();

    assert!(!debouncer.is_pending());
    assert!(!debouncer.fire_if_due(t0 + Duration::from_secs(5)));
}
