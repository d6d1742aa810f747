use chrono::{NaiveDate, NaiveTime};
use log::debug;
use thiserror::Error;

use crate::constants::{DATE_FORMAT, TIME_FORMAT};
use crate::trigger::{
    DurationMinutes, GeolocationConfig, LatLng, Radius, Recurrence, Repetition, Schedule, Timing,
    Weekday, WeekdaySet,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

pub fn parse_date(input: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| FieldError::InvalidDate(input.trim().to_string()))
}

pub fn parse_time(input: &str) -> Result<NaiveTime, FieldError> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT)
        .map_err(|_| FieldError::InvalidTime(input.trim().to_string()))
}

/// Parses a non-negative whole number. Values too large for `u32` saturate.
pub fn parse_number(input: &str) -> Result<u32, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::InvalidNumber(trimmed.to_string()));
    }
    Ok(trimmed.parse::<u64>().map_or(u32::MAX, |n| n.min(u32::MAX as u64) as u32))
}

/// Unsaved form values. Every field keeps its value across mode switches so
/// that switching back restores what the user entered.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    repetition: Repetition,
    all_day: bool,
    start_date: NaiveDate,
    end_date: NaiveDate,
    time: NaiveTime,
    duration: DurationMinutes,
    days: WeekdaySet,
    position: LatLng,
    radius: Radius,
}

/// Initial values a new draft starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftDefaults {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: u32,
    pub position: LatLng,
    pub radius: u16,
}

impl Draft {
    pub fn new(defaults: DraftDefaults) -> Self {
        Self {
            repetition: Repetition::Once,
            all_day: true,
            start_date: defaults.date,
            end_date: defaults.date,
            time: defaults.time,
            duration: DurationMinutes(defaults.duration),
            days: WeekdaySet::EMPTY,
            position: defaults.position,
            radius: Radius::new(defaults.radius),
        }
    }

    // --- accessors ---

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    pub fn is_all_day(&self) -> bool {
        self.all_day
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    pub fn selected_days(&self) -> WeekdaySet {
        self.days
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    // --- mutations ---

    /// Switches mode and recomputes the day set: fixed for werktags and
    /// wochenende, cleared for everything else.
    pub fn set_repetition(&mut self, repetition: Repetition) {
        self.repetition = repetition;
        self.days = repetition
            .cadence()
            .and_then(|c| c.fixed_days())
            .unwrap_or(WeekdaySet::EMPTY);
        debug!("repetition set to {} with days [{}]", repetition, self.days);
    }

    pub fn next_repetition(&mut self) {
        self.set_repetition(self.repetition.next());
    }

    pub fn previous_repetition(&mut self) {
        self.set_repetition(self.repetition.previous());
    }

    /// Toggles a weekday. Only manual-pick modes allow it; returns whether the
    /// set changed.
    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        if !self.repetition.has_manual_days() {
            return false;
        }
        self.days.toggle(day);
        true
    }

    pub fn set_all_day(&mut self, all_day: bool) {
        self.all_day = all_day;
    }

    pub fn toggle_all_day(&mut self) {
        self.all_day = !self.all_day;
    }

    pub fn set_duration(&mut self, minutes: u32) {
        self.duration = DurationMinutes(minutes);
    }

    pub fn increment_duration(&mut self, step: u32) {
        self.duration = self.duration.plus(step);
    }

    pub fn decrement_duration(&mut self, step: u32) {
        self.duration = self.duration.minus(step);
    }

    pub fn set_radius(&mut self, meters: u16) {
        self.radius = Radius::new(meters);
    }

    pub fn adjust_radius(&mut self, delta: i32) {
        self.radius = self.radius.adjusted(delta);
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date;
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date = date;
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = time;
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    /// Snapshot of the draft as a trigger. Dates are carried only for one-off
    /// triggers, days only for recurring ones, the time only when not all-day.
    pub fn to_config(&self) -> GeolocationConfig {
        let schedule = match self.repetition.cadence() {
            None => Schedule::Once {
                start_date: self.start_date,
                end_date: self.end_date,
            },
            Some(cadence) => Schedule::Recurring(Recurrence::new(cadence, self.days)),
        };
        let timing = if self.all_day {
            Timing::AllDay
        } else {
            Timing::At(self.time)
        };
        GeolocationConfig {
            schedule,
            timing,
            position: self.position,
            radius: self.radius,
            duration: self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn draft() -> Draft {
        Draft::new(DraftDefaults {
            date: parse_date("2025-02-16").unwrap(),
            time: parse_time("15:00").unwrap(),
            duration: 0,
            position: LatLng::new(51.0, 7.0),
            radius: 100,
        })
    }

    #[test]
    fn test_defaults() {
        let d = draft();
        assert_eq!(d.repetition(), Repetition::Once);
        assert!(d.is_all_day());
        assert!(d.selected_days().is_empty());
        assert_eq!(d.radius().meters(), 100);
    }

    #[test]
    fn test_fixed_modes_yield_fixed_days() {
        let mut d = draft();
        d.set_repetition(Repetition::Werktags);
        assert_eq!(d.selected_days(), WeekdaySet::WORKDAYS);
        assert!(!d.toggle_day(Weekday::Mo));
        assert_eq!(d.selected_days(), WeekdaySet::WORKDAYS);

        d.set_repetition(Repetition::Wochenende);
        assert_eq!(d.selected_days(), WeekdaySet::WEEKEND);
        assert!(!d.toggle_day(Weekday::Sa));
        assert_eq!(d.selected_days(), WeekdaySet::WEEKEND);
    }

    #[test]
    fn test_manual_modes_start_empty_and_toggle() {
        for rep in [
            Repetition::Daily,
            Repetition::Weekly,
            Repetition::Biweekly,
            Repetition::Monthly,
        ] {
            let mut d = draft();
            d.set_repetition(Repetition::Werktags);
            d.set_repetition(rep);
            assert!(d.selected_days().is_empty(), "{rep} should start empty");
            assert!(d.toggle_day(Weekday::Di));
            assert!(d.selected_days().contains(Weekday::Di));
            assert!(d.toggle_day(Weekday::Di));
            assert!(d.selected_days().is_empty());
        }
    }

    #[test]
    fn test_once_ignores_day_toggle() {
        let mut d = draft();
        assert!(!d.toggle_day(Weekday::Fr));
        assert!(d.selected_days().is_empty());
    }

    #[test]
    fn test_radius_and_duration_clamped() {
        let mut d = draft();
        d.set_radius(5);
        assert_eq!(d.radius().meters(), 15);
        d.set_radius(1000);
        assert_eq!(d.radius().meters(), 200);
        d.adjust_radius(-1000);
        assert_eq!(d.radius().meters(), 15);

        d.decrement_duration(1);
        assert_eq!(d.duration().minutes(), 0);
        d.increment_duration(10);
        d.decrement_duration(3);
        assert_eq!(d.duration().minutes(), 7);
    }

    #[test]
    fn test_save_once_all_day() {
        let mut d = draft();
        d.set_end_date(parse_date("2025-02-20").unwrap());
        let config = d.to_config();
        assert_eq!(config.start_date(), Some(parse_date("2025-02-16").unwrap()));
        assert_eq!(config.end_date(), Some(parse_date("2025-02-20").unwrap()));
        assert_eq!(config.time(), None);
        assert_eq!(config.selected_days(), None);
    }

    #[test]
    fn test_save_once_timed_carries_time() {
        let mut d = draft();
        d.set_all_day(false);
        d.set_time(parse_time("08:15").unwrap());
        let config = d.to_config();
        assert!(config.start_date().is_some());
        assert_eq!(config.time(), Some(parse_time("08:15").unwrap()));
        assert_eq!(config.selected_days(), None);
    }

    #[test]
    fn test_save_weekly() {
        let mut d = draft();
        d.set_repetition(Repetition::Weekly);
        d.toggle_day(Weekday::Mo);
        d.toggle_day(Weekday::Mi);
        let config = d.to_config();
        let days: Vec<Weekday> = config.selected_days().unwrap().iter().collect();
        assert_eq!(days, vec![Weekday::Mo, Weekday::Mi]);
        assert_eq!(config.start_date(), None);
        assert_eq!(config.end_date(), None);
        assert_eq!(config.time(), None);

        d.toggle_all_day();
        let timed = d.to_config();
        assert_eq!(timed.time(), Some(parse_time("15:00").unwrap()));
        assert_eq!(timed.start_date(), None);
    }

    #[test]
    fn test_every_mode_has_exactly_one_of_dates_or_days() {
        for rep in Repetition::iter() {
            let mut d = draft();
            d.set_repetition(rep);
            let config = d.to_config();
            assert_eq!(config.repetition(), rep);
            assert_ne!(config.start_date().is_some(), config.selected_days().is_some());
            assert_eq!(config.start_date().is_some(), config.end_date().is_some());
        }
    }

    #[test]
    fn test_draft_not_reset_after_save() {
        let mut d = draft();
        d.set_repetition(Repetition::Monthly);
        d.toggle_day(Weekday::So);
        let before = d.clone();
        let _ = d.to_config();
        assert_eq!(d, before);
    }

    #[test]
    fn test_set_position_overwrites() {
        let mut d = draft();
        d.set_position(LatLng::new(52.52, 13.405));
        assert_eq!(d.to_config().position, LatLng::new(52.52, 13.405));
    }

    #[test]
    fn test_parse_fields() {
        assert!(parse_date("2025-13-01").is_err());
        assert_eq!(
            parse_time("25:00"),
            Err(FieldError::InvalidTime("25:00".to_string()))
        );
        assert_eq!(parse_number(" 42 "), Ok(42));
        assert!(parse_number("-3").is_err());
        assert!(parse_number("").is_err());
        assert_eq!(parse_number("99999999999"), Ok(u32::MAX));
    }
}
