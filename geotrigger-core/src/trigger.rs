use chrono::{NaiveDate, NaiveTime};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

use crate::constants::{DATE_FORMAT, RADIUS_MAX, RADIUS_MIN, TIME_FORMAT};

/// Largest latitude a Web Mercator map can show.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

// === Repetition ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Repetition {
    Once,
    Daily,
    Werktags,
    Wochenende,
    Weekly,
    Biweekly,
    Monthly,
}

impl Repetition {
    /// Wire name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Repetition::Once => "once",
            Repetition::Daily => "daily",
            Repetition::Werktags => "werktags",
            Repetition::Wochenende => "wochenende",
            Repetition::Weekly => "weekly",
            Repetition::Biweekly => "biweekly",
            Repetition::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Repetition::Once => "Once",
            Repetition::Daily => "Daily",
            Repetition::Werktags => "Weekdays (Mo-Fr)",
            Repetition::Wochenende => "Weekend (Sa-So)",
            Repetition::Weekly => "Weekly",
            Repetition::Biweekly => "Every 2 weeks",
            Repetition::Monthly => "Monthly",
        }
    }

    pub fn next(self) -> Self {
        let all: Vec<Repetition> = Repetition::iter().collect();
        let i = all.iter().position(|r| *r == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    pub fn previous(self) -> Self {
        let all: Vec<Repetition> = Repetition::iter().collect();
        let i = all.iter().position(|r| *r == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }

    /// The recurring cadence, or `None` for a one-off trigger.
    pub fn cadence(self) -> Option<Cadence> {
        match self {
            Repetition::Once => None,
            Repetition::Daily => Some(Cadence::Daily),
            Repetition::Werktags => Some(Cadence::Werktags),
            Repetition::Wochenende => Some(Cadence::Wochenende),
            Repetition::Weekly => Some(Cadence::Weekly),
            Repetition::Biweekly => Some(Cadence::Biweekly),
            Repetition::Monthly => Some(Cadence::Monthly),
        }
    }

    /// Whether the user picks the weekdays by hand in this mode.
    pub fn has_manual_days(self) -> bool {
        self.cadence().is_some_and(|c| c.fixed_days().is_none())
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// === Weekdays ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Weekday {
    Mo,
    Di,
    Mi,
    Do,
    Fr,
    Sa,
    So,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mo => "Mo",
            Weekday::Di => "Di",
            Weekday::Mi => "Mi",
            Weekday::Do => "Do",
            Weekday::Fr => "Fr",
            Weekday::Sa => "Sa",
            Weekday::So => "So",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Weekday> {
        Weekday::iter().nth(index)
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// A set of weekdays, iterated Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    /// Mo-Fr.
    pub const WORKDAYS: WeekdaySet = WeekdaySet(0b0001_1111);
    /// Sa-So.
    pub const WEEKEND: WeekdaySet = WeekdaySet(0b0110_0000);

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    /// Adds the day if absent, removes it if present. Returns whether the day
    /// is in the set afterwards.
    pub fn toggle(&mut self, day: Weekday) -> bool {
        self.0 ^= day.bit();
        self.contains(day)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::iter().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|d| d.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for day in self.iter() {
            seq.serialize_element(day.as_str())?;
        }
        seq.end()
    }
}

// === Position, radius, duration ===

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Clamps latitude to the mapped range and wraps longitude into [-180, 180).
    pub fn normalized(self) -> Self {
        let lat = self.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let lng = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}]", self.lat, self.lng)
    }
}

impl Serialize for LatLng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lng].serialize(serializer)
    }
}

/// Ring radius in meters, always within [`RADIUS_MIN`, `RADIUS_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Radius(u16);

impl Radius {
    pub fn new(meters: u16) -> Self {
        Self(meters.clamp(RADIUS_MIN, RADIUS_MAX))
    }

    pub fn meters(&self) -> u16 {
        self.0
    }

    pub fn adjusted(self, delta: i32) -> Self {
        let target = (self.0 as i32 + delta).clamp(RADIUS_MIN as i32, RADIUS_MAX as i32);
        Self(target as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct DurationMinutes(pub u32);

impl DurationMinutes {
    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn plus(self, step: u32) -> Self {
        Self(self.0.saturating_add(step))
    }

    pub fn minus(self, step: u32) -> Self {
        Self(self.0.saturating_sub(step))
    }
}

// === Timing and schedule ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    AllDay,
    At(NaiveTime),
}

impl Timing {
    pub fn is_all_day(&self) -> bool {
        matches!(self, Timing::AllDay)
    }

    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Timing::AllDay => None,
            Timing::At(t) => Some(*t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    Daily,
    Werktags,
    Wochenende,
    Weekly,
    Biweekly,
    Monthly,
}

impl Cadence {
    pub fn repetition(&self) -> Repetition {
        match self {
            Cadence::Daily => Repetition::Daily,
            Cadence::Werktags => Repetition::Werktags,
            Cadence::Wochenende => Repetition::Wochenende,
            Cadence::Weekly => Repetition::Weekly,
            Cadence::Biweekly => Repetition::Biweekly,
            Cadence::Monthly => Repetition::Monthly,
        }
    }

    /// Day set implied by the cadence itself, if it is not user-editable.
    pub fn fixed_days(&self) -> Option<WeekdaySet> {
        match self {
            Cadence::Werktags => Some(WeekdaySet::WORKDAYS),
            Cadence::Wochenende => Some(WeekdaySet::WEEKEND),
            _ => None,
        }
    }
}

/// Recurring cadence together with the weekdays it fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    cadence: Cadence,
    days: WeekdaySet,
}

impl Recurrence {
    /// Fixed-day cadences ignore `days` and use their own set.
    pub fn new(cadence: Cadence, days: WeekdaySet) -> Self {
        let days = cadence.fixed_days().unwrap_or(days);
        Self { cadence, days }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn days(&self) -> WeekdaySet {
        self.days
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Once {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    Recurring(Recurrence),
}

impl Schedule {
    pub fn repetition(&self) -> Repetition {
        match self {
            Schedule::Once { .. } => Repetition::Once,
            Schedule::Recurring(r) => r.cadence().repetition(),
        }
    }
}

// === Saved trigger ===

/// One saved geolocation trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "ConfigRecord")]
pub struct GeolocationConfig {
    pub schedule: Schedule,
    pub timing: Timing,
    pub position: LatLng,
    pub radius: Radius,
    pub duration: DurationMinutes,
}

impl GeolocationConfig {
    pub fn repetition(&self) -> Repetition {
        self.schedule.repetition()
    }

    pub fn is_all_day(&self) -> bool {
        self.timing.is_all_day()
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.timing.time()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        match self.schedule {
            Schedule::Once { start_date, .. } => Some(start_date),
            Schedule::Recurring(_) => None,
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.schedule {
            Schedule::Once { end_date, .. } => Some(end_date),
            Schedule::Recurring(_) => None,
        }
    }

    pub fn selected_days(&self) -> Option<WeekdaySet> {
        match self.schedule {
            Schedule::Once { .. } => None,
            Schedule::Recurring(r) => Some(r.days()),
        }
    }
}

/// Flat record with optional keys, the shape used on the wire.
///
/// `selectedDays` is present for every recurring schedule. For werktags and
/// wochenende it carries the fixed Mo-Fr or Sa-So set, so a reader never has
/// to derive the days from the repetition name.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigRecord {
    repetition: Repetition,
    is_all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_days: Option<WeekdaySet>,
    position: LatLng,
    radius: u16,
    duration: u32,
}

impl From<GeolocationConfig> for ConfigRecord {
    fn from(config: GeolocationConfig) -> Self {
        Self {
            repetition: config.repetition(),
            is_all_day: config.is_all_day(),
            start_date: config.start_date().map(|d| d.format(DATE_FORMAT).to_string()),
            end_date: config.end_date().map(|d| d.format(DATE_FORMAT).to_string()),
            time: config.time().map(|t| t.format(TIME_FORMAT).to_string()),
            selected_days: config.selected_days(),
            position: config.position,
            radius: config.radius.meters(),
            duration: config.duration.minutes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, TIME_FORMAT).unwrap()
    }

    #[test]
    fn test_toggle_twice_is_noop() {
        for day in Weekday::iter() {
            let mut set: WeekdaySet = [Weekday::Mo, Weekday::Fr].into_iter().collect();
            let before = set;
            set.toggle(day);
            assert_ne!(set, before);
            set.toggle(day);
            assert_eq!(set, before);
        }
    }

    #[test]
    fn test_fixed_sets() {
        let workdays: Vec<Weekday> = WeekdaySet::WORKDAYS.iter().collect();
        assert_eq!(
            workdays,
            vec![Weekday::Mo, Weekday::Di, Weekday::Mi, Weekday::Do, Weekday::Fr]
        );
        let weekend: Vec<Weekday> = WeekdaySet::WEEKEND.iter().collect();
        assert_eq!(weekend, vec![Weekday::Sa, Weekday::So]);
    }

    #[test]
    fn test_set_iterates_monday_first() {
        let set: WeekdaySet = [Weekday::So, Weekday::Mi, Weekday::Mo].into_iter().collect();
        assert_eq!(set.to_string(), "Mo, Mi, So");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_recurrence_ignores_days_for_fixed_cadence() {
        let picked: WeekdaySet = [Weekday::Sa].into_iter().collect();
        assert_eq!(
            Recurrence::new(Cadence::Werktags, picked).days(),
            WeekdaySet::WORKDAYS
        );
        assert_eq!(
            Recurrence::new(Cadence::Wochenende, WeekdaySet::EMPTY).days(),
            WeekdaySet::WEEKEND
        );
        assert_eq!(Recurrence::new(Cadence::Weekly, picked).days(), picked);
    }

    #[test]
    fn test_repetition_cycle_wraps() {
        assert_eq!(Repetition::Once.previous(), Repetition::Monthly);
        assert_eq!(Repetition::Monthly.next(), Repetition::Once);
        let mut r = Repetition::Once;
        for _ in 0..7 {
            r = r.next();
        }
        assert_eq!(r, Repetition::Once);
    }

    #[test]
    fn test_manual_day_modes() {
        let manual: Vec<Repetition> = Repetition::iter().filter(|r| r.has_manual_days()).collect();
        assert_eq!(
            manual,
            vec![
                Repetition::Daily,
                Repetition::Weekly,
                Repetition::Biweekly,
                Repetition::Monthly
            ]
        );
    }

    #[test]
    fn test_radius_clamped() {
        assert_eq!(Radius::new(0).meters(), 15);
        assert_eq!(Radius::new(500).meters(), 200);
        assert_eq!(Radius::new(100).meters(), 100);
        assert_eq!(Radius::new(20).adjusted(-10).meters(), 15);
        assert_eq!(Radius::new(198).adjusted(5).meters(), 200);
    }

    #[test]
    fn test_duration_never_negative() {
        assert_eq!(DurationMinutes(3).minus(5).minutes(), 0);
        assert_eq!(DurationMinutes(3).plus(5).minutes(), 8);
    }

    #[test]
    fn test_latlng_normalized() {
        let p = LatLng::new(89.0, 190.0).normalized();
        assert_eq!(p.lat, MAX_LATITUDE);
        assert!((p.lng - -170.0).abs() < 1e-9);
        let q = LatLng::new(51.0, 7.0).normalized();
        assert_eq!(q, LatLng::new(51.0, 7.0));
    }

    #[test]
    fn test_once_all_day_wire_shape() {
        let config = GeolocationConfig {
            schedule: Schedule::Once {
                start_date: date("2025-02-16"),
                end_date: date("2025-02-17"),
            },
            timing: Timing::AllDay,
            position: LatLng::new(51.0, 7.0),
            radius: Radius::new(100),
            duration: DurationMinutes(0),
        };
        assert_eq!(
            serde_json::to_value(config).unwrap(),
            json!({
                "repetition": "once",
                "isAllDay": true,
                "startDate": "2025-02-16",
                "endDate": "2025-02-17",
                "position": [51.0, 7.0],
                "radius": 100,
                "duration": 0
            })
        );
    }

    #[test]
    fn test_weekly_timed_wire_shape() {
        let days: WeekdaySet = [Weekday::Mi, Weekday::Mo].into_iter().collect();
        let config = GeolocationConfig {
            schedule: Schedule::Recurring(Recurrence::new(Cadence::Weekly, days)),
            timing: Timing::At(time("07:30")),
            position: LatLng::new(48.5, 9.25),
            radius: Radius::new(40),
            duration: DurationMinutes(15),
        };
        assert_eq!(
            serde_json::to_value(config).unwrap(),
            json!({
                "repetition": "weekly",
                "isAllDay": false,
                "time": "07:30",
                "selectedDays": ["Mo", "Mi"],
                "position": [48.5, 9.25],
                "radius": 40,
                "duration": 15
            })
        );
    }

    #[test]
    fn test_werktags_wire_shape_carries_fixed_days() {
        let config = GeolocationConfig {
            schedule: Schedule::Recurring(Recurrence::new(
                Cadence::Werktags,
                WeekdaySet::default(),
            )),
            timing: Timing::AllDay,
            position: LatLng::new(51.0, 7.0),
            radius: Radius::new(100),
            duration: DurationMinutes(0),
        };
        let value = serde_json::to_value(config).unwrap();
        assert_eq!(value["repetition"], "werktags");
        assert_eq!(value["selectedDays"], json!(["Mo", "Di", "Mi", "Do", "Fr"]));
        assert!(value.get("startDate").is_none());
    }
}
