use chrono::{Days, Local, NaiveDate, TimeDelta};
use ratatui::widgets::ListState;

use geotrigger_core::config::Settings;
use geotrigger_core::constants::{DATE_FORMAT, TIME_FORMAT};
use geotrigger_core::draft::{Draft, DraftDefaults, FieldError, parse_date, parse_number, parse_time};
use geotrigger_core::geo::Viewport;
use geotrigger_core::saved::SavedConfigs;
use geotrigger_core::trigger::{GeolocationConfig, LatLng, Weekday};

use crate::tui::component::{next_index, prev_index};
use crate::tui::tabs::config::modal::state::EditModalState;

const DURATION_STEP: u32 = 1;
const RADIUS_STEP: i32 = 5;
const TIME_STEP_MINUTES: i64 = 5;
const PAN_COLS: i32 = 8;
const PAN_ROWS: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Repetition,
    AllDay,
    Duration,
    StartDate,
    EndDate,
    Days,
    Time,
    Radius,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Repetition => "Repeat",
            FormField::AllDay => "All day",
            FormField::Duration => "Duration",
            FormField::StartDate => "Start date",
            FormField::EndDate => "End date",
            FormField::Days => "Days",
            FormField::Time => "Time",
            FormField::Radius => "Radius",
        }
    }

    /// Fields that can be typed into through the edit modal.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Duration
                | FormField::StartDate
                | FormField::EndDate
                | FormField::Time
                | FormField::Radius
        )
    }

    pub fn input_hint(&self) -> &'static str {
        match self {
            FormField::StartDate | FormField::EndDate => "YYYY-MM-DD",
            FormField::Time => "HH:MM",
            FormField::Duration => "minutes, 0 or more",
            FormField::Radius => "meters, 15 to 200",
            _ => "",
        }
    }
}

/// Fields shown for the current draft, top to bottom.
pub fn visible_fields(draft: &Draft) -> Vec<FormField> {
    let mut fields = vec![FormField::Repetition, FormField::AllDay, FormField::Duration];
    if draft.repetition().cadence().is_none() {
        fields.extend([FormField::StartDate, FormField::EndDate]);
    } else {
        fields.push(FormField::Days);
    }
    if !draft.is_all_day() {
        fields.push(FormField::Time);
    }
    fields.push(FormField::Radius);
    fields
}

fn shift_date(date: NaiveDate, delta: i32) -> NaiveDate {
    let days = Days::new(delta.unsigned_abs() as u64);
    let shifted = if delta >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(date)
}

#[derive(Debug)]
pub struct ConfigState {
    pub draft: Draft,
    pub saved: SavedConfigs,
    pub focus: FormField,
    pub day_cursor: Weekday,
    pub viewport: Viewport,
    pub list_state: ListState,
    pub show_json: bool,
    pub modal: EditModalState,
}

impl ConfigState {
    pub fn from_settings(settings: &Settings) -> Self {
        let draft = Draft::new(DraftDefaults {
            date: Local::now().date_naive(),
            time: settings.time,
            duration: settings.duration,
            position: settings.start_position,
            radius: settings.radius,
        });
        let viewport = Viewport::new(settings.start_position, settings.zoom);
        Self::new(draft, viewport)
    }

    pub fn new(draft: Draft, viewport: Viewport) -> Self {
        Self {
            draft,
            saved: SavedConfigs::new(),
            focus: FormField::Repetition,
            day_cursor: Weekday::Mo,
            viewport,
            list_state: ListState::default(),
            show_json: false,
            modal: EditModalState::new(),
        }
    }

    // --- focus ---

    pub fn focus_next(&mut self) {
        self.move_focus(next_index);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(prev_index);
    }

    fn move_focus(&mut self, step: fn(Option<usize>, usize) -> Option<usize>) {
        let fields = visible_fields(&self.draft);
        let current = fields.iter().position(|f| *f == self.focus);
        if let Some(i) = step(current, fields.len()) {
            self.focus = fields[i];
        }
    }

    pub fn set_focus(&mut self, field: FormField) {
        if visible_fields(&self.draft).contains(&field) {
            self.focus = field;
        }
    }

    fn ensure_focus_visible(&mut self) {
        if !visible_fields(&self.draft).contains(&self.focus) {
            self.focus = FormField::Repetition;
        }
    }

    // --- field changes ---

    /// Left/right on the focused field; `delta` is -1 or +1.
    pub fn adjust(&mut self, delta: i32) {
        match self.focus {
            FormField::Repetition => {
                if delta >= 0 {
                    self.draft.next_repetition();
                } else {
                    self.draft.previous_repetition();
                }
            }
            FormField::AllDay => self.draft.toggle_all_day(),
            FormField::Duration => {
                if delta >= 0 {
                    self.draft.increment_duration(DURATION_STEP * delta as u32);
                } else {
                    self.draft.decrement_duration(DURATION_STEP * delta.unsigned_abs());
                }
            }
            FormField::StartDate => {
                let date = shift_date(self.draft.start_date(), delta);
                self.draft.set_start_date(date);
            }
            FormField::EndDate => {
                let date = shift_date(self.draft.end_date(), delta);
                self.draft.set_end_date(date);
            }
            FormField::Days => {
                let next = (self.day_cursor.index() as i32 + delta).rem_euclid(7) as usize;
                self.day_cursor = Weekday::from_index(next).unwrap_or(Weekday::Mo);
            }
            FormField::Time => {
                let step = TimeDelta::minutes(TIME_STEP_MINUTES * delta as i64);
                let (time, _) = self.draft.time().overflowing_add_signed(step);
                self.draft.set_time(time);
            }
            FormField::Radius => self.draft.adjust_radius(RADIUS_STEP * delta),
        }
        self.ensure_focus_visible();
    }

    /// Space on the focused field.
    pub fn toggle(&mut self) {
        match self.focus {
            FormField::Repetition => self.draft.next_repetition(),
            FormField::AllDay => self.draft.toggle_all_day(),
            FormField::Days => {
                self.draft.toggle_day(self.day_cursor);
            }
            _ => {}
        }
        self.ensure_focus_visible();
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        self.day_cursor = day;
        if self.draft.toggle_day(day) {
            self.focus = FormField::Days;
        }
    }

    /// Current value of a text field, as shown in the edit modal.
    pub fn field_text(&self, field: FormField) -> String {
        match field {
            FormField::Duration => self.draft.duration().minutes().to_string(),
            FormField::StartDate => self.draft.start_date().format(DATE_FORMAT).to_string(),
            FormField::EndDate => self.draft.end_date().format(DATE_FORMAT).to_string(),
            FormField::Time => self.draft.time().format(TIME_FORMAT).to_string(),
            FormField::Radius => self.draft.radius().meters().to_string(),
            _ => String::new(),
        }
    }

    pub fn begin_edit(&mut self) -> bool {
        if !self.focus.is_text() {
            return false;
        }
        let text = self.field_text(self.focus);
        self.modal.open(self.focus, text);
        true
    }

    /// Parses and applies typed input. On error the field keeps its value.
    pub fn apply_edit(&mut self, field: FormField, text: &str) -> Result<(), FieldError> {
        match field {
            FormField::Duration => self.draft.set_duration(parse_number(text)?),
            FormField::StartDate => self.draft.set_start_date(parse_date(text)?),
            FormField::EndDate => self.draft.set_end_date(parse_date(text)?),
            FormField::Time => self.draft.set_time(parse_time(text)?),
            FormField::Radius => {
                let meters = parse_number(text)?.min(u16::MAX as u32) as u16;
                self.draft.set_radius(meters);
            }
            _ => {}
        }
        Ok(())
    }

    /// Owner side of the map's position callback.
    pub fn set_position(&mut self, position: LatLng) {
        self.draft.set_position(position);
    }

    // --- saved list ---

    /// Appends the draft as a trigger and selects it. The draft is kept.
    pub fn save(&mut self) -> usize {
        let index = self.saved.push(self.draft.to_config());
        self.list_state.select(Some(index));
        index
    }

    pub fn remove_selected(&mut self) -> Option<usize> {
        let i = self.list_state.selected()?;
        self.saved.remove(i)?;
        if self.saved.is_empty() {
            self.list_state.select(None);
        } else if i >= self.saved.len() {
            self.list_state.select(Some(self.saved.len() - 1));
        }
        Some(i)
    }

    pub fn select_saved(&mut self, index: usize) {
        if index < self.saved.len() {
            self.list_state.select(Some(index));
        }
    }

    pub fn select_next_saved(&mut self) {
        if let Some(i) = next_index(self.list_state.selected(), self.saved.len()) {
            self.list_state.select(Some(i));
        }
    }

    pub fn select_previous_saved(&mut self) {
        if let Some(i) = prev_index(self.list_state.selected(), self.saved.len()) {
            self.list_state.select(Some(i));
        }
    }

    pub fn selected_config(&self) -> Option<&GeolocationConfig> {
        self.list_state.selected().and_then(|i| self.saved.get(i))
    }

    // --- map viewport ---

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn pan(&mut self, cols: i32, rows: i32) {
        self.viewport.pan_cells(cols * PAN_COLS, rows * PAN_ROWS);
    }

    pub fn center_on_marker(&mut self) {
        self.viewport.recenter(self.draft.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrigger_core::trigger::{Repetition, WeekdaySet};

    fn state() -> ConfigState {
        let draft = Draft::new(DraftDefaults {
            date: parse_date("2025-02-16").unwrap(),
            time: parse_time("15:00").unwrap(),
            duration: 0,
            position: LatLng::new(51.0, 7.0),
            radius: 100,
        });
        ConfigState::new(draft, Viewport::new(LatLng::new(51.0, 7.0), 15))
    }

    #[test]
    fn test_visible_fields_follow_mode() {
        let mut s = state();
        assert_eq!(
            visible_fields(&s.draft),
            vec![
                FormField::Repetition,
                FormField::AllDay,
                FormField::Duration,
                FormField::StartDate,
                FormField::EndDate,
                FormField::Radius
            ]
        );
        s.draft.set_repetition(Repetition::Weekly);
        s.draft.set_all_day(false);
        assert_eq!(
            visible_fields(&s.draft),
            vec![
                FormField::Repetition,
                FormField::AllDay,
                FormField::Duration,
                FormField::Days,
                FormField::Time,
                FormField::Radius
            ]
        );
    }

    #[test]
    fn test_focus_moves_through_visible_fields() {
        let mut s = state();
        s.focus_previous();
        assert_eq!(s.focus, FormField::Repetition);
        for _ in 0..10 {
            s.focus_next();
        }
        assert_eq!(s.focus, FormField::Radius);
        s.set_focus(FormField::Time);
        assert_eq!(s.focus, FormField::Radius, "hidden field cannot take focus");
    }

    #[test]
    fn test_adjust_repetition_cycles_and_recomputes_days() {
        let mut s = state();
        s.adjust(1);
        assert_eq!(s.draft.repetition(), Repetition::Daily);
        s.adjust(1);
        assert_eq!(s.draft.repetition(), Repetition::Werktags);
        assert_eq!(s.draft.selected_days(), WeekdaySet::WORKDAYS);
        s.adjust(-1);
        assert!(s.draft.selected_days().is_empty());
    }

    #[test]
    fn test_adjust_steps() {
        let mut s = state();
        s.focus = FormField::Duration;
        s.adjust(-1);
        assert_eq!(s.draft.duration().minutes(), 0);
        s.adjust(1);
        assert_eq!(s.draft.duration().minutes(), 1);

        s.focus = FormField::Radius;
        s.adjust(1);
        assert_eq!(s.draft.radius().meters(), 105);
        for _ in 0..100 {
            s.adjust(1);
        }
        assert_eq!(s.draft.radius().meters(), 200);

        s.focus = FormField::StartDate;
        s.adjust(-1);
        assert_eq!(s.field_text(FormField::StartDate), "2025-02-15");

        s.draft.set_all_day(false);
        s.focus = FormField::Time;
        s.adjust(1);
        assert_eq!(s.field_text(FormField::Time), "15:05");
    }

    #[test]
    fn test_time_wraps_around_midnight() {
        let mut s = state();
        s.draft.set_all_day(false);
        s.draft.set_time(parse_time("00:00").unwrap());
        s.focus = FormField::Time;
        s.adjust(-1);
        assert_eq!(s.field_text(FormField::Time), "23:55");
    }

    #[test]
    fn test_hiding_focused_field_resets_focus() {
        let mut s = state();
        s.draft.set_all_day(false);
        s.focus = FormField::Time;
        s.draft.set_all_day(true);
        s.ensure_focus_visible();
        assert_eq!(s.focus, FormField::Repetition);
    }

    #[test]
    fn test_day_cursor_and_toggle() {
        let mut s = state();
        s.draft.set_repetition(Repetition::Biweekly);
        s.focus = FormField::Days;
        s.adjust(-1);
        assert_eq!(s.day_cursor, Weekday::So);
        s.toggle();
        assert!(s.draft.selected_days().contains(Weekday::So));
        s.toggle();
        assert!(s.draft.selected_days().is_empty());

        s.toggle_day(Weekday::Mi);
        assert!(s.draft.selected_days().contains(Weekday::Mi));
    }

    #[test]
    fn test_apply_edit() {
        let mut s = state();
        assert!(s.apply_edit(FormField::Radius, "999").is_ok());
        assert_eq!(s.draft.radius().meters(), 200);
        assert!(s.apply_edit(FormField::Radius, "3").is_ok());
        assert_eq!(s.draft.radius().meters(), 15);

        assert!(s.apply_edit(FormField::StartDate, "2025-03-01").is_ok());
        assert_eq!(s.field_text(FormField::StartDate), "2025-03-01");
        assert!(s.apply_edit(FormField::StartDate, "March 1st").is_err());
        assert_eq!(s.field_text(FormField::StartDate), "2025-03-01");

        assert!(s.apply_edit(FormField::Duration, "-5").is_err());
        assert_eq!(s.draft.duration().minutes(), 0);
    }

    #[test]
    fn test_begin_edit_only_for_text_fields() {
        let mut s = state();
        assert!(!s.begin_edit());
        assert!(!s.modal.show);
        s.focus = FormField::Duration;
        assert!(s.begin_edit());
        assert!(s.modal.show);
        assert_eq!(s.modal.buffer, "0");
    }

    #[test]
    fn test_save_selects_and_keeps_draft() {
        let mut s = state();
        s.draft.set_repetition(Repetition::Weekly);
        let before = s.draft.clone();
        assert_eq!(s.save(), 0);
        assert_eq!(s.save(), 1);
        assert_eq!(s.list_state.selected(), Some(1));
        assert_eq!(s.draft, before);
    }

    #[test]
    fn test_remove_selected_adjusts_selection() {
        let mut s = state();
        assert_eq!(s.remove_selected(), None);
        s.save();
        s.save();
        s.save();
        s.select_saved(2);
        assert_eq!(s.remove_selected(), Some(2));
        assert_eq!(s.list_state.selected(), Some(1));
        s.select_saved(0);
        assert_eq!(s.remove_selected(), Some(0));
        assert_eq!(s.list_state.selected(), Some(0));
        assert_eq!(s.remove_selected(), Some(0));
        assert_eq!(s.list_state.selected(), None);
        assert!(s.saved.is_empty());
    }

    #[test]
    fn test_center_on_marker() {
        let mut s = state();
        s.set_position(LatLng::new(51.01, 7.02));
        s.pan(1, 1);
        s.center_on_marker();
        assert_eq!(s.viewport.center(), LatLng::new(51.01, 7.02).normalized());
    }
}
