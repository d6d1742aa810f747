use log::info;

use crate::trigger::GeolocationConfig;

/// Saved triggers in insertion order. Entries are only appended or removed.
#[derive(Debug, Clone, Default)]
pub struct SavedConfigs {
    entries: Vec<GeolocationConfig>,
}

impl SavedConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trigger and returns its index.
    pub fn push(&mut self, config: GeolocationConfig) -> usize {
        self.entries.push(config);
        let index = self.entries.len() - 1;
        info!(
            "Saved trigger #{} ({}, radius {} m)",
            index + 1,
            config.repetition(),
            config.radius.meters()
        );
        index
    }

    /// Removes the entry at `index`, keeping the others in order. Out of range
    /// is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<GeolocationConfig> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        info!("Removed trigger #{}", index + 1);
        Some(removed)
    }

    pub fn get(&self, index: usize) -> Option<&GeolocationConfig> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeolocationConfig> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::{DurationMinutes, LatLng, Radius, Schedule, Timing};
    use chrono::NaiveDate;

    fn config(tag: u32) -> GeolocationConfig {
        let date = NaiveDate::from_ymd_opt(2025, 2, 16).unwrap();
        GeolocationConfig {
            schedule: Schedule::Once {
                start_date: date,
                end_date: date,
            },
            timing: Timing::AllDay,
            position: LatLng::new(51.0, 7.0),
            radius: Radius::new(100),
            duration: DurationMinutes(tag),
        }
    }

    fn tags(saved: &SavedConfigs) -> Vec<u32> {
        saved.iter().map(|c| c.duration.minutes()).collect()
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut saved = SavedConfigs::new();
        assert_eq!(saved.push(config(1)), 0);
        assert_eq!(saved.push(config(2)), 1);
        assert_eq!(saved.push(config(1)), 2);
        assert_eq!(tags(&saved), vec![1, 2, 1]);
    }

    #[test]
    fn test_remove_every_index_preserves_order() {
        let n = 5;
        for i in 0..n {
            let mut saved = SavedConfigs::new();
            for tag in 0..n as u32 {
                saved.push(config(tag));
            }
            let removed = saved.remove(i).unwrap();
            assert_eq!(removed.duration.minutes(), i as u32);
            assert_eq!(saved.len(), n - 1);
            let expected: Vec<u32> = (0..n as u32).filter(|t| *t != i as u32).collect();
            assert_eq!(tags(&saved), expected);
        }
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut saved = SavedConfigs::new();
        saved.push(config(1));
        assert!(saved.remove(1).is_none());
        assert_eq!(saved.len(), 1);
        assert!(SavedConfigs::new().remove(0).is_none());
    }
}
