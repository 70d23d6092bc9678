//! Reminder list filtering.
//!
//! A `ReminderFilter` is a conjunction of optional predicates; an unset
//! field matches everything. Filters serialize as JSON so presets can be
//! saved on the user record.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{Priority, Reminder, ReminderKind};

/// Completion-status predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Completed,
    Pending,
}

/// Relative date window, evaluated against a caller-supplied "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    Today,
    PastWeek,
}

/// Composable reminder predicate. All set fields must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReminderKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<DateWindow>,
    /// Case-insensitive substring match on the reminder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ReminderFilter {
    /// Whether a reminder passes every set predicate.
    pub fn apply(&self, reminder: &Reminder, today: NaiveDate) -> bool {
        if let Some(kind) = self.kind {
            if reminder.kind != kind {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if reminder.priority != priority {
                return false;
            }
        }
        if let Some(status) = self.status {
            let want_completed = status == StatusFilter::Completed;
            if reminder.completed != want_completed {
                return false;
            }
        }
        if let Some(window) = self.window {
            // Daily and undated reminders are relevant on any day.
            let date = match reminder.date {
                Some(date) if !reminder.is_daily => date,
                _ => today,
            };
            let in_window = match window {
                DateWindow::Today => date == today,
                DateWindow::PastWeek => date <= today && date >= today - Duration::days(7),
            };
            if !in_window {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !reminder.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// The subset of `reminders` passing the filter, in input order.
    pub fn matching<'a>(&self, reminders: &'a [Reminder], today: NaiveDate) -> Vec<&'a Reminder> {
        reminders
            .iter()
            .filter(|r| self.apply(r, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reminder(name: &str, kind: ReminderKind, priority: Priority, completed: bool) -> Reminder {
        Reminder {
            id: 1,
            user_id: 1,
            name: name.to_string(),
            time: "09:00".to_string(),
            date: None,
            is_daily: true,
            kind,
            priority,
            notes: String::new(),
            completed,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ReminderFilter::default();
        let r = reminder("Aspirin", ReminderKind::Medicine, Priority::High, false);
        assert!(filter.apply(&r, today()));
    }

    #[test]
    fn predicates_are_conjunctive() {
        let filter = ReminderFilter {
            kind: Some(ReminderKind::Task),
            status: Some(StatusFilter::Pending),
            ..Default::default()
        };
        let matching = reminder("Pay rent", ReminderKind::Task, Priority::Medium, false);
        let wrong_kind = reminder("Aspirin", ReminderKind::Medicine, Priority::Medium, false);
        let wrong_status = reminder("Pay rent", ReminderKind::Task, Priority::Medium, true);

        assert!(filter.apply(&matching, today()));
        assert!(!filter.apply(&wrong_kind, today()));
        assert!(!filter.apply(&wrong_status, today()));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filter = ReminderFilter {
            search: Some("RENT".to_string()),
            ..Default::default()
        };
        let r = reminder("Pay rent", ReminderKind::Task, Priority::Low, false);
        assert!(filter.apply(&r, today()));
        let r = reminder("Walk dog", ReminderKind::Exercise, Priority::Low, false);
        assert!(!filter.apply(&r, today()));
    }

    #[test]
    fn date_window_past_week() {
        let filter = ReminderFilter {
            window: Some(DateWindow::PastWeek),
            ..Default::default()
        };
        let mut dated = reminder("Dentist", ReminderKind::Task, Priority::High, false);
        dated.is_daily = false;

        dated.date = Some(today() - Duration::days(3));
        assert!(filter.apply(&dated, today()));

        dated.date = Some(today() - Duration::days(8));
        assert!(!filter.apply(&dated, today()));

        // Future dates fall outside a past window.
        dated.date = Some(today() + Duration::days(1));
        assert!(!filter.apply(&dated, today()));
    }

    #[test]
    fn daily_reminders_match_any_window() {
        let filter = ReminderFilter {
            window: Some(DateWindow::Today),
            ..Default::default()
        };
        let r = reminder("Aspirin", ReminderKind::Medicine, Priority::High, false);
        assert!(filter.apply(&r, today()));
    }

    #[test]
    fn filter_round_trips_through_json() {
        let filter = ReminderFilter {
            kind: Some(ReminderKind::Exercise),
            priority: Some(Priority::Low),
            status: Some(StatusFilter::Completed),
            window: Some(DateWindow::PastWeek),
            search: Some("walk".to_string()),
        };
        let json = serde_json::to_string(&filter).unwrap();
        let back: ReminderFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, Some(ReminderKind::Exercise));
        assert_eq!(back.window, Some(DateWindow::PastWeek));
        assert_eq!(back.search.as_deref(), Some("walk"));
    }
}
