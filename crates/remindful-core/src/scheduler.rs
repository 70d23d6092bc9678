//! Tick-driven reminder matcher.
//!
//! The scheduler owns no threads: the caller invokes `tick()` on a fixed
//! interval (default 30 seconds) with the current reminder set, the same
//! way the original polls rather than scheduling one timer per reminder.
//! The tradeoff is up-to-tick-interval latency on firing; the gain is
//! tolerance of clock drift.
//!
//! Per-reminder states:
//!
//! ```text
//! Idle -> Due -> Fired -> (Snoozed -> Due) | Completed
//! ```
//!
//! Owned state is the per-day dedupe set `(reminder_id, date)` and the
//! snooze table `reminder_id -> suppress_until`. Both are in-memory only:
//! snoozes and dedupe keys are deliberately session-scoped and do not
//! survive a restart.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::debug;

use crate::events::FireEvent;
use crate::model::{Reminder, ReminderId, UserSettings};
use crate::notify::{Announcer, Notifier, ToneEmitter};

/// Default polling interval in seconds.
pub const DEFAULT_TICK_SECS: u64 = 30;

/// Periodic matcher that decides when a reminder fires.
#[derive(Default)]
pub struct Scheduler {
    /// `(reminder, day)` pairs already fired, preventing duplicate alerts
    /// within one calendar day.
    fired_today: HashSet<(ReminderId, NaiveDate)>,
    /// Suppression deadline per snoozed reminder. Re-snoozing replaces
    /// the entry; timers never stack.
    snoozes: HashMap<ReminderId, DateTime<Local>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress a reminder until `now + minutes`. The reminder re-fires
    /// on the first tick after expiry if it is still incomplete.
    pub fn snooze(&mut self, id: ReminderId, minutes: i64, now: DateTime<Local>) {
        let until = now + chrono::Duration::minutes(minutes);
        self.snoozes.insert(id, until);
        debug!(reminder_id = id, minutes, "snoozed reminder");
    }

    /// Forget the dedupe key for a reminder that was just completed, so
    /// un-completing it later re-arms the alert for the same day.
    pub fn note_completion(&mut self, id: ReminderId, today: NaiveDate) {
        self.fired_today.remove(&(id, today));
    }

    fn is_snoozed(&self, id: ReminderId, now: DateTime<Local>) -> bool {
        matches!(self.snoozes.get(&id), Some(until) if *until > now)
    }

    /// One scan over the reminder set at wall-clock `now`.
    ///
    /// Expired snoozes are cleared first and their reminders re-fire
    /// immediately when still incomplete. Then every incomplete reminder
    /// whose `time` matches the current HH:MM fires at most once per
    /// calendar day; dated reminders only fire on their date.
    pub fn tick(
        &mut self,
        now: DateTime<Local>,
        reminders: &[Reminder],
        settings: &UserSettings,
        notifier: &mut dyn Notifier,
        announcer: &mut dyn Announcer,
        tone: &mut dyn ToneEmitter,
    ) -> Vec<FireEvent> {
        let today = now.date_naive();
        let current_time = now.format("%H:%M").to_string();
        let mut fired = Vec::new();

        // Keys from previous days can never match again; drop them so the
        // set stays bounded by the reminder count in a long-lived process.
        self.fired_today.retain(|(_, date)| *date == today);

        // Snooze expiries re-check their reminder right away, standing in
        // for the original deferred callback.
        let expired: Vec<ReminderId> = self
            .snoozes
            .iter()
            .filter(|(_, until)| **until <= now)
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            self.snoozes.remove(&id);
            if let Some(reminder) = reminders.iter().find(|r| r.id == id) {
                if !reminder.completed {
                    fired.push(self.fire(reminder, settings, notifier, announcer, tone));
                }
            }
        }

        for reminder in reminders {
            if reminder.completed || reminder.time != current_time {
                continue;
            }
            // A missing date on a non-daily reminder is treated as today.
            if !reminder.is_daily {
                if let Some(date) = reminder.date {
                    if date != today {
                        continue;
                    }
                }
            }
            if self.is_snoozed(reminder.id, now) {
                continue;
            }
            if self.fired_today.insert((reminder.id, today)) {
                fired.push(self.fire(reminder, settings, notifier, announcer, tone));
            }
        }

        fired
    }

    fn fire(
        &self,
        reminder: &Reminder,
        settings: &UserSettings,
        notifier: &mut dyn Notifier,
        announcer: &mut dyn Announcer,
        tone: &mut dyn ToneEmitter,
    ) -> FireEvent {
        debug!(reminder_id = reminder.id, name = %reminder.name, "reminder fired");
        notifier.show(reminder);
        announcer.speak(&format!("Time for: {}", reminder.name));
        if settings.notification_sound != "none" {
            tone.play(&settings.notification_sound, settings.notification_volume);
        }
        FireEvent {
            reminder_id: reminder.id,
            name: reminder.name.clone(),
            at: Utc::now(),
        }
    }
}
