//! Read-only summary over a user's reminder set.

use serde::Serialize;

use crate::model::{AchievementRecord, Priority, Reminder, ReminderKind, UserStats};

/// Reminder counts per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindBreakdown {
    pub medicine: usize,
    pub task: usize,
    pub exercise: usize,
}

/// Reminder counts per priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Aggregated view of a user's reminders and progress.
#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share as a percentage, one decimal place. Zero for an
    /// empty reminder set.
    pub completion_rate: f64,
    pub by_kind: KindBreakdown,
    pub by_priority: PriorityBreakdown,
    pub stats: UserStats,
    pub achievements: Vec<AchievementRecord>,
}

/// Build the summary. Pure; no I/O.
pub fn summarize(
    reminders: &[Reminder],
    stats: &UserStats,
    achievements: &[AchievementRecord],
) -> Analytics {
    let total = reminders.len();
    let completed = reminders.iter().filter(|r| r.completed).count();

    let mut by_kind = KindBreakdown::default();
    let mut by_priority = PriorityBreakdown::default();
    for reminder in reminders {
        match reminder.kind {
            ReminderKind::Medicine => by_kind.medicine += 1,
            ReminderKind::Task => by_kind.task += 1,
            ReminderKind::Exercise => by_kind.exercise += 1,
        }
        match reminder.priority {
            Priority::High => by_priority.high += 1,
            Priority::Medium => by_priority.medium += 1,
            Priority::Low => by_priority.low += 1,
        }
    }

    let completion_rate = if total == 0 {
        0.0
    } else {
        (completed as f64 / total as f64 * 1000.0).round() / 10.0
    };

    Analytics {
        total,
        completed,
        pending: total - completed,
        completion_rate,
        by_kind,
        by_priority,
        stats: stats.clone(),
        achievements: achievements.to_vec(),
    }
}
