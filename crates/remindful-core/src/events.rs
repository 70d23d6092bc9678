use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ReminderId;

/// State changes the gamification engine reports back to the caller.
/// The enclosing application turns these into speech and UI feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PointsAwarded {
        amount: u32,
        total: u32,
    },
    LevelUp {
        level: u32,
    },
    AchievementUnlocked {
        id: String,
        name: String,
    },
    WaterGoalReached {
        intake: u32,
        goal: u32,
    },
}

/// A reminder coming due, emitted by the scheduler tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireEvent {
    pub reminder_id: ReminderId,
    pub name: String,
    pub at: DateTime<Utc>,
}
