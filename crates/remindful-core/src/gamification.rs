//! Points, levels, streaks, and achievements.
//!
//! Pure state transitions over `UserStats` and the unlocked-achievement
//! list; persistence is the caller's concern. Level is always derived
//! from points (`points / 100 + 1`). Achievement thresholds are compared
//! with equality, so an award fires only at the instant a counter passes
//! through its threshold, and an unlocked id is never re-evaluated.

use chrono::{DateTime, Utc};

use crate::events::GameEvent;
use crate::model::{AchievementRecord, Priority, User, UserStats};

/// Points needed per level.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Bonus awarded the first time the daily water goal is reached.
pub const WATER_GOAL_BONUS: u32 = 10;

/// A fixed achievement definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// The fixed achievement catalog.
pub const ACHIEVEMENTS: [Achievement; 7] = [
    Achievement {
        id: "first_task",
        name: "Getting Started",
        description: "Complete your first task",
        icon: "🎯",
    },
    Achievement {
        id: "water_week",
        name: "Hydration Hero",
        description: "Reach water goal for 7 days",
        icon: "💧",
    },
    Achievement {
        id: "streak_7",
        name: "Week Warrior",
        description: "Maintain a 7-day streak",
        icon: "🔥",
    },
    Achievement {
        id: "streak_30",
        name: "Month Master",
        description: "Maintain a 30-day streak",
        icon: "👑",
    },
    Achievement {
        id: "complete_100",
        name: "Century Club",
        description: "Complete 100 tasks",
        icon: "💯",
    },
    Achievement {
        id: "level_5",
        name: "Rising Star",
        description: "Reach Level 5",
        icon: "⭐",
    },
    Achievement {
        id: "level_10",
        name: "Health Champion",
        description: "Reach Level 10",
        icon: "🏆",
    },
];

/// Look up a catalog entry by id.
pub fn catalog_entry(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Level for a point total: 0..=99 is level 1, 100..=199 level 2, and so on.
pub fn level_for_points(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

/// Add points and re-derive the level. Returns a `LevelUp` when the level
/// increased.
pub fn add_points(stats: &mut UserStats, amount: u32) -> Option<GameEvent> {
    stats.points += amount;
    let new_level = level_for_points(stats.points);
    if new_level > stats.level {
        stats.level = new_level;
        Some(GameEvent::LevelUp { level: new_level })
    } else {
        None
    }
}

/// Apply a false-to-true completion transition: award priority points and
/// bump the completion counters. Streak only ever increments here.
pub fn on_completion(stats: &mut UserStats, priority: Priority) -> Vec<GameEvent> {
    let amount = priority.points();
    let mut events = Vec::new();
    if let Some(level_up) = add_points(stats, amount) {
        events.push(level_up);
    }
    events.push(GameEvent::PointsAwarded {
        amount,
        total: stats.points,
    });
    stats.total_completed += 1;
    stats.streak += 1;
    events
}

/// Achievements newly earned at the current counter values. Thresholds
/// use equality: a counter that already moved past its threshold without
/// being observed does not award retroactively (upstream behavior).
pub fn check_achievements(
    stats: &UserStats,
    unlocked: &[AchievementRecord],
) -> Vec<&'static Achievement> {
    let has = |id: &str| unlocked.iter().any(|a| a.id == id);
    ACHIEVEMENTS
        .iter()
        .filter(|achievement| {
            if has(achievement.id) {
                return false;
            }
            match achievement.id {
                "first_task" => stats.total_completed == 1,
                "complete_100" => stats.total_completed == 100,
                "streak_7" => stats.streak == 7,
                "streak_30" => stats.streak == 30,
                "level_5" => stats.level == 5,
                "level_10" => stats.level == 10,
                "water_week" => stats.water_days == 7,
                _ => false,
            }
        })
        .collect()
}

/// Record an unlock on the user. An id already present is left alone.
pub fn unlock(user: &mut User, achievement: &Achievement, now: DateTime<Utc>) -> Option<GameEvent> {
    if user.achievements.iter().any(|a| a.id == achievement.id) {
        return None;
    }
    user.achievements.push(AchievementRecord {
        id: achievement.id.to_string(),
        name: achievement.name.to_string(),
        description: achievement.description.to_string(),
        icon: achievement.icon.to_string(),
        unlocked_at: now,
    });
    Some(GameEvent::AchievementUnlocked {
        id: achievement.id.to_string(),
        name: achievement.name.to_string(),
    })
}

/// Full completion flow: counters, points, level, newly earned
/// achievements. Returns every resulting event in order.
pub fn complete_reminder(user: &mut User, priority: Priority, now: DateTime<Utc>) -> Vec<GameEvent> {
    let mut events = on_completion(&mut user.stats, priority);
    let earned: Vec<_> = check_achievements(&user.stats, &user.achievements)
        .into_iter()
        .copied()
        .collect();
    for achievement in &earned {
        if let Some(event) = unlock(user, achievement, now) {
            events.push(event);
        }
    }
    events
}

/// Add one glass of water, capped at twice the goal. Reaching the goal
/// awards a one-time bonus for the day and counts toward the
/// water_week achievement.
pub fn add_water(user: &mut User, now: DateTime<Utc>) -> Vec<GameEvent> {
    let stats = &mut user.stats;
    if stats.water_intake >= stats.water_goal * 2 {
        return Vec::new();
    }

    let was_below_goal = stats.water_intake < stats.water_goal;
    stats.water_intake += 1;

    let mut events = Vec::new();
    if was_below_goal && stats.water_intake >= stats.water_goal {
        events.push(GameEvent::WaterGoalReached {
            intake: stats.water_intake,
            goal: stats.water_goal,
        });
        stats.water_days += 1;
        if let Some(level_up) = add_points(stats, WATER_GOAL_BONUS) {
            events.push(level_up);
        }
        let earned: Vec<_> = check_achievements(&user.stats, &user.achievements)
            .into_iter()
            .copied()
            .collect();
        for achievement in &earned {
            if let Some(event) = unlock(user, achievement, now) {
                events.push(event);
            }
        }
    }
    events
}

/// Remove one glass of water, never going below zero.
pub fn remove_water(stats: &mut UserStats) {
    if stats.water_intake > 0 {
        stats.water_intake -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            settings: Default::default(),
            stats: Default::default(),
            achievements: Vec::new(),
            saved_filters: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn level_formula_boundaries() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(99), 1);
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(250), 3);
    }

    proptest! {
        #[test]
        fn level_always_matches_points(points in 0u32..1_000_000) {
            prop_assert_eq!(level_for_points(points), points / 100 + 1);
        }
    }

    #[test]
    fn add_points_emits_level_up_once_per_threshold() {
        let mut stats = UserStats::default();
        assert!(add_points(&mut stats, 99).is_none());
        assert_eq!(
            add_points(&mut stats, 1),
            Some(GameEvent::LevelUp { level: 2 })
        );
        assert!(add_points(&mut stats, 50).is_none());
    }

    #[test]
    fn first_completion_awards_points_streak_and_achievement() {
        let mut user = test_user();
        let events = complete_reminder(&mut user, Priority::High, Utc::now());

        assert_eq!(user.stats.points, 15);
        assert_eq!(user.stats.total_completed, 1);
        assert_eq!(user.stats.streak, 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::AchievementUnlocked { id, .. } if id == "first_task")));
    }

    #[test]
    fn achievement_unlocks_at_most_once() {
        let mut user = test_user();
        let first = catalog_entry("first_task").unwrap();
        assert!(unlock(&mut user, first, Utc::now()).is_some());
        assert!(unlock(&mut user, first, Utc::now()).is_none());
        assert_eq!(
            user.achievements
                .iter()
                .filter(|a| a.id == "first_task")
                .count(),
            1
        );
    }

    #[test]
    fn streak_threshold_is_exact() {
        let mut stats = UserStats::default();
        stats.streak = 7;
        let earned = check_achievements(&stats, &[]);
        assert!(earned.iter().any(|a| a.id == "streak_7"));

        // Past the threshold without being observed: no retroactive award.
        stats.streak = 8;
        let earned = check_achievements(&stats, &[]);
        assert!(!earned.iter().any(|a| a.id == "streak_7"));
    }

    #[test]
    fn level_5_unlocks_on_level_up() {
        let mut user = test_user();
        user.stats.points = 390;
        user.stats.level = 4;
        user.stats.total_completed = 40;
        user.stats.streak = 40;
        let events = complete_reminder(&mut user, Priority::Medium, Utc::now());

        assert_eq!(user.stats.level, 5);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::AchievementUnlocked { id, .. } if id == "level_5")));
    }

    #[test]
    fn water_caps_at_twice_goal() {
        let mut user = test_user();
        for _ in 0..20 {
            add_water(&mut user, Utc::now());
        }
        assert_eq!(user.stats.water_intake, 16);

        // 17th add is a no-op.
        assert!(add_water(&mut user, Utc::now()).is_empty());
        assert_eq!(user.stats.water_intake, 16);
    }

    #[test]
    fn water_goal_bonus_awarded_once_per_crossing() {
        let mut user = test_user();
        let mut bonus_events = 0;
        for _ in 0..16 {
            let events = add_water(&mut user, Utc::now());
            bonus_events += events
                .iter()
                .filter(|e| matches!(e, GameEvent::WaterGoalReached { .. }))
                .count();
        }
        assert_eq!(bonus_events, 1);
        assert_eq!(user.stats.points, WATER_GOAL_BONUS);
        assert_eq!(user.stats.water_days, 1);
    }

    #[test]
    fn water_week_unlocks_on_seventh_goal_day() {
        let mut user = test_user();
        user.stats.water_days = 6;
        user.stats.water_intake = 7;
        let events = add_water(&mut user, Utc::now());

        assert_eq!(user.stats.water_days, 7);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::AchievementUnlocked { id, .. } if id == "water_week")));
    }

    #[test]
    fn remove_water_floors_at_zero() {
        let mut stats = UserStats::default();
        remove_water(&mut stats);
        assert_eq!(stats.water_intake, 0);
        stats.water_intake = 2;
        remove_water(&mut stats);
        assert_eq!(stats.water_intake, 1);
    }
}
