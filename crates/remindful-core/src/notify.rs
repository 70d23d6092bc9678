//! Collaborator interfaces the scheduler calls out to.
//!
//! Implemented outside the core (console, desktop, speech synthesis).
//! All three are fire-and-forget: no return value is consumed and
//! failures are ignored.

use crate::model::Reminder;

/// Delivers a user-visible alert for a due reminder.
pub trait Notifier {
    fn show(&mut self, reminder: &Reminder);
}

/// Best-effort voice readout.
pub trait Announcer {
    fn speak(&mut self, text: &str);
}

/// Best-effort audio cue.
pub trait ToneEmitter {
    fn play(&mut self, sound_profile: &str, volume: u32);
}

/// Drops everything. Useful where a collaborator is not wired up.
pub struct NullSink;

impl Notifier for NullSink {
    fn show(&mut self, _reminder: &Reminder) {}
}

impl Announcer for NullSink {
    fn speak(&mut self, _text: &str) {}
}

impl ToneEmitter for NullSink {
    fn play(&mut self, _sound_profile: &str, _volume: u32) {}
}
